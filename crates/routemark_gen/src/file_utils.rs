use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Collect the `.rs` files directly inside `folder_path`, sorted by name.
///
/// Subdirectories are separate modules and are not descended into. The
/// generator's own output file and test files are left out.
pub fn collect_files(folder_path: &Path, output_file: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)
        .with_context(|| format!("Failed to read directory: {}", folder_path.display()))?
    {
        let entry = entry.with_context(|| "Failed to read directory entry")?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name == output_file || is_test_file(name) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// `tests.rs`, `*_test.rs` and `*_tests.rs`.
pub fn is_test_file(file_name: &str) -> bool {
    let stem = file_name.strip_suffix(".rs").unwrap_or(file_name);
    stem == "tests" || stem.ends_with("_test") || stem.ends_with("_tests")
}

/// Module name of the directory, used in the generated module docs.
pub fn package_name(folder_path: &Path) -> String {
    let canonical = folder_path.canonicalize().unwrap_or_else(|_| folder_path.to_path_buf());
    canonical
        .file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| "crate".to_string(), |name| name.replace('-', "_"))
}
