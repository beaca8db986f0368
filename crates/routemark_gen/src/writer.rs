//! All-or-nothing output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Write `contents` to `path` through a temporary file in the same directory
/// that is renamed into place, so a failed run never leaves a partial file.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::Builder::new()
        .prefix(".routemark-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file: {}", file.path().display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("Failed to set permissions: {}", file.path().display()))?;
    }
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    info!("output: {}", path.display());
    Ok(())
}
