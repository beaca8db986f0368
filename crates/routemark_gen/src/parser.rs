//! Source parsing for one scanned directory.
//!
//! Every `.rs` file directly inside the directory is parsed with `syn`. Doc
//! comments survive as `#[doc = "..."]` attributes, which is where
//! `@RequestMapping` lives. Alongside the syntax tree each file records its
//! module scope, its flattened `use` table and the names of the items it
//! declares, which is everything type resolution needs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use syn::Item;
use tracing::debug;

use crate::error::syn_error;
use crate::file_utils::{collect_files, package_name};
use crate::imports::{FileUses, collect_uses};

/// Module a scanned file belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScope {
    /// `mod.rs`, `lib.rs` or `main.rs`: the directory module itself.
    Root,
    /// Any other `name.rs`: the child module `name`.
    Child(String),
}

impl FileScope {
    pub fn from_path(path: &Path) -> Self {
        match path.file_stem().and_then(|stem| stem.to_str()) {
            Some("mod" | "lib" | "main") | None => Self::Root,
            Some(stem) => Self::Child(stem.to_string()),
        }
    }

    /// Path of this file's module as seen from the generated sibling module.
    pub fn module_path(&self) -> Vec<String> {
        match self {
            Self::Root => vec!["super".to_string()],
            Self::Child(name) => vec!["super".to_string(), name.clone()],
        }
    }
}

pub struct ParsedFile {
    pub path: PathBuf,
    pub scope: FileScope,
    pub ast: syn::File,
    pub uses: FileUses,
    /// Types, traits and modules declared at the top level of the file.
    pub local_items: BTreeSet<String>,
}

pub struct ParsedPackage {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<ParsedFile>,
}

/// Parse every input file of `dir`. Any unreadable or unparseable file fails
/// the whole package.
pub fn parse_package(dir: &Path, output_file: &str) -> Result<ParsedPackage> {
    let mut files = Vec::new();
    for path in collect_files(dir, output_file)? {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        files.push(parse_source(&path, &source)?);
    }
    debug!(dir = %dir.display(), files = files.len(), "parsed package");
    Ok(ParsedPackage {
        name: package_name(dir),
        dir: dir.to_path_buf(),
        files,
    })
}

/// Parse the contents of one file.
pub fn parse_source(path: &Path, source: &str) -> Result<ParsedFile> {
    let ast = syn::parse_file(source)
        .map_err(|err| syn_error(path, &err))
        .with_context(|| format!("Failed to parse file: {}", path.display()))?;
    let scope = FileScope::from_path(path);
    let local_items = local_items(&ast);
    let uses = collect_uses(&ast, &scope, &local_items);
    Ok(ParsedFile {
        path: path.to_path_buf(),
        scope,
        ast,
        uses,
        local_items,
    })
}

fn local_items(ast: &syn::File) -> BTreeSet<String> {
    ast.items
        .iter()
        .filter_map(|item| match item {
            Item::Struct(item) => Some(&item.ident),
            Item::Enum(item) => Some(&item.ident),
            Item::Union(item) => Some(&item.ident),
            Item::Type(item) => Some(&item.ident),
            Item::Trait(item) => Some(&item.ident),
            Item::Mod(item) => Some(&item.ident),
            _ => None,
        })
        .map(ToString::to_string)
        .collect()
}
