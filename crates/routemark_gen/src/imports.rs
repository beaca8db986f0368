//! Paths and `use` tables.
//!
//! The generated file is a child module of the scanned directory's module, a
//! sibling of every scanned file except the directory's own `mod.rs` /
//! `lib.rs` / `main.rs`. Paths written in a scanned file are rebased so that
//! they mean the same thing from there.
//!
//! # Key Functions
//!
//! - [`collect_uses`] - Flatten the top-level `use` items of a file, globs included
//! - [`rebase`] - Re-express a path written in a file from the generated module

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use syn::{Item, UseTree};

use crate::parser::FileScope;

/// A path without generic arguments, e.g. `super::hello::HelloRequest`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypePath {
    pub leading_colon: bool,
    pub segments: Vec<String>,
}

impl TypePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            leading_colon: false,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Segment identifiers of `path`; generic arguments are dropped.
    pub fn from_syn(path: &syn::Path) -> Self {
        Self {
            leading_colon: path.leading_colon.is_some(),
            segments: path.segments.iter().map(|seg| seg.ident.to_string()).collect(),
        }
    }

    pub fn first(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Last segment, the name the path refers to.
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    fn prefixed(prefix: Vec<String>, rest: &[String]) -> Self {
        let mut segments = prefix;
        segments.extend_from_slice(rest);
        Self {
            leading_colon: false,
            segments,
        }
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leading_colon {
            f.write_str("::")?;
        }
        f.write_str(&self.segments.join("::"))
    }
}

/// One `use` of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    pub alias: Option<String>,
    pub path: TypePath,
}

impl ImportRef {
    /// Name the import brings into scope.
    pub fn short_name(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| self.path.name())
    }
}

impl fmt::Display for ImportRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} as {alias}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Imports of one file, keyed by the name they bring into scope.
pub type UseTable = BTreeMap<String, ImportRef>;

/// Flattened top-level `use` items of one file.
#[derive(Debug, Default)]
pub struct FileUses {
    pub names: UseTable,
    /// Module paths imported with `*`, rebased like named imports.
    pub globs: BTreeSet<TypePath>,
}

/// Flatten the top-level `use` items of `file`, rebasing each path.
///
/// `as _` imports bring no nameable item into scope and are ignored. When a
/// name is imported twice (e.g. under different `cfg`s) the first import wins.
pub fn collect_uses(file: &syn::File, scope: &FileScope, local_items: &BTreeSet<String>) -> FileUses {
    let mut uses = FileUses::default();
    for item in &file.items {
        let Item::Use(item_use) = item else {
            continue;
        };
        let leading_colon = item_use.leading_colon.is_some();
        let mut found = Vec::new();
        let mut globs = Vec::new();
        flatten(&item_use.tree, &mut Vec::new(), &mut found, &mut globs);
        for (name, mut import) in found {
            import.path.leading_colon = leading_colon;
            import.path = rebase(&import.path, scope, local_items);
            uses.names.entry(name).or_insert(import);
        }
        for mut glob in globs {
            glob.leading_colon = leading_colon;
            uses.globs.insert(rebase(&glob, scope, local_items));
        }
    }
    uses
}

fn flatten(
    tree: &UseTree,
    prefix: &mut Vec<String>,
    out: &mut Vec<(String, ImportRef)>,
    globs: &mut Vec<TypePath>,
) {
    match tree {
        UseTree::Path(use_path) => {
            prefix.push(use_path.ident.to_string());
            flatten(&use_path.tree, prefix, out, globs);
            prefix.pop();
        }
        UseTree::Name(use_name) => {
            let path = if use_name.ident == "self" {
                TypePath::new(prefix.iter().cloned())
            } else {
                TypePath::prefixed(prefix.clone(), &[use_name.ident.to_string()])
            };
            if path.segments.is_empty() {
                return;
            }
            out.push((path.name().to_string(), ImportRef { alias: None, path }));
        }
        UseTree::Rename(use_rename) => {
            if use_rename.rename == "_" {
                return;
            }
            let path = if use_rename.ident == "self" {
                TypePath::new(prefix.iter().cloned())
            } else {
                TypePath::prefixed(prefix.clone(), &[use_rename.ident.to_string()])
            };
            if path.segments.is_empty() {
                return;
            }
            let alias = use_rename.rename.to_string();
            out.push((alias.clone(), ImportRef { alias: Some(alias), path }));
        }
        UseTree::Glob(_) => {
            if !prefix.is_empty() {
                globs.push(TypePath::new(prefix.iter().cloned()));
            }
        }
        UseTree::Group(group) => {
            for tree in &group.items {
                flatten(tree, prefix, out, globs);
            }
        }
    }
}

/// Re-express `path`, written in a file of `scope`, from the generated module.
///
/// - `::x` and `crate::x` are absolute and kept.
/// - `self::x` becomes the file's module path.
/// - `super::x` is kept in a child file; in the directory's own file it
///   climbs one more level.
/// - A path starting with an item declared in the file is qualified with the
///   file's module path.
/// - Anything else names an extern crate or a prelude item and is kept.
pub fn rebase(path: &TypePath, scope: &FileScope, local_items: &BTreeSet<String>) -> TypePath {
    if path.leading_colon {
        return path.clone();
    }
    match path.first() {
        "crate" => path.clone(),
        "self" => TypePath::prefixed(scope.module_path(), &path.segments[1..]),
        "super" => match scope {
            FileScope::Root => TypePath::prefixed(vec!["super".to_string()], &path.segments),
            FileScope::Child(_) => path.clone(),
        },
        first if local_items.contains(first) => TypePath::prefixed(scope.module_path(), &path.segments),
        _ => path.clone(),
    }
}
