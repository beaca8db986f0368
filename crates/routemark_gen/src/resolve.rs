//! Type and import resolution.
//!
//! Spells handler types so that they are nameable from the generated module
//! and collects the `use` items the generated file needs. The import table is
//! shared by the whole run and keyed by the name each import brings into
//! scope, so a name imported by several files is emitted once.
//!
//! A bare name that is neither declared nor imported by name in its file may
//! come from one of the file's glob imports. Which one cannot be known without
//! name resolution, so every glob of that file is carried into the generated
//! module, where the name then resolves the same way.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, bail};
use tracing::debug;

use crate::imports::{ImportRef, TypePath, rebase};
use crate::parser::ParsedFile;

/// Names a plain path can use without any import.
const BUILTIN_NAMES: &[&str] = &[
    "Self", "String", "bool", "char", "str", "f32", "f64", "i8", "i16", "i32", "i64", "i128",
    "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

#[derive(Debug, Default)]
pub struct Resolver {
    imports: BTreeMap<String, ImportRef>,
    globs: BTreeSet<TypePath>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spelling of a request or context type written in `file`.
    ///
    /// A path whose first segment was imported by `file` keeps its spelling
    /// and the import is recorded. Other paths are rebased.
    pub fn resolve_type(&mut self, file: &ParsedFile, path: &syn::Path) -> Result<TypePath> {
        let path = TypePath::from_syn(path);
        if !path.leading_colon
            && let Some(import) = file.uses.names.get(path.first())
        {
            self.add_import(path.first(), import)?;
            return Ok(path);
        }
        self.add_globs(file, &path);
        Ok(rebase(&path, &file.scope, &file.local_items))
    }

    /// Spelling of the receiver type of an `impl` block in `file`.
    ///
    /// Receivers become the `impl` target of the generated code, so imported
    /// receivers are spelled out in full instead of adding an import.
    pub fn resolve_receiver(&mut self, file: &ParsedFile, path: &syn::Path) -> TypePath {
        let path = TypePath::from_syn(path);
        if !path.leading_colon
            && let Some(import) = file.uses.names.get(path.first())
        {
            let mut full = import.path.clone();
            full.segments.extend_from_slice(&path.segments[1..]);
            return full;
        }
        self.add_globs(file, &path);
        rebase(&path, &file.scope, &file.local_items)
    }

    /// Carry the globs of `file` when `path` is a bare name that only a glob
    /// can bring into scope.
    fn add_globs(&mut self, file: &ParsedFile, path: &TypePath) {
        let [name] = path.segments.as_slice() else {
            return;
        };
        if path.leading_colon
            || file.uses.globs.is_empty()
            || file.local_items.contains(name)
            || BUILTIN_NAMES.contains(&name.as_str())
        {
            return;
        }
        debug!(
            file = %file.path.display(),
            name = %name,
            globs = file.uses.globs.len(),
            "name may come from a glob import"
        );
        self.globs.extend(file.uses.globs.iter().cloned());
    }

    fn add_import(&mut self, name: &str, import: &ImportRef) -> Result<()> {
        match self.imports.get(name) {
            Some(existing) if existing != import => bail!(
                "conflicting imports for `{name}`: `use {existing};` and `use {import};`"
            ),
            Some(_) => Ok(()),
            None => {
                self.imports.insert(name.to_string(), import.clone());
                Ok(())
            }
        }
    }

    /// Glob imports collected so far.
    pub fn globs(&self) -> &BTreeSet<TypePath> {
        &self.globs
    }

    /// Imports collected so far, sorted by name.
    pub fn into_imports(self) -> BTreeMap<String, ImportRef> {
        self.imports
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_helpers::parse_test_file;

    const HELLO: &str = r"
        use routemark::DefaultContext;
        use crate::pkg1;
        use crate::models::{Req as Request};
        use super::svc::Svc;
        pub struct Local;
        mod nested;
    ";

    fn path(text: &str) -> syn::Path {
        syn::parse_str(text).unwrap()
    }

    #[rstest]
    #[case("DefaultContext", "DefaultContext")]
    #[case("pkg1::HelloRequest", "pkg1::HelloRequest")]
    #[case("Request", "Request")]
    #[case("Local", "super::hello::Local")]
    #[case("nested::Thing", "super::hello::nested::Thing")]
    #[case("self::Local", "super::hello::Local")]
    #[case("super::Shared", "super::Shared")]
    #[case("crate::api::Req", "crate::api::Req")]
    #[case("::routemark::DefaultContext", "::routemark::DefaultContext")]
    #[case("serde_json::Value", "serde_json::Value")]
    #[case("String", "String")]
    fn test_resolve_type(#[case] input: &str, #[case] expected: &str) {
        let file = parse_test_file("hello.rs", HELLO);
        let mut resolver = Resolver::new();
        let resolved = resolver.resolve_type(&file, &path(input)).unwrap();
        assert_eq!(resolved.to_string(), expected);
    }

    #[test]
    fn test_imports_are_recorded_once() {
        let file = parse_test_file("hello.rs", HELLO);
        let mut resolver = Resolver::new();
        for text in ["pkg1::A", "pkg1::B", "DefaultContext", "Request", "Local", "String"] {
            resolver.resolve_type(&file, &path(text)).unwrap();
        }
        let imports: Vec<String> = resolver
            .into_imports()
            .values()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            imports,
            [
                "routemark::DefaultContext",
                "crate::models::Req as Request",
                "crate::pkg1",
            ]
        );
    }

    #[test]
    fn test_same_import_from_two_files() {
        let a = parse_test_file("a.rs", "use crate::pkg1;");
        let b = parse_test_file("b.rs", "use crate::{pkg1};");
        let mut resolver = Resolver::new();
        resolver.resolve_type(&a, &path("pkg1::A")).unwrap();
        resolver.resolve_type(&b, &path("pkg1::B")).unwrap();
        assert_eq!(resolver.into_imports().len(), 1);
    }

    #[test]
    fn test_conflicting_imports_fail() {
        let a = parse_test_file("a.rs", "use crate::v1::models;");
        let b = parse_test_file("b.rs", "use crate::v2::models;");
        let mut resolver = Resolver::new();
        resolver.resolve_type(&a, &path("models::Req")).unwrap();
        let err = resolver.resolve_type(&b, &path("models::Req")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "conflicting imports for `models`: `use crate::v1::models;` and `use crate::v2::models;`"
        );
    }

    #[rstest]
    #[case("mod.rs", "Svc", "super::svc::Svc")]
    #[case("hello.rs", "Svc", "super::svc::Svc")]
    #[case("hello.rs", "Local", "super::hello::Local")]
    #[case("mod.rs", "Local", "super::Local")]
    #[case("hello.rs", "crate::api::Svc", "crate::api::Svc")]
    fn test_resolve_receiver(#[case] file_name: &str, #[case] input: &str, #[case] expected: &str) {
        let source = if file_name == "mod.rs" {
            "use self::svc::Svc; pub struct Local; mod svc;"
        } else {
            HELLO
        };
        let file = parse_test_file(file_name, source);
        let mut resolver = Resolver::new();
        assert_eq!(resolver.resolve_receiver(&file, &path(input)).to_string(), expected);
        assert!(resolver.globs().is_empty());
        assert!(resolver.into_imports().is_empty());
    }

    const GLOBBED: &str = r"
        use super::models::*;
        use crate::shared::*;
        use routemark::DefaultContext;
        pub struct Local;
    ";

    #[rstest]
    #[case("HelloRequest", true)]
    #[case("Svc", true)]
    #[case("Local", false)]
    #[case("DefaultContext", false)]
    #[case("String", false)]
    #[case("models::HelloRequest", false)]
    #[case("::models::HelloRequest", false)]
    fn test_bare_names_carry_globs(#[case] input: &str, #[case] carried: bool) {
        let file = parse_test_file("hello.rs", GLOBBED);
        let mut resolver = Resolver::new();
        resolver.resolve_type(&file, &path(input)).unwrap();
        let globs: Vec<String> = resolver.globs().iter().map(ToString::to_string).collect();
        if carried {
            assert_eq!(globs, ["crate::shared", "super::models"]);
        } else {
            assert!(globs.is_empty());
        }
    }

    #[test]
    fn test_glob_receiver_keeps_its_name() {
        let file = parse_test_file("hello.rs", "use super::*;");
        let mut resolver = Resolver::new();
        let receiver = resolver.resolve_receiver(&file, &path("Svc"));
        assert_eq!(receiver.to_string(), "Svc");
        let globs: Vec<String> = resolver.globs().iter().map(ToString::to_string).collect();
        assert_eq!(globs, ["super"]);
    }

    #[test]
    fn test_file_without_globs_adds_none() {
        let file = parse_test_file("hello.rs", HELLO);
        let mut resolver = Resolver::new();
        resolver.resolve_type(&file, &path("Unknown")).unwrap();
        assert!(resolver.globs().is_empty());
    }
}
