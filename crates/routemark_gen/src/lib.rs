//! Routemark Gen - route table generation from `@RequestMapping` doc annotations
//!
//! Scans the `.rs` files of one directory, finds methods whose last doc line
//! carries `@RequestMapping{"method":"GET","path":"/hello"}`, and writes a
//! sibling module (`route__.rs` by default) with one `register_routes` method
//! per receiver type.
//!
//! # Pipeline
//!
//! 1. [`parser`] - parse every file with `syn`, record scopes and `use` tables
//! 2. [`extract`] - find annotated methods with the handler shape
//! 3. [`resolve`] - spell types from the generated module, collect imports
//! 4. [`metadata`] - group by receiver, sort, reject duplicate routes
//! 5. [`render`] - `quote!` + `syn` validation + `prettyplease`
//! 6. [`writer`] - atomic write of the output file
//!
//! # Example
//!
//! ```ignore
//! let path = routemark_gen::generate(&GenerateOptions::new("src/api"))?;
//! ```

mod error;
pub mod extract;
pub mod file_utils;
pub mod imports;
pub mod metadata;
mod method;
pub mod parser;
pub mod render;
pub mod resolve;
mod route;
pub mod signature;
mod test_helpers;
pub mod writer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::error::locate;
use crate::metadata::{GenerationModel, HandlerFact};
use crate::parser::parse_package;
use crate::resolve::Resolver;

/// Default name of the generated file.
pub const DEFAULT_OUTPUT_FILE: &str = "route__.rs";

/// What to scan and where to write.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input_dir: PathBuf,
    /// Bare file name, written inside `input_dir`
    pub output_file: String,
}

impl GenerateOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }

    #[must_use]
    pub fn output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.input_dir.join(&self.output_file)
    }
}

/// Parse, extract, resolve and order the handlers of `options.input_dir`.
pub fn build_model(options: &GenerateOptions) -> Result<GenerationModel> {
    let output_file = &options.output_file;
    let file_name = Path::new(output_file).file_name().and_then(|name| name.to_str());
    if file_name != Some(output_file.as_str()) {
        bail!("Output file must be a plain file name, got `{output_file}`");
    }

    let package = parse_package(&options.input_dir, output_file)?;
    let mut resolver = Resolver::new();
    let mut model = GenerationModel::new(package.name.clone());
    for file in &package.files {
        for candidate in extract::extract(file)? {
            let name = candidate.name;
            let signature = candidate.signature;
            let resolve_context = || {
                format!(
                    "{}: resolving the parameter types of `{name}`",
                    locate(&file.path, name.span())
                )
            };
            let request_type = resolver
                .resolve_type(file, signature.request)
                .with_context(resolve_context)?;
            let context_type = resolver
                .resolve_type(file, signature.context)
                .with_context(resolve_context)?;
            let receiver_type = resolver.resolve_receiver(file, signature.receiver);
            debug!(
                receiver = %receiver_type,
                handler = %name,
                method = %candidate.directive.method,
                path = %candidate.directive.path,
                "found handler"
            );
            model.add_handler(
                receiver_type,
                HandlerFact {
                    name: name.to_string(),
                    request_type,
                    context_type,
                    directive: candidate.directive,
                    is_async: signature.is_async,
                },
            );
        }
    }
    model.globs = resolver.globs().clone();
    model.imports = resolver.into_imports();
    model.finalize()?;
    Ok(model)
}

/// Generate the route file for `options.input_dir` and return its path.
pub fn generate(options: &GenerateOptions) -> Result<PathBuf> {
    let model = build_model(options)?;
    info!(
        package = %model.package_name,
        receivers = model.groups.len(),
        handlers = model.handler_count(),
        "generating routes"
    );
    let source = render::render(&model)?;
    let path = options.output_path();
    writer::write_atomically(&path, &source)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_helpers::{create_test_temp_dir, write_files};

    #[rstest]
    #[case("")]
    #[case("out/route__.rs")]
    #[case("..")]
    fn test_output_file_must_be_a_file_name(#[case] output_file: &str) {
        let dir = create_test_temp_dir();
        let options = GenerateOptions::new(dir.path()).output_file(output_file);
        let err = build_model(&options).unwrap_err();
        assert!(err.to_string().starts_with("Output file must be a plain file name"));
    }

    #[test]
    fn test_options_default_output() {
        let options = GenerateOptions::new("src/api");
        assert_eq!(options.output_path(), Path::new("src/api/route__.rs"));
    }

    #[test]
    fn test_build_model_resolves_types() {
        let dir = create_test_temp_dir();
        write_files(
            dir.path(),
            &[
                ("mod.rs", "mod hello;\npub struct Svc;\n"),
                (
                    "hello.rs",
                    r#"
use routemark::DefaultContext;
use super::Svc;

pub struct HelloRequest;

impl Svc {
    /// @RequestMapping{"method":"GET","path":"/hello"}
    pub async fn hello(&self, req: &HelloRequest, ctx: &DefaultContext) -> Result<(), routemark::Error> {
        Ok(())
    }
}
"#,
                ),
            ],
        );
        let model = build_model(&GenerateOptions::new(dir.path())).unwrap();
        assert_eq!(model.groups.len(), 1);
        let group = &model.groups[0];
        assert_eq!(group.receiver_type.to_string(), "super::Svc");
        assert_eq!(group.receiver_var, "s");
        let handler = &group.handlers[0];
        assert_eq!(handler.request_type.to_string(), "super::hello::HelloRequest");
        assert_eq!(handler.context_type.to_string(), "DefaultContext");
        assert_eq!(model.imports.len(), 1);
        assert_eq!(model.imports["DefaultContext"].to_string(), "routemark::DefaultContext");
    }

    #[test]
    fn test_generate_without_handlers_still_writes() {
        let dir = create_test_temp_dir();
        write_files(dir.path(), &[("mod.rs", "pub struct Nothing;")]);
        let path = generate(&GenerateOptions::new(dir.path())).unwrap();
        let output = std::fs::read_to_string(path).unwrap();
        assert!(output.starts_with(render::GENERATED_HEADER));
        assert!(!output.contains("impl "));
    }
}
