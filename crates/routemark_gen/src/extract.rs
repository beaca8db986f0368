//! Annotation extraction.
//!
//! Walks the top-level free functions and `impl` blocks of a parsed file and
//! yields every method whose last doc line carries a valid `@RequestMapping`
//! and whose signature has the handler shape. Inline `mod { ... }` bodies are
//! not entered.

use anyhow::Result;
use routemark_core::{DirectiveError, RouteDirective};
use syn::{Attribute, Ident, ImplItem, Item};
use tracing::debug;

use crate::error::locate;
use crate::parser::ParsedFile;
use crate::route::extract_directive;
use crate::signature::{HandlerSignature, Skip, handler_signature};

/// An annotated method with the handler shape.
pub struct Candidate<'a> {
    pub name: &'a Ident,
    pub directive: RouteDirective,
    pub signature: HandlerSignature<'a>,
}

/// Handler candidates of `file`, in source order.
///
/// A marker with a malformed payload fails the run even when the annotated
/// function would be skipped for its shape.
pub fn extract(file: &ParsedFile) -> Result<Vec<Candidate<'_>>> {
    let mut candidates = Vec::new();
    for item in &file.ast.items {
        match item {
            Item::Fn(item_fn) => {
                if directive(file, &item_fn.attrs, &item_fn.sig.ident)?.is_some() {
                    log_skip(file, &item_fn.sig.ident, Skip::FreeFunction);
                }
            }
            Item::Impl(item_impl) => {
                for impl_item in &item_impl.items {
                    let ImplItem::Fn(method) = impl_item else {
                        continue;
                    };
                    let name = &method.sig.ident;
                    let Some(directive) = directive(file, &method.attrs, name)? else {
                        continue;
                    };
                    match handler_signature(item_impl, method) {
                        Ok(signature) => candidates.push(Candidate {
                            name,
                            directive,
                            signature,
                        }),
                        Err(skip) => log_skip(file, name, skip),
                    }
                }
            }
            _ => {}
        }
    }
    Ok(candidates)
}

fn directive(file: &ParsedFile, attrs: &[Attribute], name: &Ident) -> Result<Option<RouteDirective>> {
    extract_directive(attrs)
        .transpose()
        .map_err(|err: DirectiveError| {
            anyhow::Error::new(err).context(format!(
                "{}: invalid annotation on `{name}`",
                locate(&file.path, name.span())
            ))
        })
}

fn log_skip(file: &ParsedFile, name: &Ident, reason: Skip) {
    debug!(
        location = %locate(&file.path, name.span()),
        function = %name,
        %reason,
        "annotated function is not a handler"
    );
}

#[cfg(test)]
mod tests {
    use routemark_core::HttpMethod;

    use super::*;
    use crate::test_helpers::parse_test_file;

    fn names(file: &ParsedFile) -> Vec<String> {
        extract(file)
            .unwrap()
            .iter()
            .map(|candidate| format!("{} {}", candidate.directive.method, candidate.name))
            .collect()
    }

    #[test]
    fn test_extracts_annotated_methods_in_source_order() {
        let file = parse_test_file(
            "svc.rs",
            r#"
            pub struct Svc;

            impl Svc {
                /// @RequestMapping{"method":"GET","path":"/hello"}
                pub async fn hello(&self, req: &Req, ctx: &Ctx) -> Result<(), Error> { Ok(()) }

                /// Not a handler.
                pub fn helper(&self, req: &Req, ctx: &Ctx) {}

                pub fn undocumented(&self, req: &Req, ctx: &Ctx) {}

                /// @RequestMapping{"method":"post","path":"/bye"}
                pub fn bye(&self, req: &Req, ctx: &Ctx) -> Result<(), Error> { Ok(()) }
            }
            "#,
        );
        assert_eq!(names(&file), ["GET hello", "POST bye"]);

        let candidates = extract(&file).unwrap();
        assert_eq!(candidates[0].directive.path, "/hello");
        assert!(candidates[0].signature.is_async);
        assert_eq!(candidates[1].directive.method, HttpMethod::Post);
        assert!(!candidates[1].signature.is_async);
    }

    #[test]
    fn test_skips_free_functions_and_wrong_shapes() {
        let file = parse_test_file(
            "svc.rs",
            r#"
            /// @RequestMapping{"method":"GET","path":"/free"}
            pub fn free(req: &Req, ctx: &Ctx) {}

            impl Svc {
                /// @RequestMapping{"method":"GET","path":"/one"}
                pub fn one(&self, req: &Req) {}

                /// @RequestMapping{"method":"GET","path":"/owned"}
                pub fn owned(&self, req: Req, ctx: &Ctx) {}

                /// @RequestMapping{"method":"GET","path":"/ok"}
                pub fn ok(&self, req: &Req, ctx: &Ctx) {}
            }

            impl Handler for Svc {
                /// @RequestMapping{"method":"GET","path":"/trait"}
                fn handle(&self, req: &Req, ctx: &Ctx) {}
            }
            "#,
        );
        assert_eq!(names(&file), ["GET ok"]);
    }

    #[test]
    fn test_inline_modules_are_not_entered() {
        let file = parse_test_file(
            "svc.rs",
            r#"
            mod inner {
                impl super::Svc {
                    /// @RequestMapping{"method":"GET","path":"/inner"}
                    pub fn inner(&self, req: &Req, ctx: &Ctx) {}
                }
            }
            "#,
        );
        assert!(names(&file).is_empty());
    }

    #[test]
    fn test_malformed_payload_is_fatal() {
        let file = parse_test_file(
            "svc.rs",
            r#"
impl Svc {
    /// @RequestMapping{"method":"GET","path":"/x"
    pub fn broken(&self, req: &Req, ctx: &Ctx) {}
}
"#,
        );
        let err = extract(&file).err().unwrap();
        let message = format!("{err:#}");
        assert!(message.starts_with("svc.rs:4:12: invalid annotation on `broken`: malformed @RequestMapping payload"));
    }

    #[test]
    fn test_malformed_payload_on_free_function_is_fatal() {
        let file = parse_test_file(
            "svc.rs",
            r#"
            /// @RequestMapping{"method":"FETCH","path":"/x"}
            pub fn free() {}
            "#,
        );
        let err = extract(&file).err().unwrap();
        assert!(format!("{err:#}").contains("unknown HTTP method `FETCH`"));
    }
}
