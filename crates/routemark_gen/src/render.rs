//! Code rendering.
//!
//! The model is emitted as a `quote!` token stream, parsed back into a
//! `syn::File` to make sure it is valid Rust, and formatted with
//! `prettyplease`. The generated-code header is prepended last since
//! `prettyplease` does not print plain comments.
//!
//! Every runtime name is written as an absolute path (`::routemark::...`,
//! `::std::sync::Arc`) so it can never collide with an imported name.

use anyhow::{Context, Result};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::imports::{ImportRef, TypePath};
use crate::metadata::{GenerationModel, HandlerFact, ReceiverGroup};
use crate::method::http_method_to_token_stream;

pub const GENERATED_HEADER: &str = "// Code generated by routemark-gen. DO NOT EDIT.\n\n";

/// Render `model` as formatted Rust source.
pub fn render(model: &GenerationModel) -> Result<String> {
    let tokens = render_tokens(model)?;
    let syntax_tree: syn::File =
        syn::parse2(tokens).context("Generated code is not valid Rust")?;
    let formatted = prettyplease::unparse(&syntax_tree);
    Ok(format!("{GENERATED_HEADER}{formatted}"))
}

/// Render `model` to a token stream, without validation or formatting.
pub fn render_tokens(model: &GenerationModel) -> Result<TokenStream> {
    let doc = format!(" Route registration for the `{}` module.", model.package_name);
    let imports = model
        .imports
        .values()
        .map(render_import)
        .collect::<Result<Vec<_>>>()?;
    let globs = model
        .globs
        .iter()
        .map(syn_path)
        .collect::<Result<Vec<_>>>()?;
    let impls = model
        .groups
        .iter()
        .map(render_group)
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! {
        #![doc = #doc]
        #![allow(clippy::all, clippy::pedantic)]

        #(#imports)*
        #(use #globs::*;)*

        #(#impls)*
    })
}

fn render_import(import: &ImportRef) -> Result<TokenStream> {
    let path = syn_path(&import.path)?;
    match &import.alias {
        Some(alias) => {
            let alias = ident(alias)?;
            Ok(quote! { use #path as #alias; })
        }
        None => Ok(quote! { use #path; }),
    }
}

fn render_group(group: &ReceiverGroup) -> Result<TokenStream> {
    let receiver = syn_path(&group.receiver_type)?;
    let var = ident(&group.receiver_var)?;
    let routes = group
        .handlers
        .iter()
        .map(|handler| render_route(&var, handler))
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! {
        impl #receiver {
            /// Registers every `@RequestMapping` handler of this type on `server`.
            pub fn register_routes(self: ::std::sync::Arc<Self>, server: &mut ::routemark::Server) {
                let #var = self;
                #(#routes)*
            }
        }
    })
}

fn render_route(var: &Ident, handler: &HandlerFact) -> Result<TokenStream> {
    let method = http_method_to_token_stream(handler.directive.method);
    let path = handler.directive.path.as_str();
    let name = ident(&handler.name)?;
    let request = syn_path(&handler.request_type)?;
    let context = syn_path(&handler.context_type)?;
    let call = if handler.is_async {
        quote! { #var.#name(&req, &ctx).await }
    } else {
        quote! { #var.#name(&req, &ctx) }
    };
    Ok(quote! {
        server.route(
            #method,
            #path,
            ::routemark::new_request::<#request>,
            ::routemark::handle_func({
                let #var = ::std::sync::Arc::clone(&#var);
                move |req: ::std::boxed::Box<#request>, ctx: ::std::sync::Arc<#context>| {
                    let #var = ::std::sync::Arc::clone(&#var);
                    async move { #call }
                }
            }),
        );
    })
}

fn syn_path(path: &TypePath) -> Result<syn::Path> {
    syn::parse_str(&path.to_string()).with_context(|| format!("`{path}` is not a valid path"))
}

fn ident(name: &str) -> Result<Ident> {
    syn::parse_str(name).with_context(|| format!("`{name}` is not a valid identifier"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use insta::assert_snapshot;
    use routemark_core::{HttpMethod, RouteDirective};

    use super::*;

    fn fact(name: &str, method: HttpMethod, path: &str, is_async: bool) -> HandlerFact {
        HandlerFact {
            name: name.to_string(),
            request_type: TypePath::new(["pkg1", "Req"]),
            context_type: TypePath::new(["DefaultContext"]),
            directive: RouteDirective {
                method,
                path: path.to_string(),
            },
            is_async,
        }
    }

    fn model() -> GenerationModel {
        let mut imports = BTreeMap::new();
        imports.insert(
            "pkg1".to_string(),
            ImportRef {
                alias: None,
                path: TypePath::new(["crate", "pkg1"]),
            },
        );
        imports.insert(
            "DefaultContext".to_string(),
            ImportRef {
                alias: None,
                path: TypePath::new(["routemark", "DefaultContext"]),
            },
        );
        let mut model = GenerationModel::new("api".to_string());
        model.imports = imports;
        model.add_handler(
            TypePath::new(["super", "svc", "Svc"]),
            fact("hello", HttpMethod::Get, "/hello", true),
        );
        model.add_handler(
            TypePath::new(["super", "svc", "Svc"]),
            fact("bye", HttpMethod::Get, "/bye", false),
        );
        model.finalize().unwrap();
        model
    }

    #[test]
    fn test_render_empty_model() {
        let output = render(&GenerationModel::new("api".to_string())).unwrap();
        assert_snapshot!(output, @r"
        // Code generated by routemark-gen. DO NOT EDIT.

        //! Route registration for the `api` module.
        #![allow(clippy::all, clippy::pedantic)]
        ");
    }

    #[test]
    fn test_render_is_valid_rust() {
        let output = render(&model()).unwrap();
        assert!(output.starts_with(GENERATED_HEADER));
        syn::parse_file(&output).unwrap();
    }

    #[test]
    fn test_render_imports_and_impl() {
        let output = render(&model()).unwrap();
        assert_snapshot!(output, @r#"
        // Code generated by routemark-gen. DO NOT EDIT.

        //! Route registration for the `api` module.
        #![allow(clippy::all, clippy::pedantic)]
        use routemark::DefaultContext;
        use crate::pkg1;
        impl super::svc::Svc {
            /// Registers every `@RequestMapping` handler of this type on `server`.
            pub fn register_routes(
                self: ::std::sync::Arc<Self>,
                server: &mut ::routemark::Server,
            ) {
                let s = self;
                server
                    .route(
                        ::routemark::HttpMethod::Get,
                        "/bye",
                        ::routemark::new_request::<pkg1::Req>,
                        ::routemark::handle_func({
                            let s = ::std::sync::Arc::clone(&s);
                            move |
                                req: ::std::boxed::Box<pkg1::Req>,
                                ctx: ::std::sync::Arc<DefaultContext>|
                            {
                                let s = ::std::sync::Arc::clone(&s);
                                async move { s.bye(&req, &ctx) }
                            }
                        }),
                    );
                server
                    .route(
                        ::routemark::HttpMethod::Get,
                        "/hello",
                        ::routemark::new_request::<pkg1::Req>,
                        ::routemark::handle_func({
                            let s = ::std::sync::Arc::clone(&s);
                            move |
                                req: ::std::boxed::Box<pkg1::Req>,
                                ctx: ::std::sync::Arc<DefaultContext>|
                            {
                                let s = ::std::sync::Arc::clone(&s);
                                async move { s.hello(&req, &ctx).await }
                            }
                        }),
                    );
            }
        }
        "#);
    }

    #[test]
    fn test_render_globs_after_named_imports() {
        let mut model = model();
        model.globs.insert(TypePath::new(["super", "models"]));
        model.globs.insert(TypePath::new(["crate", "shared"]));
        let output = render(&model).unwrap();
        assert!(output.contains(
            "use crate::pkg1;\nuse crate::shared::*;\nuse super::models::*;\nimpl super::svc::Svc {"
        ));
    }

    #[test]
    fn test_render_routes_in_model_order() {
        let output = render(&model()).unwrap();
        let bye = output.find("\"/bye\"").unwrap();
        let hello = output.find("\"/hello\"").unwrap();
        assert!(bye < hello);
    }

    #[test]
    fn test_render_awaits_only_async_handlers() {
        let output = render(&model()).unwrap();
        assert!(output.contains("s.hello(&req, &ctx).await"));
        assert!(output.contains("s.bye(&req, &ctx) }") || output.contains("s.bye(&req, &ctx)\n"));
        assert!(!output.contains("s.bye(&req, &ctx).await"));
    }

    #[test]
    fn test_render_alias_import() {
        let import = ImportRef {
            alias: Some("Request".to_string()),
            path: TypePath::new(["crate", "models", "Req"]),
        };
        assert_eq!(
            render_import(&import).unwrap().to_string(),
            "use crate :: models :: Req as Request ;"
        );
    }

    #[test]
    fn test_render_raw_identifiers() {
        let mut model = GenerationModel::new("api".to_string());
        model.add_handler(
            TypePath::new(["super", "r#type"]),
            fact("r#match", HttpMethod::Post, "/match", true),
        );
        let output = render(&model).unwrap();
        assert!(output.contains("impl super::r#type {"));
        assert!(output.contains("t.r#match(&req, &ctx).await"));
    }

    #[test]
    fn test_render_rejects_invalid_names() {
        let mut model = GenerationModel::new("api".to_string());
        model.add_handler(
            TypePath::new(["super", "Svc"]),
            fact("not an ident", HttpMethod::Get, "/", true),
        );
        let err = render(&model).unwrap_err();
        assert_eq!(err.to_string(), "`not an ident` is not a valid identifier");
    }
}
