use routemark_core::{DirectiveError, RouteDirective};
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Last line of the last `#[doc]` attribute.
///
/// `///` comments arrive as one attribute per line, block doc comments as a
/// single attribute that may span several lines. A trailing doc attribute
/// whose value is not a string literal (e.g. `include_str!`) yields `None`.
pub fn last_doc_line(attrs: &[Attribute]) -> Option<String> {
    let attr = attrs.iter().rev().find(|attr| attr.path().is_ident("doc"))?;
    let Meta::NameValue(meta_nv) = &attr.meta else {
        return None;
    };
    let Expr::Lit(ExprLit {
        lit: Lit::Str(lit_str),
        ..
    }) = &meta_nv.value
    else {
        return None;
    };
    lit_str.value().lines().last().map(str::to_string)
}

/// Routing directive declared on an item, if its last doc line carries one.
pub fn extract_directive(attrs: &[Attribute]) -> Option<Result<RouteDirective, DirectiveError>> {
    let line = last_doc_line(attrs)?;
    RouteDirective::from_doc_line(&line)
}
