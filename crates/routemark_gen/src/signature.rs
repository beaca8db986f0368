//! Handler signature shape.
//!
//! A method qualifies as a handler when it is declared in a plain inherent
//! `impl Type` block, takes `&self`, and has exactly two more parameters of
//! the form `&Path`: the request and the context. Anything else is not a
//! handler and is skipped with a [`Skip`] reason.

use std::fmt;

use syn::{FnArg, ImplItemFn, ItemImpl, PathArguments, Type};

/// Parts of a qualifying handler signature.
#[derive(Clone, Copy)]
pub struct HandlerSignature<'a> {
    pub receiver: &'a syn::Path,
    pub request: &'a syn::Path,
    pub context: &'a syn::Path,
    pub is_async: bool,
}

/// Why an annotated function is not a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    FreeFunction,
    TraitImpl,
    GenericImpl,
    UnsupportedSelfType,
    GenericMethod,
    Unsafe,
    NoReceiver,
    Receiver,
    ParamCount(usize),
    ParamShape(usize),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeFunction => f.write_str("free function"),
            Self::TraitImpl => f.write_str("trait impl method"),
            Self::GenericImpl => f.write_str("method of a generic impl"),
            Self::UnsupportedSelfType => f.write_str("impl of a non-path type"),
            Self::GenericMethod => f.write_str("generic method"),
            Self::Unsafe => f.write_str("unsafe method"),
            Self::NoReceiver => f.write_str("associated function without `self`"),
            Self::Receiver => f.write_str("receiver is not `&self`"),
            Self::ParamCount(count) => write!(f, "expected 2 parameters after `&self`, found {count}"),
            Self::ParamShape(index) => write!(f, "parameter {} is not `&Type`", index + 1),
        }
    }
}

/// Check the shape of `method`, declared in `item_impl`.
pub fn handler_signature<'a>(
    item_impl: &'a ItemImpl,
    method: &'a ImplItemFn,
) -> Result<HandlerSignature<'a>, Skip> {
    if item_impl.trait_.is_some() {
        return Err(Skip::TraitImpl);
    }
    if !item_impl.generics.params.is_empty() {
        return Err(Skip::GenericImpl);
    }
    let receiver = plain_path(&item_impl.self_ty).ok_or(Skip::UnsupportedSelfType)?;

    let sig = &method.sig;
    if sig.generics.type_params().next().is_some() || sig.generics.const_params().next().is_some() {
        return Err(Skip::GenericMethod);
    }
    if sig.unsafety.is_some() {
        return Err(Skip::Unsafe);
    }
    let Some(self_arg) = sig.receiver() else {
        return Err(Skip::NoReceiver);
    };
    if !is_shared_self(&self_arg.ty) {
        return Err(Skip::Receiver);
    }

    let params: Vec<&Type> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(&*pat_type.ty),
            FnArg::Receiver(_) => None,
        })
        .collect();
    let &[request, context] = params.as_slice() else {
        return Err(Skip::ParamCount(params.len()));
    };
    let request = shared_ref_path(request).ok_or(Skip::ParamShape(0))?;
    let context = shared_ref_path(context).ok_or(Skip::ParamShape(1))?;

    Ok(HandlerSignature {
        receiver,
        request,
        context,
        is_async: sig.asyncness.is_some(),
    })
}

/// `&Self`, with or without a lifetime.
fn is_shared_self(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) if reference.mutability.is_none() => {
            plain_path(&reference.elem).is_some_and(|path| path.is_ident("Self"))
        }
        _ => false,
    }
}

/// `&T` where `T` is a plain path.
fn shared_ref_path(ty: &Type) -> Option<&syn::Path> {
    match ty {
        Type::Reference(reference) if reference.mutability.is_none() => plain_path(&reference.elem),
        _ => None,
    }
}

/// A path type without a qualified self or generic arguments.
fn plain_path(ty: &Type) -> Option<&syn::Path> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    type_path
        .path
        .segments
        .iter()
        .all(|seg| matches!(seg.arguments, PathArguments::None))
        .then_some(&type_path.path)
}
