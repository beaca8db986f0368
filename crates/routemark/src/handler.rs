//! Type-erased handler functions and the wrap chain.

use std::any::type_name;
use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};

use crate::context::BoxedContext;
use crate::error::Error;
use crate::reply::{ErasedReply, Reply};
use crate::request::BoxedRequest;

pub type HandleResult = Result<Box<dyn ErasedReply>, Error>;

/// A handler with its request and context types erased.
pub type HandleFunc =
    Arc<dyn Fn(BoxedRequest, BoxedContext) -> BoxFuture<'static, HandleResult> + Send + Sync>;

/// Decorates a [`HandleFunc`], e.g. for logging or authorization.
pub type HandleFuncWrap = Arc<dyn Fn(HandleFunc) -> HandleFunc + Send + Sync>;

/// Erase a typed handler closure into a [`HandleFunc`].
///
/// The returned function answers `500` instead of calling `f` when the request
/// or context it receives is not a `Req` / `Ctx`, which happens when a custom
/// context function builds a different context type than the handler expects.
pub fn handle_func<Req, Ctx, F, Fut, Rsp, E>(f: F) -> HandleFunc
where
    Req: Send + 'static,
    Ctx: Send + Sync + 'static,
    F: Fn(Box<Req>, Arc<Ctx>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Rsp, E>> + Send + 'static,
    Rsp: Reply + 'static,
    E: Into<Error>,
{
    Arc::new(move |req: BoxedRequest, ctx: BoxedContext| {
        let Ok(req) = req.into_any().downcast::<Req>() else {
            let err = Error::msg(format!("request is not a `{}`", type_name::<Req>()));
            return future::ready(Err(err)).boxed();
        };
        let Ok(ctx) = ctx.downcast::<Ctx>() else {
            let err = Error::msg(format!("context is not a `{}`", type_name::<Ctx>()));
            return future::ready(Err(err)).boxed();
        };
        f(req, ctx)
            .map(|result| match result {
                Ok(rsp) => Ok(Box::new(rsp) as Box<dyn ErasedReply>),
                Err(err) => Err(Into::<Error>::into(err)),
            })
            .boxed()
    })
}

/// Apply `wraps` so that the first one ends up outermost.
pub fn apply_wraps(wraps: &[HandleFuncWrap], handle: HandleFunc) -> HandleFunc {
    wraps.iter().rev().fold(handle, |handle, wrap| wrap(handle))
}
