//! Server configuration.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use http::HeaderName;
use http::request::Parts;

use crate::context::{BoxedContext, ContextFunc, default_context};
use crate::error::Error;
use crate::handler::{HandleFunc, HandleFuncWrap};
use crate::request::{Bind, BindFunc, default_bind};

/// Default limit of a buffered request body, 2 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Builder for the [`Server`](crate::Server) behaviour.
///
/// ```ignore
/// let options = Options::new()
///     .error_header(HeaderName::from_static("x-error"))
///     .wrap(log_calls)
///     .wrap(require_user);
/// ```
#[derive(Clone)]
pub struct Options {
    pub(crate) router: Option<Router>,
    pub(crate) error_header: HeaderName,
    pub(crate) wraps: Vec<HandleFuncWrap>,
    pub(crate) bind: BindFunc,
    pub(crate) context: ContextFunc,
    pub(crate) body_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            router: None,
            error_header: HeaderName::from_static("error"),
            wraps: Vec::new(),
            bind: Arc::new(default_bind),
            context: Arc::new(default_context),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register routes on an existing router instead of a fresh one.
    ///
    /// The router is used as given: no panic-catching layer is added.
    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Response header carrying the error message. Defaults to `error`.
    #[must_use]
    pub fn error_header(mut self, name: HeaderName) -> Self {
        self.error_header = name;
        self
    }

    /// Append a handler wrap. Wraps registered first run outermost.
    #[must_use]
    pub fn wrap<W>(mut self, wrap: W) -> Self
    where
        W: Fn(HandleFunc) -> HandleFunc + Send + Sync + 'static,
    {
        self.wraps.push(Arc::new(wrap));
        self
    }

    /// Replace the bind function. Defaults to [`default_bind`].
    #[must_use]
    pub fn bind<F>(mut self, bind: F) -> Self
    where
        F: Fn(&mut dyn Bind, &Parts, &Bytes) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.bind = Arc::new(bind);
        self
    }

    /// Replace the context function. Defaults to [`default_context`].
    #[must_use]
    pub fn context<F>(mut self, context: F) -> Self
    where
        F: Fn(&Parts) -> BoxedContext + Send + Sync + 'static,
    {
        self.context = Arc::new(context);
        self
    }

    /// Maximum buffered request body size in bytes.
    #[must_use]
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}
