//! Execution context handed to every handler.

use std::any::Any;
use std::sync::Arc;

use http::request::Parts;
use http::{HeaderMap, Method, Uri};

use crate::ids::object_id;

/// Type-erased context value produced by a [`ContextFunc`].
pub type BoxedContext = Arc<dyn Any + Send + Sync>;

/// Builds the execution context of one request.
pub type ContextFunc = Arc<dyn Fn(&Parts) -> BoxedContext + Send + Sync>;

/// Context built by [`default_context`].
///
/// When a handler runs with this context, the server echoes `trace_id` back in
/// the `trace-id` response header.
#[derive(Debug, Clone)]
pub struct DefaultContext {
    pub trace_id: String,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl DefaultContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            trace_id: object_id(),
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        }
    }
}

pub fn default_context(parts: &Parts) -> BoxedContext {
    Arc::new(DefaultContext::from_parts(parts))
}
