//! Request values and binding.
//!
//! The generated code hands the server a constructor (`new_request::<T>`) for
//! each route. The server keeps the value type-erased as a [`BoxedRequest`]
//! and fills it through the [`Bind`] capability before calling the handler.

use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Query;
use http::request::Parts;
use http::{Method, header};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// A request value that can be filled from an incoming HTTP request.
///
/// Implemented for every `DeserializeOwned` type. Binding replaces the whole
/// value, so fields that may be absent need `#[serde(default)]`.
pub trait Bind: Any + Send {
    /// Replace the value with the decoded query string.
    fn bind_query(&mut self, parts: &Parts) -> Result<(), Error>;

    /// Replace the value with the decoded JSON body.
    fn bind_json(&mut self, body: &[u8]) -> Result<(), Error>;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> Bind for T
where
    T: DeserializeOwned + Send + 'static,
{
    fn bind_query(&mut self, parts: &Parts) -> Result<(), Error> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)
            .map_err(|rejection| Error::new(rejection.status(), rejection.body_text()))?;
        *self = value;
        Ok(())
    }

    fn bind_json(&mut self, body: &[u8]) -> Result<(), Error> {
        let Json(value) = Json::<T>::from_bytes(body)
            .map_err(|rejection| Error::new(rejection.status(), rejection.body_text()))?;
        *self = value;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Type-erased request value.
pub type BoxedRequest = Box<dyn Bind>;

/// Binds an incoming request onto a fresh request value.
pub type BindFunc = Arc<dyn Fn(&mut dyn Bind, &Parts, &Bytes) -> Result<(), Error> + Send + Sync>;

/// Zero-valued request of type `T`.
pub fn new_request<T>() -> BoxedRequest
where
    T: Default + DeserializeOwned + Send + 'static,
{
    Box::new(T::default())
}

/// Default binding.
///
/// `GET`, `HEAD` and `DELETE` bind the query string. Other methods bind the
/// JSON body when the content type is `application/json` and the body is not
/// empty, and fall back to the query string otherwise. An absent or empty
/// query string leaves the value untouched.
pub fn default_bind(req: &mut dyn Bind, parts: &Parts, body: &Bytes) -> Result<(), Error> {
    let from_query = matches!(parts.method, Method::GET | Method::HEAD | Method::DELETE)
        || body.is_empty()
        || !is_json(parts);
    if !from_query {
        return req.bind_json(body);
    }
    if parts.uri.query().is_some_and(|query| !query.is_empty()) {
        req.bind_query(parts)?;
    }
    Ok(())
}

fn is_json(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
