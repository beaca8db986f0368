//! Handler error type.
//!
//! Any `std::error::Error` converts into [`Error`] with `?` and answers
//! `500 Internal Server Error`. [`Error::new`] attaches an explicit status code
//! that the server uses instead.

use std::fmt;

use http::StatusCode;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by handlers, bind functions and the request adapter.
pub struct Error {
    status: Option<StatusCode>,
    source: BoxError,
}

impl Error {
    /// Error answered with `status`.
    pub fn new(status: StatusCode, err: impl Into<BoxError>) -> Self {
        Self {
            status: Some(status),
            source: err.into(),
        }
    }

    /// Error without a status code, answered with `500`.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            status: None,
            source: message.into().into(),
        }
    }

    /// Explicit status code carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Status code the server answers with.
    pub fn status_or_internal(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.source
    }
}

impl<E> From<E> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self {
            status: None,
            source: Box::new(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("status", &self.status)
            .field("source", &self.source)
            .finish()
    }
}
