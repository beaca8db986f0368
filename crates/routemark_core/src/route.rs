//! HTTP methods and the `@RequestMapping` routing directive.
//!
//! A handler is declared by the last line of its documentation comment:
//!
//! ```ignore
//! /// Says hello.
//! ///
//! /// @RequestMapping{"method":"GET","path":"/hello"}
//! pub async fn hello(&self, req: &HelloRequest, ctx: &DefaultContext) -> Result<HelloResponse, Error> {
//!     // ...
//! }
//! ```
//!
//! The text right after the marker is a JSON object with two required string
//! keys, `method` and `path`. Unknown keys are ignored.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Marker token that introduces a routing directive in a doc comment line.
pub const ANNOTATION: &str = "@RequestMapping";

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// All supported methods.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
        Self::Trace,
    ];

    /// Upper-case wire name, e.g. `"GET"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DirectiveError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DirectiveError::UnknownMethod(s.to_string()))
    }
}

/// Parsed `@RequestMapping` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDirective {
    pub method: HttpMethod,
    pub path: String,
}

#[derive(Deserialize)]
struct RawDirective {
    method: String,
    path: String,
}

impl RouteDirective {
    /// Look for the marker in one documentation line.
    ///
    /// Returns `None` when the line carries no marker, and an error when the
    /// marker is present but its payload is malformed.
    pub fn from_doc_line(line: &str) -> Option<Result<Self, DirectiveError>> {
        let index = line.find(ANNOTATION)?;
        Some(Self::parse_payload(&line[index + ANNOTATION.len()..]))
    }

    /// Parse the JSON payload that follows the marker.
    pub fn parse_payload(payload: &str) -> Result<Self, DirectiveError> {
        let raw: RawDirective = serde_json::from_str(payload).map_err(DirectiveError::Json)?;
        if raw.method.is_empty() {
            return Err(DirectiveError::EmptyField("method"));
        }
        if raw.path.is_empty() {
            return Err(DirectiveError::EmptyField("path"));
        }
        if !raw.path.starts_with('/') {
            return Err(DirectiveError::RelativePath(raw.path));
        }
        Ok(Self {
            method: raw.method.parse()?,
            path: raw.path,
        })
    }
}

/// Why a `@RequestMapping` payload was rejected.
#[derive(Debug)]
pub enum DirectiveError {
    /// Payload is not a JSON object with string `method` and `path` keys.
    Json(serde_json::Error),
    EmptyField(&'static str),
    UnknownMethod(String),
    RelativePath(String),
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed {ANNOTATION} payload: {err}"),
            Self::EmptyField(field) => write!(f, "{ANNOTATION} field `{field}` must not be empty"),
            Self::UnknownMethod(method) => write!(f, "{ANNOTATION} has unknown HTTP method `{method}`"),
            Self::RelativePath(path) => {
                write!(f, "{ANNOTATION} path `{path}` must start with `/`")
            }
        }
    }
}

impl std::error::Error for DirectiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}
