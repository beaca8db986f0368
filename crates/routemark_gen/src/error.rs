//! Source locations for generator diagnostics.
//!
//! Errors raised while scanning a directory name the offending file and, when
//! a syntax node is at hand, the line and column it starts at. Spans carry
//! real positions because `proc-macro2` is built with `span-locations` and the
//! generator parses files outside of a procedural macro.
//!
//! # Key Functions
//!
//! - [`locate`] - Pair a file path with the start of a span
//! - [`syn_error`] - Turn a parse error into an [`anyhow::Error`] naming its position

use std::fmt;
use std::path::Path;

use proc_macro2::Span;

/// A `file:line:column` position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub path: &'a Path,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column + 1)
    }
}

/// Where `span` starts inside `path`.
#[inline]
pub fn locate(path: &Path, span: Span) -> Location<'_> {
    let start = span.start();
    Location {
        path,
        line: start.line,
        column: start.column,
    }
}

/// Convert a [`syn::Error`] from parsing `path` into an error naming its position.
pub fn syn_error(path: &Path, err: &syn::Error) -> anyhow::Error {
    anyhow::anyhow!("{}: {err}", locate(path, err.span()))
}
