#![cfg(test)]
//! Shared test utilities for routemark_gen tests.
//!
//! # Test Macros
//!
//! - [`test_fn!`] - Parse a free function from Rust source code string
//! - [`test_impl!`] - Parse an impl block from Rust source code string
//!
//! # Test Functions
//!
//! - [`parse_test_file`] - Parse a source string as a file of the scanned directory
//! - [`create_test_temp_dir`] - Create a temporary directory for test file operations
//! - [`write_files`] - Populate a directory with source files

use std::path::Path;

use crate::parser::{ParsedFile, parse_source};

/// Parse a function from source code for testing
#[macro_export]
macro_rules! test_fn {
    ($code:expr) => {{
        let file: syn::File = syn::parse_str($code).expect("parse failed");
        file.items
            .into_iter()
            .find_map(|item| {
                if let syn::Item::Fn(f) = item {
                    Some(f)
                } else {
                    None
                }
            })
            .expect("no function found")
    }};
}

/// Parse an impl block from source code for testing
#[macro_export]
macro_rules! test_impl {
    ($code:expr) => {{
        let file: syn::File = syn::parse_str($code).expect("parse failed");
        file.items
            .into_iter()
            .find_map(|item| {
                if let syn::Item::Impl(i) = item {
                    Some(i)
                } else {
                    None
                }
            })
            .expect("no impl found")
    }};
}

/// Parse `source` as if it were the file `name` of the scanned directory.
pub fn parse_test_file(name: &str, source: &str) -> ParsedFile {
    parse_source(Path::new(name), source).expect("parse failed")
}

/// Create temp directory for tests
pub fn create_test_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp dir")
}

/// Write each `(name, contents)` pair into `dir`.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).expect("Failed to write test file");
    }
}
