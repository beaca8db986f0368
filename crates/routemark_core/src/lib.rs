//! Routemark Core - routing vocabulary shared by the generator and the runtime
//!
//! Provides the HTTP method set and the `@RequestMapping` directive carried in
//! handler documentation comments.

pub mod route;

pub use route::*;
