//! # routemark
//!
//! Routing engine behind the files written by `routemark-gen`.
//!
//! The generator turns every `@RequestMapping` method of a type into one
//! [`Server::route`] call. At request time the registered adapter:
//!
//! 1. creates a fresh request value ([`new_request`]),
//! 2. binds the incoming request onto it (pluggable, see [`Options::bind`]),
//! 3. builds an execution context (pluggable, see [`Options::context`]),
//! 4. calls the handler through the wrap chain ([`Options::wrap`]),
//! 5. maps the result to a status code, headers and a JSON body.
//!
//! ```ignore
//! mod route__;
//!
//! let mut server = routemark::Server::new(routemark::Options::new());
//! std::sync::Arc::new(Example::default()).register_routes(&mut server);
//! server.serve("0.0.0.0:8080").await?;
//! ```

pub mod context;
pub mod error;
pub mod handler;
pub mod ids;
pub mod options;
pub mod reply;
pub mod request;
pub mod server;

pub use axum;
pub use context::{BoxedContext, ContextFunc, DefaultContext, default_context};
pub use error::{BoxError, Error};
pub use handler::{HandleFunc, HandleFuncWrap, HandleResult, handle_func};
pub use ids::object_id;
pub use options::Options;
pub use reply::{ErasedReply, Reply};
pub use request::{Bind, BindFunc, BoxedRequest, default_bind, new_request};
pub use routemark_core::HttpMethod;
pub use server::Server;
