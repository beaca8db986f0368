//! Annotated handlers. `route__.rs` is generated from this directory:
//!
//! ```sh
//! cargo run -p routemark_gen -- --input-dir demos/hello/src/api
//! ```

mod greeter;
mod pets;
mod route__;

pub use greeter::Greeter;
pub use pets::PetStore;
