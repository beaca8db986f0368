//! Reading `@RequestMapping` directives out of doc attributes.

pub mod utils;

pub use utils::extract_directive;
