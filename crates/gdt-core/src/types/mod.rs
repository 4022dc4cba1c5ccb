//! Typed value extraction.
//!
//! Field content is turned into a [`Value`] by the parse function registered
//! for the descriptor's type tag. The built-in tags cover the GDT wire types
//! plus fixed-layout dates and times; callers add their own tags (for example
//! a date parser pinned to a specific zone) on an independent registry.

pub mod builtin;
pub mod error;
pub mod registry;
pub mod value;

pub use error::{ParseError, TypeError};
pub use registry::{ParseFn, TypeRegistry};
pub use value::{Value, ValueKind};
