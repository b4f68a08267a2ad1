//! Event model for constraint instances.
//!
//! This crate defines the structured declarations an instance parser hands to
//! the converter: variable declarations, constraint declarations, expression
//! trees, tuple tables and automata. External frontends (XCSP3 readers and the
//! like) produce `Instance` JSON documents which the CLI deserializes and
//! converts directly.

mod types;

pub use types::*;
