//! Incremental HTTP request parsing.
pub mod h1;

pub use h1::{ParseError, ParseState};
