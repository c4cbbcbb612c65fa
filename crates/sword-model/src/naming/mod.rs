//! Identifier naming
//!
//! Derives entity and field identifiers from physical table and column
//! names, with an optional override document taking precedence. Derivation
//! is pure: the same inputs and overrides always produce the same names,
//! since generated code depends on identifier stability.

mod overrides;
mod resolver;
mod words;

#[cfg(test)]
mod tests;

pub use overrides::*;
pub use resolver::*;
pub use words::*;
