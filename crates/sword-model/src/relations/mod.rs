//! Relationship inference
//!
//! Classifies each single-column foreign key as one-to-one or many-to-one
//! from the uniqueness of its local column, then derives the child-side
//! (forward) and parent-side (inverse) relation fields. Field names are made
//! unique with numeric suffixes assigned in model order, so repeated runs
//! over the same schema always agree.

mod model;
mod resolver;
mod uniqueness;

#[cfg(test)]
mod tests;

pub use model::*;
pub use resolver::*;
pub use uniqueness::*;
