//! Entity model building
//!
//! Folds the raw rows of one table into an immutable [`EntityModel`]:
//! resolved auto-increment flags, single-column foreign keys and the
//! identifier classification.

mod auto_increment;
mod model_builder;
mod model;


pub use auto_increment::*;
pub use model_builder::*;
pub use model::*;
