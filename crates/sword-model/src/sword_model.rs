//! Sword Model - reverse engineering a relational schema into an object model
//!
//! This crate provides:
//! - Per-table metadata introspection over a [`sword_core::MetadataSource`]
//! - Entity model building with vendor-aware auto-increment detection
//! - Entity and field naming with optional overrides
//! - Relationship cardinality and inverse field inference
//! - Abstract scalar type mapping
//! - The [`SchemaReader`] pipeline tying these together

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod introspect;
pub mod naming;
pub mod reader;
pub mod relations;
pub mod type_mapper;

#[cfg(test)]
mod testing;

pub use builder::*;
pub use diagnostics::*;
pub use error::*;
pub use introspect::*;
pub use naming::*;
pub use reader::*;
pub use relations::*;
pub use type_mapper::*;
