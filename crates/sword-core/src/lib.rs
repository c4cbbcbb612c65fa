//! Sword Core - Metadata boundary and shared types for the schema reader
//!
//! This crate provides the fundamental traits and types that the model and
//! driver crates depend on. It defines:
//!
//! - `MetadataSource` - Trait for per-table catalog introspection
//! - `Vendor` - Database vendor catalogue resolved from product names
//! - `SqlTypeCode` - Vendor-neutral SQL type codes reported by drivers
//! - Raw metadata rows like `RawColumn`, `RawPrimaryKey`, `RawImportedKey`

mod error;
mod metadata;
mod types;
mod vendor;

pub use error::*;
pub use metadata::*;
pub use types::*;
pub use vendor::*;
