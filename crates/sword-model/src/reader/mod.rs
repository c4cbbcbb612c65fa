//! End-to-end schema reading
//!
//! Discovers the tables of a scope, builds one model per table in
//! discovery order, resolves relations and names, and returns the whole
//! [`ResolvedSchema`] or the first fatal error.

mod options;
mod resolved;
mod schema_reader;


pub use options::*;
pub use resolved::*;
pub use schema_reader::*;
