//! Per-table metadata introspection
//!
//! Issues the column, primary key and imported key queries for one table
//! and returns the raw rows, unfolded. Any boundary failure is fatal and
//! names the table.

mod introspector;


pub use introspector::*;
