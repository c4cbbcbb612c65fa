//! Abstract scalar type mapping
//!
//! Maps vendor SQL type information onto the small set of abstract scalar
//! types that emitters translate into their own language's types.

mod mapper;


pub use mapper::*;
