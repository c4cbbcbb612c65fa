//! SQLite metadata source
//!
//! Answers catalog questions from `sqlite_master` and the `table_info`,
//! `index_list`, `index_info` and `foreign_key_list` pragmas.

mod source;
mod types;

pub use source::SqliteMetadataSource;
pub use types::sql_type_code;
