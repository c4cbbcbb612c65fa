//! Metadata boundary traits and raw catalog rows

use crate::{Result, SqlTypeCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Connection-scoped catalog metadata interface.
///
/// Implementations answer one question at a time about a single table. Callers
/// never issue concurrent requests against the same source, so drivers may
/// reuse a single vendor cursor or connection internally.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Vendor product name as reported by the driver (e.g. "PostgreSQL")
    async fn database_product(&self) -> Result<String>;

    /// List catalogs visible to the connection
    async fn list_catalogs(&self) -> Result<Vec<String>>;

    /// List schemas visible to the connection
    async fn list_schemas(&self) -> Result<Vec<String>>;

    /// List base tables in a scope, in a stable order
    async fn list_tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Get columns for a table, in ordinal order
    async fn get_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>>;

    /// Get primary key columns for a table
    async fn get_primary_keys(&self, table: &TableRef) -> Result<Vec<RawPrimaryKey>>;

    /// Get imported (outgoing) foreign key rows for a table, one row per column
    async fn get_imported_keys(&self, table: &TableRef) -> Result<Vec<RawImportedKey>>;

    /// Get every column that participates in a unique index on the table
    async fn get_unique_index_columns(&self, table: &TableRef) -> Result<Vec<String>>;

    /// Check whether a column participates in any unique index on the table.
    ///
    /// Column names are compared case-insensitively. Drivers that can answer
    /// this more cheaply than listing all unique index columns may override it.
    async fn is_column_unique(&self, table: &TableRef, column: &str) -> Result<bool> {
        let columns = self.get_unique_index_columns(table).await?;
        Ok(columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
    }
}

/// Reference to a table inside an optional catalog and schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Create a reference to a table with no catalog or schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Create a reference scoped to an optional catalog and schema
    pub fn scoped(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            catalog: catalog.map(str::to_string),
            schema: schema.map(str::to_string),
            name: name.into(),
        }
    }

    /// Set the catalog
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Dotted name including whichever of catalog and schema are present
    pub fn qualified_name(&self) -> String {
        [self.catalog.as_deref(), self.schema.as_deref(), Some(self.name.as_str())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Column descriptor as reported by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub ordinal: usize,
    pub type_code: SqlTypeCode,
    pub type_name: Option<String>,
    pub nullable: bool,
    /// Raw column default definition text
    pub default_value: Option<String>,
    /// Driver's own auto-increment flag; `None` when the driver cannot tell
    pub auto_increment: Option<bool>,
}

impl RawColumn {
    /// Create a nullable column with no default and an unknown auto-increment flag
    pub fn new(name: impl Into<String>, type_code: SqlTypeCode) -> Self {
        Self {
            name: name.into(),
            ordinal: 0,
            type_code,
            type_name: None,
            nullable: true,
            default_value: None,
            auto_increment: None,
        }
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }
}

/// One primary key column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrimaryKey {
    pub column: String,
    /// 1-based position of the column inside the key
    pub key_seq: i32,
}

impl RawPrimaryKey {
    pub fn new(column: impl Into<String>, key_seq: i32) -> Self {
        Self {
            column: column.into(),
            key_seq,
        }
    }
}

/// One row of an imported foreign key, before grouping by constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImportedKey {
    /// Constraint name; some drivers report none for anonymous constraints
    pub name: Option<String>,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    /// 1-based position of the column inside the constraint
    pub key_seq: i32,
}

impl RawImportedKey {
    pub fn new(
        name: Option<&str>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
        key_seq: i32,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            key_seq,
        }
    }
}
