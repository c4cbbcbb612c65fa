//! Unique index lookups for foreign key columns

use std::collections::HashMap;
use sword_core::MetadataSource;

use crate::builder::EntityModel;
use crate::error::{ModelError, ModelResult};

/// Unique-index columns of the child tables, gathered before resolution
#[derive(Debug, Clone, Default)]
pub struct UniquenessIndex {
    tables: HashMap<String, Vec<String>>,
}

impl UniquenessIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the source for the unique-index columns of every table that has
    /// at least one simple foreign key. Tables are queried one at a time.
    pub async fn collect(
        source: &dyn MetadataSource,
        models: &[EntityModel],
    ) -> ModelResult<Self> {
        let mut index = Self::new();
        for model in models.iter().filter(|m| !m.foreign_keys.is_empty()) {
            let columns = source
                .get_unique_index_columns(&model.table_ref())
                .await
                .map_err(|source| ModelError::introspection(model.table_name.clone(), source))?;
            tracing::trace!(table = %model.table_name, ?columns, "unique index columns");
            index = index.with_unique_columns(&model.table_name, columns);
        }
        Ok(index)
    }

    pub fn with_unique_columns(mut self, table: &str, columns: Vec<String>) -> Self {
        self.tables
            .entry(table.to_lowercase())
            .or_default()
            .extend(columns);
        self
    }

    /// Whether a column of a table is covered by a unique index
    /// (case-insensitive on both names)
    pub fn is_unique(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(&table.to_lowercase())
            .is_some_and(|columns| columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
    }
}
