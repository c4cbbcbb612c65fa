//! Schema introspector implementation

use serde::{Deserialize, Serialize};
use sword_core::{MetadataSource, RawColumn, RawImportedKey, TableRef};

use crate::error::{ModelError, ModelResult};

/// One imported foreign key row, with its group name resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedFkRow {
    /// Constraint name, or a synthesized one for anonymous constraints
    pub group_name: String,
    pub local_column: String,
    pub target_table: String,
    pub target_column: String,
    pub key_seq: i32,
}

impl ImportedFkRow {
    /// Convert a driver row, synthesizing `<target_table>__<local_column>`
    /// when the constraint name is missing or blank
    pub fn from_raw(raw: RawImportedKey) -> Self {
        let group_name = match raw.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => synthesize_group_name(&raw.referenced_table, &raw.column),
        };

        Self {
            group_name,
            local_column: raw.column,
            target_table: raw.referenced_table,
            target_column: raw.referenced_column,
            key_seq: raw.key_seq,
        }
    }
}

/// Deterministic group name for an anonymous foreign key
pub fn synthesize_group_name(target_table: &str, local_column: &str) -> String {
    format!("{}__{}", target_table, local_column)
}

/// Everything the boundary reported about one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub table: TableRef,
    /// Columns in driver (ordinal) order
    pub columns: Vec<RawColumn>,
    /// Primary key column names ordered by key sequence
    pub primary_key: Vec<String>,
    pub imported_keys: Vec<ImportedFkRow>,
}

/// Reads raw metadata for tables through a [`MetadataSource`]
pub struct SchemaIntrospector<'a> {
    source: &'a dyn MetadataSource,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(source: &'a dyn MetadataSource) -> Self {
        Self { source }
    }

    /// Vendor product name reported by the source
    pub async fn database_product(&self) -> ModelResult<String> {
        self.source
            .database_product()
            .await
            .map_err(ModelError::discovery)
    }

    /// Catalogs visible to the source
    pub async fn discover_catalogs(&self) -> ModelResult<Vec<String>> {
        self.source
            .list_catalogs()
            .await
            .map_err(ModelError::discovery)
    }

    /// Schemas visible to the source
    pub async fn discover_schemas(&self) -> ModelResult<Vec<String>> {
        self.source
            .list_schemas()
            .await
            .map_err(ModelError::discovery)
    }

    /// Tables of a scope in discovery order
    pub async fn discover_tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
    ) -> ModelResult<Vec<String>> {
        let tables = self
            .source
            .list_tables(catalog, schema)
            .await
            .map_err(ModelError::discovery)?;
        tracing::debug!(count = tables.len(), ?catalog, ?schema, "discovered tables");
        Ok(tables)
    }

    /// Read columns, primary key and imported keys of one table.
    ///
    /// Calls are issued one after another; the first failure is returned as
    /// an introspection error naming the table.
    #[tracing::instrument(skip(self, table), fields(table = %table))]
    pub async fn introspect(&self, table: &TableRef) -> ModelResult<TableMetadata> {
        let fail = |source| ModelError::introspection(table.name.clone(), source);

        let columns = self.source.get_columns(table).await.map_err(fail)?;

        let mut primary_keys = self.source.get_primary_keys(table).await.map_err(fail)?;
        primary_keys.sort_by_key(|pk| pk.key_seq);
        let primary_key = primary_keys.into_iter().map(|pk| pk.column).collect();

        let imported_keys = self
            .source
            .get_imported_keys(table)
            .await
            .map_err(fail)?
            .into_iter()
            .map(ImportedFkRow::from_raw)
            .collect();

        Ok(TableMetadata {
            table: table.clone(),
            columns,
            primary_key,
            imported_keys,
        })
    }
}
