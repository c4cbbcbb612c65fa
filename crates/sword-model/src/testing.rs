//! In-memory metadata source used by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sword_core::{
    MetadataSource, RawColumn, RawImportedKey, RawPrimaryKey, Result, SqlTypeCode, SwordError,
    TableRef,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTable {
    pub name: String,
    pub columns: Vec<RawColumn>,
    pub primary_keys: Vec<RawPrimaryKey>,
    pub imported_keys: Vec<RawImportedKey>,
    pub unique_columns: Vec<String>,
}

impl FakeTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: RawColumn) -> Self {
        let ordinal = self.columns.len() + 1;
        self.columns.push(column.with_ordinal(ordinal));
        self
    }

    /// Shorthand for a NOT NULL INTEGER column
    pub fn int(self, name: &str) -> Self {
        self.column(
            RawColumn::new(name, SqlTypeCode::INTEGER)
                .with_type_name("int4")
                .not_null(),
        )
    }

    /// Shorthand for a nullable VARCHAR column
    pub fn text(self, name: &str) -> Self {
        self.column(RawColumn::new(name, SqlTypeCode::VARCHAR).with_type_name("varchar"))
    }

    pub fn pk(mut self, column: &str, key_seq: i32) -> Self {
        self.primary_keys.push(RawPrimaryKey::new(column, key_seq));
        self
    }

    pub fn fk(
        mut self,
        name: Option<&str>,
        column: &str,
        referenced_table: &str,
        referenced_column: &str,
        key_seq: i32,
    ) -> Self {
        self.imported_keys.push(RawImportedKey::new(
            name,
            column,
            referenced_table,
            referenced_column,
            key_seq,
        ));
        self
    }

    pub fn unique(mut self, column: &str) -> Self {
        self.unique_columns.push(column.to_string());
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pub product: String,
    pub tables: Vec<FakeTable>,
    pub failing_table: Option<String>,
    pub unique_lookups: AtomicUsize,
}

impl FakeSource {
    pub fn new(product: &str) -> Self {
        Self {
            product: product.to_string(),
            ..Default::default()
        }
    }

    pub fn table(mut self, table: FakeTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing_table = Some(table.to_string());
        self
    }

    pub fn unique_lookups(&self) -> usize {
        self.unique_lookups.load(Ordering::SeqCst)
    }

    fn find(&self, table: &TableRef) -> Result<&FakeTable> {
        if self.failing_table.as_deref() == Some(table.name.as_str()) {
            return Err(SwordError::Metadata(format!(
                "simulated failure reading {}",
                table.name
            )));
        }
        self.tables
            .iter()
            .find(|t| t.name == table.name)
            .ok_or_else(|| SwordError::NotFound(table.name.clone()))
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn database_product(&self) -> Result<String> {
        Ok(self.product.clone())
    }

    async fn list_catalogs(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_schemas(&self) -> Result<Vec<String>> {
        Ok(vec!["public".to_string()])
    }

    async fn list_tables(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn get_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        Ok(self.find(table)?.columns.clone())
    }

    async fn get_primary_keys(&self, table: &TableRef) -> Result<Vec<RawPrimaryKey>> {
        Ok(self.find(table)?.primary_keys.clone())
    }

    async fn get_imported_keys(&self, table: &TableRef) -> Result<Vec<RawImportedKey>> {
        Ok(self.find(table)?.imported_keys.clone())
    }

    async fn get_unique_index_columns(&self, table: &TableRef) -> Result<Vec<String>> {
        self.unique_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.find(table)?.unique_columns.clone())
    }
}
