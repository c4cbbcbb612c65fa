//! Tests for metadata boundary defaults and raw row helpers

use super::*;

/// A source that only knows its unique index columns
struct UniqueColumnsOnly(Vec<String>);

#[async_trait]
impl MetadataSource for UniqueColumnsOnly {
    async fn database_product(&self) -> Result<String> {
        Ok("Test".to_string())
    }

    async fn list_catalogs(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_schemas(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_tables(
        &self,
        _catalog: Option<&str>,
        _schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn get_columns(&self, _table: &TableRef) -> Result<Vec<RawColumn>> {
        Ok(Vec::new())
    }

    async fn get_primary_keys(&self, _table: &TableRef) -> Result<Vec<RawPrimaryKey>> {
        Ok(Vec::new())
    }

    async fn get_imported_keys(&self, _table: &TableRef) -> Result<Vec<RawImportedKey>> {
        Ok(Vec::new())
    }

    async fn get_unique_index_columns(&self, _table: &TableRef) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_is_column_unique_is_case_insensitive() {
    let source = UniqueColumnsOnly(vec!["USER_ID".to_string(), "email".to_string()]);
    let table = TableRef::new("accounts");

    assert!(source.is_column_unique(&table, "user_id").await.unwrap());
    assert!(source.is_column_unique(&table, "EMAIL").await.unwrap());
    assert!(!source.is_column_unique(&table, "name").await.unwrap());
}

#[test]
fn test_qualified_name_skips_missing_parts() {
    assert_eq!(TableRef::new("users").qualified_name(), "users");
    assert_eq!(
        TableRef::new("users").with_schema("public").qualified_name(),
        "public.users"
    );
    assert_eq!(
        TableRef::scoped(Some("shop"), Some("dbo"), "orders").to_string(),
        "shop.dbo.orders"
    );
}

#[test]
fn test_raw_column_builder() {
    let column = RawColumn::new("id", SqlTypeCode::INTEGER)
        .with_ordinal(1)
        .with_type_name("int4")
        .not_null()
        .with_default("nextval('users_id_seq'::regclass)")
        .with_auto_increment(true);

    assert_eq!(column.name, "id");
    assert_eq!(column.ordinal, 1);
    assert_eq!(column.type_name.as_deref(), Some("int4"));
    assert!(!column.nullable);
    assert_eq!(column.auto_increment, Some(true));
}

#[test]
fn test_sql_type_code_display() {
    assert_eq!(SqlTypeCode::VARCHAR.to_string(), "VARCHAR");
    assert_eq!(SqlTypeCode(4242).to_string(), "4242");
    assert_eq!(SqlTypeCode::from(93), SqlTypeCode::TIMESTAMP);
}
