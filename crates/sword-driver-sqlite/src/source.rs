//! SQLite metadata source implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use std::path::PathBuf;
use std::sync::Arc;
use sword_core::{
    MetadataSource, RawColumn, RawImportedKey, RawPrimaryKey, Result, SwordError, TableRef,
};

use crate::types::sql_type_code;

/// The only schema of a plain SQLite database
const MAIN_SCHEMA: &str = "main";

/// A lone INTEGER primary key aliases the rowid
fn is_rowid_alias(declared: &str, pk_count: usize) -> bool {
    pk_count == 1 && declared.trim().eq_ignore_ascii_case("INTEGER")
}

fn query_error(context: &'static str) -> impl Fn(rusqlite::Error) -> SwordError {
    move |e| SwordError::Metadata(format!("{}: {}", context, e))
}

/// Metadata source over one SQLite connection.
///
/// All requests go through a single mutex-guarded connection, so calls are
/// serialised even when the source is shared.
pub struct SqliteMetadataSource {
    conn: Arc<Mutex<RusqliteConnection>>,
}

impl SqliteMetadataSource {
    /// Open an existing database file read-only
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");
        let expanded_path = Self::expand_path(path)?;

        if !expanded_path.starts_with("file:") && !PathBuf::from(&expanded_path).exists() {
            return Err(SwordError::NotFound(format!(
                "SQLite database does not exist: {}",
                expanded_path
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = RusqliteConnection::open_with_flags(&expanded_path, flags).map_err(|e| {
            SwordError::Connection(format!(
                "Failed to open SQLite database at '{}': {}",
                expanded_path, e
            ))
        })?;

        tracing::debug!(path = %expanded_path, "SQLite database opened");
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = RusqliteConnection::open_in_memory().map_err(|e| {
            SwordError::Connection(format!("Failed to open in-memory database: {}", e))
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: RusqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run a batch of SQL statements, typically to set up a schema
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn
            .lock()
            .execute_batch(sql)
            .map_err(query_error("Failed to execute batch"))
    }

    /// Expand `~/` and make relative paths absolute
    fn expand_path(path: &str) -> Result<String> {
        if path == ":memory:" || path.starts_with("file:") {
            return Ok(path.to_string());
        }

        let expanded = if let Some(rest) = path.strip_prefix("~/") {
            match std::env::var_os("HOME") {
                Some(home) => PathBuf::from(home).join(rest),
                None => {
                    return Err(SwordError::Configuration(
                        "Unable to determine HOME directory".into(),
                    ));
                }
            }
        } else if path.starts_with('~') {
            return Err(SwordError::Configuration(
                "User-specific home directories (~user) are not supported".into(),
            ));
        } else {
            PathBuf::from(path)
        };

        let absolute = if expanded.is_relative() {
            std::env::current_dir()?.join(expanded)
        } else {
            expanded
        };
        Ok(absolute.to_string_lossy().to_string())
    }

    fn check_schema(schema: Option<&str>) {
        if let Some(schema) = schema
            && !schema.eq_ignore_ascii_case(MAIN_SCHEMA)
        {
            tracing::warn!(schema = %schema, "SQLite only exposes the main schema, ignoring");
        }
    }

    /// Primary key columns ordered by key position
    fn primary_key_columns(conn: &RusqliteConnection, table: &str) -> Result<Vec<(String, i32)>> {
        let mut stmt = conn
            .prepare("SELECT name, pk FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk")
            .map_err(query_error("Failed to prepare primary key query"))?;
        let rows = stmt
            .query_map([table], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)?)))
            .map_err(query_error("Failed to read primary key"))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to read primary key"))
    }

    /// The lone INTEGER primary key column, which aliases the rowid and so
    /// has no index of its own
    fn rowid_alias_column(conn: &RusqliteConnection, table: &str) -> Result<Option<String>> {
        let mut stmt = conn
            .prepare("SELECT name, type FROM pragma_table_info(?1) WHERE pk > 0")
            .map_err(query_error("Failed to prepare primary key query"))?;
        let keys = stmt
            .query_map([table], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .map_err(query_error("Failed to read primary key"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to read primary key"))?;

        Ok(match keys.as_slice() {
            [(name, Some(declared))] if is_rowid_alias(declared, 1) => Some(name.clone()),
            _ => None,
        })
    }

    fn ensure_table_exists(conn: &RusqliteConnection, table: &str) -> Result<()> {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )
            .map_err(query_error("Failed to look up table"))?;
        if exists {
            Ok(())
        } else {
            Err(SwordError::NotFound(format!("table '{}'", table)))
        }
    }
}

#[async_trait]
impl MetadataSource for SqliteMetadataSource {
    async fn database_product(&self) -> Result<String> {
        Ok(format!("SQLite {}", rusqlite::version()))
    }

    async fn list_catalogs(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_schemas(&self) -> Result<Vec<String>> {
        Ok(vec![MAIN_SCHEMA.to_string()])
    }

    #[tracing::instrument(skip(self))]
    async fn list_tables(
        &self,
        _catalog: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Self::check_schema(schema);
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .map_err(query_error("Failed to prepare table listing"))?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(query_error("Failed to list tables"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to list tables"))?;

        tracing::debug!(table_count = tables.len(), "tables listed");
        Ok(tables)
    }

    #[tracing::instrument(skip(self, table), fields(table = %table))]
    async fn get_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        Self::check_schema(table.schema.as_deref());
        let conn = self.conn.lock();
        Self::ensure_table_exists(&conn, &table.name)?;

        let mut stmt = conn
            .prepare(
                "SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
            )
            .map_err(query_error("Failed to prepare column query"))?;
        let rows = stmt
            .query_map([&table.name], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    row.get::<_, i64>(3)? != 0,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(query_error("Failed to read columns"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to read columns"))?;

        let pk_count = rows.iter().filter(|(.., pk)| *pk > 0).count();

        let columns = rows
            .into_iter()
            .map(|(cid, name, declared, not_null, default_value, pk)| {
                let rowid_alias = pk > 0 && is_rowid_alias(&declared, pk_count);

                let mut column = RawColumn::new(name, sql_type_code(&declared))
                    .with_ordinal(cid as usize + 1)
                    .with_auto_increment(rowid_alias);
                if !declared.is_empty() {
                    column = column.with_type_name(declared);
                }
                if not_null || rowid_alias {
                    column = column.not_null();
                }
                if let Some(default_value) = default_value {
                    column = column.with_default(default_value);
                }
                column
            })
            .collect::<Vec<_>>();

        tracing::trace!(column_count = columns.len(), "columns read");
        Ok(columns)
    }

    #[tracing::instrument(skip(self, table), fields(table = %table))]
    async fn get_primary_keys(&self, table: &TableRef) -> Result<Vec<RawPrimaryKey>> {
        let conn = self.conn.lock();
        Self::ensure_table_exists(&conn, &table.name)?;
        Ok(Self::primary_key_columns(&conn, &table.name)?
            .into_iter()
            .map(|(column, seq)| RawPrimaryKey::new(column, seq))
            .collect())
    }

    #[tracing::instrument(skip(self, table), fields(table = %table))]
    async fn get_imported_keys(&self, table: &TableRef) -> Result<Vec<RawImportedKey>> {
        let conn = self.conn.lock();
        Self::ensure_table_exists(&conn, &table.name)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, seq, \"table\", \"from\", \"to\" FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
            )
            .map_err(query_error("Failed to prepare foreign key query"))?;
        let rows = stmt
            .query_map([&table.name], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })
            .map_err(query_error("Failed to read foreign keys"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to read foreign keys"))?;

        let mut keys = Vec::with_capacity(rows.len());
        for (id, seq, referenced_table, column, to) in rows {
            // `REFERENCES parent` without a column list targets the parent key
            let referenced_column = match to {
                Some(to) => to,
                None => Self::primary_key_columns(&conn, &referenced_table)?
                    .into_iter()
                    .nth(seq as usize)
                    .map(|(name, _)| name)
                    .unwrap_or_else(|| "rowid".to_string()),
            };
            let name = format!("fk_{}_{}", table.name, id);
            keys.push(RawImportedKey::new(
                Some(name.as_str()),
                column,
                referenced_table,
                referenced_column,
                seq + 1,
            ));
        }

        tracing::trace!(key_count = keys.len(), "foreign keys read");
        Ok(keys)
    }

    #[tracing::instrument(skip(self, table), fields(table = %table))]
    async fn get_unique_index_columns(&self, table: &TableRef) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        Self::ensure_table_exists(&conn, &table.name)?;

        let mut stmt = conn
            .prepare("SELECT name FROM pragma_index_list(?1) WHERE \"unique\" = 1 ORDER BY seq")
            .map_err(query_error("Failed to prepare index query"))?;
        let indexes = stmt
            .query_map([&table.name], |row| row.get::<_, String>(0))
            .map_err(query_error("Failed to list indexes"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("Failed to list indexes"))?;

        let mut columns: Vec<String> = Self::rowid_alias_column(&conn, &table.name)?
            .into_iter()
            .collect();
        for index in indexes {
            let mut stmt = conn
                .prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")
                .map_err(query_error("Failed to prepare index column query"))?;
            let index_columns = stmt
                .query_map([&index], |row| row.get::<_, Option<String>>(0))
                .map_err(query_error("Failed to read index columns"))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(query_error("Failed to read index columns"))?;
            // Expression columns have no name
            columns.extend(index_columns.into_iter().flatten());
        }

        columns.dedup();
        Ok(columns)
    }
}
