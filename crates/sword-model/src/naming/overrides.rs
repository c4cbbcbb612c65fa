//! Naming override document
//!
//! A two-level mapping loaded once per run: physical table name to an
//! optional entity name and a physical column to field name map.
//!
//! ```yaml
//! tables:
//!   problems:
//!     entityName: Issue
//!     columns:
//!       problem_id: id
//! ```
//!
//! The `tables:` wrapper is optional, and JSON documents parse as well.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading an override document
#[derive(Debug, Error)]
pub enum OverrideLoadError {
    #[error("override file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read override file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed override file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl OverrideLoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

/// Overrides for one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOverride {
    #[serde(
        default,
        rename = "entityName",
        alias = "entity_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_name: Option<String>,

    /// Field names keyed by exact physical column name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub columns: IndexMap<String, String>,
}

impl TableOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_name(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = Some(entity_name.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>, field: impl Into<String>) -> Self {
        self.columns.insert(column.into(), field.into());
        self
    }

    /// Entity name, unless missing or blank
    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Field name for an exact column key, unless missing or blank
    pub fn column_name(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OverrideDocument {
    Wrapped {
        tables: IndexMap<String, TableOverride>,
    },
    Bare(IndexMap<String, TableOverride>),
}

/// Immutable table of naming overrides, keyed case-insensitively by table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOverrides {
    tables: HashMap<String, TableOverride>,
}

impl NamingOverrides {
    /// An empty table; every name is derived
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a YAML (or JSON) override document
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }

        let tables = match serde_yaml::from_str::<OverrideDocument>(content)? {
            OverrideDocument::Wrapped { tables } => tables,
            OverrideDocument::Bare(tables) => tables,
        };
        Ok(tables.into_iter().collect())
    }

    /// Read and parse an override document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OverrideLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                OverrideLoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                OverrideLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let overrides =
            Self::from_yaml_str(&content).map_err(|source| OverrideLoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), tables = overrides.len(), "loaded naming overrides");
        Ok(overrides)
    }

    pub fn with_table(mut self, table: &str, table_override: TableOverride) -> Self {
        self.tables.insert(table.to_lowercase(), table_override);
        self
    }

    /// Overrides for a table, matched case-insensitively
    pub fn table(&self, table: &str) -> Option<&TableOverride> {
        self.tables.get(&table.to_lowercase())
    }

    pub fn entity_name(&self, table: &str) -> Option<&str> {
        self.table(table)?.entity_name()
    }

    pub fn column_name(&self, table: &str, column: &str) -> Option<&str> {
        self.table(table)?.column_name(column)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(String, TableOverride)> for NamingOverrides {
    fn from_iter<I: IntoIterator<Item = (String, TableOverride)>>(iter: I) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|(table, table_override)| (table.to_lowercase(), table_override))
                .collect(),
        }
    }
}
