//! Per-table structural model

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use sword_core::{SqlTypeCode, TableRef};

use crate::type_mapper::ScalarType;

static NEXTVAL_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nextval\('([^']+)'").expect("valid nextval pattern"));

/// One column of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub name: String,
    pub type_code: SqlTypeCode,
    pub type_name: Option<String>,
    pub nullable: bool,
    /// Raw default definition text
    pub default_value: Option<String>,
    /// Resolved from the driver flag and the vendor rules
    pub auto_increment: bool,
}

impl ColumnModel {
    /// Sequence named by a `nextval('<name>'...)` default, if any
    pub fn sequence_name(&self) -> Option<String> {
        let default = self.default_value.as_deref()?;
        NEXTVAL_SEQUENCE
            .captures(default)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// A single-column foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleFkModel {
    pub local_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// How values of a single-column key are generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum KeyGeneration {
    /// Database-side identity / auto-increment column
    Identity,
    /// Named database sequence
    Sequence { name: String },
}

/// Identifier classification of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityIdentifier {
    /// Table has no primary key
    None,
    /// Single-column key
    Simple {
        column: String,
        scalar: ScalarType,
        generation: Option<KeyGeneration>,
    },
    /// Multi-column key, needing a synthetic identifier type downstream
    Composite { columns: Vec<String> },
}

impl EntityIdentifier {
    pub fn is_composite(&self) -> bool {
        matches!(self, EntityIdentifier::Composite { .. })
    }
}

/// Structural model of one table. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityModel {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table_name: String,
    /// Columns keyed by physical name, in discovery order
    pub columns: IndexMap<String, ColumnModel>,
    /// Primary key column names ordered by key sequence
    pub primary_key: IndexSet<String>,
    pub foreign_keys: Vec<SimpleFkModel>,
    pub identifier: EntityIdentifier,
}

impl EntityModel {
    pub fn table_ref(&self) -> TableRef {
        TableRef::scoped(
            self.catalog.as_deref(),
            self.schema.as_deref(),
            self.table_name.clone(),
        )
    }

    pub fn column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.get(name)
    }

    pub fn is_primary_key_column(&self, column: &str) -> bool {
        self.primary_key.contains(column)
    }

    pub fn has_composite_key(&self) -> bool {
        self.primary_key.len() > 1
    }

    /// Foreign key whose local column is `column`
    pub fn foreign_key_for(&self, column: &str) -> Option<&SimpleFkModel> {
        self.foreign_keys.iter().find(|fk| fk.local_column == column)
    }
}
