//! Resolved object model handed to emitters

use serde::{Deserialize, Serialize};
use sword_core::{SqlTypeCode, Vendor};

use crate::builder::{EntityModel, KeyGeneration};
use crate::diagnostics::Diagnostic;
use crate::relations::{ForwardRelation, InverseRelation};
use crate::type_mapper::ScalarType;

/// One column as a named, typed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    pub column: String,
    pub field_name: String,
    pub scalar: ScalarType,
    pub type_code: SqlTypeCode,
    pub type_name: Option<String>,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    /// Forward relation that carries this column, when foreign keys are
    /// resolved as relations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

/// Identifier of an entity, in field terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedIdentifier {
    None,
    Simple {
        field: String,
        column: String,
        scalar: ScalarType,
        generation: Option<KeyGeneration>,
    },
    /// Needs a synthetic identifier type named `type_name`
    Composite {
        type_name: String,
        fields: Vec<String>,
        columns: Vec<String>,
    },
}

/// One table, fully resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub entity_name: String,
    pub plural_name: String,
    pub fields: Vec<ResolvedField>,
    pub identifier: ResolvedIdentifier,
    pub forward: Vec<ForwardRelation>,
    pub inverse: Vec<InverseRelation>,
    pub model: EntityModel,
}

impl ResolvedEntity {
    pub fn table_name(&self) -> &str {
        &self.model.table_name
    }

    pub fn field(&self, column: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.column == column)
    }

    pub fn forward_relation(&self, field_name: &str) -> Option<&ForwardRelation> {
        self.forward.iter().find(|r| r.field_name == field_name)
    }

    pub fn inverse_relation(&self, field_name: &str) -> Option<&InverseRelation> {
        self.inverse.iter().find(|r| r.field_name == field_name)
    }
}

/// Catalogs and schemas a source exposes, for choosing a read scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaScopes {
    pub catalogs: Vec<String>,
    pub schemas: Vec<String>,
}

/// Result of a complete schema read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSchema {
    pub vendor: Vendor,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    /// Entities in table discovery order
    pub entities: Vec<ResolvedEntity>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedSchema {
    /// Entity for a table, matched case-insensitively
    pub fn entity(&self, table: &str) -> Option<&ResolvedEntity> {
        self.entities
            .iter()
            .find(|e| e.model.table_name.eq_ignore_ascii_case(table))
    }

    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.entity_name.as_str()).collect()
    }

    /// The structural models, in discovery order
    pub fn models(&self) -> impl Iterator<Item = &EntityModel> {
        self.entities.iter().map(|e| &e.model)
    }
}
