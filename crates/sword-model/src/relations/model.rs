//! Relation descriptors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cardinality of a foreign key edge, seen from the child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Local column is covered by a unique index
    OneToOne,
    ManyToOne,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one_to_one",
            Cardinality::ManyToOne => "many_to_one",
        }
    }

    /// Whether the parent side holds a collection of children
    pub fn inverse_is_collection(&self) -> bool {
        matches!(self, Cardinality::ManyToOne)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loading strategy for single-valued relations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationFetch {
    #[default]
    Lazy,
    Eager,
}

impl RelationFetch {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationFetch::Lazy => "lazy",
            RelationFetch::Eager => "eager",
        }
    }
}

impl FromStr for RelationFetch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lazy" => Ok(RelationFetch::Lazy),
            "eager" => Ok(RelationFetch::Eager),
            other => Err(format!("unknown fetch strategy: {}", other)),
        }
    }
}

/// How foreign key columns are surfaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FkMode {
    /// Foreign key columns stay plain scalar fields
    Scalar,
    /// Foreign keys become relation fields
    #[default]
    Relation,
}

impl FkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FkMode::Scalar => "scalar",
            FkMode::Relation => "relation",
        }
    }
}

impl FromStr for FkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scalar" => Ok(FkMode::Scalar),
            "relation" => Ok(FkMode::Relation),
            other => Err(format!("unknown foreign key mode: {}", other)),
        }
    }
}

/// Child-side relation field for one simple foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRelation {
    pub field_name: String,
    pub target_table: String,
    pub target_entity: String,
    pub cardinality: Cardinality,
    /// Physical local column
    pub join_column: String,
    pub target_column: String,
    pub fetch: RelationFetch,
    /// Whether the join column can be null
    pub optional: bool,
    /// Join column is also part of the child's primary key, so the relation
    /// must not write it
    pub part_of_primary_key: bool,
}

/// Parent-side back-reference to children pointing at the parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseRelation {
    pub field_name: String,
    pub child_table: String,
    pub child_entity: String,
    pub cardinality: Cardinality,
    /// Holds a collection of children (always lazily loaded)
    pub collection: bool,
    /// Forward field on the child owning the join column
    pub mapped_by: String,
    pub join_column: String,
}

/// Relations of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRelations {
    pub forward: Vec<ForwardRelation>,
    pub inverse: Vec<InverseRelation>,
}

impl EntityRelations {
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.inverse.is_empty()
    }

    /// Forward relation joined through a physical column
    pub fn forward_for_column(&self, column: &str) -> Option<&ForwardRelation> {
        self.forward.iter().find(|rel| rel.join_column == column)
    }
}
