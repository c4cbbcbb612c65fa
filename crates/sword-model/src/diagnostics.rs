//! Non-fatal findings collected during a schema read

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::Level;


/// Something the reader worked around instead of failing on.
///
/// Diagnostics are returned with the resolved schema and also logged when
/// recorded, at the level given by [`Diagnostic::level`]. Renamed fields are
/// routine and only show up at debug level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The naming override document could not be used; derived names apply
    OverrideLoad { path: String, message: String },

    /// A multi-column foreign key was left out of relationship inference
    AmbiguousRelationship {
        table: String,
        constraint: String,
        columns: Vec<String>,
        referenced_table: String,
    },

    /// A generated field name clashed and received a numeric suffix
    NameCollisionResolved {
        entity: String,
        requested: String,
        assigned: String,
    },
}

impl Diagnostic {
    /// Level this diagnostic is logged at
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::OverrideLoad { .. } | Diagnostic::AmbiguousRelationship { .. } => {
                Level::WARN
            }
            Diagnostic::NameCollisionResolved { .. } => Level::DEBUG,
        }
    }

    /// Emit this diagnostic as a structured event at [`Diagnostic::level`]
    pub fn log(&self) {
        match self {
            Diagnostic::OverrideLoad { path, message } => {
                tracing::warn!(path = %path, error = %message, "naming overrides not loaded, using derived names");
            }
            Diagnostic::AmbiguousRelationship {
                table,
                constraint,
                columns,
                referenced_table,
            } => {
                tracing::warn!(
                    table = %table,
                    constraint = %constraint,
                    columns = ?columns,
                    referenced_table = %referenced_table,
                    "multi-column foreign key skipped"
                );
            }
            Diagnostic::NameCollisionResolved {
                entity,
                requested,
                assigned,
            } => {
                tracing::debug!(
                    entity = %entity,
                    requested = %requested,
                    assigned = %assigned,
                    "field name collision resolved"
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OverrideLoad { path, message } => {
                write!(f, "naming overrides '{}' not loaded: {}", path, message)
            }
            Diagnostic::AmbiguousRelationship {
                table,
                constraint,
                columns,
                referenced_table,
            } => write!(
                f,
                "foreign key '{}' on '{}' spans {} columns ({}) referencing '{}' and was skipped",
                constraint,
                table,
                columns.len(),
                columns.join(", "),
                referenced_table
            ),
            Diagnostic::NameCollisionResolved {
                entity,
                requested,
                assigned,
            } => write!(
                f,
                "field '{}' on {} already taken, renamed to '{}'",
                requested, entity, assigned
            ),
        }
    }
}
