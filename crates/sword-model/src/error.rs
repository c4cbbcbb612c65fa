//! Errors raised while building the object model

use sword_core::SwordError;
use thiserror::Error;

/// Fatal errors of a schema read.
///
/// Any of these aborts the run; no partial model is returned.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Product name or table listing could not be read
    #[error("schema discovery failed: {source}")]
    Discovery {
        #[source]
        source: SwordError,
    },

    /// A metadata call for one table failed
    #[error("introspection of table '{table}' failed: {source}")]
    Introspection {
        table: String,
        #[source]
        source: SwordError,
    },
}

impl ModelError {
    pub fn discovery(source: SwordError) -> Self {
        Self::Discovery { source }
    }

    pub fn introspection(table: impl Into<String>, source: SwordError) -> Self {
        Self::Introspection {
            table: table.into(),
            source,
        }
    }

    /// Name of the table whose introspection failed, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Introspection { table, .. } => Some(table),
            Self::Discovery { .. } => None,
        }
    }
}

/// Result type for model building operations
pub type ModelResult<T> = Result<T, ModelError>;
