//! Override-aware name resolution

use super::overrides::NamingOverrides;
use super::words::{derive_entity_name, derive_field_name, lower_first, pluralize};

/// Resolves entity and field names for physical tables and columns.
///
/// An override entry wins over the derived name. The overrides are fixed
/// when the resolver is built.
#[derive(Debug, Clone, Default)]
pub struct NamingResolver {
    overrides: NamingOverrides,
}

impl NamingResolver {
    pub fn new(overrides: NamingOverrides) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &NamingOverrides {
        &self.overrides
    }

    /// Entity (type) name for a table
    pub fn resolve_entity_name(&self, table: &str) -> String {
        match self.overrides.entity_name(table) {
            Some(name) => name.to_string(),
            None => derive_entity_name(table),
        }
    }

    /// Field name for a column of a table
    pub fn resolve_column_name(&self, table: &str, column: &str) -> String {
        match self.overrides.column_name(table, column) {
            Some(name) => name.to_string(),
            None => derive_field_name(column),
        }
    }

    /// Plural of the entity name, for repository style collection names
    pub fn resolve_plural_name(&self, table: &str) -> String {
        pluralize(&self.resolve_entity_name(table))
    }

    /// Field name referring to one instance of the table's entity
    pub fn entity_field_name(&self, table: &str) -> String {
        lower_first(&self.resolve_entity_name(table))
    }
}
