//! Vendor rules for auto-increment detection
//!
//! Drivers are inconsistent about flagging generated columns, so the raw
//! flag is combined with per-vendor markers found in the type name and the
//! default definition. Each rule is a plain function and can be tested on
//! its own; callers may register additional rules.

use sword_core::{RawColumn, Vendor};

/// Predicate deciding whether a column is generated by the database
pub type AutoIncrementRule = fn(&RawColumn) -> bool;

fn type_name_lower(column: &RawColumn) -> String {
    column.type_name.as_deref().unwrap_or_default().to_lowercase()
}

fn default_lower(column: &RawColumn) -> String {
    column
        .default_value
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
}

/// PostgreSQL serial columns default to `nextval('<sequence>'::regclass)`
pub fn postgres_sequence_default(column: &RawColumn) -> bool {
    default_lower(column).contains("nextval(")
}

/// SQL Server reports `int identity` as the type name
pub fn sqlserver_identity(column: &RawColumn) -> bool {
    type_name_lower(column).contains("identity") || default_lower(column).contains("identity")
}

pub fn h2_identity(column: &RawColumn) -> bool {
    let default = default_lower(column);
    type_name_lower(column).contains("identity")
        || default.contains("auto_increment")
        || default.contains("identity")
}

/// DB2 reports `GENERATED ... AS IDENTITY` in the default text
pub fn db2_generated_identity(column: &RawColumn) -> bool {
    let default = default_lower(column);
    default.contains("generated") && default.contains("identity")
}

pub fn mysql_auto_increment(column: &RawColumn) -> bool {
    default_lower(column).contains("auto_increment")
}

/// Table of (vendor, rule) pairs consulted after the raw driver flag
#[derive(Debug, Clone)]
pub struct AutoIncrementDetector {
    rules: Vec<(Vendor, AutoIncrementRule)>,
}

impl Default for AutoIncrementDetector {
    fn default() -> Self {
        Self {
            rules: vec![
                (Vendor::PostgreSql, postgres_sequence_default as AutoIncrementRule),
                (Vendor::MsSql, sqlserver_identity),
                (Vendor::H2, h2_identity),
                (Vendor::Db2, db2_generated_identity),
                (Vendor::MySql, mysql_auto_increment),
                (Vendor::MariaDb, mysql_auto_increment),
            ],
        }
    }
}

impl AutoIncrementDetector {
    /// Detector with the built-in vendor rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector that only trusts the raw driver flag
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an additional rule for a vendor
    pub fn with_rule(mut self, vendor: Vendor, rule: AutoIncrementRule) -> Self {
        self.rules.push((vendor, rule));
        self
    }

    /// Rules registered for a vendor, in registration order
    pub fn rules_for(&self, vendor: Vendor) -> impl Iterator<Item = AutoIncrementRule> + '_ {
        self.rules
            .iter()
            .filter(move |(v, _)| *v == vendor)
            .map(|(_, rule)| *rule)
    }

    /// Whether any signal marks the column as generated
    pub fn is_auto_increment(&self, vendor: Vendor, column: &RawColumn) -> bool {
        column.auto_increment == Some(true) || self.rules_for(vendor).any(|rule| rule(column))
    }
}
