//! Database vendor catalogue
//!
//! Drivers report a free-form product name ("PostgreSQL", "Microsoft SQL
//! Server", "MariaDB", ...). Everything vendor-specific in the model layer
//! dispatches on the `Vendor` resolved from that name, never on the raw string.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
mod tests;

/// Database vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    PostgreSql,
    MariaDb,
    MySql,
    MsSql,
    H2,
    Db2,
    Sqlite,
    /// Any product the catalogue does not recognise
    Other,
}

impl Vendor {
    /// Every known vendor, in catalogue order
    pub const ALL: [Vendor; 8] = [
        Vendor::PostgreSql,
        Vendor::MariaDb,
        Vendor::MySql,
        Vendor::MsSql,
        Vendor::H2,
        Vendor::Db2,
        Vendor::Sqlite,
        Vendor::Other,
    ];

    /// Resolve a vendor from a driver-reported product name (case-insensitive substring match)
    pub fn from_product_name(product: &str) -> Self {
        let product = product.to_lowercase();
        if product.contains("postgres") {
            Vendor::PostgreSql
        } else if product.contains("mariadb") {
            Vendor::MariaDb
        } else if product.contains("mysql") {
            Vendor::MySql
        } else if product.contains("sql server") {
            Vendor::MsSql
        } else if product.contains("db2") {
            Vendor::Db2
        } else if product.contains("h2") {
            Vendor::H2
        } else if product.contains("sqlite") {
            Vendor::Sqlite
        } else {
            Vendor::Other
        }
    }

    /// Short identifier, as used in configuration and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::PostgreSql => "postgresql",
            Vendor::MariaDb => "mariadb",
            Vendor::MySql => "mysql",
            Vendor::MsSql => "mssql",
            Vendor::H2 => "h2",
            Vendor::Db2 => "db2",
            Vendor::Sqlite => "sqlite",
            Vendor::Other => "other",
        }
    }

    /// Human readable product name
    pub fn display_name(&self) -> &'static str {
        match self {
            Vendor::PostgreSql => "PostgreSQL",
            Vendor::MariaDb => "MariaDB",
            Vendor::MySql => "MySQL",
            Vendor::MsSql => "MS SQL Server",
            Vendor::H2 => "H2",
            Vendor::Db2 => "IBM DB2",
            Vendor::Sqlite => "SQLite",
            Vendor::Other => "Other",
        }
    }

    /// Whether the vendor has native JSON column types worth mapping to a map type
    pub fn has_native_json(&self) -> bool {
        matches!(self, Vendor::PostgreSql)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
