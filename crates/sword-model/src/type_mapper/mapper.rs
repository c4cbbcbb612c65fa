//! Vendor SQL type to abstract scalar type mapping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use sword_core::{SqlTypeCode, Vendor};

/// Abstract scalar type of a resolved field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    Int32,
    Int64,
    /// Arbitrary-precision decimal
    Decimal,
    Boolean,
    /// Timestamp with a UTC offset
    OffsetDateTime,
    Date,
    /// Time of day
    Time,
    /// Opaque binary blob
    Binary,
    /// String-keyed map of opaque values (native JSON columns)
    JsonMap,
    /// Fallback for anything not recognised
    Object,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Decimal => "decimal",
            ScalarType::Boolean => "boolean",
            ScalarType::OffsetDateTime => "offset_date_time",
            ScalarType::Date => "date",
            ScalarType::Time => "time",
            ScalarType::Binary => "binary",
            ScalarType::JsonMap => "json_map",
            ScalarType::Object => "object",
        }
    }

    /// Whether this is the opaque fallback
    pub fn is_fallback(&self) -> bool {
        matches!(self, ScalarType::Object)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a vendor type onto an abstract scalar type.
///
/// Total and deterministic: every input maps to some `ScalarType`, and
/// unrecognised codes fall back to `ScalarType::Object`.
///
/// A column is described by its type code, type name, nullability and vendor,
/// but nullability is not a parameter here: it never changes the scalar type
/// and is carried on `ResolvedField::nullable` instead.
pub fn map_sql_type(code: SqlTypeCode, type_name: Option<&str>, vendor: Vendor) -> ScalarType {
    let type_name = type_name.map(|t| t.trim().to_lowercase()).unwrap_or_default();

    if vendor.has_native_json() && matches!(type_name.as_str(), "json" | "jsonb") {
        return ScalarType::JsonMap;
    }

    match code {
        SqlTypeCode::VARCHAR | SqlTypeCode::LONGVARCHAR | SqlTypeCode::CHAR | SqlTypeCode::CLOB => {
            ScalarType::String
        }
        SqlTypeCode::INTEGER | SqlTypeCode::SMALLINT => ScalarType::Int32,
        SqlTypeCode::BIGINT => ScalarType::Int64,
        SqlTypeCode::DECIMAL | SqlTypeCode::NUMERIC => ScalarType::Decimal,
        SqlTypeCode::BIT | SqlTypeCode::BOOLEAN => ScalarType::Boolean,
        SqlTypeCode::TIMESTAMP | SqlTypeCode::TIMESTAMP_WITH_TIMEZONE => ScalarType::OffsetDateTime,
        SqlTypeCode::DATE => ScalarType::Date,
        SqlTypeCode::TIME => ScalarType::Time,
        SqlTypeCode::BINARY | SqlTypeCode::VARBINARY | SqlTypeCode::BLOB => ScalarType::Binary,
        _ => ScalarType::Object,
    }
}

/// Scalar type mapper with optional per-vendor overrides
///
/// Custom mappings are keyed by vendor and (case-insensitive) type name and
/// take precedence over the built-in code table.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    custom_mappings: HashMap<(Vendor, String), ScalarType>,
}

impl TypeMapper {
    /// Creates a mapper with only the built-in mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom mapping for a vendor type name
    pub fn add_custom_mapping(&mut self, vendor: Vendor, type_name: &str, scalar: ScalarType) {
        self.custom_mappings
            .insert((vendor, type_name.trim().to_lowercase()), scalar);
    }

    /// Builder-style variant of [`TypeMapper::add_custom_mapping`]
    pub fn with_custom_mapping(
        mut self,
        vendor: Vendor,
        type_name: &str,
        scalar: ScalarType,
    ) -> Self {
        self.add_custom_mapping(vendor, type_name, scalar);
        self
    }

    /// Maps a vendor type, consulting custom mappings first
    pub fn map(&self, code: SqlTypeCode, type_name: Option<&str>, vendor: Vendor) -> ScalarType {
        if let Some(name) = type_name
            && let Some(scalar) = self
                .custom_mappings
                .get(&(vendor, name.trim().to_lowercase()))
        {
            return *scalar;
        }

        map_sql_type(code, type_name, vendor)
    }
}
