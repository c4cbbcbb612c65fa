//! Declared column type to SQL type code mapping

use sword_core::SqlTypeCode;


/// Derive a SQL type code from a SQLite declared type.
///
/// SQLite stores any declared type verbatim, so the common spellings are
/// recognised by keyword, checked in SQLite's own affinity order (INT before
/// CHAR/CLOB/TEXT before BLOB before REAL/FLOA/DOUB). Anything else is
/// reported as `OTHER`.
pub fn sql_type_code(declared: &str) -> SqlTypeCode {
    let declared = declared.trim().to_uppercase();
    let base = declared
        .split(['(', ' '])
        .next()
        .unwrap_or_default();

    if declared.is_empty() {
        return SqlTypeCode::OTHER;
    }

    if declared.contains("INT") {
        return match base {
            "BIGINT" | "INT8" => SqlTypeCode::BIGINT,
            "SMALLINT" | "INT2" => SqlTypeCode::SMALLINT,
            "TINYINT" => SqlTypeCode::TINYINT,
            _ => SqlTypeCode::INTEGER,
        };
    }

    if declared.contains("CLOB") {
        return SqlTypeCode::CLOB;
    }
    if declared.contains("CHAR") {
        return match base {
            "CHAR" | "CHARACTER" if !declared.contains("VARYING") => SqlTypeCode::CHAR,
            "NCHAR" | "NATIVE" => SqlTypeCode::NCHAR,
            "NVARCHAR" => SqlTypeCode::NVARCHAR,
            _ => SqlTypeCode::VARCHAR,
        };
    }
    if declared.contains("TEXT") {
        return SqlTypeCode::VARCHAR;
    }

    if declared.contains("BLOB") {
        return SqlTypeCode::BLOB;
    }

    if declared.contains("DOUB") {
        return SqlTypeCode::DOUBLE;
    }
    if declared.contains("FLOA") {
        return SqlTypeCode::FLOAT;
    }
    if declared.contains("REAL") {
        return SqlTypeCode::REAL;
    }

    match base {
        "NUMERIC" => SqlTypeCode::NUMERIC,
        "DECIMAL" => SqlTypeCode::DECIMAL,
        "BOOLEAN" | "BOOL" => SqlTypeCode::BOOLEAN,
        "DATETIME" | "TIMESTAMP" => SqlTypeCode::TIMESTAMP,
        "DATE" => SqlTypeCode::DATE,
        "TIME" => SqlTypeCode::TIME,
        "VARBINARY" => SqlTypeCode::VARBINARY,
        "BINARY" => SqlTypeCode::BINARY,
        _ => SqlTypeCode::OTHER,
    }
}
