//! Rendering of command results

use clap::ValueEnum;
use comfy_table::{Table, presets::UTF8_FULL};
use sword_model::{ResolvedEntity, ResolvedIdentifier, ResolvedSchema, SchemaScopes};

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "" }
}

pub fn render_tables(tables: &[String], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tables)?),
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "Table"]);
            for (index, name) in tables.iter().enumerate() {
                table.add_row(vec![(index + 1).to_string(), name.clone()]);
            }
            Ok(table.to_string())
        }
    }
}

pub fn render_scopes(scopes: &SchemaScopes, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(scopes)?),
        OutputFormat::Table => {
            let mut table = new_table(vec!["Kind", "Name"]);
            for catalog in &scopes.catalogs {
                table.add_row(vec!["catalog", catalog.as_str()]);
            }
            for schema in &scopes.schemas {
                table.add_row(vec!["schema", schema.as_str()]);
            }
            Ok(table.to_string())
        }
    }
}

pub fn render_schema(schema: &ResolvedSchema, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        OutputFormat::Table => Ok(render_schema_table(schema)),
    }
}

fn render_schema_table(schema: &ResolvedSchema) -> String {
    let mut out = format!(
        "{} schema, {} entities\n",
        schema.vendor.display_name(),
        schema.entities.len()
    );

    for entity in &schema.entities {
        out.push('\n');
        out.push_str(&render_entity(entity));
    }

    if !schema.diagnostics.is_empty() {
        out.push_str("\nDiagnostics:\n");
        for diagnostic in &schema.diagnostics {
            out.push_str(&format!("  - [{}] {}\n", diagnostic.level(), diagnostic));
        }
    }
    out
}

fn identifier_line(identifier: &ResolvedIdentifier) -> String {
    match identifier {
        ResolvedIdentifier::None => "none".to_string(),
        ResolvedIdentifier::Simple {
            field, generation, ..
        } => match generation {
            Some(generation) => format!("{} ({:?})", field, generation),
            None => field.clone(),
        },
        ResolvedIdentifier::Composite {
            type_name, fields, ..
        } => format!("{} ({})", type_name, fields.join(", ")),
    }
}

fn render_entity(entity: &ResolvedEntity) -> String {
    let mut out = format!(
        "{} / {} (table {})\nidentifier: {}\n",
        entity.entity_name,
        entity.plural_name,
        entity.table_name(),
        identifier_line(&entity.identifier)
    );

    let mut fields = new_table(vec![
        "Column", "Field", "Type", "Nullable", "Key", "Auto", "Relation",
    ]);
    for field in &entity.fields {
        fields.add_row(vec![
            field.column.clone(),
            field.field_name.clone(),
            field.scalar.to_string(),
            yes_no(field.nullable).to_string(),
            if field.primary_key { "PK" } else { "" }.to_string(),
            yes_no(field.auto_increment).to_string(),
            field.relation.clone().unwrap_or_default(),
        ]);
    }
    out.push_str(&fields.to_string());
    out.push('\n');

    if !entity.forward.is_empty() || !entity.inverse.is_empty() {
        let mut relations = new_table(vec!["Field", "Kind", "Target", "Join column", "Detail"]);
        for relation in &entity.forward {
            relations.add_row(vec![
                relation.field_name.clone(),
                relation.cardinality.to_string(),
                relation.target_entity.clone(),
                relation.join_column.clone(),
                format!("fetch {}", relation.fetch.as_str()),
            ]);
        }
        for relation in &entity.inverse {
            let kind = if relation.collection {
                "one_to_many"
            } else {
                "one_to_one (inverse)"
            };
            relations.add_row(vec![
                relation.field_name.clone(),
                kind.to_string(),
                relation.child_entity.clone(),
                relation.join_column.clone(),
                format!("mapped by {}", relation.mapped_by),
            ]);
        }
        out.push_str(&relations.to_string());
        out.push('\n');
    }
    out
}
