//! Folding of raw table metadata into entity models

use indexmap::{IndexMap, IndexSet};
use sword_core::Vendor;

use super::auto_increment::AutoIncrementDetector;
use super::model::{ColumnModel, EntityIdentifier, EntityModel, KeyGeneration, SimpleFkModel};
use crate::diagnostics::Diagnostic;
use crate::introspect::{ImportedFkRow, TableMetadata};
use crate::type_mapper::{ScalarType, TypeMapper};

/// Builds [`EntityModel`]s for one vendor
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    vendor: Vendor,
    detector: AutoIncrementDetector,
    type_mapper: TypeMapper,
}

impl ModelBuilder {
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            detector: AutoIncrementDetector::default(),
            type_mapper: TypeMapper::default(),
        }
    }

    pub fn with_detector(mut self, detector: AutoIncrementDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_type_mapper(mut self, type_mapper: TypeMapper) -> Self {
        self.type_mapper = type_mapper;
        self
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn type_mapper(&self) -> &TypeMapper {
        &self.type_mapper
    }

    /// Fold one table's metadata into its model.
    ///
    /// Multi-column foreign keys are left out and reported through
    /// `diagnostics`.
    pub fn build(&self, metadata: TableMetadata, diagnostics: &mut Vec<Diagnostic>) -> EntityModel {
        let TableMetadata {
            table,
            columns,
            primary_key,
            imported_keys,
        } = metadata;

        let columns: IndexMap<String, ColumnModel> = columns
            .into_iter()
            .map(|raw| {
                let auto_increment = self.detector.is_auto_increment(self.vendor, &raw);
                let column = ColumnModel {
                    name: raw.name.clone(),
                    type_code: raw.type_code,
                    type_name: raw.type_name,
                    nullable: raw.nullable,
                    default_value: raw.default_value,
                    auto_increment,
                };
                (raw.name, column)
            })
            .collect();

        let primary_key: IndexSet<String> = primary_key.into_iter().collect();
        let foreign_keys = self.group_foreign_keys(&table.name, imported_keys, diagnostics);
        let identifier = self.classify_identifier(&columns, &primary_key);

        tracing::debug!(
            table = %table.name,
            columns = columns.len(),
            primary_key = primary_key.len(),
            foreign_keys = foreign_keys.len(),
            "built entity model"
        );

        EntityModel {
            catalog: table.catalog,
            schema: table.schema,
            table_name: table.name,
            columns,
            primary_key,
            foreign_keys,
            identifier,
        }
    }

    /// Group rows by constraint name in first-seen order, keeping only
    /// single-column groups
    fn group_foreign_keys(
        &self,
        table: &str,
        rows: Vec<ImportedFkRow>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<SimpleFkModel> {
        let mut groups: IndexMap<String, Vec<ImportedFkRow>> = IndexMap::new();
        for row in rows {
            groups.entry(row.group_name.clone()).or_default().push(row);
        }

        let mut simple = Vec::new();
        for (constraint, mut rows) in groups {
            if rows.len() == 1 {
                let row = rows.remove(0);
                simple.push(SimpleFkModel {
                    local_column: row.local_column,
                    target_table: row.target_table,
                    target_column: row.target_column,
                });
                continue;
            }

            rows.sort_by_key(|row| row.key_seq);
            let diagnostic = Diagnostic::AmbiguousRelationship {
                table: table.to_string(),
                constraint,
                referenced_table: rows[0].target_table.clone(),
                columns: rows.into_iter().map(|row| row.local_column).collect(),
            };
            diagnostic.log();
            diagnostics.push(diagnostic);
        }
        simple
    }

    fn classify_identifier(
        &self,
        columns: &IndexMap<String, ColumnModel>,
        primary_key: &IndexSet<String>,
    ) -> EntityIdentifier {
        if primary_key.len() > 1 {
            return EntityIdentifier::Composite {
                columns: primary_key.iter().cloned().collect(),
            };
        }

        let Some(pk) = primary_key.first() else {
            return EntityIdentifier::None;
        };

        let Some(column) = columns.get(pk) else {
            tracing::warn!(column = %pk, "primary key column missing from column listing");
            return EntityIdentifier::Simple {
                column: pk.clone(),
                scalar: ScalarType::Object,
                generation: None,
            };
        };

        let scalar = self
            .type_mapper
            .map(column.type_code, column.type_name.as_deref(), self.vendor);
        let generation = column
            .auto_increment
            .then(|| match column.sequence_name() {
                Some(name) if self.vendor == Vendor::PostgreSql => KeyGeneration::Sequence { name },
                _ => KeyGeneration::Identity,
            });

        EntityIdentifier::Simple {
            column: pk.clone(),
            scalar,
            generation,
        }
    }
}
