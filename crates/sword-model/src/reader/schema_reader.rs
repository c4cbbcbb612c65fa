//! Schema reader pipeline

use std::path::Path;

use sword_core::{MetadataSource, TableRef, Vendor};

use super::options::ReaderOptions;
use super::resolved::{
    ResolvedEntity, ResolvedField, ResolvedIdentifier, ResolvedSchema, SchemaScopes,
};
use crate::builder::{EntityIdentifier, EntityModel, ModelBuilder};
use crate::diagnostics::Diagnostic;
use crate::error::ModelResult;
use crate::introspect::SchemaIntrospector;
use crate::naming::{NamingOverrides, NamingResolver};
use crate::relations::{EntityRelations, FkMode, RelationshipResolver, UniquenessIndex};

/// Reads a scope of a database into a [`ResolvedSchema`]
#[derive(Debug, Clone, Default)]
pub struct SchemaReader {
    naming: NamingResolver,
    options: ReaderOptions,
    /// Recorded before the read starts (override loading)
    diagnostics: Vec<Diagnostic>,
}

impl SchemaReader {
    pub fn new(naming: NamingResolver, options: ReaderOptions) -> Self {
        Self {
            naming,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Load naming overrides from a file.
    ///
    /// A missing or malformed file is not fatal: names are derived and an
    /// [`Diagnostic::OverrideLoad`] is reported with the schema.
    pub fn with_override_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match NamingOverrides::load(path) {
            Ok(overrides) => self.naming = NamingResolver::new(overrides),
            Err(err) => {
                let diagnostic = Diagnostic::OverrideLoad {
                    path: path.display().to_string(),
                    message: err.to_string(),
                };
                diagnostic.log();
                self.diagnostics.push(diagnostic);
                self.naming = NamingResolver::default();
            }
        }
        self
    }

    pub fn naming(&self) -> &NamingResolver {
        &self.naming
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Catalogs and schemas the source can be scoped to
    pub async fn list_scopes(&self, source: &dyn MetadataSource) -> ModelResult<SchemaScopes> {
        let introspector = SchemaIntrospector::new(source);
        let scopes = SchemaScopes {
            catalogs: introspector.discover_catalogs().await?,
            schemas: introspector.discover_schemas().await?,
        };
        tracing::debug!(
            catalogs = scopes.catalogs.len(),
            schemas = scopes.schemas.len(),
            "discovered scopes"
        );
        Ok(scopes)
    }

    /// Names of the tables in the configured scope, in discovery order
    pub async fn list_tables(&self, source: &dyn MetadataSource) -> ModelResult<Vec<String>> {
        SchemaIntrospector::new(source)
            .discover_tables(self.options.catalog.as_deref(), self.options.schema.as_deref())
            .await
    }

    /// Read every table of the configured scope
    pub async fn read(&self, source: &dyn MetadataSource) -> ModelResult<ResolvedSchema> {
        let tables = self.list_tables(source).await?;
        self.read_tables(source, &tables).await
    }

    /// Read an explicit list of tables, in the given order.
    ///
    /// Tables are introspected one at a time; the first failure aborts the
    /// read and no partial schema is returned.
    #[tracing::instrument(skip(self, source, tables), fields(tables = tables.len()))]
    pub async fn read_tables(
        &self,
        source: &dyn MetadataSource,
        tables: &[String],
    ) -> ModelResult<ResolvedSchema> {
        let introspector = SchemaIntrospector::new(source);
        let product = introspector.database_product().await?;
        let vendor = Vendor::from_product_name(&product);
        tracing::info!(product = %product, vendor = vendor.as_str(), "reading schema");

        let builder = ModelBuilder::new(vendor)
            .with_type_mapper(self.options.type_mapper.clone())
            .with_detector(self.options.detector.clone());
        let mut diagnostics = self.diagnostics.clone();

        let mut models = Vec::with_capacity(tables.len());
        for table in tables {
            let table_ref = TableRef::scoped(
                self.options.catalog.as_deref(),
                self.options.schema.as_deref(),
                table.clone(),
            );
            let metadata = introspector.introspect(&table_ref).await?;
            models.push(builder.build(metadata, &mut diagnostics));
        }

        let relations = match self.options.fk_mode {
            FkMode::Relation => {
                let uniqueness = UniquenessIndex::collect(source, &models).await?;
                RelationshipResolver::new(&self.naming)
                    .with_fetch(self.options.fetch)
                    .resolve(&models, &uniqueness, &mut diagnostics)
            }
            FkMode::Scalar => vec![EntityRelations::default(); models.len()],
        };

        let entities: Vec<ResolvedEntity> = models
            .into_iter()
            .zip(relations)
            .map(|(model, relations)| self.resolve_entity(&builder, model, relations))
            .collect();

        tracing::info!(
            entities = entities.len(),
            diagnostics = diagnostics.len(),
            "schema read complete"
        );

        Ok(ResolvedSchema {
            vendor,
            catalog: self.options.catalog.clone(),
            schema: self.options.schema.clone(),
            entities,
            diagnostics,
        })
    }

    fn resolve_entity(
        &self,
        builder: &ModelBuilder,
        model: EntityModel,
        relations: EntityRelations,
    ) -> ResolvedEntity {
        let table = model.table_name.as_str();
        let entity_name = self.naming.resolve_entity_name(table);
        let plural_name = self.naming.resolve_plural_name(table);

        let fields: Vec<ResolvedField> = model
            .columns
            .values()
            .map(|column| ResolvedField {
                column: column.name.clone(),
                field_name: self.naming.resolve_column_name(table, &column.name),
                scalar: builder.type_mapper().map(
                    column.type_code,
                    column.type_name.as_deref(),
                    builder.vendor(),
                ),
                type_code: column.type_code,
                type_name: column.type_name.clone(),
                nullable: column.nullable,
                primary_key: model.is_primary_key_column(&column.name),
                auto_increment: column.auto_increment,
                relation: relations
                    .forward_for_column(&column.name)
                    .map(|rel| rel.field_name.clone()),
            })
            .collect();

        let identifier = match &model.identifier {
            EntityIdentifier::None => ResolvedIdentifier::None,
            EntityIdentifier::Simple {
                column,
                scalar,
                generation,
            } => ResolvedIdentifier::Simple {
                field: self.naming.resolve_column_name(table, column),
                column: column.clone(),
                scalar: *scalar,
                generation: generation.clone(),
            },
            EntityIdentifier::Composite { columns } => ResolvedIdentifier::Composite {
                type_name: format!("{}Id", entity_name),
                fields: columns
                    .iter()
                    .map(|column| self.naming.resolve_column_name(table, column))
                    .collect(),
                columns: columns.clone(),
            },
        };

        ResolvedEntity {
            entity_name,
            plural_name,
            fields,
            identifier,
            forward: relations.forward,
            inverse: relations.inverse,
            model,
        }
    }
}
