//! Schema reader configuration

use crate::builder::AutoIncrementDetector;
use crate::relations::{FkMode, RelationFetch};
use crate::type_mapper::TypeMapper;

/// Options for one schema read
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Catalog to read; `None` lets the source decide
    pub catalog: Option<String>,
    /// Schema to read; `None` lets the source decide
    pub schema: Option<String>,
    pub fk_mode: FkMode,
    pub fetch: RelationFetch,
    pub type_mapper: TypeMapper,
    pub detector: AutoIncrementDetector,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_fk_mode(mut self, fk_mode: FkMode) -> Self {
        self.fk_mode = fk_mode;
        self
    }

    pub fn with_fetch(mut self, fetch: RelationFetch) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_type_mapper(mut self, type_mapper: TypeMapper) -> Self {
        self.type_mapper = type_mapper;
        self
    }

    pub fn with_detector(mut self, detector: AutoIncrementDetector) -> Self {
        self.detector = detector;
        self
    }
}
