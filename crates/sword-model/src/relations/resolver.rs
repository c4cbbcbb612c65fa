//! Forward and inverse relation resolution

use std::collections::HashSet;

use super::model::{Cardinality, EntityRelations, ForwardRelation, InverseRelation, RelationFetch};
use super::uniqueness::UniquenessIndex;
use crate::builder::EntityModel;
use crate::diagnostics::Diagnostic;
use crate::naming::{NamingResolver, lower_first, pluralize};

/// Derives relation fields for a complete, ordered set of entity models
pub struct RelationshipResolver<'a> {
    naming: &'a NamingResolver,
    fetch: RelationFetch,
}

impl<'a> RelationshipResolver<'a> {
    pub fn new(naming: &'a NamingResolver) -> Self {
        Self {
            naming,
            fetch: RelationFetch::default(),
        }
    }

    pub fn with_fetch(mut self, fetch: RelationFetch) -> Self {
        self.fetch = fetch;
        self
    }

    /// Resolve relations for every model. The result is parallel to
    /// `models`.
    ///
    /// Suffixes for clashing names are handed out in model order, then in
    /// foreign key order within each child.
    pub fn resolve(
        &self,
        models: &[EntityModel],
        uniqueness: &UniquenessIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<EntityRelations> {
        let forward: Vec<Vec<ForwardRelation>> = models
            .iter()
            .map(|model| self.forward_relations(model, models, uniqueness, diagnostics))
            .collect();

        let inverse: Vec<Vec<InverseRelation>> = models
            .iter()
            .enumerate()
            .map(|(index, parent)| {
                self.inverse_relations(index, parent, models, &forward, diagnostics)
            })
            .collect();

        forward
            .into_iter()
            .zip(inverse)
            .map(|(forward, inverse)| EntityRelations { forward, inverse })
            .collect()
    }

    fn forward_relations(
        &self,
        child: &EntityModel,
        models: &[EntityModel],
        uniqueness: &UniquenessIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ForwardRelation> {
        let child_entity = self.naming.resolve_entity_name(&child.table_name);

        // Scalar fields that survive next to the relations
        let mut used: HashSet<String> = child
            .columns
            .keys()
            .filter(|column| {
                child.foreign_key_for(column).is_none() || child.is_primary_key_column(column)
            })
            .map(|column| self.naming.resolve_column_name(&child.table_name, column))
            .collect();

        child
            .foreign_keys
            .iter()
            .map(|fk| {
                let target_table = models
                    .iter()
                    .find(|m| m.table_name.eq_ignore_ascii_case(&fk.target_table))
                    .map_or(fk.target_table.as_str(), |m| m.table_name.as_str());
                let target_entity = self.naming.resolve_entity_name(target_table);

                let cardinality = if uniqueness.is_unique(&child.table_name, &fk.local_column) {
                    Cardinality::OneToOne
                } else {
                    Cardinality::ManyToOne
                };

                let requested = lower_first(&target_entity);
                let field_name = claim_name(&child_entity, requested, &mut used, diagnostics);

                ForwardRelation {
                    field_name,
                    target_table: target_table.to_string(),
                    target_entity,
                    cardinality,
                    join_column: fk.local_column.clone(),
                    target_column: fk.target_column.clone(),
                    fetch: self.fetch,
                    optional: child
                        .column(&fk.local_column)
                        .is_none_or(|column| column.nullable),
                    part_of_primary_key: child.is_primary_key_column(&fk.local_column),
                }
            })
            .collect()
    }

    fn inverse_relations(
        &self,
        parent_index: usize,
        parent: &EntityModel,
        models: &[EntityModel],
        forward: &[Vec<ForwardRelation>],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<InverseRelation> {
        let parent_entity = self.naming.resolve_entity_name(&parent.table_name);
        let mut used = HashSet::new();
        let mut inverse = Vec::new();

        for (child_index, child) in models.iter().enumerate() {
            if child_index == parent_index || child.table_name.eq_ignore_ascii_case(&parent.table_name)
            {
                continue;
            }

            let child_entity = self.naming.resolve_entity_name(&child.table_name);
            for relation in &forward[child_index] {
                if !relation.target_table.eq_ignore_ascii_case(&parent.table_name) {
                    continue;
                }

                let collection = relation.cardinality.inverse_is_collection();
                let singular = lower_first(&child_entity);
                let requested = if collection {
                    pluralize(&singular)
                } else {
                    singular
                };
                let field_name = claim_name(&parent_entity, requested, &mut used, diagnostics);

                inverse.push(InverseRelation {
                    field_name,
                    child_table: child.table_name.clone(),
                    child_entity: child_entity.clone(),
                    cardinality: relation.cardinality,
                    collection,
                    mapped_by: relation.field_name.clone(),
                    join_column: relation.join_column.clone(),
                });
            }
        }
        inverse
    }
}

/// Take `requested`, or the first free `requested2`, `requested3`, ...
fn claim_name(
    entity: &str,
    requested: String,
    used: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    if used.insert(requested.clone()) {
        return requested;
    }

    let assigned = (2..)
        .map(|n| format!("{}{}", requested, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| requested.clone());
    used.insert(assigned.clone());

    let diagnostic = Diagnostic::NameCollisionResolved {
        entity: entity.to_string(),
        requested,
        assigned: assigned.clone(),
    };
    diagnostic.log();
    diagnostics.push(diagnostic);
    assigned
}
