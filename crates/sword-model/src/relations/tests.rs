//! Tests for relationship inference

use super::*;
use crate::builder::{ColumnModel, EntityIdentifier, EntityModel, SimpleFkModel};
use crate::diagnostics::Diagnostic;
use crate::naming::{NamingOverrides, NamingResolver, TableOverride};
use indexmap::{IndexMap, IndexSet};
use sword_core::SqlTypeCode;

fn entity(table: &str, columns: &[&str], pk: &[&str], fks: &[(&str, &str)]) -> EntityModel {
    let columns: IndexMap<String, ColumnModel> = columns
        .iter()
        .map(|name| {
            (
                name.to_string(),
                ColumnModel {
                    name: name.to_string(),
                    type_code: SqlTypeCode::INTEGER,
                    type_name: Some("int4".to_string()),
                    nullable: !pk.contains(name),
                    default_value: None,
                    auto_increment: false,
                },
            )
        })
        .collect();

    EntityModel {
        catalog: None,
        schema: Some("public".to_string()),
        table_name: table.to_string(),
        columns,
        primary_key: pk.iter().map(|s| s.to_string()).collect::<IndexSet<_>>(),
        foreign_keys: fks
            .iter()
            .map(|(column, target)| SimpleFkModel {
                local_column: column.to_string(),
                target_table: target.to_string(),
                target_column: "id".to_string(),
            })
            .collect(),
        identifier: EntityIdentifier::None,
    }
}

fn shop() -> Vec<EntityModel> {
    vec![
        entity("customers", &["id", "name"], &["id"], &[]),
        entity(
            "orders",
            &["id", "customer_id"],
            &["id"],
            &[("customer_id", "customers")],
        ),
        entity(
            "loyalty_cards",
            &["id", "customer_id"],
            &["id"],
            &[("customer_id", "CUSTOMERS")],
        ),
    ]
}

mod cardinality_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unique_fk_is_one_to_one_with_singular_inverse() {
        let naming = NamingResolver::default();
        let uniqueness =
            UniquenessIndex::new().with_unique_columns("loyalty_cards", vec!["CUSTOMER_ID".into()]);
        let mut diagnostics = Vec::new();

        let relations =
            RelationshipResolver::new(&naming).resolve(&shop(), &uniqueness, &mut diagnostics);

        let card = &relations[2].forward[0];
        assert_eq!(card.cardinality, Cardinality::OneToOne);
        assert_eq!(card.field_name, "customer");
        assert_eq!(card.target_entity, "Customer");
        assert_eq!(card.target_table, "customers");

        let inverse = &relations[0].inverse;
        assert_eq!(inverse.len(), 2);
        assert_eq!(inverse[1].field_name, "loyaltyCard");
        assert!(!inverse[1].collection);
        assert_eq!(inverse[1].mapped_by, "customer");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_unique_fk_is_many_to_one_with_collection_inverse() {
        let naming = NamingResolver::default();
        let relations = RelationshipResolver::new(&naming).resolve(
            &shop(),
            &UniquenessIndex::new(),
            &mut Vec::new(),
        );

        let order = &relations[1].forward[0];
        assert_eq!(order.cardinality, Cardinality::ManyToOne);
        assert_eq!(order.join_column, "customer_id");
        assert!(order.optional);
        assert!(!order.part_of_primary_key);
        assert_eq!(order.fetch, RelationFetch::Lazy);

        let inverse = &relations[0].inverse[0];
        assert_eq!(inverse.field_name, "orders");
        assert!(inverse.collection);
        assert_eq!(inverse.child_entity, "Order");
        assert_eq!(inverse.cardinality, Cardinality::ManyToOne);
    }

    #[test]
    fn test_children_without_parents_have_no_inverse() {
        let naming = NamingResolver::default();
        let relations = RelationshipResolver::new(&naming).resolve(
            &shop(),
            &UniquenessIndex::new(),
            &mut Vec::new(),
        );

        assert!(relations[1].inverse.is_empty());
        assert!(relations[2].inverse.is_empty());
        assert!(relations[0].forward.is_empty());
    }
}

mod naming_collision_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn colliding_models() -> (Vec<EntityModel>, NamingResolver) {
        let models = vec![
            entity("customers", &["id"], &["id"], &[]),
            entity(
                "web_orders",
                &["id", "customer_id"],
                &["id"],
                &[("customer_id", "customers")],
            ),
            entity(
                "shop_orders",
                &["id", "customer_id"],
                &["id"],
                &[("customer_id", "customers")],
            ),
        ];
        let naming = NamingResolver::new(
            NamingOverrides::empty()
                .with_table("web_orders", TableOverride::new().with_entity_name("Order"))
                .with_table("shop_orders", TableOverride::new().with_entity_name("Order")),
        );
        (models, naming)
    }

    #[test]
    fn test_colliding_inverse_names_get_suffixes() {
        let (models, naming) = colliding_models();
        let uniqueness = UniquenessIndex::new()
            .with_unique_columns("web_orders", vec!["customer_id".into()])
            .with_unique_columns("shop_orders", vec!["customer_id".into()]);
        let mut diagnostics = Vec::new();

        let relations =
            RelationshipResolver::new(&naming).resolve(&models, &uniqueness, &mut diagnostics);

        let names: Vec<_> = relations[0]
            .inverse
            .iter()
            .map(|rel| rel.field_name.as_str())
            .collect();
        assert_eq!(names, vec!["order", "order2"]);
        assert_eq!(relations[0].inverse[1].child_table, "shop_orders");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::NameCollisionResolved {
                entity: "Customer".to_string(),
                requested: "order".to_string(),
                assigned: "order2".to_string(),
            }]
        );
    }

    #[test]
    fn test_suffixes_are_stable_across_runs() {
        let (models, naming) = colliding_models();
        let resolver = RelationshipResolver::new(&naming);

        let first = resolver.resolve(&models, &UniquenessIndex::new(), &mut Vec::new());
        for _ in 0..5 {
            let again = resolver.resolve(&models, &UniquenessIndex::new(), &mut Vec::new());
            assert_eq!(again, first);
        }
        let names: Vec<_> = first[0].inverse.iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(names, vec!["orders", "orders2"]);
    }

    #[test]
    fn test_two_keys_to_same_parent_on_one_child() {
        let models = vec![
            entity("addresses", &["id"], &["id"], &[]),
            entity(
                "shipments",
                &["id", "origin_id", "destination_id"],
                &["id"],
                &[("origin_id", "addresses"), ("destination_id", "addresses")],
            ),
        ];
        let naming = NamingResolver::default();
        let mut diagnostics = Vec::new();

        let relations =
            RelationshipResolver::new(&naming).resolve(&models, &UniquenessIndex::new(), &mut diagnostics);

        let forward: Vec<_> = relations[1].forward.iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(forward, vec!["address", "address2"]);

        let inverse = &relations[0].inverse;
        assert_eq!(inverse[0].field_name, "shipments");
        assert_eq!(inverse[0].mapped_by, "address");
        assert_eq!(inverse[1].field_name, "shipments2");
        assert_eq!(inverse[1].mapped_by, "address2");
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_forward_name_avoids_surviving_scalar_field() {
        let models = vec![
            entity("customers", &["id"], &["id"], &[]),
            entity(
                "orders",
                &["id", "customer", "customer_id"],
                &["id"],
                &[("customer_id", "customers")],
            ),
        ];
        let naming = NamingResolver::default();

        let relations =
            RelationshipResolver::new(&naming).resolve(&models, &UniquenessIndex::new(), &mut Vec::new());

        assert_eq!(relations[1].forward[0].field_name, "customer2");
    }
}

mod edge_case_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_self_reference_has_forward_but_no_inverse() {
        let models = vec![entity(
            "employees",
            &["id", "manager_id"],
            &["id"],
            &[("manager_id", "employees")],
        )];
        let naming = NamingResolver::default();

        let relations =
            RelationshipResolver::new(&naming).resolve(&models, &UniquenessIndex::new(), &mut Vec::new());

        assert_eq!(relations[0].forward.len(), 1);
        assert_eq!(relations[0].forward[0].field_name, "employee");
        assert!(relations[0].inverse.is_empty());
    }

    #[test]
    fn test_join_column_in_primary_key() {
        let models = vec![
            entity("orders", &["id"], &["id"], &[]),
            entity(
                "order_lines",
                &["order_id", "line_no"],
                &["order_id", "line_no"],
                &[("order_id", "orders")],
            ),
        ];
        let naming = NamingResolver::default();

        let relations = RelationshipResolver::new(&naming)
            .with_fetch(RelationFetch::Eager)
            .resolve(&models, &UniquenessIndex::new(), &mut Vec::new());

        let order = &relations[1].forward[0];
        assert!(order.part_of_primary_key);
        assert!(!order.optional);
        assert_eq!(order.fetch, RelationFetch::Eager);
        assert_eq!(relations[0].inverse[0].field_name, "orderLines");
    }

    #[test]
    fn test_target_outside_model_set() {
        let models = vec![entity(
            "orders",
            &["id", "region_id"],
            &["id"],
            &[("region_id", "regions")],
        )];
        let naming = NamingResolver::default();

        let relations =
            RelationshipResolver::new(&naming).resolve(&models, &UniquenessIndex::new(), &mut Vec::new());

        assert_eq!(relations[0].forward[0].target_entity, "Region");
        assert_eq!(relations[0].forward[0].target_table, "regions");
    }
}

mod uniqueness_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::testing::{FakeSource, FakeTable};

    #[test]
    fn test_is_unique_ignores_case() {
        let index = UniquenessIndex::new().with_unique_columns("Orders", vec!["Code".into()]);
        assert!(index.is_unique("orders", "CODE"));
        assert!(!index.is_unique("orders", "other"));
        assert!(!index.is_unique("customers", "code"));
    }

    #[tokio::test]
    async fn test_collect_only_queries_tables_with_foreign_keys() {
        let source = FakeSource::new("PostgreSQL")
            .table(FakeTable::new("customers").unique("email"))
            .table(FakeTable::new("orders").unique("customer_id"));

        let index = UniquenessIndex::collect(&source, &shop()[..2]).await.unwrap();

        assert_eq!(source.unique_lookups(), 1);
        assert!(index.is_unique("orders", "customer_id"));
        assert!(!index.is_unique("customers", "email"));
    }

    #[tokio::test]
    async fn test_collect_failure_names_the_table() {
        let source = FakeSource::new("PostgreSQL")
            .table(FakeTable::new("customers"))
            .table(FakeTable::new("orders"))
            .failing_on("orders");

        let err = UniquenessIndex::collect(&source, &shop()[..2]).await.unwrap_err();
        assert_eq!(err.table(), Some("orders"));
    }
}

mod mode_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_modes() {
        assert_eq!("relation".parse::<FkMode>(), Ok(FkMode::Relation));
        assert_eq!("SCALAR".parse::<FkMode>(), Ok(FkMode::Scalar));
        assert!("both".parse::<FkMode>().is_err());
        assert_eq!(FkMode::default(), FkMode::Relation);

        assert_eq!("eager".parse::<RelationFetch>(), Ok(RelationFetch::Eager));
        assert_eq!(RelationFetch::default(), RelationFetch::Lazy);
    }
}
