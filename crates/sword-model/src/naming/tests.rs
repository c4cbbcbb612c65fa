//! Tests for identifier naming

use super::*;

mod split_words_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_on_separator_runs() {
        assert_eq!(
            split_words("intervention__sub-categories"),
            vec!["intervention", "sub", "categories"]
        );
        assert_eq!(split_words("_leading_"), vec!["leading"]);
    }

    #[test]
    fn test_split_on_case_transitions() {
        assert_eq!(
            split_words("IncidentsMaintenance"),
            vec!["Incidents", "Maintenance"]
        );
        assert_eq!(split_words("PBSCode"), vec!["PBS", "Code"]);
        assert_eq!(split_words("table2Entry"), vec!["table2", "Entry"]);
        assert_eq!(split_words("v2users"), vec!["v2", "users"]);
    }

    #[test]
    fn test_single_token() {
        assert_eq!(split_words("incidentsmaintenance"), vec!["incidentsmaintenance"]);
        assert_eq!(split_words("USERS"), vec!["USERS"]);
        assert!(split_words("___").is_empty());
    }
}

mod inflection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("quizzes"), "quizz");
        assert_eq!(singularize("batches"), "batch");
        assert_eq!(singularize("wishes"), "wish");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("status"), "statu");
        assert_eq!(singularize("ies"), "ie");
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize("data"), "data");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("order"), "orders");
        assert_eq!(pluralize("address"), "address");
        assert_eq!(pluralize("STATUS"), "STATUS");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(lower_first("OrderLine"), "orderLine");
        assert_eq!(lower_first("PBSCode"), "pBSCode");
        assert_eq!(lower_first(""), "");
    }
}

mod entity_name_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_separator_split_and_singularize() {
        assert_eq!(
            derive_entity_name("intervention_subcategories"),
            "InterventionSubcategory"
        );
        assert_eq!(derive_entity_name("order_lines"), "OrderLine");
        assert_eq!(derive_entity_name("USER_ACCOUNTS"), "UserAccount");
    }

    #[test]
    fn test_case_transition_split() {
        assert_eq!(derive_entity_name("IncidentsMaintenance"), "IncidentMaintenance");
        assert_eq!(derive_entity_name("PBSCode"), "PbsCode");
        assert_eq!(derive_entity_name("OrderLines"), "OrderLine");
    }

    #[test]
    fn test_single_token() {
        assert_eq!(derive_entity_name("USERS"), "User");
        assert_eq!(derive_entity_name("companies"), "Company");
        // Run-on names have nothing to split on
        assert_eq!(
            derive_entity_name("incidentsmaintenance"),
            "Incidentsmaintenance"
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(derive_entity_name(""), "");
        assert_eq!(derive_entity_name("   "), "   ");
        assert_eq!(derive_entity_name("___"), "___");
    }

    #[test]
    fn test_derivation_is_stable() {
        for table in ["order_lines", "PBSCode", "IncidentsMaintenance", "x"] {
            assert_eq!(derive_entity_name(table), derive_entity_name(table));
        }
    }
}

mod field_name_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_fold_with_separators() {
        assert_eq!(derive_field_name("problem_id"), "problemId");
        assert_eq!(derive_field_name("CREATED_AT"), "createdAt");
        assert_eq!(derive_field_name("first__name"), "firstName");
        assert_eq!(derive_field_name("total-amount"), "totalAmount");
        assert_eq!(derive_field_name("trailing_"), "trailing");
    }

    #[test]
    fn test_leading_separator_keeps_empty_head() {
        assert_eq!(derive_field_name("_id"), "Id");
    }

    #[test]
    fn test_no_separator_only_lowers_first_char() {
        assert_eq!(derive_field_name("PBSCode"), "pBSCode");
        assert_eq!(derive_field_name("pBSCode"), "pBSCode");
        assert_eq!(derive_field_name("createdAt"), "createdAt");
    }

    #[test]
    fn test_non_ascii_letters_stay_in_the_word() {
        assert_eq!(derive_field_name("prénom"), "prénom");
        assert_eq!(derive_field_name("straße_nr"), "straßeNr");
        assert_eq!(derive_field_name("Größe"), "größe");
        assert_eq!(derive_entity_name("clients_fidèles"), "ClientFidèle");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(derive_field_name(""), "");
        assert_eq!(derive_field_name("___"), "___");
    }
}

mod overrides_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_bare_json_document() {
        let overrides =
            NamingOverrides::from_yaml_str(r#"{"problems": {"columns": {"problem_id": "id"}}}"#)
                .unwrap();

        assert_eq!(overrides.column_name("problems", "problem_id"), Some("id"));
        assert_eq!(overrides.entity_name("problems"), None);
    }

    #[test]
    fn test_wrapped_yaml_document() {
        let overrides = NamingOverrides::from_yaml_str(
            r#"
tables:
  Problems:
    entityName: Issue
    columns:
      Problem_ID: issueId
  audit_log:
    entity_name: AuditEntry
"#,
        )
        .unwrap();

        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.entity_name("problems"), Some("Issue"));
        assert_eq!(overrides.entity_name("PROBLEMS"), Some("Issue"));
        assert_eq!(overrides.entity_name("AUDIT_LOG"), Some("AuditEntry"));
        // Column keys are exact
        assert_eq!(overrides.column_name("problems", "Problem_ID"), Some("issueId"));
        assert_eq!(overrides.column_name("problems", "problem_id"), None);
    }

    #[test]
    fn test_blank_entity_name_is_ignored() {
        let overrides = NamingOverrides::empty()
            .with_table("problems", TableOverride::new().with_entity_name("  "));
        assert_eq!(overrides.entity_name("problems"), None);
    }

    #[test]
    fn test_empty_document() {
        assert!(NamingOverrides::from_yaml_str("").unwrap().is_empty());
        assert!(NamingOverrides::from_yaml_str("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        assert!(NamingOverrides::from_yaml_str("problems: [1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "problems:\n  columns:\n    problem_id: id").unwrap();

        let overrides = NamingOverrides::load(file.path()).unwrap();
        assert_eq!(overrides.column_name("problems", "problem_id"), Some("id"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.yaml");
        let err = NamingOverrides::load(&missing).unwrap_err();
        assert!(matches!(err, OverrideLoadError::NotFound { .. }));
        assert_eq!(err.path(), missing.as_path());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "tables: [oops").unwrap();
        let err = NamingOverrides::load(&broken).unwrap_err();
        assert!(matches!(err, OverrideLoadError::Malformed { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }
}

mod resolver_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> NamingResolver {
        NamingResolver::new(
            NamingOverrides::from_yaml_str(
                r#"{"problems": {"entityName": "Issue", "columns": {"problem_id": "id"}}}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_override_beats_derivation() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_column_name("problems", "problem_id"), "id");
        assert_eq!(resolver.resolve_column_name("PROBLEMS", "problem_id"), "id");
        assert_eq!(resolver.resolve_entity_name("Problems"), "Issue");
    }

    #[test]
    fn test_fallback_to_derived_names() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_column_name("problems", "opened_at"), "openedAt");
        assert_eq!(resolver.resolve_column_name("other", "problem_id"), "problemId");
        assert_eq!(
            resolver.resolve_entity_name("intervention_subcategories"),
            "InterventionSubcategory"
        );
        assert_eq!(resolver.resolve_column_name("any", "PBSCode"), "pBSCode");
    }

    #[test]
    fn test_plural_and_field_helpers() {
        let derived = NamingResolver::default();
        assert_eq!(derived.resolve_plural_name("order_lines"), "OrderLines");
        assert_eq!(derived.resolve_plural_name("addresses"), "Address");
        assert_eq!(derived.entity_field_name("order_lines"), "orderLine");
        assert_eq!(resolver().resolve_plural_name("problems"), "Issues");
    }
}
