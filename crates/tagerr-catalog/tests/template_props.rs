// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for message templates and catalog definitions.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use tagerr_catalog::{CatalogEntry, ErrorCatalog, placeholders, render, validate_catalog};

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,8}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,24}"
}

proptest! {
    #[test]
    fn brace_free_text_renders_unchanged(text in arb_text()) {
        prop_assert!(placeholders(&text).is_empty());
        prop_assert_eq!(render(&text, &Map::new()), text);
    }

    #[test]
    fn every_placeholder_is_substituted(
        names in prop::collection::btree_set(arb_name(), 1..4),
        text in arb_text(),
    ) {
        let template: String = names.iter().map(|n| format!("{text}{{{n}}}")).collect();
        let values: Map<String, Value> = names
            .iter()
            .map(|n| (n.clone(), Value::String(n.to_uppercase())))
            .collect();
        let rendered = render(&template, &values);
        let has_brace = rendered.contains('{');
        prop_assert!(!has_brace, "rendered: {}", rendered);
        for name in &names {
            prop_assert!(rendered.contains(&name.to_uppercase()));
        }
        let found: Vec<&str> = placeholders(&template);
        prop_assert_eq!(found.len(), names.len());
    }

    #[test]
    fn params_bind_in_order(params in prop::collection::btree_set(arb_name(), 1..5)) {
        let params: Vec<String> = params
            .into_iter()
            .filter(|p| p != "code" && p != "message")
            .collect();
        prop_assume!(!params.is_empty());
        let mut catalog = ErrorCatalog::default();
        catalog.errors.insert(
            "GENERATED".into(),
            CatalogEntry {
                params: params.clone(),
                ..CatalogEntry::default()
            },
        );
        prop_assert!(validate_catalog(&catalog).is_ok());

        let def = catalog.definition("GENERATED").unwrap();
        let args: Vec<Value> = (0..params.len()).map(|i| json!(i)).collect();
        let err = def.call(args);
        for (i, param) in params.iter().enumerate() {
            prop_assert_eq!(err.get(param), Some(&json!(i)));
        }
    }
}
