// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for definitions and type guards.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use tagerr_core::{
    RawBody, SIGNATURE_KEY, TaggedError, define_error, define_error_fn, define_error_with, display_name,
    is_error, is_error_of,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_code() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,7}(_[A-Z][A-Z0-9]{0,7}){0,3}"
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_fields() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z][a-z_]{0,8}", arb_json(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_body() -> impl Strategy<Value = RawBody> {
    prop_oneof![
        "[ -~]{0,24}".prop_map(RawBody::Message),
        arb_fields().prop_map(RawBody::Fields),
    ]
}

fn roundtrip(err: &TaggedError) -> Value {
    let json = serde_json::to_string(err).unwrap();
    serde_json::from_str(&json).unwrap()
}

// ── Laws ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn code_is_preserved(code in arb_code(), body in arb_body()) {
        let def = define_error_with(code.clone(), body);
        let err = def.error();
        prop_assert_eq!(err.code(), code.as_str());
    }

    #[test]
    fn call_and_construct_agree(code in arb_code(), fields in arb_fields()) {
        let def = define_error_fn(code, move |n: i64| {
            let mut body = fields.clone();
            body.insert("n".into(), json!(n));
            body
        });
        prop_assert_eq!(def.call(7), def.construct(7));
    }

    #[test]
    fn call_and_construct_agree_for_static_bodies(code in arb_code(), body in arb_body()) {
        let def = define_error_with(code, body);
        prop_assert_eq!(def.call(()), def.construct(()));
    }

    #[test]
    fn call_and_construct_agree_without_body(code in arb_code()) {
        let def = define_error(code);
        prop_assert_eq!(def.call(()), def.construct(()));
    }

    #[test]
    fn distinct_codes_never_cross_match(a in arb_code(), b in arb_code(), body in arb_body()) {
        prop_assume!(a != b);
        let da = define_error_with(a, body.clone());
        let db = define_error_with(b, body);
        let err = da.error();
        prop_assert!(da.is(&err));
        prop_assert!(!db.is(&err));
        prop_assert!(!is_error_of(&err, &db));
    }

    #[test]
    fn serialization_roundtrip_keeps_guards(code in arb_code(), body in arb_body()) {
        let def = define_error_with(code, body);
        let err = def.error();
        let back = roundtrip(&err);
        prop_assert_eq!(is_error(&back), is_error(&err));
        prop_assert_eq!(def.is(&back), def.is(&err));
        prop_assert!(is_error_of(&back, &def));
        prop_assert_eq!(TaggedError::from_value(back).unwrap(), err);
    }

    #[test]
    fn body_fields_survive_verbatim(code in arb_code(), fields in arb_fields()) {
        let err = define_error_with(code, fields.clone()).error();
        for (key, value) in &fields {
            if key != "code" {
                prop_assert_eq!(err.get(key), Some(value));
            }
        }
    }

    #[test]
    fn arbitrary_json_is_never_an_error(value in arb_json()) {
        prop_assume!(value.get(SIGNATURE_KEY).is_none());
        prop_assert!(!is_error(&value));
    }

    #[test]
    fn display_name_shape(code in arb_code()) {
        let name = display_name(&code);
        prop_assert!(name.ends_with("Error"));
        prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
        prop_assert!(!name.contains('_'));
    }
}
