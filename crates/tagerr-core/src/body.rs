// SPDX-License-Identifier: MIT OR Apache-2.0
//! Body construction rules and their normalization into an error record.

use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::value::{CODE_KEY, MESSAGE_KEY, SIGNATURE_KEY, SIGNATURE_VERSION};

// ---------------------------------------------------------------------------
// RawBody
// ---------------------------------------------------------------------------

/// What a body rule yields before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    /// Shorthand for `{ "message": ... }`.
    Message(String),
    /// Fields copied verbatim into the error record.
    Fields(Map<String, Value>),
}

impl RawBody {
    /// A body with no fields at all.
    pub fn empty() -> Self {
        Self::Fields(Map::new())
    }

    /// Expand into the field map (a bare message becomes `{message}`).
    pub fn into_fields(self) -> Map<String, Value> {
        match self {
            Self::Message(message) => {
                let mut fields = Map::new();
                fields.insert(MESSAGE_KEY.to_owned(), Value::String(message));
                fields
            }
            Self::Fields(fields) => fields,
        }
    }
}

impl Default for RawBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for RawBody {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for RawBody {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Map<String, Value>> for RawBody {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Fields(fields)
    }
}

impl From<Value> for RawBody {
    /// Strings become messages and objects become fields. `null` is an empty
    /// body; any other JSON value is not a valid body and is dropped.
    fn from(value: Value) -> Self {
        match value {
            Value::String(message) => Self::Message(message),
            Value::Object(fields) => Self::Fields(fields),
            Value::Null => Self::empty(),
            other => {
                warn!(target: "tagerr", body = %other, "error body is neither a string nor an object; ignoring it");
                Self::empty()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// BodyRule
// ---------------------------------------------------------------------------

type BodyFn<A> = dyn Fn(A) -> RawBody + Send + Sync;

/// How a definition builds the body of each error it produces.
///
/// `A` is the argument type of the call site; positional arguments are passed
/// as a tuple. Rules that take no input ignore it.
pub enum BodyRule<A> {
    /// No body: the record holds only `code` and the signature.
    Empty,
    /// The same body for every occurrence.
    Static(RawBody),
    /// A body computed from the call-site arguments.
    Dynamic(Box<BodyFn<A>>),
}

impl<A> BodyRule<A> {
    /// Wrap a body function.
    pub fn from_fn<F, B>(create: F) -> Self
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: Into<RawBody>,
    {
        Self::Dynamic(Box::new(move |args| create(args).into()))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Static(RawBody::Message(_)) => "static_message",
            Self::Static(RawBody::Fields(_)) => "static_fields",
            Self::Dynamic(_) => "dynamic",
        }
    }

    /// Produce the raw body for one occurrence.
    ///
    /// A panicking body function unwinds straight through to the caller.
    pub(crate) fn raw(&self, args: A) -> RawBody {
        match self {
            Self::Empty => RawBody::empty(),
            Self::Static(body) => body.clone(),
            Self::Dynamic(create) => create(args),
        }
    }
}

impl<A> fmt::Debug for BodyRule<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Static(body) => f.debug_tuple("Static").field(body).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<A> From<RawBody> for BodyRule<A> {
    fn from(body: RawBody) -> Self {
        Self::Static(body)
    }
}

/// Turn a raw body into the full error record for `code`.
///
/// `code` overwrites any same-named body field, then the signature is
/// stamped last.
pub(crate) fn normalize(code: &str, raw: RawBody) -> Map<String, Value> {
    let mut fields = raw.into_fields();
    fields.insert(CODE_KEY.to_owned(), Value::String(code.to_owned()));
    fields.insert(SIGNATURE_KEY.to_owned(), Value::from(SIGNATURE_VERSION));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn message_shorthand_expands() {
        let fields = RawBody::from("hi").into_fields();
        assert_eq!(Value::Object(fields), json!({"message": "hi"}));
    }

    #[test]
    fn value_conversions() {
        assert_eq!(RawBody::from(json!("hi")), RawBody::Message("hi".into()));
        assert_eq!(
            RawBody::from(json!({"a": 1})),
            RawBody::Fields(obj(json!({"a": 1})))
        );
        assert_eq!(RawBody::from(Value::Null), RawBody::empty());
    }

    #[test]
    fn non_body_values_become_empty() {
        assert_eq!(RawBody::from(json!(42)), RawBody::empty());
        assert_eq!(RawBody::from(json!([1, 2])), RawBody::empty());
        assert_eq!(RawBody::from(json!(true)), RawBody::empty());
    }

    #[test]
    fn normalize_overlays_code() {
        let raw = RawBody::Fields(obj(json!({"code": "WRONG", "x": 1})));
        let fields = normalize("RIGHT", raw);
        assert_eq!(fields["code"], json!("RIGHT"));
        assert_eq!(fields["x"], json!(1));
        assert_eq!(fields[SIGNATURE_KEY], json!(SIGNATURE_VERSION));
    }

    #[test]
    fn normalize_overwrites_forged_signature() {
        let raw = RawBody::Fields(obj(json!({SIGNATURE_KEY: "forged"})));
        let fields = normalize("X", raw);
        assert_eq!(fields[SIGNATURE_KEY], json!(1));
    }

    #[test]
    fn normalize_empty_body() {
        let fields = normalize("X", RawBody::empty());
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains_key("message"));
    }

    #[test]
    fn rule_kinds() {
        assert_eq!(BodyRule::<()>::Empty.kind(), "empty");
        assert_eq!(BodyRule::<()>::from(RawBody::from("m")).kind(), "static_message");
        assert_eq!(BodyRule::<()>::Static(RawBody::empty()).kind(), "static_fields");
        assert_eq!(BodyRule::from_fn(|n: u32| n.to_string()).kind(), "dynamic");
    }

    #[test]
    fn dynamic_rule_receives_arguments() {
        let rule = BodyRule::from_fn(|(a, b): (u32, u32)| format!("{a}+{b}"));
        assert_eq!(rule.raw((1, 2)), RawBody::Message("1+2".into()));
    }

    #[test]
    fn static_rule_is_reused() {
        let rule: BodyRule<()> = BodyRule::Static(RawBody::from("same"));
        assert_eq!(rule.raw(()), rule.raw(()));
    }

    #[test]
    fn debug_hides_closure() {
        let rule = BodyRule::from_fn(|_: ()| "x");
        assert_eq!(format!("{rule:?}"), "Dynamic(..)");
    }
}
