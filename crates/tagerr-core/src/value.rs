// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`TaggedError`] record produced by every definition.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::definition::ErrorDefinition;

/// Reserved key stamped onto every error value.
///
/// Persistence layers must keep it verbatim; everyone else should treat it as
/// opaque.
pub const SIGNATURE_KEY: &str = "$$tagerr";

/// Value stored under [`SIGNATURE_KEY`]. Doubles as the wire format version.
///
/// Any JSON number equal to it is accepted, so a store that rewrites `1` as
/// `1.0` keeps the record recognisable. Strings and other types are not.
pub const SIGNATURE_VERSION: u64 = 1;

pub(crate) const CODE_KEY: &str = "code";
pub(crate) const MESSAGE_KEY: &str = "message";

/// Returns `true` if `value` is the signature this crate stamps.
pub(crate) fn is_signature(value: &Value) -> bool {
    value.as_f64() == Some(SIGNATURE_VERSION as f64)
}

// ---------------------------------------------------------------------------
// ShapeError
// ---------------------------------------------------------------------------

/// Reasons an arbitrary JSON value cannot be read back as a [`TaggedError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The value is not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The object has no string `code` field.
    #[error("missing or non-string `code` field")]
    MissingCode,
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// TaggedError
// ---------------------------------------------------------------------------

/// One occurrence of a defined error.
///
/// A flat JSON record: `code`, an optional `message`, any extra body fields,
/// and the signature marker. Serializes to exactly that record and can be read
/// back from it, so [`crate::is_error`] keeps recognising it after a round
/// trip through any JSON transport.
#[derive(Clone, PartialEq)]
pub struct TaggedError {
    fields: Map<String, Value>,
}

impl TaggedError {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a fresh instance from `definition`, populating it field by field.
    ///
    /// Equivalent to [`ErrorDefinition::construct`].
    pub fn construct<A>(definition: &ErrorDefinition<A>, args: A) -> Self {
        definition.construct(args)
    }

    pub(crate) fn blank() -> Self {
        Self { fields: Map::new() }
    }

    pub(crate) fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    /// Read an error back from an arbitrary JSON value.
    ///
    /// The signature marker is kept if present but not required; use
    /// [`TaggedError::is_signed`] or [`crate::is_error`] to check it.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(ShapeError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// The error code.
    pub fn code(&self) -> &str {
        self.fields
            .get(CODE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The human-readable message, if the body supplied one.
    pub fn message(&self) -> Option<&str> {
        self.fields.get(MESSAGE_KEY).and_then(Value::as_str)
    }

    /// Look up any field by name, including `code` and `message`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterate over the visible fields (everything but the signature).
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != SIGNATURE_KEY)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the value carries the signature marker.
    pub fn is_signed(&self) -> bool {
        self.fields.get(SIGNATURE_KEY).is_some_and(is_signature)
    }

    /// Borrow the full record, signature included.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the full record, signature included.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Clone into a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Consume into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Deserialize the record into a strongly typed body.
    ///
    /// Unknown fields (the signature among them) are ignored unless `B`
    /// denies them.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error when the record does not fit `B`.
    pub fn body_as<B: DeserializeOwned>(&self) -> Result<B, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }

    fn extras(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), CODE_KEY | MESSAGE_KEY | SIGNATURE_KEY))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl TryFrom<Map<String, Value>> for TaggedError {
    type Error = ShapeError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get(CODE_KEY) {
            Some(Value::String(_)) => Ok(Self { fields }),
            _ => Err(ShapeError::MissingCode),
        }
    }
}

impl TryFrom<Value> for TaggedError {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<TaggedError> for Value {
    fn from(err: TaggedError) -> Self {
        err.into_value()
    }
}

impl Serialize for TaggedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaggedError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        Self::try_from(fields).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("TaggedError");
        d.field("code", &self.code());
        if let Some(message) = self.message() {
            d.field("message", &message);
        }
        let extras = self.extras();
        if !extras.is_empty() {
            d.field("fields", &extras);
        }
        d.field("signed", &self.is_signed());
        d.finish()
    }
}

impl fmt::Display for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(message) = self.message() {
            write!(f, " {message}")?;
        }
        let extras = self.extras();
        if !extras.is_empty() {
            if let Ok(ctx) = serde_json::to_string(&extras) {
                write!(f, " {ctx}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for TaggedError {}
