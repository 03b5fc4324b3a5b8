// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`Inspect`] seam: anything the type guards can look into.

use serde_json::{Map, Value};

use crate::value::TaggedError;

/// A value of unknown shape that may or may not be a tagged error.
///
/// Implementors expose their record view. Values without one (`None`,
/// `null`, booleans, scalars, foreign error types) are never errors.
pub trait Inspect {
    /// The key/value record behind this value, if it has one.
    fn as_record(&self) -> Option<&Map<String, Value>>;
}

impl Inspect for Value {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        self.as_object()
    }
}

impl Inspect for Map<String, Value> {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        Some(self)
    }
}

impl Inspect for TaggedError {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        Some(self.as_map())
    }
}

impl Inspect for bool {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        None
    }
}

impl Inspect for () {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        None
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        self.as_ref().and_then(Inspect::as_record)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        (**self).as_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        (**self).as_record()
    }
}

impl Inspect for dyn std::error::Error + 'static {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        self.downcast_ref::<TaggedError>().map(TaggedError::as_map)
    }
}

impl Inspect for dyn std::error::Error + Send + Sync + 'static {
    fn as_record(&self) -> Option<&Map<String, Value>> {
        self.downcast_ref::<TaggedError>().map(TaggedError::as_map)
    }
}
