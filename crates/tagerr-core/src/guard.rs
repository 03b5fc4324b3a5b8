// SPDX-License-Identifier: MIT OR Apache-2.0
//! Universal type guards.

use crate::definition::ErrorDefinition;
use crate::inspect::Inspect;
use crate::value::{SIGNATURE_KEY, is_signature};

/// Whether `value` was produced by any error definition.
///
/// Only the signature marker counts; the `code` is not looked at.
pub fn is_error<V: Inspect + ?Sized>(value: &V) -> bool {
    value
        .as_record()
        .and_then(|record| record.get(SIGNATURE_KEY))
        .is_some_and(is_signature)
}

/// Whether `value` was produced by `definition`.
///
/// Checks the signature first and only then asks [`ErrorDefinition::is`], so
/// an unsigned record with a matching `code` is rejected.
pub fn is_error_of<V, A>(value: &V, definition: &ErrorDefinition<A>) -> bool
where
    V: Inspect + ?Sized,
{
    is_error(value) && definition.is(value)
}
