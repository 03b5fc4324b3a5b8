// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error definitions: one per error kind, created once and reused.

use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

use crate::body::{BodyRule, RawBody, normalize};
use crate::inspect::Inspect;
use crate::name::display_name;
use crate::value::{CODE_KEY, TaggedError};

/// The declaration of one error kind.
///
/// Holds the stable `code`, a display name derived from it, and the rule that
/// builds each occurrence's body. Immutable once created; share it freely
/// (it is `Send + Sync`).
///
/// ```
/// use tagerr_core::define_error_fn;
/// use serde_json::json;
///
/// let value_required = define_error_fn("VALUE_REQUIRED", |(field, display): (&str, &str)| {
///     json!({ "message": format!("{display} is required"), "field": field })
/// });
///
/// let err = value_required.call(("email", "E-mail"));
/// assert_eq!(err.code(), "VALUE_REQUIRED");
/// assert_eq!(err.message(), Some("E-mail is required"));
/// assert!(value_required.is(&err));
/// ```
pub struct ErrorDefinition<A = ()> {
    code: String,
    name: String,
    rule: BodyRule<A>,
}

impl<A> ErrorDefinition<A> {
    /// Create a definition from an explicit [`BodyRule`].
    pub fn from_rule(code: impl Into<String>, rule: BodyRule<A>) -> Self {
        let code = code.into();
        let name = display_name(&code);
        debug!(target: "tagerr", code = %code, name = %name, rule = rule.kind(), "error defined");
        Self { code, name, rule }
    }

    /// The stable code stamped on every occurrence.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name such as `UserNotFoundError`. Informational only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The body rule this definition was created with.
    pub fn rule(&self) -> &BodyRule<A> {
        &self.rule
    }

    /// Produce an occurrence as a returned record.
    pub fn call(&self, args: A) -> TaggedError {
        trace!(target: "tagerr", code = %self.code, "call");
        TaggedError::from_fields(normalize(&self.code, self.rule.raw(args)))
    }

    /// Produce an occurrence as a freshly allocated instance.
    ///
    /// The instance is populated field by field from the normalized body, so
    /// it is equal to what [`ErrorDefinition::call`] returns for the same
    /// arguments.
    pub fn construct(&self, args: A) -> TaggedError {
        trace!(target: "tagerr", code = %self.code, "construct");
        let body = normalize(&self.code, self.rule.raw(args));
        let mut instance = TaggedError::blank();
        for (key, value) in body {
            instance.set(key, value);
        }
        instance
    }

    /// Whether `value` has this definition's `code`.
    ///
    /// Structural only: the signature marker is not consulted, so hand-built
    /// records with the right code pass too. Use [`crate::is_error_of`] to
    /// require the signature as well.
    pub fn is<V: Inspect + ?Sized>(&self, value: &V) -> bool {
        value
            .as_record()
            .and_then(|record| record.get(CODE_KEY))
            .and_then(Value::as_str)
            == Some(self.code.as_str())
    }

    /// Narrow an untyped JSON value to an error of this kind.
    pub fn narrow(&self, value: &Value) -> Option<TaggedError> {
        if !self.is(value) {
            return None;
        }
        TaggedError::from_value(value.clone()).ok()
    }
}

impl ErrorDefinition<()> {
    /// Shorthand for `call(())` on definitions that take no arguments.
    pub fn error(&self) -> TaggedError {
        self.call(())
    }
}

impl<A> fmt::Debug for ErrorDefinition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorDefinition")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish()
    }
}

impl<A> fmt::Display for ErrorDefinition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Factory functions
// ---------------------------------------------------------------------------

/// Define an error kind with no body: occurrences carry only their code.
pub fn define_error(code: impl Into<String>) -> ErrorDefinition<()> {
    ErrorDefinition::from_rule(code, BodyRule::Empty)
}

/// Define an error kind whose body is the same for every occurrence.
///
/// `body` is a message string or a field map (a [`serde_json::Value`] object
/// works too).
pub fn define_error_with(code: impl Into<String>, body: impl Into<RawBody>) -> ErrorDefinition<()> {
    ErrorDefinition::from_rule(code, BodyRule::Static(body.into()))
}

/// Define an error kind whose body is computed from call-site arguments.
///
/// Take several positional arguments as a tuple.
pub fn define_error_fn<A, F, B>(code: impl Into<String>, create: F) -> ErrorDefinition<A>
where
    F: Fn(A) -> B + Send + Sync + 'static,
    B: Into<RawBody>,
{
    ErrorDefinition::from_rule(code, BodyRule::from_fn(create))
}
