// SPDX-License-Identifier: MIT OR Apache-2.0
//! Declare tagged error kinds in a TOML catalog.
//!
//! Each `[errors.<CODE>]` table becomes an [`ErrorDefinition`] whose body is
//! built from static `fields`, positional `params`, and an optional `message`
//! template that may reference either by `{name}`.
//!
//! ```
//! use serde_json::json;
//!
//! let catalog = tagerr_catalog::parse_toml(r#"
//!     [errors.VALUE_REQUIRED]
//!     message = "{display} is required"
//!     params = ["field", "display"]
//! "#).unwrap();
//!
//! let value_required = catalog.definition("VALUE_REQUIRED").unwrap();
//! let err = value_required.call(vec![json!("email"), json!("E-mail")]);
//! assert_eq!(err.message(), Some("E-mail is required"));
//! assert_eq!(err.get("field"), Some(&json!("email")));
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod template;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tagerr_core::{ErrorDefinition, SIGNATURE_KEY, define_error_fn};
use tracing::{debug, warn};

pub use template::{placeholders, render};

/// Error definition produced from a catalog entry; arguments bind to `params`
/// in order.
pub type CatalogDefinition = ErrorDefinition<Vec<Value>>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The requested catalog file could not be read.
    #[error("catalog file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as a TOML catalog.
    #[error("failed to parse catalog: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("catalog validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Issues that do not stop a catalog from working but are probably mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// The code is not `SCREAMING_SNAKE_CASE`.
    NonCanonicalCode {
        /// Offending code.
        code: String,
    },
    /// A static `code` field will be replaced by the entry's own code.
    CodeFieldOverridden {
        /// Entry code.
        code: String,
    },
    /// A param has the same name as a static field and will replace it.
    ParamShadowsField {
        /// Entry code.
        code: String,
        /// Param name.
        param: String,
    },
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogWarning::NonCanonicalCode { code } => {
                write!(f, "code '{code}' is not SCREAMING_SNAKE_CASE")
            }
            CatalogWarning::CodeFieldOverridden { code } => {
                write!(f, "'{code}': static field 'code' is always overridden")
            }
            CatalogWarning::ParamShadowsField { code, param } => {
                write!(f, "'{code}': param '{param}' shadows a static field")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// One error kind as declared in the catalog.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct CatalogEntry {
    /// Message template; `{name}` refers to a param or a static field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Names of the positional call-site arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,

    /// Fields copied into every occurrence.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

/// A set of error kinds keyed by code.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ErrorCatalog {
    /// Entries keyed by error code.
    #[serde(default)]
    pub errors: BTreeMap<String, CatalogEntry>,
}

impl ErrorCatalog {
    /// Codes declared in the catalog, sorted.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Build the definition for `code`, if the catalog declares it.
    pub fn definition(&self, code: &str) -> Option<CatalogDefinition> {
        self.errors
            .get(code)
            .map(|entry| build_definition(code, entry))
    }

    /// Build a definition for every entry.
    pub fn definitions(&self) -> BTreeMap<String, CatalogDefinition> {
        self.errors
            .iter()
            .map(|(code, entry)| (code.clone(), build_definition(code, entry)))
            .collect()
    }
}

fn build_definition(code: &str, entry: &CatalogEntry) -> CatalogDefinition {
    let entry = entry.clone();
    define_error_fn(code, move |args: Vec<Value>| {
        if args.len() > entry.params.len() {
            debug!(
                target: "tagerr.catalog",
                expected = entry.params.len(),
                got = args.len(),
                "extra arguments ignored"
            );
        }
        let mut body: Map<String, Value> = entry
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (i, param) in entry.params.iter().enumerate() {
            body.insert(param.clone(), args.get(i).cloned().unwrap_or(Value::Null));
        }
        if let Some(template) = &entry.message {
            let message = render(template, &body);
            body.insert("message".into(), Value::String(message));
        }
        body
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read, parse, and validate a catalog file.
///
/// Warnings are logged; hard validation failures are returned.
pub fn load_catalog(path: &Path) -> Result<ErrorCatalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let catalog = parse_toml(&content)?;
    for warning in validate_catalog(&catalog)? {
        warn!(target: "tagerr.catalog", path = %path.display(), "{warning}");
    }
    debug!(target: "tagerr.catalog", path = %path.display(), errors = catalog.errors.len(), "catalog loaded");
    Ok(catalog)
}

/// Parse a TOML string into an [`ErrorCatalog`] without validating it.
pub fn parse_toml(content: &str) -> Result<ErrorCatalog, CatalogError> {
    toml::from_str::<ErrorCatalog>(content).map_err(|e| CatalogError::ParseError {
        reason: e.to_string(),
    })
}

/// JSON schema describing the catalog format.
pub fn catalog_schema() -> schemars::Schema {
    schemars::schema_for!(ErrorCatalog)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn is_screaming_snake(code: &str) -> bool {
    code.starts_with(|c: char| c.is_ascii_uppercase())
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !code.ends_with('_')
        && !code.contains("__")
}

/// Validate a parsed catalog, returning advisory warnings.
///
/// Empty codes, reserved or duplicated names, and template placeholders that
/// name nothing are hard errors reported as
/// [`CatalogError::ValidationError`].
pub fn validate_catalog(catalog: &ErrorCatalog) -> Result<Vec<CatalogWarning>, CatalogError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<CatalogWarning> = Vec::new();

    for (code, entry) in &catalog.errors {
        if code.trim().is_empty() {
            errors.push("error code must not be empty".into());
            continue;
        }
        if !is_screaming_snake(code) {
            warnings.push(CatalogWarning::NonCanonicalCode { code: code.clone() });
        }

        if entry.fields.contains_key(SIGNATURE_KEY) {
            errors.push(format!("'{code}': field '{SIGNATURE_KEY}' is reserved"));
        }
        if entry.fields.contains_key("code") {
            warnings.push(CatalogWarning::CodeFieldOverridden { code: code.clone() });
        }

        let mut seen = BTreeSet::new();
        for param in &entry.params {
            if param.is_empty() {
                errors.push(format!("'{code}': param names must not be empty"));
            } else if param == "code" || param == "message" || param == SIGNATURE_KEY {
                errors.push(format!("'{code}': param name '{param}' is reserved"));
            } else if !seen.insert(param.as_str()) {
                errors.push(format!("'{code}': duplicate param '{param}'"));
            } else if entry.fields.contains_key(param) {
                warnings.push(CatalogWarning::ParamShadowsField {
                    code: code.clone(),
                    param: param.clone(),
                });
            }
        }

        if let Some(template) = &entry.message {
            for name in placeholders(template) {
                if !seen.contains(name) && !entry.fields.contains_key(name) {
                    errors.push(format!(
                        "'{code}': message placeholder '{{{name}}}' names no param or field"
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(CatalogError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two catalogs. On code collisions the `overlay` entry wins whole.
pub fn merge_catalogs(base: ErrorCatalog, overlay: ErrorCatalog) -> ErrorCatalog {
    let mut errors = base.errors;
    errors.extend(overlay.errors);
    ErrorCatalog { errors }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
