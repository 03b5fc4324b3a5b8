// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serializable tagged errors identified by stable string codes.
//!
//! Declare each error kind once with [`define_error`], [`define_error_with`]
//! or [`define_error_fn`], raise occurrences with [`ErrorDefinition::call`]
//! (or [`ErrorDefinition::construct`]), and narrow unknown values with
//! [`ErrorDefinition::is`], [`is_error`] and [`is_error_of`].
//!
//! Every occurrence is a plain JSON record stamped with a reserved signature
//! field, so the guards keep working after the value has been serialized,
//! sent somewhere, and parsed back.
//!
//! ```
//! use tagerr_core::{define_error_with, is_error, is_error_of};
//!
//! let not_found = define_error_with("NOT_FOUND", "Not found");
//! let json = serde_json::to_string(&not_found.error()).unwrap();
//!
//! let back: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert!(is_error(&back));
//! assert!(is_error_of(&back, &not_found));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod body;
mod definition;
mod guard;
mod inspect;
mod name;
mod value;

pub use body::{BodyRule, RawBody};
pub use definition::{ErrorDefinition, define_error, define_error_fn, define_error_with};
pub use guard::{is_error, is_error_of};
pub use inspect::Inspect;
pub use name::display_name;
pub use value::{SIGNATURE_KEY, SIGNATURE_VERSION, ShapeError, TaggedError};
