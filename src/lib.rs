// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serializable tagged errors with stable string codes.
//!
//! Re-exports the factory and type guards from `tagerr-core` and the TOML
//! catalog loader from `tagerr-catalog` as [`catalog`].
#![deny(unsafe_code)]

pub use tagerr_catalog as catalog;
pub use tagerr_core::*;
