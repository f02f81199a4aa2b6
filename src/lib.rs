// SPDX-License-Identifier: MPL-2.0
//! `lingvo` is an embeddable localization layer built on Fluent.
//!
//! It ships per-language, per-namespace resource bundles embedded in the
//! binary, detects the active language at startup (persisted preference,
//! then system locale, then an application-supplied hint), resolves lookups
//! with silent fallback, and persists the user's language choice.

#![doc(html_root_url = "https://docs.rs/lingvo/0.2.0")]

pub mod catalog;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod manifest;

pub use engine::{I18n, Options};
pub use error::{Error, Result};
pub use manifest::LanguageDescriptor;

// Lookup arguments are plain Fluent arguments; re-exported so callers don't
// need a direct fluent-bundle dependency.
pub use fluent_bundle::{FluentArgs, FluentValue};
