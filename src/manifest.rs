// SPDX-License-Identifier: MPL-2.0
//! The locale registry manifest.
//!
//! `manifest.toml` sits at the root of the resource folder and declares
//! everything the engine needs to know about the shipped data: the ordered
//! supported-language descriptors (for a language picker), the namespace
//! list, the fallback language, the default namespace, and which namespace
//! slots are borrowed from another language's bundle. Adding a language or a
//! namespace is an edit to this file plus its `.ftl` bundles.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use unic_langid::LanguageIdentifier;

/// One entry of the supported-language list.
///
/// `name` is the human-readable display name, usually with a parenthetical
/// English gloss; `flag` is a display glyph for pickers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    pub name: String,
    pub flag: String,
}

/// Parsed and validated `manifest.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Language used when resolution fails everywhere else.
    pub fallback: String,
    /// Namespace used when a lookup names none.
    pub default_namespace: String,
    /// Valid namespaces, in no particular order.
    pub namespaces: Vec<String>,
    /// Supported languages, in picker display order.
    pub languages: Vec<LanguageDescriptor>,
    /// language code -> (namespace -> source language code).
    ///
    /// A borrowed slot resolves from the source language's bundle for that
    /// namespace. This is shipped data, not a runtime failure path.
    #[serde(default)]
    pub borrowed: HashMap<String, HashMap<String, String>>,
}

impl Manifest {
    /// Parses and validates a manifest document.
    pub fn parse(source: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(source).map_err(|err| Error::Manifest(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks the internal consistency rules:
    ///
    /// - descriptor codes are unique and parse as language identifiers
    /// - `fallback` is a declared language
    /// - `default_namespace` is a declared namespace
    /// - borrow entries reference declared languages and namespaces
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for descriptor in &self.languages {
            if descriptor.code.parse::<LanguageIdentifier>().is_err() {
                return Err(Error::Manifest(format!(
                    "invalid language code '{}'",
                    descriptor.code
                )));
            }
            if !seen.insert(descriptor.code.as_str()) {
                return Err(Error::Manifest(format!(
                    "duplicate language code '{}'",
                    descriptor.code
                )));
            }
        }

        if !self.declares_language(&self.fallback) {
            return Err(Error::Manifest(format!(
                "fallback language '{}' is not declared",
                self.fallback
            )));
        }
        if !self.declares_namespace(&self.default_namespace) {
            return Err(Error::Manifest(format!(
                "default namespace '{}' is not declared",
                self.default_namespace
            )));
        }

        for (code, slots) in &self.borrowed {
            if !self.declares_language(code) {
                return Err(Error::Manifest(format!(
                    "borrow entry for undeclared language '{}'",
                    code
                )));
            }
            for (namespace, source) in slots {
                if !self.declares_namespace(namespace) {
                    return Err(Error::Manifest(format!(
                        "borrow entry for undeclared namespace '{}'",
                        namespace
                    )));
                }
                if !self.declares_language(source) {
                    return Err(Error::Manifest(format!(
                        "borrow source '{}' is not a declared language",
                        source
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn declares_language(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l.code == code)
    }

    pub fn declares_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// Source language a `(language, namespace)` slot is borrowed from, if
    /// the slot is wired in the borrow table.
    pub fn borrow_source(&self, code: &str, namespace: &str) -> Option<&str> {
        self.borrowed
            .get(code)?
            .get(namespace)
            .map(String::as_str)
    }
}
