// SPDX-License-Identifier: MPL-2.0
//! The resource table: one Fluent bundle per (language, namespace) pair.
//!
//! Bundles are built eagerly at construction, either from the locale assets
//! embedded in the binary or from an override directory on disk, and are
//! immutable afterwards. Lookup resolves against the requested language
//! first and the fallback language second, returning `None` only when
//! neither provides the key; callers decide what a miss degrades to.
//!
//! Borrowed namespace slots (declared in the manifest) redirect to the
//! source language's bundle. The redirect is chased exactly once, so a
//! borrow can never form a chain or a cycle.
//!
//! Unicode isolation is disabled on every bundle: interpolated values are
//! inserted verbatim, without FSI/PDI marks or any escaping. Escaping is
//! the rendering layer's concern.

use crate::config::defaults::{MANIFEST_FILE, RESOURCE_EXTENSION};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Asset;

/// Parses the manifest embedded in the binary.
pub fn embedded_manifest() -> Result<Manifest> {
    let file = Asset::get(MANIFEST_FILE)
        .ok_or_else(|| Error::Manifest(format!("embedded {} is missing", MANIFEST_FILE)))?;
    Manifest::parse(&String::from_utf8_lossy(file.data.as_ref()))
}

/// Parses the manifest from an override directory, falling back to the
/// embedded one when the directory does not carry its own.
pub fn manifest_from_dir(dir: &Path) -> Result<Manifest> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        return Manifest::parse(&fs::read_to_string(&path)?);
    }
    embedded_manifest()
}

pub struct Catalog {
    bundles: HashMap<LanguageIdentifier, HashMap<String, FluentBundle<FluentResource>>>,
    /// (language, namespace) -> language whose bundle serves the slot.
    borrows: HashMap<(LanguageIdentifier, String), LanguageIdentifier>,
    fallback: LanguageIdentifier,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.bundles.keys().collect::<Vec<_>>())
            .field("borrows", &self.borrows)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Catalog {
    /// Builds the catalog from the locale assets embedded in the binary.
    ///
    /// Files are expected at `"<language>/<namespace>.ftl"`; anything the
    /// manifest does not declare is skipped.
    pub fn from_embedded(manifest: &Manifest) -> Result<Self> {
        let mut catalog = Self::empty(manifest)?;
        for file in Asset::iter() {
            let path = file.as_ref();
            let Some((code, namespace)) = split_resource_path(path) else {
                continue;
            };
            if !manifest.declares_language(code) || !manifest.declares_namespace(namespace) {
                continue;
            }
            let Some(content) = Asset::get(path) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            catalog.add_resource(code, namespace, source)?;
        }
        Ok(catalog)
    }

    /// Builds the catalog from `"<dir>/<language>/<namespace>.ftl"` files on
    /// disk instead of the embedded assets.
    pub fn from_dir(dir: &Path, manifest: &Manifest) -> Result<Self> {
        let mut catalog = Self::empty(manifest)?;
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let code = entry.file_name().to_string_lossy().to_string();
            if !manifest.declares_language(&code) {
                continue;
            }
            for resource in fs::read_dir(entry.path())? {
                let resource = resource?;
                let path = resource.path();
                let Some(namespace) = resource_namespace(&path) else {
                    continue;
                };
                if !manifest.declares_namespace(&namespace) {
                    continue;
                }
                let source = fs::read_to_string(&path)?;
                catalog.add_resource(&code, &namespace, source)?;
            }
        }
        Ok(catalog)
    }

    fn empty(manifest: &Manifest) -> Result<Self> {
        let fallback = parse_code(&manifest.fallback)?;
        let mut borrows = HashMap::new();
        for (code, slots) in &manifest.borrowed {
            let locale = parse_code(code)?;
            for (namespace, source) in slots {
                borrows.insert((locale.clone(), namespace.clone()), parse_code(source)?);
            }
        }
        Ok(Self {
            bundles: HashMap::new(),
            borrows,
            fallback,
        })
    }

    fn add_resource(&mut self, code: &str, namespace: &str, source: String) -> Result<()> {
        let locale = parse_code(code)?;
        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            Error::Parse(format!("{}/{}.ftl: {:?}", code, namespace, errors))
        })?;

        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Interpolated values must come out verbatim; no FSI/PDI wrapping.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            Error::Parse(format!("{}/{}.ftl: {:?}", code, namespace, errors))
        })?;

        self.bundles
            .entry(locale)
            .or_default()
            .insert(namespace.to_string(), bundle);
        Ok(())
    }

    /// Resolves a key against the requested language, then the fallback
    /// language. `None` means no loaded bundle knows the key.
    pub fn resolve(
        &self,
        locale: &LanguageIdentifier,
        namespace: &str,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Option<String> {
        if let Some(value) = self.lookup_in(locale, namespace, key, args) {
            return Some(value);
        }
        if *locale != self.fallback {
            return self.lookup_in(&self.fallback, namespace, key, args);
        }
        None
    }

    fn lookup_in(
        &self,
        locale: &LanguageIdentifier,
        namespace: &str,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Option<String> {
        let slot = (locale.clone(), namespace.to_string());
        let source = self.borrows.get(&slot).unwrap_or(locale);
        let bundle = self.bundles.get(source)?.get(namespace)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;

        // Formatting errors (e.g. a placeholder with no matching argument)
        // leave the offending token in place; the partially formatted string
        // is still the best answer available.
        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, args, &mut errors);
        Some(value.into_owned())
    }

    /// Whether at least one bundle is loaded for the language.
    pub fn has_language(&self, locale: &LanguageIdentifier) -> bool {
        self.bundles.get(locale).is_some_and(|map| !map.is_empty())
    }

    /// Whether a bundle of the language's own content exists for the
    /// namespace (a borrowed slot does not count).
    pub fn has_bundle(&self, locale: &LanguageIdentifier, namespace: &str) -> bool {
        self.bundles
            .get(locale)
            .is_some_and(|map| map.contains_key(namespace))
    }

    pub fn fallback(&self) -> &LanguageIdentifier {
        &self.fallback
    }
}

fn parse_code(code: &str) -> Result<LanguageIdentifier> {
    code.parse()
        .map_err(|_| Error::Manifest(format!("invalid language code '{}'", code)))
}

/// Splits an embedded asset path `"en/common.ftl"` into `("en", "common")`.
fn split_resource_path(path: &str) -> Option<(&str, &str)> {
    let stem = path.strip_suffix(&format!(".{}", RESOURCE_EXTENSION))?;
    let (code, namespace) = stem.split_once('/')?;
    if namespace.contains('/') {
        return None;
    }
    Some((code, namespace))
}

/// File stem of a `.ftl` path on disk, if it is one.
fn resource_namespace(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != RESOURCE_EXTENSION {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().to_string())
}
