// SPDX-License-Identifier: MPL-2.0
//! The `I18n` engine: construction, active-language state, and lookup.
//!
//! An [`I18n`] value is built once by the application's composition root and
//! passed (by reference) wherever translations are needed. There is no
//! process-wide singleton; the active language has an explicit accessor
//! ([`I18n::active_locale`]) and mutator ([`I18n::change_language`]) pair,
//! and tests can inject their own cache path through [`Options`].
//!
//! Construction is fully synchronous: every bundle is parsed before `new`
//! returns, so there is no loading state and nothing to await.
//!
//! # Examples
//!
//! ```no_run
//! use lingvo::engine::{I18n, Options};
//!
//! let i18n = I18n::new(Options::default()).expect("failed to load locales");
//! let label = i18n.tr("sign-in");
//! let title = i18n.tr_in("dashboard", "title");
//! ```

use crate::catalog::{self, Catalog};
use crate::config::{self, Preferences};
use crate::detect::{self, Detection, Source};
use crate::error::{Error, Result};
use crate::manifest::{LanguageDescriptor, Manifest};
use fluent_bundle::FluentArgs;
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

/// Construction options.
///
/// The defaults embed the shipped locale assets, persist the language choice
/// to the platform config directory, and detect with cache → system → hint.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Language hint from the embedding application (e.g. a host document's
    /// language attribute). Consulted by the `Hint` detection source.
    pub language_hint: Option<String>,
    /// Load `.ftl` bundles (and optionally a manifest) from this directory
    /// instead of the embedded assets.
    pub resource_dir: Option<PathBuf>,
    /// Persist the language preference at this path instead of the default
    /// platform location.
    pub cache_path: Option<PathBuf>,
    pub detection: Detection,
}

pub struct I18n {
    manifest: Manifest,
    catalog: Catalog,
    /// Declared languages, parsed, in manifest (picker) order.
    supported: Vec<LanguageIdentifier>,
    active: LanguageIdentifier,
    detection: Detection,
    cache_path: Option<PathBuf>,
}

impl I18n {
    /// Loads the manifest and every resource bundle, then runs detection to
    /// pick the active language. When no detection source yields a supported
    /// language, the fallback language is active.
    pub fn new(options: Options) -> Result<Self> {
        let manifest = match &options.resource_dir {
            Some(dir) => catalog::manifest_from_dir(dir)?,
            None => catalog::embedded_manifest()?,
        };
        let catalog = match &options.resource_dir {
            Some(dir) => Catalog::from_dir(dir, &manifest)?,
            None => Catalog::from_embedded(&manifest)?,
        };

        let supported = manifest
            .languages
            .iter()
            .map(|descriptor| {
                descriptor.code.parse::<LanguageIdentifier>().map_err(|_| {
                    Error::Manifest(format!("invalid language code '{}'", descriptor.code))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cached = read_cache(options.cache_path.as_deref());
        let active = detect::resolve_locale(
            &options.detection,
            options.language_hint.as_deref(),
            &cached,
            &supported,
        )
        .unwrap_or_else(|| catalog.fallback().clone());

        Ok(Self {
            manifest,
            catalog,
            supported,
            active,
            detection: options.detection,
            cache_path: options.cache_path,
        })
    }

    // ----- lookup -----

    /// Core resolution. `namespace` defaults to the manifest's default
    /// namespace, `locale` to the active language. Degrades silently: the
    /// fallback language's value when the language misses, the raw key when
    /// nothing resolves.
    pub fn translate(
        &self,
        key: &str,
        namespace: Option<&str>,
        locale: Option<&LanguageIdentifier>,
        args: Option<&FluentArgs>,
    ) -> String {
        let namespace = namespace.unwrap_or(&self.manifest.default_namespace);
        let locale = locale.unwrap_or(&self.active);
        self.catalog
            .resolve(locale, namespace, key, args)
            .unwrap_or_else(|| key.to_string())
    }

    /// Looks up `key` in the default namespace of the active language.
    pub fn tr(&self, key: &str) -> String {
        self.translate(key, None, None, None)
    }

    /// Looks up `key` in an explicit namespace of the active language.
    pub fn tr_in(&self, namespace: &str, key: &str) -> String {
        self.translate(key, Some(namespace), None, None)
    }

    /// Looks up `key` with interpolation arguments.
    pub fn tr_args(&self, key: &str, args: &FluentArgs) -> String {
        self.translate(key, None, None, Some(args))
    }

    /// Looks up `key` in an explicit namespace with interpolation arguments.
    pub fn tr_in_args(&self, namespace: &str, key: &str, args: &FluentArgs) -> String {
        self.translate(key, Some(namespace), None, Some(args))
    }

    // ----- active-language state -----

    pub fn active_locale(&self) -> &LanguageIdentifier {
        &self.active
    }

    /// Sets the active language without touching the persisted cache.
    /// Undeclared languages are ignored.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.supported.contains(&locale) {
            self.active = locale;
        }
    }

    /// Applies a user-driven language change: activates the language and
    /// writes it to the configured cache targets. A cache write failure is
    /// reported on stderr and does not undo the change.
    pub fn change_language(&mut self, locale: LanguageIdentifier) {
        if !self.supported.contains(&locale) {
            return;
        }
        self.active = locale;
        self.write_caches();
    }

    fn write_caches(&self) {
        for target in &self.detection.caches {
            if *target != Source::Cache {
                // Only the preferences file is writable.
                continue;
            }
            let mut prefs = read_cache(self.cache_path.as_deref());
            prefs.language = Some(self.active.to_string());
            let result = match &self.cache_path {
                Some(path) => config::save_to_path(&prefs, path),
                None => config::save(&prefs),
            };
            if let Err(error) = result {
                eprintln!("Failed to save language preference: {}", error);
            }
        }
    }

    // ----- surface for UI consumption -----

    /// Supported languages with display metadata, in picker order.
    pub fn supported_languages(&self) -> &[LanguageDescriptor] {
        &self.manifest.languages
    }

    /// Languages that actually have bundles loaded, in picker order.
    pub fn available_locales(&self) -> Vec<LanguageIdentifier> {
        self.supported
            .iter()
            .filter(|locale| self.catalog.has_language(locale))
            .cloned()
            .collect()
    }

    pub fn fallback_locale(&self) -> &LanguageIdentifier {
        self.catalog.fallback()
    }

    pub fn default_namespace(&self) -> &str {
        &self.manifest.default_namespace
    }

    pub fn namespaces(&self) -> &[String] {
        &self.manifest.namespaces
    }

    /// Direct access to the resource table for advanced use.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Reads the persisted preference from the override path, or the default
/// location when none is set. Unreadable state degrades to the default.
fn read_cache(path: Option<&std::path::Path>) -> Preferences {
    match path {
        Some(path) if path.exists() => config::load_from_path(path).unwrap_or_default(),
        Some(_) => Preferences::default(),
        None => config::load().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Detection without the System source keeps tests independent of the
    // host machine's locale.
    fn hinted_options(hint: &str, cache_path: PathBuf) -> Options {
        Options {
            language_hint: Some(hint.to_string()),
            resource_dir: None,
            cache_path: Some(cache_path),
            detection: Detection {
                order: vec![Source::Cache, Source::Hint],
                caches: vec![Source::Cache],
            },
        }
    }

    fn locale(code: &str) -> LanguageIdentifier {
        code.parse().expect("valid language code")
    }

    #[test]
    fn hint_selects_active_language_when_cache_is_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        let i18n = I18n::new(hinted_options("es", dir.path().join("settings.toml")))
            .expect("engine should construct");
        assert_eq!(i18n.active_locale(), &locale("es"));
        assert_eq!(i18n.tr("sign-in"), "Iniciar sesión");
    }

    #[test]
    fn fallback_is_active_when_no_source_matches() {
        let dir = tempdir().expect("failed to create temp dir");
        let i18n = I18n::new(hinted_options("xx", dir.path().join("settings.toml")))
            .expect("engine should construct");
        assert_eq!(i18n.active_locale(), i18n.fallback_locale());
    }

    #[test]
    fn missing_key_comes_back_verbatim() {
        let dir = tempdir().expect("failed to create temp dir");
        let i18n = I18n::new(hinted_options("en", dir.path().join("settings.toml")))
            .expect("engine should construct");
        assert_eq!(i18n.tr("definitely-not-a-key"), "definitely-not-a-key");
    }

    #[test]
    fn change_language_writes_injected_cache_path() {
        let dir = tempdir().expect("failed to create temp dir");
        let cache = dir.path().join("settings.toml");
        let mut i18n =
            I18n::new(hinted_options("en", cache.clone())).expect("engine should construct");

        i18n.change_language(locale("fr"));

        assert_eq!(i18n.active_locale(), &locale("fr"));
        let prefs = config::load_from_path(&cache).expect("cache file should exist");
        assert_eq!(prefs.language.as_deref(), Some("fr"));
    }

    #[test]
    fn change_language_ignores_undeclared_codes() {
        let dir = tempdir().expect("failed to create temp dir");
        let cache = dir.path().join("settings.toml");
        let mut i18n =
            I18n::new(hinted_options("en", cache.clone())).expect("engine should construct");

        i18n.change_language(locale("xx"));

        assert_eq!(i18n.active_locale(), &locale("en"));
        assert!(!cache.exists());
    }

    #[test]
    fn translate_accepts_language_override() {
        let dir = tempdir().expect("failed to create temp dir");
        let i18n = I18n::new(hinted_options("en", dir.path().join("settings.toml")))
            .expect("engine should construct");
        let value = i18n.translate("sign-out", None, Some(&locale("es")), None);
        assert_eq!(value, "Cerrar sesión");
    }

    #[test]
    fn descriptor_list_matches_available_subset() {
        let dir = tempdir().expect("failed to create temp dir");
        let i18n = I18n::new(hinted_options("en", dir.path().join("settings.toml")))
            .expect("engine should construct");

        assert_eq!(i18n.supported_languages().len(), 15);
        assert_eq!(
            i18n.available_locales(),
            vec![locale("en"), locale("es"), locale("fr")]
        );
    }
}
