// SPDX-License-Identifier: MPL-2.0
//! Active-language detection.
//!
//! Detection walks an ordered list of sources and activates the first
//! candidate that matches a supported language. The default order checks the
//! persisted preference, then the operating system locale, then an
//! embedder-supplied hint (e.g. a host document's language attribute).
//!
//! Matching is exact identifier first, then primary language subtag, so a
//! system locale of `en-US` selects a supported `en`.

use crate::config::Preferences;
use unic_langid::LanguageIdentifier;

/// A place the active language can be read from, and (for `Cache`) written
/// back to on an explicit language change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The persisted preferences file.
    Cache,
    /// The operating system locale.
    System,
    /// A hint supplied by the embedding application.
    Hint,
}

/// Detection configuration: the order sources are tried at startup, and the
/// targets written on a user-driven language change.
#[derive(Debug, Clone)]
pub struct Detection {
    pub order: Vec<Source>,
    pub caches: Vec<Source>,
}

impl Default for Detection {
    fn default() -> Self {
        Self {
            order: vec![Source::Cache, Source::System, Source::Hint],
            caches: vec![Source::Cache],
        }
    }
}

/// Resolves the active language, or `None` when no source yields a
/// supported candidate (the caller then activates the fallback language).
pub fn resolve_locale(
    detection: &Detection,
    hint: Option<&str>,
    cached: &Preferences,
    supported: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    for source in &detection.order {
        let candidate = match source {
            Source::Cache => cached.language.clone(),
            Source::System => sys_locale::get_locale(),
            Source::Hint => hint.map(str::to_owned),
        };
        if let Some(code) = candidate {
            if let Some(locale) = match_supported(&code, supported) {
                return Some(locale);
            }
        }
    }
    None
}

/// Matches a candidate code against the supported list: exact identifier
/// first, then primary language subtag.
pub fn match_supported(
    code: &str,
    supported: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let candidate: LanguageIdentifier = code.trim().parse().ok()?;
    if let Some(exact) = supported.iter().find(|locale| **locale == candidate) {
        return Some(exact.clone());
    }
    supported
        .iter()
        .find(|locale| locale.language == candidate.language)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> Vec<LanguageIdentifier> {
        ["en", "es", "fr"]
            .iter()
            .map(|code| code.parse().expect("valid language code"))
            .collect()
    }

    fn cached(code: Option<&str>) -> Preferences {
        Preferences {
            language: code.map(str::to_owned),
        }
    }

    #[test]
    fn cache_wins_over_hint() {
        let detection = Detection {
            order: vec![Source::Cache, Source::Hint],
            caches: vec![Source::Cache],
        };
        let locale = resolve_locale(&detection, Some("fr"), &cached(Some("es")), &supported());
        assert_eq!(locale, Some("es".parse().unwrap()));
    }

    #[test]
    fn hint_used_when_cache_is_empty() {
        let detection = Detection {
            order: vec![Source::Cache, Source::Hint],
            caches: vec![Source::Cache],
        };
        let locale = resolve_locale(&detection, Some("fr"), &cached(None), &supported());
        assert_eq!(locale, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unsupported_candidates_are_skipped() {
        let detection = Detection {
            order: vec![Source::Cache, Source::Hint],
            caches: vec![Source::Cache],
        };
        let locale = resolve_locale(&detection, Some("es"), &cached(Some("xx")), &supported());
        assert_eq!(locale, Some("es".parse().unwrap()));
    }

    #[test]
    fn no_source_yields_none() {
        let detection = Detection {
            order: vec![Source::Cache, Source::Hint],
            caches: vec![Source::Cache],
        };
        assert_eq!(
            resolve_locale(&detection, None, &cached(None), &supported()),
            None
        );
    }

    #[test]
    fn system_source_matches_supported_or_nothing() {
        // System-dependent; only assert the result is coherent.
        let detection = Detection {
            order: vec![Source::System],
            caches: vec![],
        };
        if let Some(locale) = resolve_locale(&detection, None, &cached(None), &supported()) {
            assert!(supported().contains(&locale));
        }
    }

    #[test]
    fn region_qualified_code_matches_primary_subtag() {
        assert_eq!(
            match_supported("en-US", &supported()),
            Some("en".parse().unwrap())
        );
        assert_eq!(
            match_supported("fr-CA", &supported()),
            Some("fr".parse().unwrap())
        );
        assert_eq!(match_supported("de-DE", &supported()), None);
        assert_eq!(match_supported("not a tag", &supported()), None);
    }

    #[test]
    fn exact_match_beats_primary_subtag() {
        let supported: Vec<LanguageIdentifier> = ["en", "en-GB"]
            .iter()
            .map(|code| code.parse().expect("valid language code"))
            .collect();
        assert_eq!(
            match_supported("en-GB", &supported),
            Some("en-GB".parse().unwrap())
        );
    }

    #[test]
    fn default_detection_orders_cache_system_hint() {
        let detection = Detection::default();
        assert_eq!(
            detection.order,
            vec![Source::Cache, Source::System, Source::Hint]
        );
        assert_eq!(detection.caches, vec![Source::Cache]);
    }
}
