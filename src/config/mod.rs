//! Persisted language preference, stored as a `settings.toml` file under the
//! platform configuration directory.
//!
//! This is the cache half of language detection: the [`Cache`] detection
//! source reads the stored code at startup, and a user-driven language change
//! writes it back. The file degrades gracefully — unreadable TOML loads as
//! the default (empty) preference rather than failing startup.
//!
//! [`Cache`]: crate::detect::Source::Cache
//!
//! # Examples
//!
//! ```no_run
//! use lingvo::config;
//!
//! let mut prefs = config::load().unwrap_or_default();
//! prefs.language = Some("fr".to_string());
//! config::save(&prefs).expect("Failed to save preferences");
//! ```

pub mod defaults;

use crate::error::Result;
use defaults::{APP_DIR_NAME, PREFERENCES_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Option<String>,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR_NAME);
        path.push(PREFERENCES_FILE);
        path
    })
}

pub fn load() -> Result<Preferences> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Preferences::default())
}

pub fn save(prefs: &Preferences) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(prefs, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Preferences> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(prefs: &Preferences, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(prefs)?;
    fs::write(path, content)?;
    Ok(())
}
