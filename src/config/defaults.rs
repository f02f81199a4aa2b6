// SPDX-License-Identifier: MPL-2.0
//! Centralized default values and well-known file names.
//!
//! # Categories
//!
//! - **Preferences**: where the persisted language cache lives
//! - **Resources**: embedded locale asset layout

// ==========================================================================
// Preferences Defaults
// ==========================================================================

/// Directory name under the platform config dir holding the preferences file.
pub const APP_DIR_NAME: &str = "Lingvo";

/// File name of the persisted preferences.
pub const PREFERENCES_FILE: &str = "settings.toml";

// ==========================================================================
// Resource Layout
// ==========================================================================

/// File name of the locale registry manifest, at the root of the resource
/// folder.
pub const MANIFEST_FILE: &str = "manifest.toml";

/// File extension of Fluent resource bundles.
pub const RESOURCE_EXTENSION: &str = "ftl";
