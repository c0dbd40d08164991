//! # Configuration State
//!
//! Application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--download-dir`, `--locale`)
//! 2. Environment variables (`DRAWER_*`)
//! 3. Defaults (platform folders, Japanese labels)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use drawer_core::{Labels, Locale};
use serde::Serialize;
use tracing::warn;

/// Environment variable overriding the preference database path.
pub const ENV_DB_PATH: &str = "DRAWER_DB_PATH";

/// Environment variable overriding the download folder.
pub const ENV_DOWNLOAD_DIR: &str = "DRAWER_DOWNLOAD_DIR";

/// Environment variable selecting the label language.
pub const ENV_LOCALE: &str = "DRAWER_LOCALE";

/// File name of the preference database inside the data folder.
pub const DATABASE_FILE: &str = "drawer-kun.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Label language for the table and summary.
    /// Default: ja
    pub locale: Locale,

    /// Preference database file.
    /// Default: platform data dir + `drawer-kun.db`
    pub database_path: PathBuf,

    /// Folder for downloaded summaries.
    /// Default: the user's download folder, else the current directory
    pub download_dir: PathBuf,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - **macOS**: `~/Library/Application Support/com.drawer-kun.drawer-kun/drawer-kun.db`
    /// - **Windows**: `%APPDATA%\drawer-kun\drawer-kun\data\drawer-kun.db`
    /// - **Linux**: `~/.local/share/drawer-kun/drawer-kun.db`
    fn default() -> Self {
        AppConfig {
            locale: Locale::default(),
            database_path: default_database_path(),
            download_dir: default_download_dir(),
        }
    }
}

impl AppConfig {
    /// Creates configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DRAWER_DB_PATH`: Override the database path
    /// - `DRAWER_DOWNLOAD_DIR`: Override the download folder
    /// - `DRAWER_LOCALE`: `ja` or `en`
    pub fn from_env() -> Self {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup(ENV_DOWNLOAD_DIR).filter(|v| !v.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(ENV_LOCALE) {
            match raw.parse::<Locale>() {
                Ok(locale) => config.locale = locale,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring {}", ENV_LOCALE),
            }
        }

        config
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        database_path: Option<PathBuf>,
        download_dir: Option<PathBuf>,
        locale: Option<Locale>,
    ) -> Self {
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if let Some(dir) = download_dir {
            self.download_dir = dir;
        }
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }

    /// Labels for the configured locale.
    pub fn labels(&self) -> Labels {
        Labels::for_locale(self.locale)
    }
}

fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "drawer-kun", "drawer-kun")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));

        assert_eq!(config.locale, Locale::Ja);
        assert!(config.database_path.ends_with(DATABASE_FILE));
        assert_eq!(config.labels(), Labels::ja());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/prefs.db"),
            (ENV_DOWNLOAD_DIR, "/tmp/out"),
            (ENV_LOCALE, "en"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/prefs.db"));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_invalid_locale_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_LOCALE, "fr")]));
        assert_eq!(config.locale, Locale::Ja);
    }

    #[test]
    fn test_flags_override_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/env.db"),
            (ENV_LOCALE, "en"),
        ]))
        .with_overrides(Some(PathBuf::from("/tmp/flag.db")), None, Some(Locale::Ja));

        assert_eq!(config.database_path, PathBuf::from("/tmp/flag.db"));
        assert_eq!(config.locale, Locale::Ja);
    }
}
