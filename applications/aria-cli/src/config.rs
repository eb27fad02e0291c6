/// CLI configuration
use crate::error::{CliError, Result};
use aria_catalog::CatalogConfig;
use aria_playback::PlaybackConfig;
use aria_transport::{TransportConfig, MAX_STATUS_INTERVAL, MIN_STATUS_INTERVAL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "aria.toml";

/// Prefix of environment overrides, e.g. `ARIA_CATALOG__PAGE_SIZE=30`
pub const ENV_PREFIX: &str = "ARIA";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AriaSettings {
    pub storage: StorageSettings,
    pub catalog: CatalogConfig,
    pub transport: TransportConfig,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub database_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://aria.db".to_string()
}

impl AriaSettings {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `aria.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, default_environment())
    }

    /// Load configuration with a caller-supplied environment source
    pub fn load_from(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path.to_path_buf()).required(true)),
            None => settings.add_source(
                config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
            ),
        };

        settings = settings.add_source(environment);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(CliError::Config(format!(
                "database_url must be a sqlite: URL, got {:?} (set ARIA_STORAGE__DATABASE_URL)",
                self.storage.database_url
            )));
        }

        if self.catalog.base_url.trim().is_empty() {
            return Err(CliError::Config(
                "catalog base_url is required (set ARIA_CATALOG__BASE_URL)".to_string(),
            ));
        }

        if self.catalog.page_size == 0 {
            return Err(CliError::Config("catalog page_size must be at least 1".to_string()));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(CliError::Config("catalog timeout_secs must be at least 1".to_string()));
        }

        let interval = self.transport.status_interval_ms;
        if interval < MIN_STATUS_INTERVAL.as_millis() as u64
            || interval > MAX_STATUS_INTERVAL.as_millis() as u64
        {
            warn!(
                status_interval_ms = interval,
                "Status interval out of range, it will be clamped"
            );
        }

        Ok(())
    }
}

/// `ARIA_<SECTION>__<KEY>` variables, values parsed as numbers and booleans
pub fn default_environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_playback::RepeatMode;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        default_environment().source(Some(map))
    }

    #[test]
    fn defaults_without_sources() {
        let settings = AriaSettings::load_from(None, environment(&[])).unwrap();
        assert_eq!(settings.storage.database_url, "sqlite://aria.db");
        assert_eq!(settings.catalog.page_size, 20);
        assert_eq!(settings.transport.status_interval_ms, 500);
        assert_eq!(settings.playback.scrub_back_threshold_ms, 3000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let settings = AriaSettings::load_from(
            None,
            environment(&[
                ("ARIA_CATALOG__BASE_URL", "http://localhost:3000"),
                ("ARIA_CATALOG__PAGE_SIZE", "50"),
                ("ARIA_PLAYBACK__REPEAT", "all"),
                ("ARIA_PLAYBACK__SHUFFLE", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.catalog.base_url, "http://localhost:3000");
        assert_eq!(settings.catalog.page_size, 50);
        assert_eq!(settings.playback.repeat, RepeatMode::All);
        assert!(settings.playback.shuffle);
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aria.toml");
        std::fs::write(
            &path,
            "[storage]\ndatabase_url = \"sqlite://library.db\"\n\n[catalog]\npage_size = 10\n",
        )
        .unwrap();

        let settings = AriaSettings::load_from(
            Some(&path),
            environment(&[("ARIA_CATALOG__PAGE_SIZE", "30")]),
        )
        .unwrap();

        assert_eq!(settings.storage.database_url, "sqlite://library.db");
        assert_eq!(settings.catalog.page_size, 30);
        assert_eq!(settings.catalog.timeout_secs, 30);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AriaSettings::load_from(Some(&dir.path().join("missing.toml")), environment(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_non_sqlite_database() {
        let mut settings = AriaSettings::default();
        settings.storage.database_url = "postgres://localhost/aria".to_string();
        assert!(matches!(settings.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut settings = AriaSettings::default();
        settings.catalog.page_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn out_of_range_interval_is_only_a_warning() {
        let mut settings = AriaSettings::default();
        settings.transport.status_interval_ms = 5;
        assert!(settings.validate().is_ok());
    }
}
