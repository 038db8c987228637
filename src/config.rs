use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WarmpathConfig {
    pub logging: LoggingConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

/// Knobs for one recommendation pass.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    /// Requester's home city for same-city timing bonuses. Falls back to
    /// the requester profile's city when unset.
    pub reference_city: Option<String>,
    pub max_results: usize,
    /// Candidates scoring below this are dropped from the output.
    pub min_score: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            reference_city: None,
            max_results: 10,
            min_score: 20,
        }
    }
}

/// Returns `~/.warmpath/`
pub fn default_warmpath_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".warmpath")
}

/// Returns the default config file path: `~/.warmpath/config.toml`
pub fn default_config_path() -> PathBuf {
    default_warmpath_dir().join("config.toml")
}

impl WarmpathConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            WarmpathConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (WARMPATH_CITY,
    /// WARMPATH_MIN_SCORE, WARMPATH_MAX_RESULTS, WARMPATH_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WARMPATH_CITY") {
            self.scan.reference_city = Some(val);
        }
        if let Ok(val) = std::env::var("WARMPATH_MIN_SCORE") {
            if let Ok(parsed) = val.parse() {
                self.scan.min_score = parsed;
            }
        }
        if let Ok(val) = std::env::var("WARMPATH_MAX_RESULTS") {
            if let Ok(parsed) = val.parse() {
                self.scan.max_results = parsed;
            }
        }
        if let Ok(val) = std::env::var("WARMPATH_LOG_LEVEL") {
            self.logging.log_level = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = WarmpathConfig::default();
        assert_eq!(config.logging.log_level, "info");
        assert_eq!(config.scan.max_results, 10);
        assert_eq!(config.scan.min_score, 20);
        assert!(config.scan.reference_city.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[logging]
log_level = "debug"

[scan]
reference_city = "bangkok"
max_results = 5
"#;
        let config: WarmpathConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.log_level, "debug");
        assert_eq!(config.scan.reference_city.as_deref(), Some("bangkok"));
        assert_eq!(config.scan.max_results, 5);
        // defaults still apply for unset fields
        assert_eq!(config.scan.min_score, 20);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = WarmpathConfig::default();
        std::env::set_var("WARMPATH_CITY", "sf");
        std::env::set_var("WARMPATH_MIN_SCORE", "35");
        std::env::set_var("WARMPATH_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.scan.reference_city.as_deref(), Some("sf"));
        assert_eq!(config.scan.min_score, 35);
        assert_eq!(config.logging.log_level, "trace");

        // Clean up
        std::env::remove_var("WARMPATH_CITY");
        std::env::remove_var("WARMPATH_MIN_SCORE");
        std::env::remove_var("WARMPATH_LOG_LEVEL");
    }
}
