//! Dashboard configuration — TOML-backed settings with validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::metrics::{BucketRange, Comparator, OutlierRule};
use crate::widget::Role;

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by the terminal host and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Role shown on startup.
    pub role: Role,
    /// Maximum widgets grouped onto one slide.
    pub widgets_per_slide: usize,
    /// Period periodic widgets start on.
    pub default_period: String,
    /// Gauge status floors, ascending.
    pub status_buckets: Vec<BucketRange>,
    /// Threshold for flagging slow trade executions, in seconds.
    pub execution_outlier: OutlierRule,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            role: Role::Curator,
            widgets_per_slide: 2,
            default_period: "30D".to_string(),
            status_buckets: vec![
                BucketRange::new(0.0, "Low"),
                BucketRange::new(10.0, "Medium"),
                BucketRange::new(20.0, "High"),
            ],
            execution_outlier: OutlierRule {
                threshold: 30.0,
                comparator: Comparator::GreaterThan,
            },
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a config from a TOML string. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists; defaults if it does not.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.widgets_per_slide == 0 {
            return Err(ConfigError::Invalid(
                "widgets_per_slide must be at least 1".into(),
            ));
        }
        if self.default_period.trim().is_empty() {
            return Err(ConfigError::Invalid("default_period is empty".into()));
        }
        if self.status_buckets.is_empty() {
            return Err(ConfigError::Invalid("status_buckets is empty".into()));
        }
        if self.status_buckets.windows(2).any(|w| w[0].min >= w[1].min) {
            return Err(ConfigError::Invalid(
                "status_buckets must have strictly ascending min".into(),
            ));
        }
        if !self.execution_outlier.threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "execution_outlier.threshold must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        DashboardConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = DashboardConfig::from_toml("widgets_per_slide = 3\nrole = \"operator\"\n")
            .unwrap();
        assert_eq!(config.widgets_per_slide, 3);
        assert_eq!(config.role, Role::Operator);
        assert_eq!(config.default_period, "30D");
        assert_eq!(config.status_buckets.len(), 3);
    }

    #[test]
    fn full_toml() {
        let content = r#"
            default_period = "7D"

            [execution_outlier]
            threshold = 45.0
            comparator = "greater_or_equal"

            [[status_buckets]]
            min = 0.0
            label = "Cold"

            [[status_buckets]]
            min = 50.0
            label = "Hot"
        "#;
        let config = DashboardConfig::from_toml(content).unwrap();
        assert_eq!(config.default_period, "7D");
        assert_eq!(config.execution_outlier.threshold, 45.0);
        assert_eq!(config.execution_outlier.comparator, Comparator::GreaterOrEqual);
        assert_eq!(config.status_buckets[1].label, "Hot");
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = DashboardConfig::from_toml("widgets_per_slide = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unsorted_buckets_rejected() {
        let content = r#"
            [[status_buckets]]
            min = 20.0
            label = "High"

            [[status_buckets]]
            min = 10.0
            label = "Medium"
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            DashboardConfig::from_toml("widgets_per_slide = ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn toml_roundtrip() {
        let config = DashboardConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn from_file_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "widgets_per_slide = 4").unwrap();
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.widgets_per_slide, 4);
    }

    #[test]
    fn load_or_default_surfaces_broken_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "role = \"admin\"").unwrap();
        assert!(DashboardConfig::load_or_default(file.path()).is_err());
    }
}
