//! SeriesConfig — display descriptors keyed by series/field name.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Display label and color token for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub label: String,
    pub color_token: String,
}

/// Ordered mapping series key → descriptor. Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    entries: Vec<(String, SeriesDescriptor)>,
}

impl SeriesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key replaces its descriptor.
    pub fn with(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        color_token: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let descriptor = SeriesDescriptor {
            label: label.into(),
            color_token: color_token.into(),
        };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = descriptor,
            None => self.entries.push((key, descriptor)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&SeriesDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail with `MissingSeries` for the first field lacking a descriptor.
    pub fn check_covers<'a, I>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for field in fields {
            if self.get(field).is_none() {
                return Err(DashboardError::MissingSeries(field.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_reports_first_missing() {
        let series = SeriesConfig::new()
            .with("alpha", "Alpha Vault", "chart-1")
            .with("beta", "Beta Vault", "chart-2");
        assert!(series.check_covers(["alpha", "beta"]).is_ok());
        assert_eq!(
            series.check_covers(["alpha", "gamma"]).unwrap_err(),
            DashboardError::MissingSeries("gamma".into())
        );
    }

    #[test]
    fn with_replaces_existing_key() {
        let series = SeriesConfig::new()
            .with("fees", "Fees", "chart-1")
            .with("fees", "Total Fees", "chart-3");
        assert_eq!(series.len(), 1);
        assert_eq!(series.get("fees").unwrap().label, "Total Fees");
    }
}
