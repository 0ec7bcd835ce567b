//! Period tokens and the period-keyed dataset mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{Dataset, FieldSchema};
use crate::error::{DashboardError, Result};

/// The range selectors every periodic widget offers, in display order.
pub const STANDARD_PERIODS: [&str; 4] = ["7D", "30D", "90D", "1Y"];

/// Time-range selector. An opaque token matched exactly (case-sensitive)
/// against mapping keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Period {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Period {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Ordered mapping Period → Dataset.
///
/// Datasets may differ in length but must share one schema. Insertion
/// order is kept; it is the order hosts cycle through periods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodDatasets {
    entries: Vec<(Period, Dataset)>,
}

impl PeriodDatasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, Dataset)>,
        P: Into<Period>,
    {
        let mut mapping = Self::new();
        for (period, dataset) in entries {
            mapping.insert(period, dataset)?;
        }
        Ok(mapping)
    }

    /// Insert or replace the dataset for `period`.
    pub fn insert(&mut self, period: impl Into<Period>, dataset: Dataset) -> Result<()> {
        let period = period.into();
        if let Some(schema) = self.schema() {
            if schema != dataset.schema() {
                return Err(DashboardError::SchemaMismatch(format!(
                    "period '{}' declares [{}], mapping uses [{}]",
                    period,
                    dataset.schema().names().join(", "),
                    schema.names().join(", ")
                )));
            }
        }
        match self.entries.iter_mut().find(|(p, _)| *p == period) {
            Some(slot) => slot.1 = dataset,
            None => self.entries.push((period, dataset)),
        }
        Ok(())
    }

    pub fn get(&self, period: &Period) -> Option<&Dataset> {
        self.entries
            .iter()
            .find(|(p, _)| p == period)
            .map(|(_, ds)| ds)
    }

    pub fn contains(&self, period: &Period) -> bool {
        self.get(period).is_some()
    }

    pub fn periods(&self) -> impl Iterator<Item = &Period> {
        self.entries.iter().map(|(p, _)| p)
    }

    /// Shared schema of every dataset, `None` while the mapping is empty.
    pub fn schema(&self) -> Option<&FieldSchema> {
        self.entries.first().map(|(_, ds)| ds.schema())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::DataPoint;

    fn ds(field: &str, n: usize) -> Dataset {
        let schema = FieldSchema::new([field]).unwrap();
        let points = (0..n)
            .map(|i| DataPoint::new(format!("d{i}"), [(field, i as f64)]))
            .collect();
        Dataset::new(schema, points).unwrap()
    }

    #[test]
    fn insertion_order_is_kept() {
        let mapping = PeriodDatasets::from_entries(
            STANDARD_PERIODS.iter().map(|p| (*p, ds("fees", 3))),
        )
        .unwrap();
        let order: Vec<&str> = mapping.periods().map(Period::as_str).collect();
        assert_eq!(order, STANDARD_PERIODS.to_vec());
    }

    #[test]
    fn lengths_may_differ_but_schema_may_not() {
        let mut mapping = PeriodDatasets::new();
        mapping.insert("7D", ds("fees", 7)).unwrap();
        mapping.insert("30D", ds("fees", 30)).unwrap();
        let err = mapping.insert("90D", ds("volume", 90)).unwrap_err();
        assert!(matches!(err, DashboardError::SchemaMismatch(_)));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut mapping = PeriodDatasets::new();
        mapping.insert("7D", ds("fees", 7)).unwrap();
        mapping.insert("30D", ds("fees", 30)).unwrap();
        mapping.insert("7D", ds("fees", 2)).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&"7D".into()).unwrap().len(), 2);
        assert_eq!(mapping.periods().next().unwrap().as_str(), "7D");
    }

    #[test]
    fn tokens_are_case_sensitive() {
        let mut mapping = PeriodDatasets::new();
        mapping.insert("1Y", ds("fees", 12)).unwrap();
        assert!(mapping.contains(&Period::new("1Y")));
        assert!(!mapping.contains(&Period::new("1y")));
    }
}
