//! Period-keyed dataset selection.
//!
//! The selected period is explicit state (`PeriodSelection`) owned by the
//! caller and passed in on every lookup; nothing here remembers a choice.

use serde::{Deserialize, Serialize};

use crate::domain::{DataPoint, Dataset, Period, PeriodDatasets};
use crate::error::{DashboardError, Result};

/// The dataset stored under `period`.
pub fn select<'a>(mapping: &'a PeriodDatasets, period: &Period) -> Result<&'a Dataset> {
    mapping
        .get(period)
        .ok_or_else(|| DashboardError::UnknownPeriod(period.to_string()))
}

/// Last point in sequence order.
pub fn latest(dataset: &Dataset) -> Result<&DataPoint> {
    dataset.points().last().ok_or(DashboardError::EmptyDataset)
}

/// Second-to-last point in sequence order.
pub fn previous(dataset: &Dataset) -> Result<&DataPoint> {
    let points = dataset.points();
    if points.len() < 2 {
        return Err(DashboardError::InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }
    Ok(&points[points.len() - 2])
}

/// A widget's chosen period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSelection {
    period: Period,
}

impl PeriodSelection {
    pub fn new(period: impl Into<Period>) -> Self {
        Self {
            period: period.into(),
        }
    }

    /// Select the first period of a mapping.
    pub fn first(mapping: &PeriodDatasets) -> Result<Self> {
        mapping
            .periods()
            .next()
            .cloned()
            .map(|period| Self { period })
            .ok_or(DashboardError::EmptyCollection)
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    /// The selection after this one, in mapping order, wrapping at the end.
    ///
    /// A period missing from the mapping restarts at the first one; an
    /// empty mapping leaves the selection unchanged.
    pub fn cycle(&self, mapping: &PeriodDatasets) -> Self {
        let periods: Vec<&Period> = mapping.periods().collect();
        if periods.is_empty() {
            return self.clone();
        }
        let next = match periods.iter().position(|p| **p == self.period) {
            Some(i) => periods[(i + 1) % periods.len()],
            None => periods[0],
        };
        Self::new(next.clone())
    }

    pub fn resolve<'a>(&self, mapping: &'a PeriodDatasets) -> Result<&'a Dataset> {
        select(mapping, &self.period)
    }
}
