//! Derived metrics — pure functions that turn a dataset into display values.
//!
//! Every metric is a pure function: dataset (or category list, or single
//! point) in, scalar or per-point booleans out. Nothing is cached and no
//! call depends on another, so any number of widgets may call these freely.
//!
//! Errors are surfaced to the caller. The single exception is
//! [`latest_value`], which reports `0.0` for an empty dataset so a widget
//! can show a zero state.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryEntry, DataPoint, Dataset};
use crate::error::{DashboardError, Result};
use crate::selector;

/// Period-over-period change of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub delta: f64,
    pub is_positive: bool,
    /// `delta` relative to the previous value, in percent. `None` when the
    /// previous value is zero.
    pub percent_change: Option<f64>,
}

/// One category's share of a weighted total, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

/// How a point's value is compared against an outlier threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl Comparator {
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::GreaterThan => value > threshold,
            Comparator::GreaterOrEqual => value >= threshold,
            Comparator::LessThan => value < threshold,
            Comparator::LessOrEqual => value <= threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::GreaterThan => ">",
            Comparator::GreaterOrEqual => ">=",
            Comparator::LessThan => "<",
            Comparator::LessOrEqual => "<=",
        }
    }
}

/// Caller-supplied threshold and comparator for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierRule {
    pub threshold: f64,
    pub comparator: Comparator,
}

/// A status bucket: values at or above `min` (and below the next floor) get `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min: f64,
    pub label: String,
}

impl BucketRange {
    pub fn new(min: f64, label: impl Into<String>) -> Self {
        Self {
            min,
            label: label.into(),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Sum of several named fields on a single point.
///
/// Used where one point carries several sub-series (one per vault, say)
/// that together form a combined figure.
pub fn total(point: &DataPoint, fields: &[&str]) -> Result<f64> {
    fields.iter().map(|f| point.value(f)).sum()
}

/// Value of `field` on the latest point; `0.0` for an empty dataset.
///
/// The field is still checked against the schema, so a typo fails even
/// when there is no data.
pub fn latest_value(dataset: &Dataset, field: &str) -> Result<f64> {
    dataset.schema().require(field)?;
    match selector::latest(dataset) {
        Ok(point) => point.value(field),
        Err(DashboardError::EmptyDataset) => Ok(0.0),
        Err(e) => Err(e),
    }
}

/// Latest minus previous value of `field`.
///
/// Needs two points: empty fails with `EmptyDataset`, a single point with
/// `InsufficientData`.
pub fn trend(dataset: &Dataset, field: &str) -> Result<Trend> {
    dataset.schema().require(field)?;
    let current = selector::latest(dataset)?.value(field)?;
    let prior = selector::previous(dataset)?.value(field)?;
    let delta = current - prior;
    let percent_change = if prior == 0.0 {
        None
    } else {
        Some(delta / prior.abs() * 100.0)
    };
    Ok(Trend {
        delta,
        is_positive: delta > 0.0,
        percent_change,
    })
}

/// Sum of one field across a category list.
///
/// Percentages in pie-style inputs are expected to add up to 100 by
/// construction; this does not rescale them.
pub fn weighted_total(entries: &[CategoryEntry], field: &str) -> Result<f64> {
    entries.iter().map(|e| e.value(field)).sum()
}

/// Each entry's percentage of the weighted total, in entry order.
pub fn shares(entries: &[CategoryEntry], field: &str) -> Result<Vec<Share>> {
    if entries.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }
    let sum = weighted_total(entries, field)?;
    if sum == 0.0 {
        return Err(DashboardError::ZeroTotal {
            field: field.to_string(),
        });
    }
    entries
        .iter()
        .map(|e| {
            let value = e.value(field)?;
            Ok(Share {
                label: e.label().to_string(),
                value,
                percent: value / sum * 100.0,
            })
        })
        .collect()
}

/// Arithmetic mean of `field` across all points.
pub fn average(dataset: &Dataset, field: &str) -> Result<f64> {
    let values = dataset.column(field)?;
    if values.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }
    Ok(mean_f64(&values))
}

/// Whether `point[field]` trips the caller's threshold.
pub fn classify_outlier(
    point: &DataPoint,
    field: &str,
    threshold: f64,
    comparator: Comparator,
) -> Result<bool> {
    Ok(comparator.apply(point.value(field)?, threshold))
}

/// Per-point outlier flags in dataset order.
pub fn outlier_flags(dataset: &Dataset, field: &str, rule: OutlierRule) -> Result<Vec<bool>> {
    dataset.schema().require(field)?;
    dataset
        .points()
        .iter()
        .map(|p| classify_outlier(p, field, rule.threshold, rule.comparator))
        .collect()
}

/// Label of the highest-floor range whose `min <= value`.
pub fn bucket(value: f64, ranges: &[BucketRange]) -> Result<&str> {
    ranges
        .iter()
        .filter(|r| r.min <= value)
        .fold(None::<&BucketRange>, |best, r| match best {
            Some(b) if b.min >= r.min => Some(b),
            _ => Some(r),
        })
        .map(|r| r.label.as_str())
        .ok_or(DashboardError::NoMatchingBucket { value })
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Running mean: `n` identical inputs return that input exactly.
fn mean_f64(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}
