//! Widget definitions and the per-widget summary pipeline.
//!
//! A widget pairs a dataset (periodic, fixed, category list or a single
//! gauge reading) with its series descriptors and says which derived values
//! it displays. `Widget::summarize` runs select → derive for the current
//! period selection and hands the host plain values to render.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Dataset, FieldSchema, PeriodDatasets, SeriesConfig};
use crate::error::{DashboardError, Result};
use crate::metrics::{self, BucketRange, OutlierRule, Share, Trend};
use crate::selector::{self, PeriodSelection};

/// The two audiences a dashboard is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Curator,
    Operator,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Curator => "Curator",
            Role::Operator => "Operator",
        }
    }

    pub fn toggle(self) -> Role {
        match self {
            Role::Curator => Role::Operator,
            Role::Operator => Role::Curator,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "curator" => Ok(Role::Curator),
            "operator" => Ok(Role::Operator),
            other => Err(format!("unknown role '{other}' (expected curator or operator)")),
        }
    }
}

/// Chart family the host should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    Area,
    Line,
    Bar,
    Scatter,
    Pie,
    Gauge,
}

/// Where a widget's numbers come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetData {
    /// One dataset per period; the selection picks which.
    Periodic(PeriodDatasets),
    /// A single ordered dataset (batches, months).
    Fixed(Dataset),
    /// A category list for share breakdowns.
    Categories(Dataset),
    /// A single gauge reading.
    Gauge { value: f64 },
}

/// How the widget's headline number is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Headline {
    LatestValue(String),
    /// Sum of several fields on the latest point.
    PointTotal(Vec<String>),
    /// Sum of one field over every entry.
    Sum(String),
    Average(String),
    GaugeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub title: String,
    pub role: Role,
    pub kind: WidgetKind,
    pub data: WidgetData,
    pub series: SeriesConfig,
    pub headline: Headline,
    pub trend_field: Option<String>,
    pub outliers: Option<(String, OutlierRule)>,
    pub status: Option<Vec<BucketRange>>,
    pub share_field: Option<String>,
    /// Unit suffix or prefix hint for the host ("$", "s", "%").
    pub unit: String,
}

/// Everything a host needs to draw a widget besides the raw series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSummary {
    pub widget_id: String,
    /// Period the values were derived for; `None` for non-periodic widgets.
    pub period: Option<String>,
    pub headline: f64,
    pub trend: Option<Trend>,
    pub average: Option<f64>,
    pub outlier_flags: Vec<bool>,
    pub status: Option<String>,
    pub shares: Vec<Share>,
}

impl WidgetSummary {
    pub fn outlier_count(&self) -> usize {
        self.outlier_flags.iter().filter(|f| **f).count()
    }
}

impl Widget {
    /// Field schema of the widget's data; `None` for gauges.
    pub fn schema(&self) -> Option<&FieldSchema> {
        match &self.data {
            WidgetData::Periodic(mapping) => mapping.schema(),
            WidgetData::Fixed(ds) | WidgetData::Categories(ds) => Some(ds.schema()),
            WidgetData::Gauge { .. } => None,
        }
    }

    /// Fields the widget reads besides its plotted series.
    fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = match &self.headline {
            Headline::LatestValue(f) | Headline::Sum(f) | Headline::Average(f) => vec![f.as_str()],
            Headline::PointTotal(fs) => fs.iter().map(String::as_str).collect(),
            Headline::GaugeValue => Vec::new(),
        };
        fields.extend(self.trend_field.as_deref());
        fields.extend(self.outliers.as_ref().map(|(f, _)| f.as_str()));
        fields.extend(self.share_field.as_deref());
        fields
    }

    /// Check series descriptors against the schema once, at definition time.
    ///
    /// Every series key must be a schema field, and every field the widget
    /// reads must have a series descriptor. Status ranges, when given, must
    /// not be empty.
    pub fn validate(&self) -> Result<()> {
        if self.status.as_ref().is_some_and(Vec::is_empty) {
            return Err(DashboardError::EmptyCollection);
        }
        let Some(schema) = self.schema() else {
            return Ok(());
        };
        for key in self.series.keys() {
            schema.require(key)?;
        }
        for field in self.referenced_fields() {
            schema.require(field)?;
        }
        self.series.check_covers(self.referenced_fields())
    }

    /// Periods the widget can switch between, in display order.
    pub fn periods(&self) -> Vec<String> {
        match &self.data {
            WidgetData::Periodic(mapping) => mapping.periods().map(|p| p.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Initial selection: `preferred` when the widget offers it, otherwise its first period.
    pub fn default_selection(&self, preferred: &str) -> Option<PeriodSelection> {
        match &self.data {
            WidgetData::Periodic(mapping) => {
                let wanted = PeriodSelection::new(preferred);
                if mapping.contains(wanted.period()) {
                    Some(wanted)
                } else {
                    PeriodSelection::first(mapping).ok()
                }
            }
            _ => None,
        }
    }

    /// Next selection in the widget's period order; `None` for non-periodic widgets.
    pub fn cycle_period(&self, current: &PeriodSelection) -> Option<PeriodSelection> {
        match &self.data {
            WidgetData::Periodic(mapping) => Some(current.cycle(mapping)),
            _ => None,
        }
    }

    /// Dataset shown for a selection. Fixed and category data ignore the selection.
    pub fn dataset(&self, selection: Option<&PeriodSelection>) -> Result<&Dataset> {
        match &self.data {
            WidgetData::Periodic(mapping) => {
                let selection = match selection {
                    Some(s) => s.clone(),
                    None => PeriodSelection::first(mapping)?,
                };
                selector::select(mapping, selection.period())
            }
            WidgetData::Fixed(ds) | WidgetData::Categories(ds) => Ok(ds),
            WidgetData::Gauge { .. } => Err(DashboardError::EmptyCollection),
        }
    }

    /// Derive the widget's display values for a selection.
    ///
    /// The headline must succeed; secondary values that fail are logged and
    /// left empty so the host can show a placeholder in their place.
    pub fn summarize(&self, selection: Option<&PeriodSelection>) -> Result<WidgetSummary> {
        if let WidgetData::Gauge { value } = &self.data {
            let value = *value;
            let status = self.status.as_deref().and_then(|ranges| {
                self.soft(metrics::bucket(value, ranges).map(str::to_string), "status")
            });
            return Ok(WidgetSummary {
                widget_id: self.id.clone(),
                period: None,
                headline: value,
                trend: None,
                average: None,
                outlier_flags: Vec::new(),
                status,
                shares: Vec::new(),
            });
        }

        let dataset = self.dataset(selection)?;
        let period = match (&self.data, selection) {
            (WidgetData::Periodic(_), Some(s)) => Some(s.period().to_string()),
            (WidgetData::Periodic(mapping), None) => {
                mapping.periods().next().map(|p| p.to_string())
            }
            _ => None,
        };

        let headline = match &self.headline {
            Headline::LatestValue(field) => metrics::latest_value(dataset, field)?,
            Headline::PointTotal(fields) => {
                let names: Vec<&str> = fields.iter().map(String::as_str).collect();
                metrics::total(selector::latest(dataset)?, &names)?
            }
            Headline::Sum(field) => metrics::weighted_total(dataset.points(), field)?,
            Headline::Average(field) => metrics::average(dataset, field)?,
            Headline::GaugeValue => return Err(DashboardError::EmptyCollection),
        };

        let trend = self
            .trend_field
            .as_deref()
            .and_then(|field| self.soft(metrics::trend(dataset, field), "trend"));

        let average = match &self.headline {
            Headline::Average(_) => None,
            _ => self
                .trend_field
                .as_deref()
                .and_then(|field| self.soft(metrics::average(dataset, field), "average")),
        };

        let outlier_flags = self
            .outliers
            .as_ref()
            .and_then(|(field, rule)| {
                self.soft(metrics::outlier_flags(dataset, field, *rule), "outliers")
            })
            .unwrap_or_default();

        let status = self.status.as_deref().and_then(|ranges| {
            self.soft(
                metrics::bucket(headline, ranges).map(str::to_string),
                "status",
            )
        });

        let shares = self
            .share_field
            .as_deref()
            .and_then(|field| self.soft(metrics::shares(dataset.points(), field), "shares"))
            .unwrap_or_default();

        Ok(WidgetSummary {
            widget_id: self.id.clone(),
            period,
            headline,
            trend,
            average,
            outlier_flags,
            status,
            shares,
        })
    }

    /// Keep a secondary value or log why it is missing.
    fn soft<T>(&self, value: Result<T>, what: &str) -> Option<T> {
        match value {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(widget = %self.id, what, error = %e, "derived value suppressed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataPoint;
    use crate::metrics::Comparator;

    fn fees_dataset(values: &[f64]) -> Dataset {
        let schema = FieldSchema::new(["fees"]).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(format!("d{i}"), [("fees", *v)]))
            .collect();
        Dataset::new(schema, points).unwrap()
    }

    fn periodic_widget() -> Widget {
        let mapping = PeriodDatasets::from_entries([
            ("7D", fees_dataset(&[1.0, 2.0, 4.0])),
            ("30D", fees_dataset(&[10.0, 8.0])),
        ])
        .unwrap();
        Widget {
            id: "fees".into(),
            title: "Fees".into(),
            role: Role::Curator,
            kind: WidgetKind::Area,
            data: WidgetData::Periodic(mapping),
            series: SeriesConfig::new().with("fees", "Fees", "chart-1"),
            headline: Headline::LatestValue("fees".into()),
            trend_field: Some("fees".into()),
            outliers: None,
            status: None,
            share_field: None,
            unit: "$".into(),
        }
    }

    #[test]
    fn summary_uses_selected_period() {
        let w = periodic_widget();
        let s = w.summarize(Some(&PeriodSelection::new("30D"))).unwrap();
        assert_eq!(s.period.as_deref(), Some("30D"));
        assert_eq!(s.headline, 8.0);
        let trend = s.trend.unwrap();
        assert_eq!(trend.delta, -2.0);
        assert!(!trend.is_positive);
        assert_eq!(s.average, Some(9.0));
    }

    #[test]
    fn summary_without_selection_uses_first_period() {
        let s = periodic_widget().summarize(None).unwrap();
        assert_eq!(s.period.as_deref(), Some("7D"));
        assert_eq!(s.headline, 4.0);
    }

    #[test]
    fn summary_unknown_period_fails() {
        let err = periodic_widget()
            .summarize(Some(&PeriodSelection::new("5D")))
            .unwrap_err();
        assert_eq!(err, DashboardError::UnknownPeriod("5D".into()));
    }

    #[test]
    fn single_point_suppresses_trend_only() {
        let mut w = periodic_widget();
        w.data = WidgetData::Fixed(fees_dataset(&[5.0]));
        let s = w.summarize(None).unwrap();
        assert_eq!(s.headline, 5.0);
        assert!(s.trend.is_none());
        assert_eq!(s.average, Some(5.0));
        assert!(s.period.is_none());
    }

    #[test]
    fn empty_dataset_shows_zero_state() {
        let mut w = periodic_widget();
        w.data = WidgetData::Fixed(fees_dataset(&[]));
        let s = w.summarize(None).unwrap();
        assert_eq!(s.headline, 0.0);
        assert!(s.trend.is_none());
        assert!(s.average.is_none());
    }

    #[test]
    fn gauge_is_bucketed() {
        let w = Widget {
            id: "quotes".into(),
            title: "Quote Acceptance".into(),
            role: Role::Operator,
            kind: WidgetKind::Gauge,
            data: WidgetData::Gauge { value: 12.5 },
            series: SeriesConfig::new(),
            headline: Headline::GaugeValue,
            trend_field: None,
            outliers: None,
            status: Some(vec![
                BucketRange::new(0.0, "Low"),
                BucketRange::new(10.0, "Medium"),
                BucketRange::new(20.0, "High"),
            ]),
            share_field: None,
            unit: "%".into(),
        };
        let s = w.summarize(None).unwrap();
        assert_eq!(s.status.as_deref(), Some("Medium"));
        assert_eq!(s.headline, 12.5);
    }

    fn gauge(value: f64, ranges: Vec<BucketRange>) -> Widget {
        Widget {
            id: "quotes".into(),
            title: "Quote Acceptance".into(),
            role: Role::Operator,
            kind: WidgetKind::Gauge,
            data: WidgetData::Gauge { value },
            series: SeriesConfig::new(),
            headline: Headline::GaugeValue,
            trend_field: None,
            outliers: None,
            status: Some(ranges),
            share_field: None,
            unit: "%".into(),
        }
    }

    #[test]
    fn gauge_below_every_floor_keeps_headline() {
        let w = gauge(
            2.0,
            vec![BucketRange::new(5.0, "Low"), BucketRange::new(10.0, "High")],
        );
        let s = w.summarize(None).unwrap();
        assert_eq!(s.headline, 2.0);
        assert!(s.status.is_none());
    }

    #[test]
    fn validate_rejects_empty_status_ranges() {
        assert_eq!(
            gauge(12.0, Vec::new()).validate().unwrap_err(),
            DashboardError::EmptyCollection
        );
        gauge(12.0, vec![BucketRange::new(0.0, "Low")])
            .validate()
            .unwrap();
    }

    #[test]
    fn point_total_on_empty_dataset_fails() {
        let schema = FieldSchema::new(["a", "b"]).unwrap();
        let mut w = periodic_widget();
        w.data = WidgetData::Fixed(Dataset::empty(schema));
        w.series = SeriesConfig::new().with("a", "A", "chart-1").with("b", "B", "chart-2");
        w.headline = Headline::PointTotal(vec!["a".into(), "b".into()]);
        w.trend_field = None;
        assert_eq!(w.summarize(None).unwrap_err(), DashboardError::EmptyDataset);
    }

    #[test]
    fn outliers_are_counted() {
        let mut w = periodic_widget();
        w.data = WidgetData::Fixed(fees_dataset(&[10.0, 40.0, 35.0]));
        w.outliers = Some((
            "fees".into(),
            OutlierRule {
                threshold: 30.0,
                comparator: Comparator::GreaterThan,
            },
        ));
        let s = w.summarize(None).unwrap();
        assert_eq!(s.outlier_flags, vec![false, true, true]);
        assert_eq!(s.outlier_count(), 2);
    }

    #[test]
    fn validate_catches_missing_series() {
        let mut w = periodic_widget();
        w.series = SeriesConfig::new();
        assert_eq!(
            w.validate().unwrap_err(),
            DashboardError::MissingSeries("fees".into())
        );
    }

    #[test]
    fn validate_catches_series_outside_schema() {
        let mut w = periodic_widget();
        w.series = w.series.clone().with("volume", "Volume", "chart-2");
        assert_eq!(
            w.validate().unwrap_err(),
            DashboardError::UnknownField("volume".into())
        );
    }

    #[test]
    fn cycle_period_wraps() {
        let w = periodic_widget();
        let sel = w.default_selection("30D").unwrap();
        assert_eq!(w.cycle_period(&sel).unwrap().period().as_str(), "7D");
    }

    #[test]
    fn default_selection_falls_back_to_first() {
        let w = periodic_widget();
        assert_eq!(w.default_selection("1Y").unwrap().period().as_str(), "7D");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Operator".parse::<Role>().unwrap(), Role::Operator);
        assert!("admin".parse::<Role>().is_err());
    }
}
