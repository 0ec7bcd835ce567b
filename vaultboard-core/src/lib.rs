//! vaultboard core — dashboard composition and metrics derivation.
//!
//! This crate holds everything a dashboard host needs besides drawing:
//! - Domain types (data points, schemas, period-keyed datasets, series descriptors)
//! - Slide navigator with circular wraparound
//! - Period selection passed around as explicit state
//! - Pure derived metrics (totals, trends, shares, averages, outliers, buckets)
//! - Widget definitions, the sample catalogue, and TOML configuration

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod navigator;
pub mod sample;
pub mod selector;
pub mod widget;

pub use config::{ConfigError, DashboardConfig};
pub use error::{DashboardError, Result};
pub use metrics::{BucketRange, Comparator, OutlierRule, Share, Trend};
pub use navigator::{NavigatorState, Slide, SlideDeck};
pub use selector::PeriodSelection;
pub use widget::{Headline, Role, Widget, WidgetData, WidgetKind, WidgetSummary};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types can be shared across widgets and threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::DataPoint>();
        require_sync::<domain::DataPoint>();
        require_send::<domain::Dataset>();
        require_sync::<domain::Dataset>();
        require_send::<domain::PeriodDatasets>();
        require_sync::<domain::PeriodDatasets>();
        require_send::<domain::SeriesConfig>();
        require_sync::<domain::SeriesConfig>();

        require_send::<NavigatorState>();
        require_sync::<NavigatorState>();
        require_send::<SlideDeck<Widget>>();
        require_sync::<SlideDeck<Widget>>();
        require_send::<PeriodSelection>();
        require_sync::<PeriodSelection>();

        require_send::<Trend>();
        require_sync::<Trend>();
        require_send::<WidgetSummary>();
        require_sync::<WidgetSummary>();
        require_send::<DashboardError>();
        require_sync::<DashboardError>();
        require_send::<DashboardConfig>();
        require_sync::<DashboardConfig>();
    }

    /// Metrics take shared references only: calling them cannot change the input.
    #[test]
    fn metrics_leave_dataset_untouched() {
        let config = DashboardConfig::default();
        let widgets = sample::catalog(Role::Curator, &config).unwrap();
        let before = widgets.clone();
        for w in &widgets {
            let _ = w.summarize(None);
        }
        assert_eq!(widgets, before);
    }
}
