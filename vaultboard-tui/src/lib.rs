//! vaultboard TUI — slide dashboard for curator and operator analytics.
//!
//! Shows one slide at a time with its widgets side by side:
//! - Line, area and scatter charts with outlier overlays
//! - Bar charts, share breakdowns and a bucketed gauge
//! - A summary line per widget (headline, trend, average, outliers, status)
//!
//! Slide position, role and per-widget periods persist across restarts.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
