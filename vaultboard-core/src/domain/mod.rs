//! Domain types for vaultboard

pub mod dataset;
pub mod period;
pub mod series;

pub use dataset::{CategoryEntry, DataPoint, Dataset, FieldSchema};
pub use period::{Period, PeriodDatasets, STANDARD_PERIODS};
pub use series::{SeriesConfig, SeriesDescriptor};
