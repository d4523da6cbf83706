//! Statistics module - requested statistics and their per-request settings.

mod histogram;
mod missing_value;
mod statistic_request;

pub use histogram::HistogramBins;
pub use missing_value::{MissingValueHandling, MissingValueHandlingInput};
pub use statistic_request::{StatisticRequest, StatisticRequestInput};
