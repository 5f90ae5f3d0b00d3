//! Long-term plan (LTP) extrapolation.

pub mod projection;
pub mod types;

pub use projection::{project, round_to_unit};
pub use types::{LTP_YEARS, MAX_GROWTH_RATE, TrendPoint, TrendRounding, TrendSettings};
