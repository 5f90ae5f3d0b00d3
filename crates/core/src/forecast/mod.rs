//! Forecast-to-budget driver engine.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::DriverEngine;
pub use types::{
    CategoryRecord, CategoryResult, ForecastOutcome, KpiSummary, MAX_BASE_AMOUNT, MAX_FORECAST_TOTAL,
};
