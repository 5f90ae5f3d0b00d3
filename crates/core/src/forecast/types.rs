//! Forecast data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trend::TrendPoint;
use crate::waterfall::BridgeStep;

/// Largest accepted `base_amount` for a single category (1e15).
pub const MAX_BASE_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest accepted forecast total over all categories (1e18).
///
/// With factors capped at [`crate::drivers::MAX_FACTOR`] and growth at
/// [`crate::trend::MAX_GROWTH_RATE`], every budget, bridge and trend value
/// stays far inside `Decimal` range.
pub const MAX_FORECAST_TOTAL: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// A cost category with its forecast-year amount (millions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Category key, matched against driver items.
    pub category: String,
    /// Forecast-year amount. Non-negative.
    pub base_amount: Decimal,
}

impl CategoryRecord {
    /// Creates a new category record.
    #[must_use]
    pub fn new(category: impl Into<String>, base_amount: Decimal) -> Self {
        Self {
            category: category.into(),
            base_amount,
        }
    }
}

/// Budget projection for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Category key.
    pub category: String,
    /// Detail line label (e.g. "Labor General").
    pub detail_label: String,
    /// Forecast-year value.
    pub forecast_value: Decimal,
    /// Budget-year value (`forecast_value * factor`).
    pub budget_value: Decimal,
    /// `budget_value - forecast_value`.
    pub delta: Decimal,
    /// Factor applied.
    pub factor: Decimal,
}

impl CategoryResult {
    /// Relative variation `budget / forecast - 1`, or `None` for a zero forecast.
    #[must_use]
    pub fn variance_ratio(&self) -> Option<Decimal> {
        self.budget_value
            .checked_div(self.forecast_value)
            .map(|ratio| ratio - Decimal::ONE)
    }
}

/// Headline figures over all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Total forecast.
    pub forecast_total: Decimal,
    /// Total budget.
    pub budget_total: Decimal,
    /// `budget_total - forecast_total`.
    pub variance: Decimal,
    /// `(budget_total / forecast_total - 1) * 100`.
    ///
    /// `None` when the forecast total is zero; presentation shows "N/A".
    pub variance_pct: Option<Decimal>,
}

impl KpiSummary {
    /// Derives the KPIs from the two totals.
    #[must_use]
    pub fn from_totals(forecast_total: Decimal, budget_total: Decimal) -> Self {
        let variance_pct = budget_total
            .checked_div(forecast_total)
            .map(|ratio| (ratio - Decimal::ONE) * Decimal::ONE_HUNDRED);

        Self {
            forecast_total,
            budget_total,
            variance: budget_total - forecast_total,
            variance_pct,
        }
    }
}

/// Everything the driver engine derives from one input set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    /// One row per input record, in input order.
    pub results: Vec<CategoryResult>,
    /// Aggregate figures.
    pub kpis: KpiSummary,
    /// Six-point long-term plan.
    pub trend: Vec<TrendPoint>,
}

impl ForecastOutcome {
    /// Signed per-category deltas in input order, ready for the bridge.
    #[must_use]
    pub fn bridge_steps(&self) -> Vec<BridgeStep> {
        self.results
            .iter()
            .map(|r| BridgeStep::new(r.category.clone(), r.delta))
            .collect()
    }
}
