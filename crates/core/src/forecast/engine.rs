//! Driver engine for budget projections.

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{CategoryRecord, CategoryResult, ForecastOutcome, KpiSummary};
use crate::drivers::{DriverSource, DriverTable};
use crate::trend::{self, TrendSettings};

/// Engine that turns forecast amounts into budget amounts.
///
/// Holds a borrowed, read-only driver table; every call is independent.
#[derive(Debug, Clone, Copy)]
pub struct DriverEngine<'a> {
    drivers: &'a DriverTable,
    trend: TrendSettings,
}

impl<'a> DriverEngine<'a> {
    /// Creates a new engine over a driver table.
    #[must_use]
    pub const fn new(drivers: &'a DriverTable, trend: TrendSettings) -> Self {
        Self { drivers, trend }
    }

    /// Driver table in use.
    #[must_use]
    pub const fn drivers(&self) -> &'a DriverTable {
        self.drivers
    }

    /// Trend settings in use.
    #[must_use]
    pub const fn trend_settings(&self) -> &TrendSettings {
        &self.trend
    }

    /// Projects a single category. No rounding is applied.
    #[must_use]
    pub fn evaluate(&self, record: &CategoryRecord) -> CategoryResult {
        let resolved = self.drivers.resolve(&record.category);
        if resolved.source != DriverSource::Exact {
            debug!(
                category = %record.category,
                source = ?resolved.source,
                factor = %resolved.factor,
                "No dedicated driver, using fallback factor"
            );
        }

        let forecast_value = record.base_amount;
        let budget_value = forecast_value * resolved.factor;

        CategoryResult {
            category: record.category.clone(),
            detail_label: format!("{} General", record.category),
            forecast_value,
            budget_value,
            delta: budget_value - forecast_value,
            factor: resolved.factor,
        }
    }

    /// Runs the full projection: per-category rows, KPIs and the trend.
    ///
    /// Totals are summed in input order. An empty input yields zero totals.
    /// Inputs are expected within `MAX_BASE_AMOUNT` / `MAX_FORECAST_TOTAL`,
    /// as enforced by `AnalysisService::validate_categories`.
    #[must_use]
    pub fn compute(&self, categories: &[CategoryRecord]) -> ForecastOutcome {
        let results: Vec<CategoryResult> = categories.iter().map(|r| self.evaluate(r)).collect();

        let (forecast_total, budget_total) = results.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(forecast, budget), r| (forecast + r.forecast_value, budget + r.budget_value),
        );

        let kpis = KpiSummary::from_totals(forecast_total, budget_total);
        let trend = trend::project(forecast_total, budget_total, &self.trend);

        debug!(
            categories = results.len(),
            forecast_total = %forecast_total,
            budget_total = %budget_total,
            "Driver engine run complete"
        );

        ForecastOutcome {
            results,
            kpis,
            trend,
        }
    }
}
