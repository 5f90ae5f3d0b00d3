//! Waterfall bridge construction.

use rust_decimal::Decimal;
use tracing::warn;

use super::types::{BarKind, BridgeStep, WaterfallBar};

/// Builds the forecast-to-budget bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterfallBuilder {
    forecast_label: String,
    budget_label: String,
}

impl WaterfallBuilder {
    /// Creates a builder with explicit total-bar labels.
    #[must_use]
    pub fn new(forecast_label: impl Into<String>, budget_label: impl Into<String>) -> Self {
        Self {
            forecast_label: forecast_label.into(),
            budget_label: budget_label.into(),
        }
    }

    /// Labels the totals `FCST yy` and `BUD yy+1` for a forecast year.
    #[must_use]
    pub fn for_base_year(base_year: i32) -> Self {
        let forecast_yy = base_year.rem_euclid(100);
        let budget_yy = (base_year + 1).rem_euclid(100);
        Self::new(format!("FCST {forecast_yy:02}"), format!("BUD {budget_yy:02}"))
    }

    /// Label of the leading total bar.
    #[must_use]
    pub fn forecast_label(&self) -> &str {
        &self.forecast_label
    }

    /// Label of the trailing total bar.
    #[must_use]
    pub fn budget_label(&self) -> &str {
        &self.budget_label
    }

    /// Lays out the bridge.
    ///
    /// Steps are drawn largest increase first, largest saving last; equal
    /// deltas keep their input order. The deltas must add up to
    /// `budget_total - forecast_total`. A mismatch is logged and the bars
    /// are returned as walked, without renormalizing.
    #[must_use]
    pub fn build(
        &self,
        forecast_total: Decimal,
        budget_total: Decimal,
        steps: &[BridgeStep],
    ) -> Vec<WaterfallBar> {
        let mut ordered: Vec<&BridgeStep> = steps.iter().collect();
        // sort_by is stable
        ordered.sort_by(|a, b| b.delta.cmp(&a.delta));

        let mut bars = Vec::with_capacity(steps.len() + 2);
        bars.push(WaterfallBar::total(self.forecast_label.clone(), forecast_total));

        let mut cursor = forecast_total;
        for step in ordered {
            let kind = BarKind::of_delta(step.delta);
            let base_offset = match kind {
                BarKind::Decrease => cursor + step.delta,
                _ => cursor,
            };

            bars.push(WaterfallBar {
                label: step.label.clone(),
                magnitude: step.delta.abs(),
                base_offset,
                kind,
                signed_value: Some(step.delta),
            });

            cursor += step.delta;
        }

        if cursor != budget_total {
            warn!(
                forecast_total = %forecast_total,
                budget_total = %budget_total,
                bridge_end = %cursor,
                gap = %(cursor - budget_total),
                "Waterfall bridge does not close: deltas disagree with totals"
            );
        }

        bars.push(WaterfallBar::total(self.budget_label.clone(), budget_total));
        bars
    }

    /// `forecast_total + sum(deltas) - budget_total`; zero when the bridge closes.
    #[must_use]
    pub fn closing_gap(forecast_total: Decimal, budget_total: Decimal, steps: &[BridgeStep]) -> Decimal {
        steps.iter().fold(forecast_total, |acc, s| acc + s.delta) - budget_total
    }
}

impl Default for WaterfallBuilder {
    fn default() -> Self {
        Self::for_base_year(2025)
    }
}
