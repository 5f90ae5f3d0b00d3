//! Waterfall data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One signed movement of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStep {
    /// Bar label (category key).
    pub label: String,
    /// Signed change from forecast to budget.
    pub delta: Decimal,
}

impl BridgeStep {
    /// Creates a new bridge step.
    #[must_use]
    pub fn new(label: impl Into<String>, delta: Decimal) -> Self {
        Self {
            label: label.into(),
            delta,
        }
    }
}

/// Semantic tag of a bar; the export and the charts map it to colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    /// Forecast or budget total.
    Total,
    /// Cost increase (`delta >= 0`).
    Increase,
    /// Saving (`delta < 0`).
    Decrease,
}

impl BarKind {
    /// Classifies a signed delta. Zero counts as an increase.
    #[must_use]
    pub fn of_delta(delta: Decimal) -> Self {
        if delta < Decimal::ZERO {
            Self::Decrease
        } else {
            Self::Increase
        }
    }
}

/// One rendered bar of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterfallBar {
    /// Bar label.
    pub label: String,
    /// Visual height. Never negative.
    pub magnitude: Decimal,
    /// Y position of the bar's bottom edge. Zero for totals.
    pub base_offset: Decimal,
    /// Semantic tag.
    pub kind: BarKind,
    /// Signed delta for intermediate bars, kept for tooltips and export.
    pub signed_value: Option<Decimal>,
}

impl WaterfallBar {
    /// Creates a total bar anchored at zero.
    #[must_use]
    pub fn total(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            magnitude: value,
            base_offset: Decimal::ZERO,
            kind: BarKind::Total,
            signed_value: None,
        }
    }

    /// Returns true for the forecast and budget total bars.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.kind == BarKind::Total
    }

    /// Top edge of the bar.
    #[must_use]
    pub fn top(&self) -> Decimal {
        self.base_offset + self.magnitude
    }
}
