//! Trend data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Years projected after the budget year.
pub const LTP_YEARS: usize = 4;

/// Largest accepted magnitude of the annual growth rate (100%).
pub const MAX_GROWTH_RATE: Decimal = Decimal::ONE;

/// One point of the long-term plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar year.
    pub year: i32,
    /// Projected total, rounded to a whole unit.
    pub value: Decimal,
}

/// How post-budget years are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendRounding {
    /// Each year grows from the previous *rounded* value, so rounding compounds.
    #[default]
    Stepwise,
    /// Each year is `round(budget_total * (1 + rate)^n)`.
    Cumulative,
}

impl std::fmt::Display for TrendRounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stepwise => write!(f, "stepwise"),
            Self::Cumulative => write!(f, "cumulative"),
        }
    }
}

impl std::str::FromStr for TrendRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stepwise" => Ok(Self::Stepwise),
            "cumulative" => Ok(Self::Cumulative),
            _ => Err(format!("Unknown trend rounding: {s}")),
        }
    }
}

/// Parameters of the trend extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSettings {
    /// Forecast year; the budget year is `base_year + 1`.
    pub base_year: i32,
    /// Annual growth after the budget year (0.03 for 3%).
    pub growth_rate: Decimal,
    /// Rounding mode for post-budget years.
    pub rounding: TrendRounding,
}

impl TrendSettings {
    /// Budget year.
    #[must_use]
    pub const fn budget_year(&self) -> i32 {
        self.base_year + 1
    }

    /// Checks the growth rate against [`MAX_GROWTH_RATE`].
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected rate.
    pub fn validate(&self) -> Result<(), String> {
        if self.growth_rate.abs() > MAX_GROWTH_RATE {
            return Err(format!(
                "Trend growth rate {} exceeds +/-{MAX_GROWTH_RATE}",
                self.growth_rate
            ));
        }
        Ok(())
    }
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            base_year: 2025,
            growth_rate: Decimal::new(3, 2),
            rounding: TrendRounding::Stepwise,
        }
    }
}
