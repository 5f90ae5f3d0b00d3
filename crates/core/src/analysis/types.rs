//! Analysis data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drivers::DriverTable;
use crate::forecast::{CategoryRecord, CategoryResult, KpiSummary};
use crate::trend::TrendPoint;
use crate::waterfall::WaterfallBar;

/// Periodicity of the uploaded history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// Weekly periods.
    Weekly,
    /// Monthly periods.
    Monthly,
    /// Annual periods.
    Annual,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Annual => write!(f, "Annual"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            _ => Err(format!("Unknown frequency: {s}")),
        }
    }
}

/// Kind of analysis the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Predefined drivers, no parameters.
    #[default]
    Standard,
    /// User-supplied configuration parameters.
    Custom,
}

/// Configuration collected for a custom analysis.
///
/// Only echoed into the export; the projection does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Number of historical periods.
    pub historical_periods: u32,
    /// Number of forecast periods.
    pub forecast_periods: u32,
    /// Number of budget periods.
    pub budget_periods: u32,
    /// Period frequency.
    pub frequency: Frequency,
}

/// Input of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Standard or custom.
    #[serde(default)]
    pub analysis_type: AnalysisType,
    /// Required for custom analyses.
    #[serde(default)]
    pub params: Option<AnalysisParams>,
    /// Forecast-year amounts by category.
    pub categories: Vec<CategoryRecord>,
}

/// Complete output of one analysis run, ready for presentation and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique run ID.
    pub analysis_id: Uuid,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Standard or custom.
    pub analysis_type: AnalysisType,
    /// Parameters echoed from the request.
    pub params: Option<AnalysisParams>,
    /// Per-category projections.
    pub results: Vec<CategoryResult>,
    /// Headline figures.
    pub kpis: KpiSummary,
    /// Six-point long-term plan.
    pub trend: Vec<TrendPoint>,
    /// Bridge bars from forecast total to budget total.
    pub waterfall: Vec<WaterfallBar>,
    /// Drivers the projection used.
    pub drivers: DriverTable,
}
