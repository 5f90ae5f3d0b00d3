//! Analysis service: validates a request and runs the projection.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::error::AnalysisError;
use super::types::{AnalysisParams, AnalysisReport, AnalysisRequest, AnalysisType};
use crate::drivers::DriverTable;
use crate::forecast::{CategoryRecord, DriverEngine, MAX_BASE_AMOUNT, MAX_FORECAST_TOTAL};
use crate::trend::TrendSettings;
use crate::waterfall::WaterfallBuilder;

/// Runs complete analyses against a shared driver table.
#[derive(Debug, Clone)]
pub struct AnalysisService<'a> {
    engine: DriverEngine<'a>,
    waterfall: WaterfallBuilder,
}

impl<'a> AnalysisService<'a> {
    /// Creates a new analysis service.
    #[must_use]
    pub fn new(drivers: &'a DriverTable, trend: TrendSettings) -> Self {
        Self {
            engine: DriverEngine::new(drivers, trend),
            waterfall: WaterfallBuilder::for_base_year(trend.base_year),
        }
    }

    /// Validates configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidPeriods` naming the first period count below one.
    pub fn validate_params(params: &AnalysisParams) -> Result<(), AnalysisError> {
        let checks = [
            ("historical_periods", params.historical_periods),
            ("forecast_periods", params.forecast_periods),
            ("budget_periods", params.budget_periods),
        ];

        match checks.iter().find(|(_, value)| *value < 1) {
            Some((field, _)) => Err(AnalysisError::InvalidPeriods { field: *field }),
            None => Ok(()),
        }
    }

    /// Validates category records: non-blank, unique keys, amounts within
    /// `[0, MAX_BASE_AMOUNT]` and a total within `MAX_FORECAST_TOTAL`.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in input order.
    pub fn validate_categories(categories: &[CategoryRecord]) -> Result<(), AnalysisError> {
        let mut seen = HashSet::with_capacity(categories.len());
        let mut total = Decimal::ZERO;

        for record in categories {
            if record.category.trim().is_empty() {
                return Err(AnalysisError::EmptyCategory);
            }
            if !seen.insert(record.category.as_str()) {
                return Err(AnalysisError::DuplicateCategory(record.category.clone()));
            }
            if record.base_amount < Decimal::ZERO {
                return Err(AnalysisError::NegativeAmount(record.category.clone()));
            }
            if record.base_amount > MAX_BASE_AMOUNT {
                return Err(AnalysisError::AmountOutOfRange(record.category.clone()));
            }

            total = total
                .checked_add(record.base_amount)
                .filter(|sum| *sum <= MAX_FORECAST_TOTAL)
                .ok_or(AnalysisError::TotalOutOfRange)?;
        }

        Ok(())
    }

    /// Validates a whole request.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::MissingParams` for a custom analysis without
    /// parameters, plus any parameter or category violation.
    pub fn validate(request: &AnalysisRequest) -> Result<(), AnalysisError> {
        match (request.analysis_type, &request.params) {
            (AnalysisType::Custom, None) => return Err(AnalysisError::MissingParams),
            (_, Some(params)) => Self::validate_params(params)?,
            (AnalysisType::Standard, None) => {}
        }

        Self::validate_categories(&request.categories)
    }

    /// Runs an analysis.
    ///
    /// An empty category list is valid and produces zero totals.
    ///
    /// # Errors
    ///
    /// Returns an `AnalysisError` if the request fails validation.
    pub fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        Self::validate(&request)?;

        let outcome = self.engine.compute(&request.categories);
        let waterfall = self.waterfall.build(
            outcome.kpis.forecast_total,
            outcome.kpis.budget_total,
            &outcome.bridge_steps(),
        );

        let report = AnalysisReport {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            analysis_type: request.analysis_type,
            params: request.params,
            results: outcome.results,
            kpis: outcome.kpis,
            trend: outcome.trend,
            waterfall,
            drivers: self.engine.drivers().clone(),
        };

        info!(
            analysis_id = %report.analysis_id,
            analysis_type = ?report.analysis_type,
            categories = report.results.len(),
            variance = %report.kpis.variance,
            "Analysis completed"
        );

        Ok(report)
    }
}
