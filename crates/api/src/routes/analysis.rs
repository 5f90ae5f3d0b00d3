//! Analysis routes: demo, JSON run, CSV upload and workbook export.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use opticast_core::analysis::{
    AnalysisParams, AnalysisReport, AnalysisRequest, AnalysisService, AnalysisType, Frequency, demo_dataset,
};
use opticast_io::{export_file_name, parse_categories, render_xlsx};
use opticast_shared::AppError;
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DEFAULT_HISTORICAL_PERIODS: u32 = 12;
const DEFAULT_FORECAST_PERIODS: u32 = 12;
const DEFAULT_BUDGET_PERIODS: u32 = 4;

/// Creates the analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analysis/demo", get(run_demo))
        .route("/analysis/run", post(run_analysis))
        .route("/analysis/upload", post(upload_analysis))
        .route("/analysis/export", post(export_analysis))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query string of a CSV upload.
///
/// Any period or frequency given turns into parameters; missing ones take
/// the usual defaults (12 / 12 / 4, monthly).
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Standard or custom.
    #[serde(default)]
    pub analysis_type: AnalysisType,
    /// Number of historical periods.
    pub historical_periods: Option<u32>,
    /// Number of forecast periods.
    pub forecast_periods: Option<u32>,
    /// Number of budget periods.
    pub budget_periods: Option<u32>,
    /// Period frequency.
    pub frequency: Option<Frequency>,
}

impl UploadQuery {
    fn params(&self) -> Option<AnalysisParams> {
        let any_given = self.historical_periods.is_some()
            || self.forecast_periods.is_some()
            || self.budget_periods.is_some()
            || self.frequency.is_some();

        any_given.then(|| AnalysisParams {
            historical_periods: self.historical_periods.unwrap_or(DEFAULT_HISTORICAL_PERIODS),
            forecast_periods: self.forecast_periods.unwrap_or(DEFAULT_FORECAST_PERIODS),
            budget_periods: self.budget_periods.unwrap_or(DEFAULT_BUDGET_PERIODS),
            frequency: self.frequency.unwrap_or(Frequency::Monthly),
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn run(state: &AppState, request: AnalysisRequest) -> Result<AnalysisReport, ApiError> {
    let service = AnalysisService::new(&state.drivers, state.trend);
    Ok(service.run(request)?)
}

/// Standard analysis on the built-in demo dataset.
async fn run_demo(State(state): State<AppState>) -> Result<Json<AnalysisReport>, ApiError> {
    let report = run(
        &state,
        AnalysisRequest {
            analysis_type: AnalysisType::Standard,
            params: None,
            categories: demo_dataset(),
        },
    )?;

    Ok(Json(report))
}

/// Runs an analysis on JSON categories.
async fn run_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    Ok(Json(run(&state, request)?))
}

/// Runs an analysis on an uploaded CSV body.
async fn upload_analysis(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<AnalysisReport>, ApiError> {
    let categories = parse_categories(body.as_ref())?;

    info!(
        rows = categories.len(),
        bytes = body.len(),
        "Received category upload"
    );

    let report = run(
        &state,
        AnalysisRequest {
            analysis_type: query.analysis_type,
            params: query.params(),
            categories,
        },
    )?;

    Ok(Json(report))
}

/// Runs an analysis and returns it as an xlsx attachment.
async fn export_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, ApiError> {
    let report = run(&state, request)?;
    let bytes = render_xlsx(&report)?;

    let file_name = export_file_name(report.generated_at.date_naive());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(
        analysis_id = %report.analysis_id,
        file_name = %file_name,
        "Exported analysis workbook"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_query_without_params() {
        assert_eq!(UploadQuery::default().params(), None);
    }

    #[test]
    fn test_upload_query_fills_defaults() {
        let query = UploadQuery {
            analysis_type: AnalysisType::Custom,
            historical_periods: Some(24),
            ..UploadQuery::default()
        };

        assert_eq!(
            query.params(),
            Some(AnalysisParams {
                historical_periods: 24,
                forecast_periods: 12,
                budget_periods: 4,
                frequency: Frequency::Monthly,
            })
        );
    }
}
