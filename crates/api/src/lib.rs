//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Shared, read-only application state
//! - JSON error responses

pub mod error;
pub mod routes;


use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use opticast_core::drivers::{Driver, DriverTable};
use opticast_core::trend::{TrendRounding, TrendSettings};
use opticast_shared::{AppConfig, AppError, AppResult};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
///
/// Built once at startup; requests only read it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Driver table used by every analysis.
    pub drivers: Arc<DriverTable>,
    /// Long-term plan settings.
    pub trend: TrendSettings,
    /// Maximum request body in bytes.
    pub body_limit_bytes: usize,
}

impl AppState {
    /// Creates state from an already validated driver table.
    #[must_use]
    pub fn new(drivers: DriverTable, trend: TrendSettings, body_limit_bytes: usize) -> Self {
        Self {
            drivers: Arc::new(drivers),
            trend,
            body_limit_bytes,
        }
    }

    /// Builds state from loaded configuration.
    ///
    /// An empty driver list selects the reference table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` for an unknown rounding mode, a growth
    /// rate out of range or an invalid driver table.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let analysis = &config.analysis;

        let rounding = TrendRounding::from_str(&analysis.trend_rounding).map_err(AppError::Configuration)?;
        let trend = TrendSettings {
            base_year: analysis.base_year,
            growth_rate: analysis.trend_growth_rate,
            rounding,
        };
        trend.validate().map_err(AppError::Configuration)?;

        let drivers = if analysis.drivers.is_empty() {
            DriverTable::reference()
        } else {
            let drivers = analysis
                .drivers
                .iter()
                .map(|entry| Driver::new(entry.item.clone(), entry.factor, entry.justification.clone()))
                .collect();
            DriverTable::new(drivers).map_err(|e| AppError::Configuration(e.to_string()))?
        };

        Ok(Self::new(drivers, trend, config.server.body_limit_bytes))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
