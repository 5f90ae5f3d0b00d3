//! Driver table endpoint.

use axum::{Json, Router, extract::State, routing::get};
use opticast_core::drivers::Driver;

use crate::AppState;

/// Lists the drivers every analysis uses.
async fn list_drivers(State(state): State<AppState>) -> Json<Vec<Driver>> {
    Json(state.drivers.drivers().to_vec())
}

/// Creates driver routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/drivers", get(list_drivers))
}
