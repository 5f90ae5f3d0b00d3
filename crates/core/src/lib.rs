//! Core business logic for OptiCast.
//!
//! This crate contains pure business logic with ZERO web or file-format dependencies.
//! All domain types and calculations live here.
//!
//! # Modules
//!
//! - `drivers` - Per-category multiplicative drivers and fallback resolution
//! - `forecast` - Forecast-to-budget driver engine and KPIs
//! - `trend` - Long-term plan extrapolation
//! - `waterfall` - Forecast-to-budget bridge layout
//! - `analysis` - Request validation and end-to-end analysis runs

pub mod analysis;
pub mod drivers;
pub mod forecast;
pub mod trend;
pub mod waterfall;
