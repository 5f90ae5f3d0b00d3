//! Shared errors and configuration for OptiCast.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AnalysisConfig, AppConfig, DriverEntry, ServerConfig};
pub use error::{AppError, AppResult};
