//! Per-category multiplicative drivers.

pub mod error;
pub mod reference;
pub mod types;


pub use error::DriverError;
pub use types::{DEFAULT_FACTOR, Driver, DriverMatch, DriverSource, DriverTable, FALLBACK_KEY, MAX_FACTOR};
