//! Driver data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DriverError;

/// Key of the driver applied to categories without their own entry.
pub const FALLBACK_KEY: &str = "Otros";

/// Factor used when neither the category nor the fallback has a driver (1.035).
pub const DEFAULT_FACTOR: Decimal = Decimal::from_parts(1035, 0, 0, false, 3);

/// Largest accepted driver factor.
pub const MAX_FACTOR: Decimal = Decimal::ONE_HUNDRED;

/// A multiplicative adjustment for one cost category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Category key the driver applies to.
    pub item: String,
    /// Factor applied to the forecast value (e.g. 1.042 for +4.2%).
    pub factor: Decimal,
    /// Human-readable justification shown in the assumptions sheet.
    pub justification: String,
}

impl Driver {
    /// Creates a new driver.
    #[must_use]
    pub fn new(item: impl Into<String>, factor: Decimal, justification: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            factor,
            justification: justification.into(),
        }
    }
}

/// Where a resolved factor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverSource {
    /// The category has its own driver.
    Exact,
    /// The category fell back to the `Otros` driver.
    Fallback,
    /// No usable driver; the hard default factor applies.
    Default,
}

/// Result of resolving a category against a driver table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverMatch {
    /// Factor to apply.
    pub factor: Decimal,
    /// Resolution path.
    pub source: DriverSource,
}

/// Immutable, ordered set of drivers keyed by category.
///
/// Built once at startup and shared by reference; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Driver>", into = "Vec<Driver>")]
pub struct DriverTable {
    pub(super) drivers: Vec<Driver>,
}

impl DriverTable {
    /// Creates a validated driver table.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::EmptyKey` for a blank item, `DriverError::DuplicateKey`
    /// when two drivers share an item, and `DriverError::NonPositiveFactor` when a
    /// factor is zero or negative, and `DriverError::FactorTooLarge` above
    /// [`MAX_FACTOR`].
    pub fn new(drivers: Vec<Driver>) -> Result<Self, DriverError> {
        for (idx, driver) in drivers.iter().enumerate() {
            if driver.item.trim().is_empty() {
                return Err(DriverError::EmptyKey);
            }
            if driver.factor <= Decimal::ZERO {
                return Err(DriverError::NonPositiveFactor {
                    item: driver.item.clone(),
                    factor: driver.factor,
                });
            }
            if driver.factor > MAX_FACTOR {
                return Err(DriverError::FactorTooLarge {
                    item: driver.item.clone(),
                    factor: driver.factor,
                });
            }
            if drivers[..idx].iter().any(|d| d.item == driver.item) {
                return Err(DriverError::DuplicateKey(driver.item.clone()));
            }
        }

        Ok(Self { drivers })
    }

    /// Drivers in their configured order.
    #[must_use]
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Number of drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns true if the table has no drivers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Looks up a driver by exact key.
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.item == item)
    }

    /// Resolves the factor for a category.
    ///
    /// Exact key match first, then the `Otros` driver, then [`DEFAULT_FACTOR`].
    /// Never fails: every category gets a factor.
    #[must_use]
    pub fn resolve(&self, category: &str) -> DriverMatch {
        if let Some(driver) = self.get(category) {
            return DriverMatch {
                factor: driver.factor,
                source: DriverSource::Exact,
            };
        }

        match self.get(FALLBACK_KEY) {
            Some(fallback) => DriverMatch {
                factor: fallback.factor,
                source: DriverSource::Fallback,
            },
            None => DriverMatch {
                factor: DEFAULT_FACTOR,
                source: DriverSource::Default,
            },
        }
    }

    /// Shorthand for `resolve(category).factor`.
    #[must_use]
    pub fn factor_for(&self, category: &str) -> Decimal {
        self.resolve(category).factor
    }
}

impl TryFrom<Vec<Driver>> for DriverTable {
    type Error = DriverError;

    fn try_from(drivers: Vec<Driver>) -> Result<Self, Self::Error> {
        Self::new(drivers)
    }
}

impl From<DriverTable> for Vec<Driver> {
    fn from(table: DriverTable) -> Self {
        table.drivers
    }
}
