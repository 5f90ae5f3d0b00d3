//! Built-in demonstration dataset.

use rust_decimal::Decimal;

use crate::forecast::CategoryRecord;

/// Forecast-year amounts (millions) used when no file has been uploaded.
#[must_use]
pub fn demo_dataset() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("Labor", Decimal::from(450)),
        CategoryRecord::new("Contractors", Decimal::from(120)),
        CategoryRecord::new("Fuel", Decimal::from(300)),
        CategoryRecord::new("Power", Decimal::from(200)),
        CategoryRecord::new("S&C", Decimal::from(100)),
        CategoryRecord::new("Maintenance", Decimal::from(180)),
        CategoryRecord::new("Otros", Decimal::from(50)),
    ]
}
