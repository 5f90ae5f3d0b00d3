//! Reference driver table for the mining cost model.

use rust_decimal::Decimal;

use super::types::{Driver, DriverTable, FALLBACK_KEY};

impl DriverTable {
    /// The reference configuration: seven drivers with factors in `[1.015, 1.060]`.
    #[must_use]
    pub fn reference() -> Self {
        let drivers = vec![
            Driver::new(
                "Contractors",
                Decimal::new(1015, 3),
                "VARIACIÓN CONTROLADA: Eficiencia Modelo Minex Quantum.",
            ),
            Driver::new(
                "Labor",
                Decimal::new(1042, 3),
                "ALINEACIÓN IPC + RETENCIÓN: 3.8% + 0.4%.",
            ),
            Driver::new(
                "Fuel",
                Decimal::new(1050, 3),
                "PRODUCCIÓN: Aumento plan movimiento tierra.",
            ),
            Driver::new(
                "S&C",
                Decimal::new(1038, 3),
                "MERCADO: Indexación insumos críticos.",
            ),
            Driver::new(
                "Power",
                Decimal::new(1060, 3),
                "TARIFAS: Alza tarifas reguladas 2026.",
            ),
            Driver::new(
                "Maintenance",
                Decimal::new(1030, 3),
                "DISPONIBILIDAD: Estrategia predictiva.",
            ),
            Driver::new(
                FALLBACK_KEY,
                Decimal::new(1035, 3),
                "AJUSTE ESTÁNDAR: Inflación promedio.",
            ),
        ];

        Self { drivers }
    }
}

impl Default for DriverTable {
    fn default() -> Self {
        Self::reference()
    }
}
