//! Property-based and scenario tests for the driver engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::drivers::{Driver, DriverTable};
use crate::trend::TrendSettings;
use crate::waterfall::WaterfallBuilder;

fn reference_categories() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("Labor", dec!(450)),
        CategoryRecord::new("Contractors", dec!(120)),
        CategoryRecord::new("Fuel", dec!(300)),
        CategoryRecord::new("Power", dec!(200)),
        CategoryRecord::new("S&C", dec!(100)),
        CategoryRecord::new("Maintenance", dec!(180)),
        CategoryRecord::new("Otros", dec!(50)),
    ]
}

#[test]
fn test_reference_scenario() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let outcome = engine.compute(&reference_categories());

    assert_eq!(outcome.results.len(), 7);
    assert_eq!(outcome.kpis.forecast_total, dec!(1400));
    // 468.9 + 121.8 + 315 + 212 + 103.8 + 185.4 + 51.75
    assert_eq!(outcome.kpis.budget_total, dec!(1458.65));
    assert_eq!(outcome.kpis.variance, dec!(58.65));

    let pct = outcome.kpis.variance_pct.unwrap();
    assert_eq!(pct.round_dp(3), dec!(4.189));

    let labor = &outcome.results[0];
    assert_eq!(labor.category, "Labor");
    assert_eq!(labor.detail_label, "Labor General");
    assert_eq!(labor.budget_value, dec!(468.9));
    assert_eq!(labor.delta, dec!(18.9));
    assert_eq!(labor.factor, dec!(1.042));
}

#[test]
fn test_results_keep_input_order() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());
    let outcome = engine.compute(&reference_categories());

    let order: Vec<&str> = outcome.results.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(
        order,
        vec!["Labor", "Contractors", "Fuel", "Power", "S&C", "Maintenance", "Otros"]
    );
}

#[test]
fn test_reference_bridge_closes() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());
    let outcome = engine.compute(&reference_categories());

    let steps = outcome.bridge_steps();
    let bars = WaterfallBuilder::default().build(
        outcome.kpis.forecast_total,
        outcome.kpis.budget_total,
        &steps,
    );

    assert_eq!(bars[0].magnitude, dec!(1400));
    assert_eq!(bars[bars.len() - 1].magnitude, dec!(1458.65));
    let deltas: Decimal = bars.iter().filter_map(|b| b.signed_value).sum();
    assert_eq!(deltas, dec!(58.65));
}

#[test]
fn test_empty_input() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let outcome = engine.compute(&[]);

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.kpis.forecast_total, Decimal::ZERO);
    assert_eq!(outcome.kpis.budget_total, Decimal::ZERO);
    assert_eq!(outcome.kpis.variance, Decimal::ZERO);
    assert_eq!(outcome.kpis.variance_pct, None);
    assert_eq!(outcome.trend.len(), 6);

    let bars = WaterfallBuilder::default().build(
        outcome.kpis.forecast_total,
        outcome.kpis.budget_total,
        &outcome.bridge_steps(),
    );
    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|b| b.is_total() && b.magnitude.is_zero()));
}

#[test]
fn test_zero_row_has_no_delta() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let result = engine.evaluate(&CategoryRecord::new("Fuel", Decimal::ZERO));

    assert_eq!(result.budget_value, Decimal::ZERO);
    assert_eq!(result.delta, Decimal::ZERO);
    assert_eq!(result.variance_ratio(), None);
}

#[test]
fn test_zero_forecast_total_gives_no_percentage() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let outcome = engine.compute(&[
        CategoryRecord::new("Labor", Decimal::ZERO),
        CategoryRecord::new("Fuel", Decimal::ZERO),
    ]);

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.kpis.variance_pct, None);
}

#[test]
fn test_unknown_category_gets_fallback_factor() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let result = engine.evaluate(&CategoryRecord::new("Explosives", dec!(200)));

    assert_eq!(result.factor, dec!(1.035));
    assert_eq!(result.budget_value, dec!(207));
}

#[test]
fn test_table_without_fallback_uses_default() {
    let drivers = DriverTable::new(vec![Driver::new("Labor", dec!(1.1), "")]).unwrap();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let result = engine.evaluate(&CategoryRecord::new("Fuel", dec!(100)));

    assert_eq!(result.factor, dec!(1.035));
    assert_eq!(result.budget_value, dec!(103.5));
}

#[test]
fn test_variance_ratio() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());

    let result = engine.evaluate(&CategoryRecord::new("Power", dec!(200)));

    assert_eq!(result.variance_ratio(), Some(dec!(0.06)));
}

#[test]
fn test_kpis_with_negative_forecast_total() {
    let kpis = KpiSummary::from_totals(dec!(-100), dec!(-110));
    assert_eq!(kpis.variance, dec!(-10));
    assert_eq!(kpis.variance_pct, Some(dec!(10)));
}

#[test]
fn test_outcome_serializes_decimals_as_strings() {
    let drivers = DriverTable::reference();
    let engine = DriverEngine::new(&drivers, TrendSettings::default());
    let outcome = engine.compute(&[CategoryRecord::new("Labor", dec!(100))]);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["kpis"]["budget_total"], "104.200");
    assert_eq!(json["results"][0]["detail_label"], "Labor General");
}

fn arb_categories() -> impl Strategy<Value = Vec<CategoryRecord>> {
    prop::collection::vec(0i64..100_000_000, 1..10).prop_map(|amounts| {
        let keys = ["Labor", "Contractors", "Fuel", "Power", "S&C", "Maintenance", "Otros"];
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, cents)| {
                let key = keys
                    .get(i)
                    .map_or_else(|| format!("Extra {i}"), |k| (*k).to_string());
                CategoryRecord::new(key, Decimal::new(cents, 2))
            })
            .collect()
    })
}

fn arb_drivers() -> impl Strategy<Value = DriverTable> {
    (
        prop::collection::vec(9_000i64..12_000, 7),
        prop::bool::ANY,
    )
        .prop_map(|(bps, with_fallback)| {
            let keys = ["Labor", "Contractors", "Fuel", "Power", "S&C", "Maintenance", "Otros"];
            let drivers = keys
                .iter()
                .zip(bps)
                .filter(|(k, _)| with_fallback || **k != "Otros")
                .map(|(k, b)| Driver::new(*k, Decimal::new(b, 4), ""))
                .collect();
            DriverTable::new(drivers).unwrap()
        })
}

proptest! {
    /// Totals equal the sums of the per-row values.
    #[test]
    fn test_sum_invariant(categories in arb_categories(), drivers in arb_drivers()) {
        let engine = DriverEngine::new(&drivers, TrendSettings::default());
        let outcome = engine.compute(&categories);

        let forecast: Decimal = outcome.results.iter().map(|r| r.forecast_value).sum();
        let budget: Decimal = outcome.results.iter().map(|r| r.budget_value).sum();

        prop_assert_eq!(outcome.kpis.forecast_total, forecast);
        prop_assert_eq!(outcome.kpis.budget_total, budget);
        prop_assert_eq!(outcome.kpis.variance, budget - forecast);
        for row in &outcome.results {
            prop_assert_eq!(row.budget_value, row.forecast_value * row.factor);
            prop_assert_eq!(row.delta, row.budget_value - row.forecast_value);
        }
    }

    /// The bridge built from engine output always lands on the budget total.
    #[test]
    fn test_bridge_closure(categories in arb_categories(), drivers in arb_drivers()) {
        let engine = DriverEngine::new(&drivers, TrendSettings::default());
        let outcome = engine.compute(&categories);
        let steps = outcome.bridge_steps();

        prop_assert_eq!(
            WaterfallBuilder::closing_gap(outcome.kpis.forecast_total, outcome.kpis.budget_total, &steps),
            Decimal::ZERO
        );

        let bars = WaterfallBuilder::default().build(
            outcome.kpis.forecast_total,
            outcome.kpis.budget_total,
            &steps,
        );
        let end = bars
            .iter()
            .filter_map(|b| b.signed_value)
            .fold(outcome.kpis.forecast_total, |acc, d| acc + d);
        prop_assert_eq!(end, outcome.kpis.budget_total);
    }
}
