//! Trend projection.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{LTP_YEARS, TrendPoint, TrendRounding, TrendSettings};

/// Rounds a total to a whole unit for display, halves away from zero.
#[must_use]
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Projects the six-point long-term plan.
///
/// Point 0 is the forecast year, point 1 the budget year, and the remaining
/// [`LTP_YEARS`] points grow the budget total by `1 + growth_rate` per year.
#[must_use]
pub fn project(
    forecast_total: Decimal,
    budget_total: Decimal,
    settings: &TrendSettings,
) -> Vec<TrendPoint> {
    let growth = Decimal::ONE + settings.growth_rate;
    let mut points = Vec::with_capacity(LTP_YEARS + 2);

    points.push(TrendPoint {
        year: settings.base_year,
        value: round_to_unit(forecast_total),
    });

    let budget_rounded = round_to_unit(budget_total);
    points.push(TrendPoint {
        year: settings.budget_year(),
        value: budget_rounded,
    });

    let mut year = settings.budget_year();
    let mut stepwise = budget_rounded;
    let mut cumulative = budget_total;

    for _ in 0..LTP_YEARS {
        year += 1;
        let value = match settings.rounding {
            TrendRounding::Stepwise => {
                stepwise = round_to_unit(stepwise * growth);
                stepwise
            }
            TrendRounding::Cumulative => {
                cumulative *= growth;
                round_to_unit(cumulative)
            }
        };
        points.push(TrendPoint { year, value });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn values(points: &[TrendPoint]) -> Vec<Decimal> {
        points.iter().map(|p| p.value).collect()
    }

    #[test]
    fn test_reference_trend() {
        let points = project(dec!(1400), dec!(1458.65), &TrendSettings::default());

        assert_eq!(points.len(), 6);
        assert_eq!(
            points.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2025, 2026, 2027, 2028, 2029, 2030]
        );
        assert_eq!(
            values(&points),
            vec![
                dec!(1400),
                dec!(1459),
                dec!(1503),
                dec!(1548),
                dec!(1594),
                dec!(1642)
            ]
        );
    }

    #[test]
    fn test_reference_trend_cumulative() {
        let settings = TrendSettings {
            rounding: TrendRounding::Cumulative,
            ..TrendSettings::default()
        };
        let points = project(dec!(1400), dec!(1458.65), &settings);

        // 1502.4095 rounds down here, while stepwise grows from 1459 to 1503
        assert_eq!(
            values(&points),
            vec![
                dec!(1400),
                dec!(1459),
                dec!(1502),
                dec!(1547),
                dec!(1594),
                dec!(1642)
            ]
        );
    }

    #[test]
    fn test_stepwise_rounding_compounds() {
        let points = project(dec!(10), dec!(16.4), &TrendSettings::default());
        assert_eq!(
            values(&points)[1..],
            [dec!(16), dec!(16), dec!(16), dec!(16), dec!(16)]
        );
    }

    #[test]
    fn test_cumulative_rounding() {
        let settings = TrendSettings {
            rounding: TrendRounding::Cumulative,
            ..TrendSettings::default()
        };
        let points = project(dec!(10), dec!(16.4), &settings);
        assert_eq!(
            values(&points)[1..],
            [dec!(16), dec!(17), dec!(17), dec!(18), dec!(18)]
        );
    }

    #[test]
    fn test_zero_totals() {
        let points = project(Decimal::ZERO, Decimal::ZERO, &TrendSettings::default());
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.value.is_zero()));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_to_unit(dec!(2.5)), dec!(3));
        assert_eq!(round_to_unit(dec!(2.49)), dec!(2));
        assert_eq!(round_to_unit(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn test_growth_rate_ceiling() {
        let mut settings = TrendSettings::default();
        assert!(settings.validate().is_ok());

        settings.growth_rate = dec!(-1);
        assert!(settings.validate().is_ok());

        settings.growth_rate = dec!(1.5);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_largest_accepted_totals_stay_in_range() {
        use crate::drivers::MAX_FACTOR;
        use crate::forecast::MAX_FORECAST_TOTAL;
        use crate::trend::MAX_GROWTH_RATE;

        for rounding in [TrendRounding::Stepwise, TrendRounding::Cumulative] {
            let settings = TrendSettings {
                growth_rate: MAX_GROWTH_RATE,
                rounding,
                ..TrendSettings::default()
            };
            let points = project(MAX_FORECAST_TOTAL, MAX_FORECAST_TOTAL * MAX_FACTOR, &settings);

            assert_eq!(points[5].value, MAX_FORECAST_TOTAL * MAX_FACTOR * dec!(16));
        }
    }

    #[test]
    fn test_base_year_shifts_years() {
        let settings = TrendSettings {
            base_year: 2030,
            ..TrendSettings::default()
        };
        let points = project(dec!(1), dec!(1), &settings);
        assert_eq!(points.first().map(|p| p.year), Some(2030));
        assert_eq!(points.last().map(|p| p.year), Some(2035));
    }

    #[test]
    fn test_rounding_from_str() {
        assert_eq!("stepwise".parse::<TrendRounding>(), Ok(TrendRounding::Stepwise));
        assert_eq!(" Cumulative ".parse::<TrendRounding>(), Ok(TrendRounding::Cumulative));
        assert!("yearly".parse::<TrendRounding>().is_err());
    }

    proptest! {
        /// With a 3% step that survives rounding, post-budget points strictly increase.
        #[test]
        fn test_trend_monotonic_under_growth(budget_cents in 1_700i64..100_000_000) {
            let budget = Decimal::new(budget_cents, 2);
            let points = project(budget, budget, &TrendSettings::default());

            for pair in points[1..].windows(2) {
                prop_assert!(pair[1].value > pair[0].value);
            }
        }
    }
}
