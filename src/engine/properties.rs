//! Property-based tests for the unit solver.
//!
//! 1. **Ceiling rounding**: no unit under-allocates its required amount.
//! 2. **Shape**: one unit per component, every unit at least 1.
//! 3. **Natural unit floor**: never finer than the smallest decimal allows.
//! 4. **Termination**: a near-zero tolerance still stops within the cap.
//! 5. **Idempotence**: identical inputs give identical outputs.

use proptest::prelude::*;
use quickcheck::TestResult;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use super::{minimum_natural_unit, UnitSolver};
use crate::domain::{
    PriceErrorTolerance, SolverConfig, TokenAddress, DEFAULT_MAX_ITERATIONS, REFERENCE_DECIMALS,
};
use crate::engine::calculate_units;
use crate::numeric::ExactRatio;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

type Basket = (Vec<u8>, Vec<Decimal>, Vec<Decimal>, Decimal);

/// 1-4 components, prices in [0.01, 10000], whole-percent proportions
/// summing to exactly 1 and a target price in [1, 10000].
fn basket_strategy() -> impl Strategy<Value = Basket> {
    (1usize..=4)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(6u8..=18, n),
                prop::collection::vec(1i64..=1_000_000, n),
                prop::collection::vec(1i64..=30, n - 1),
                100i64..=1_000_000,
            )
        })
        .prop_map(|(decimals, prices, parts, target)| {
            let prices = prices.into_iter().map(|p| Decimal::new(p, 2)).collect();
            let used: i64 = parts.iter().sum();
            let mut proportions: Vec<Decimal> =
                parts.into_iter().map(|p| Decimal::new(p, 2)).collect();
            proportions.push(Decimal::new(100 - used, 2));
            (decimals, prices, proportions, Decimal::new(target, 2))
        })
}

fn is_power_of_ten(value: u128) -> bool {
    value > 0 && 10u128.pow(value.ilog10()) == value
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn units_never_under_allocate(
        (decimals, prices, proportions, target) in basket_strategy()
    ) {
        let report = UnitSolver::default()
            .solve_raw(&decimals, &prices, &proportions, target, PriceErrorTolerance::default())
            .unwrap();
        let natural_unit_exp = report.result.natural_unit.ilog10() as i32;
        let target = ExactRatio::from_decimal(target).unwrap();

        for (i, unit) in report.result.units.iter().enumerate() {
            // Value held by the unit, unit × price × 10^(18 - nu - decimals),
            // must cover proportion × target exactly
            let exp = i32::from(REFERENCE_DECIMALS) - natural_unit_exp - i32::from(decimals[i]);
            let held = ExactRatio::from_integer(*unit)
                .checked_mul(ExactRatio::from_decimal(prices[i]).unwrap())
                .and_then(|value| value.shift(exp))
                .unwrap();
            let owed = ExactRatio::from_decimal(proportions[i])
                .and_then(|proportion| proportion.checked_mul(target))
                .unwrap();

            prop_assert_ne!(held.checked_cmp(&owed).unwrap(), Ordering::Less);
        }
    }

    #[test]
    fn one_positive_unit_per_component(
        (decimals, prices, proportions, target) in basket_strategy()
    ) {
        let report = UnitSolver::default()
            .solve_raw(&decimals, &prices, &proportions, target, PriceErrorTolerance::default())
            .unwrap();

        prop_assert_eq!(report.result.units.len(), decimals.len());
        prop_assert!(report.result.units.iter().all(|&unit| unit >= 1));
    }

    #[test]
    fn natural_unit_respects_decimal_floor(
        (decimals, prices, proportions, target) in basket_strategy()
    ) {
        let report = UnitSolver::default()
            .solve_raw(&decimals, &prices, &proportions, target, PriceErrorTolerance::default())
            .unwrap();

        prop_assert!(report.result.natural_unit >= minimum_natural_unit(&decimals));
        prop_assert!(is_power_of_ten(report.result.natural_unit));
    }

    #[test]
    fn refinement_terminates((decimals, prices, proportions, target) in basket_strategy()) {
        let tolerance = Decimal::new(1, 6);
        let solver = UnitSolver::new(SolverConfig::new(tolerance)).unwrap();
        let report = solver
            .solve_raw(
                &decimals,
                &prices,
                &proportions,
                target,
                PriceErrorTolerance::from_percent(tolerance).unwrap(),
            )
            .unwrap();

        prop_assert!(report.iterations >= 1);
        prop_assert!(report.iterations <= DEFAULT_MAX_ITERATIONS);
    }
}

#[test]
fn solver_is_idempotent() {
    fn prop(price_a: u32, price_b: u32, split: u8) -> TestResult {
        if price_a == 0 || price_b == 0 || split == 0 || split >= 100 {
            return TestResult::discard();
        }

        let components = [
            TokenAddress::from_bytes([1u8; 20]),
            TokenAddress::from_bytes([2u8; 20]),
        ];
        let prices = [
            Decimal::new(i64::from(price_a), 3),
            Decimal::new(i64::from(price_b), 3),
        ];
        let proportions = [
            Decimal::new(i64::from(split), 2),
            Decimal::new(100 - i64::from(split), 2),
        ];
        let run = || {
            calculate_units(
                &components,
                &[18, 6],
                &prices,
                &proportions,
                Decimal::ONE_HUNDRED,
                Decimal::TEN,
            )
        };

        TestResult::from_bool(run() == run())
    }

    quickcheck::quickcheck(prop as fn(u32, u32, u8) -> TestResult);
}
