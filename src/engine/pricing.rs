// ============================================================================
// Basket Pricing
// Target values, required units, implied price and price error
// ============================================================================
//
// Unit derivation runs on exact ratios so that ceiling rounding never sees a
// quotient already rounded to 28 digits. Decimal results are produced only at
// the public boundary.

use crate::domain::{BasketError, BasketResult, REFERENCE_DECIMALS};
use crate::numeric::{ExactRatio, NumericError, NumericResult};
use rust_decimal::Decimal;

/// Fiat value each component contributes: `proportion × target_price`.
pub fn target_component_values(
    proportions: &[Decimal],
    target_price: Decimal,
) -> BasketResult<Vec<Decimal>> {
    proportions
        .iter()
        .map(|proportion| {
            proportion
                .checked_mul(target_price)
                .ok_or(BasketError::Numeric(NumericError::Overflow))
        })
        .collect()
}

/// Whole tokens of each component needed per basket token: `value / price`,
/// truncated to 28 significant digits.
pub fn component_token_amounts(
    prices: &[Decimal],
    target_values: &[Decimal],
) -> BasketResult<Vec<Decimal>> {
    target_values
        .iter()
        .zip(prices)
        .map(|(value, price)| {
            token_amount(*value, *price)
                .and_then(ExactRatio::to_decimal)
                .map_err(BasketError::from)
        })
        .collect()
}

/// Base units of each component per whole basket token:
/// `value / price × 10^decimals`.
///
/// # Errors
/// Returns `Numeric(Overflow)` when an amount exceeds the decimal range;
/// the solver itself works on exact ratios and is not limited by this.
pub fn required_component_units(
    decimals: &[u8],
    prices: &[Decimal],
    target_values: &[Decimal],
) -> BasketResult<Vec<Decimal>> {
    target_values
        .iter()
        .zip(prices)
        .zip(decimals)
        .map(|((value, price), decimals)| {
            token_amount(*value, *price)
                .and_then(|tokens| tokens.shift(i32::from(*decimals)))
                .and_then(ExactRatio::to_decimal)
                .map_err(BasketError::from)
        })
        .collect()
}

fn token_amount(value: Decimal, price: Decimal) -> NumericResult<ExactRatio> {
    ExactRatio::from_decimal(value)?.checked_div(ExactRatio::from_decimal(price)?)
}

/// Exact `proportion × target / price × 10^decimals` for one component.
pub(crate) fn exact_required_units(
    decimals: u8,
    price: ExactRatio,
    proportion: Decimal,
    target_price: ExactRatio,
) -> NumericResult<ExactRatio> {
    ExactRatio::from_decimal(proportion)?
        .checked_mul(target_price)?
        .checked_div(price)?
        .shift(i32::from(decimals))
}

/// Exact implied basket price when the natural unit is `10^natural_unit_exp`.
pub(crate) fn implied_price_at(
    units: &[u128],
    natural_unit_exp: u32,
    prices: &[ExactRatio],
    decimals: &[u8],
) -> NumericResult<ExactRatio> {
    let mut total = ExactRatio::zero();

    for ((unit, price), decimals) in units.iter().zip(prices).zip(decimals) {
        // unit × (10^18 / natural_unit) × price / 10^decimals
        let exp = i32::from(REFERENCE_DECIMALS) - natural_unit_exp as i32 - i32::from(*decimals);
        let component_price = ExactRatio::from_integer(*unit)
            .checked_mul(*price)?
            .shift(exp)?;
        total = total.checked_add(component_price)?;
    }

    Ok(total)
}

/// Exact `|implied - target| / target`.
pub(crate) fn relative_error(
    implied_price: ExactRatio,
    target_price: ExactRatio,
) -> NumericResult<ExactRatio> {
    implied_price
        .abs_diff(target_price)?
        .checked_div(target_price)
}

/// Price of one whole basket token implied by integer units.
///
/// Sum over components of `unit × (10^18 / natural_unit) × price / 10^decimals`.
pub fn implied_basket_price(
    units: &[u128],
    natural_unit: u128,
    prices: &[Decimal],
    decimals: &[u8],
) -> BasketResult<Decimal> {
    if natural_unit == 0 {
        return Err(BasketError::NonPositive {
            field: "natural_unit",
            index: None,
            value: Decimal::ZERO,
        });
    }
    for (field, len) in [("prices", prices.len()), ("decimals", decimals.len())] {
        if len != units.len() {
            return Err(BasketError::LengthMismatch {
                field,
                expected: units.len(),
                actual: len,
            });
        }
    }

    let natural_unit = ExactRatio::from_integer(natural_unit);
    let mut total = ExactRatio::zero();
    for ((unit, price), decimals) in units.iter().zip(prices).zip(decimals) {
        let per_whole = ExactRatio::from_integer(*unit)
            .checked_mul(ExactRatio::from_decimal(*price)?)?
            .shift(i32::from(REFERENCE_DECIMALS) - i32::from(*decimals))?;
        total = total.checked_add(per_whole.checked_div(natural_unit)?)?;
    }

    Ok(total.to_decimal()?)
}

/// Relative deviation `|implied - target| / target`, as a fraction.
pub fn percent_error(implied_price: Decimal, target_price: Decimal) -> BasketResult<Decimal> {
    if target_price <= Decimal::ZERO {
        return Err(BasketError::NonPositive {
            field: "target_price",
            index: None,
            value: target_price,
        });
    }

    let error = relative_error(
        ExactRatio::from_decimal(implied_price)?,
        ExactRatio::from_decimal(target_price)?,
    )?;
    Ok(error.to_decimal()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_target_component_values() {
        let values =
            target_component_values(&[dec("0.4"), dec("0.3"), dec("0.3")], dec("1")).unwrap();
        assert_eq!(values, vec![dec("0.4"), dec("0.3"), dec("0.3")]);
    }

    #[test]
    fn test_required_component_units() {
        let values = target_component_values(&[dec("0.5"), dec("0.5")], dec("10")).unwrap();
        let required = required_component_units(&[18, 6], &[dec("2"), dec("2")], &values).unwrap();

        assert_eq!(required[0], dec("2500000000000000000"));
        assert_eq!(required[1], dec("2500000"));
    }

    #[test]
    fn test_exact_required_units_magnitude() {
        let target = ExactRatio::from_decimal(dec("100")).unwrap();

        // 50 / 0.627 = 79.74..., times 10^18
        let price = ExactRatio::from_decimal(dec("0.627")).unwrap();
        let required = exact_required_units(18, price, dec("0.5"), target).unwrap();
        assert_eq!(required.exponent().unwrap(), 19);

        // 50 / 0.0342 = 1461.98..., times 10^12
        let price = ExactRatio::from_decimal(dec("0.0342")).unwrap();
        let required = exact_required_units(12, price, dec("0.5"), target).unwrap();
        assert_eq!(required.exponent().unwrap(), 15);
    }

    #[test]
    fn test_required_units_beyond_decimal_range() {
        // 50 / 0.0000001 × 10^18 = 5 × 10^26 still fits; 10^3 more does not
        let values = [dec("50")];
        let required = required_component_units(&[18], &[dec("0.0000001")], &values).unwrap();
        assert_eq!(required[0], dec("500000000000000000000000000"));

        let target = ExactRatio::from_decimal(dec("100")).unwrap();
        let price = ExactRatio::from_decimal(dec("0.0000001")).unwrap();
        let units = exact_required_units(18, price, dec("0.5"), target)
            .and_then(|required| required.shift(3))
            .and_then(ExactRatio::ceil_u128)
            .unwrap();
        assert_eq!(units, 500_000_000_000_000_000_000_000_000_000);
    }

    #[test]
    fn test_implied_basket_price() {
        let price = implied_basket_price(&[25, 25], 10, &[dec("2"), dec("2")], &[18, 18]).unwrap();
        assert_eq!(price, dec("10"));

        let price = implied_basket_price(&[3, 3], 1, &[dec("2"), dec("2")], &[18, 18]).unwrap();
        assert_eq!(price, dec("12"));
    }

    #[test]
    fn test_implied_basket_price_mixed_decimals() {
        let price = implied_basket_price(
            &[4, 3_000_000_000_000, 3_000_000_000_000],
            10_000_000_000_000,
            &[dec("1"), dec("1"), dec("1")],
            &[6, 18, 18],
        )
        .unwrap();
        assert_eq!(price, dec("1"));
    }

    #[test]
    fn test_implied_basket_price_non_power_of_ten() {
        // 5 units per natural unit of 2: 2.5 × 10^18 base units per token at 2 each
        let price = implied_basket_price(&[5], 2, &[dec("2")], &[18]).unwrap();
        assert_eq!(price, dec("5"));
    }

    #[test]
    fn test_implied_basket_price_rejects_bad_input() {
        assert!(matches!(
            implied_basket_price(&[1], 0, &[dec("1")], &[18]),
            Err(BasketError::NonPositive { field: "natural_unit", .. })
        ));
        assert!(matches!(
            implied_basket_price(&[1, 1], 1, &[dec("1")], &[18, 18]),
            Err(BasketError::LengthMismatch { field: "prices", .. })
        ));
    }

    #[test]
    fn test_percent_error() {
        assert_eq!(percent_error(dec("12"), dec("10")).unwrap(), dec("0.2"));
        assert_eq!(percent_error(dec("8"), dec("10")).unwrap(), dec("0.2"));
        assert_eq!(percent_error(dec("10"), dec("10")).unwrap(), Decimal::ZERO);
        assert!(percent_error(dec("10"), Decimal::ZERO).is_err());

        // 1/3 off target is kept exact until the final conversion
        assert_eq!(
            percent_error(dec("4"), dec("3")).unwrap(),
            dec("0.3333333333333333333333333333")
        );
    }
}
