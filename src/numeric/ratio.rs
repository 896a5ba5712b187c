// ============================================================================
// Exact Ratios
// Non-negative rationals over a 1024-bit integer for unit derivation
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::scaling::{decimal_digits, pow10_wide};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use uint::construct_uint;

construct_uint! {
    /// 1024-bit unsigned integer for exact intermediate products.
    pub struct U1024(16);
}

/// Largest scale a `Decimal` carries.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Exact non-negative rational `numerator / denominator`.
///
/// Values built from decimals keep power-of-ten denominators, so shifts and
/// sums usually rescale one side instead of cross-multiplying. Every
/// operation is checked and reports `Overflow` rather than wrapping.
#[derive(Debug, Clone, Copy)]
pub struct ExactRatio {
    numerator: U1024,
    denominator: U1024,
}

impl ExactRatio {
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator.
    pub fn new(numerator: U1024, denominator: U1024) -> NumericResult<Self> {
        if denominator.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self {
            numerator,
            denominator,
        }
        .strip_tens())
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn from_integer(value: u128) -> Self {
        Self {
            numerator: U1024::from(value),
            denominator: U1024::one(),
        }
    }

    /// Exact value of a non-negative decimal: `mantissa / 10^scale`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for negative values.
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(NumericError::InvalidInput);
        }
        Self::new(
            U1024::from(value.mantissa().unsigned_abs()),
            pow10_wide(value.scale())?,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn checked_mul(self, other: Self) -> NumericResult<Self> {
        Self::new(
            wide_mul(self.numerator, other.numerator)?,
            wide_mul(self.denominator, other.denominator)?,
        )
    }

    /// # Errors
    /// Returns `DivisionByZero` when `other` is zero.
    pub fn checked_div(self, other: Self) -> NumericResult<Self> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Self::new(
            wide_mul(self.numerator, other.denominator)?,
            wide_mul(self.denominator, other.numerator)?,
        )
    }

    pub fn checked_add(self, other: Self) -> NumericResult<Self> {
        let (a, b, denominator) = self.align(other)?;
        Self::new(
            a.checked_add(b).ok_or(NumericError::Overflow)?,
            denominator,
        )
    }

    /// `|self - other|`
    pub fn abs_diff(self, other: Self) -> NumericResult<Self> {
        let (a, b, denominator) = self.align(other)?;
        let difference = if a >= b { a - b } else { b - a };
        Self::new(difference, denominator)
    }

    /// Exact `self × 10^exp`; `exp` may be negative.
    pub fn shift(self, exp: i32) -> NumericResult<Self> {
        if self.is_zero() || exp == 0 {
            return Ok(self);
        }

        let ten = U1024::from(10u8);
        let mut ratio = self;
        let mut remaining = exp.unsigned_abs();

        // Cancel trailing zeros on the opposite side before growing this one
        if exp > 0 {
            while remaining > 0 && (ratio.denominator % ten).is_zero() {
                ratio.denominator = ratio.denominator / ten;
                remaining -= 1;
            }
            ratio.numerator = wide_mul(ratio.numerator, pow10_wide(remaining)?)?;
        } else {
            while remaining > 0 && (ratio.numerator % ten).is_zero() {
                ratio.numerator = ratio.numerator / ten;
                remaining -= 1;
            }
            ratio.denominator = wide_mul(ratio.denominator, pow10_wide(remaining)?)?;
        }

        Ok(ratio)
    }

    /// Compare by value.
    ///
    /// # Errors
    /// Returns `Overflow` if the common denominator does not fit.
    pub fn checked_cmp(&self, other: &Self) -> NumericResult<Ordering> {
        let (a, b, _) = self.align(*other)?;
        Ok(a.cmp(&b))
    }

    /// Smallest integer not below the ratio.
    ///
    /// # Errors
    /// Returns `Overflow` if the ceiling does not fit in a `u128`.
    pub fn ceil_u128(self) -> NumericResult<u128> {
        let (quotient, remainder) = self.numerator.div_mod(self.denominator);
        let ceiling = if remainder.is_zero() {
            quotient
        } else {
            quotient
                .checked_add(U1024::one())
                .ok_or(NumericError::Overflow)?
        };
        narrow_u128(ceiling)
    }

    /// Order of magnitude: `floor(log10(self))`, e.g. `2.5 → 0`,
    /// `1462 → 3`, `0.0342 → -2`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for zero.
    pub fn exponent(&self) -> NumericResult<i32> {
        if self.is_zero() {
            return Err(NumericError::InvalidInput);
        }

        // The ratio lies in [10^(estimate - 1), 10^(estimate + 1))
        let estimate =
            decimal_digits(self.numerator) as i32 - decimal_digits(self.denominator) as i32;
        let reaches_estimate = if estimate >= 0 {
            self.numerator >= wide_mul(self.denominator, pow10_wide(estimate as u32)?)?
        } else {
            wide_mul(self.numerator, pow10_wide(estimate.unsigned_abs())?)? >= self.denominator
        };

        Ok(if reaches_estimate {
            estimate
        } else {
            estimate - 1
        })
    }

    /// Nearest `Decimal` toward zero, keeping up to 28 significant digits.
    ///
    /// # Errors
    /// Returns `Overflow` above the decimal range (~7.9 × 10^28).
    pub fn to_decimal(self) -> NumericResult<Decimal> {
        if self.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let max_scale = MAX_DECIMAL_SCALE as i32;
        let scale = (max_scale - 1 - self.exponent()?).clamp(0, max_scale) as u32;
        let scaled = wide_mul(self.numerator, pow10_wide(scale)?)? / self.denominator;
        let mantissa = i128::try_from(narrow_u128(scaled)?).map_err(|_| NumericError::Overflow)?;

        Decimal::try_from_i128_with_scale(mantissa, scale)
            .map(|value| value.normalize())
            .map_err(|_| NumericError::Overflow)
    }

    /// Numerators of `self` and `other` over a shared denominator.
    fn align(self, other: Self) -> NumericResult<(U1024, U1024, U1024)> {
        if self.denominator == other.denominator {
            return Ok((self.numerator, other.numerator, self.denominator));
        }

        let (factor, remainder) = other.denominator.div_mod(self.denominator);
        if remainder.is_zero() {
            return Ok((
                wide_mul(self.numerator, factor)?,
                other.numerator,
                other.denominator,
            ));
        }

        let (factor, remainder) = self.denominator.div_mod(other.denominator);
        if remainder.is_zero() {
            return Ok((
                self.numerator,
                wide_mul(other.numerator, factor)?,
                self.denominator,
            ));
        }

        Ok((
            wide_mul(self.numerator, other.denominator)?,
            wide_mul(other.numerator, self.denominator)?,
            wide_mul(self.denominator, other.denominator)?,
        ))
    }

    /// Drop common factors of ten.
    fn strip_tens(mut self) -> Self {
        if self.numerator.is_zero() {
            self.denominator = U1024::one();
            return self;
        }

        let ten = U1024::from(10u8);
        while (self.denominator % ten).is_zero() && (self.numerator % ten).is_zero() {
            self.numerator = self.numerator / ten;
            self.denominator = self.denominator / ten;
        }
        self
    }
}

#[inline]
fn wide_mul(a: U1024, b: U1024) -> NumericResult<U1024> {
    a.checked_mul(b).ok_or(NumericError::Overflow)
}

#[inline]
fn narrow_u128(value: U1024) -> NumericResult<u128> {
    if value.bits() > 128 {
        return Err(NumericError::Overflow);
    }
    Ok(value.low_u128())
}

// ============================================================================
// Tests
// ============================================================================
