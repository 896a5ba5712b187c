// ============================================================================
// Power-of-Ten Scaling
// Checked powers of ten over u128 and the wide intermediate integer
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::ratio::U1024;

/// Largest `n` such that `10^n` fits in a `u128`.
pub const MAX_U128_EXPONENT: u32 = 38;

/// Largest `n` such that `10^n` fits in a [`U1024`].
pub const MAX_WIDE_EXPONENT: u32 = 308;

/// Compute `10^exp` as a `u128`.
///
/// # Errors
/// Returns `Overflow` when `exp > 38`.
#[inline]
pub fn pow10_u128(exp: u32) -> NumericResult<u128> {
    10u128.checked_pow(exp).ok_or(NumericError::Overflow)
}

/// Compute `10^exp` as a [`U1024`], in `u128`-sized steps.
///
/// # Errors
/// Returns `Overflow` when `exp > 308`.
pub fn pow10_wide(exp: u32) -> NumericResult<U1024> {
    if exp > MAX_WIDE_EXPONENT {
        return Err(NumericError::Overflow);
    }

    let mut value = U1024::one();
    let mut remaining = exp;
    while remaining > 0 {
        let step = remaining.min(MAX_U128_EXPONENT);
        value = value
            .checked_mul(U1024::from(pow10_u128(step)?))
            .ok_or(NumericError::Overflow)?;
        remaining -= step;
    }

    Ok(value)
}

/// Number of decimal digits in `value`; zero has none.
pub(crate) fn decimal_digits(value: U1024) -> u32 {
    // 10^19 is the largest power of ten in a u64
    let chunk = U1024::from(10_000_000_000_000_000_000u64);
    let mut rest = value;
    let mut digits = 0;

    while rest >= chunk {
        rest = rest / chunk;
        digits += 19;
    }

    digits + rest.low_u64().checked_ilog10().map_or(0, |d| d + 1)
}

// ============================================================================
// Tests
// ============================================================================
