// ============================================================================
// Basket Domain Model
// Calculation results, tolerance and creation requests
// ============================================================================

use super::errors::{BasketError, BasketResult};
use super::TokenAddress;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer units per component plus the shared natural unit.
///
/// `units[i]` is the amount of component `i` (in its smallest denomination)
/// backing one natural unit of the basket. Same order and length as the
/// component list the result was computed for; every entry is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasketUnitsResult {
    pub units: Vec<u128>,
    pub natural_unit: u128,
}

impl BasketUnitsResult {
    pub fn new(units: Vec<u128>, natural_unit: u128) -> Self {
        Self {
            units,
            natural_unit,
        }
    }

    /// Number of components in the basket.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Maximum relative deviation between the implied and the target basket price.
///
/// Expressed as a percentage (`10` means 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceErrorTolerance(Decimal);

impl PriceErrorTolerance {
    /// Tolerance used when the caller does not pick one (10%)
    pub const DEFAULT_PERCENT: Decimal = Decimal::TEN;

    /// Create from a percentage.
    ///
    /// # Errors
    /// Returns `NonPositive` for zero or negative percentages.
    pub fn from_percent(percent: Decimal) -> BasketResult<Self> {
        if percent <= Decimal::ZERO {
            return Err(BasketError::NonPositive {
                field: "percent_error",
                index: None,
                value: percent,
            });
        }
        Ok(Self(percent))
    }

    /// The tolerance as a percentage.
    #[inline]
    pub fn percent(self) -> Decimal {
        self.0
    }

    /// The tolerance as a fraction (`percent / 100`).
    #[inline]
    pub fn as_fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for PriceErrorTolerance {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

/// A `(units, natural_unit)` pair proposed for basket creation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasketCreation {
    pub components: Vec<TokenAddress>,
    pub units: Vec<u128>,
    pub natural_unit: u128,
}

impl BasketCreation {
    pub fn new(components: Vec<TokenAddress>, units: Vec<u128>, natural_unit: u128) -> Self {
        Self {
            components,
            units,
            natural_unit,
        }
    }

    /// Build a creation request from a solver result.
    pub fn from_result(components: Vec<TokenAddress>, result: BasketUnitsResult) -> Self {
        Self::new(components, result.units, result.natural_unit)
    }
}
