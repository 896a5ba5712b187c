// ============================================================================
// Basket Errors
// Input validation failures reported before any numeric work
// ============================================================================

use crate::domain::TokenAddress;
use crate::numeric::NumericError;
use rust_decimal::Decimal;
use std::fmt;

/// Errors reported by basket unit calculation and creation validation.
///
/// Every variant names the offending field (and value where one exists) so
/// the caller can correct the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketError {
    /// No components were supplied
    EmptyBasket,

    /// A per-component sequence does not match the component count
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Proportions do not sum to exactly one
    ProportionSum { sum: Decimal },

    /// A quantity that must be strictly positive is zero or negative
    NonPositive {
        field: &'static str,
        index: Option<usize>,
        value: Decimal,
    },

    /// A proportion is above one
    ProportionAboveOne { index: usize, value: Decimal },

    /// A component declares more decimals than the reference scale allows
    InvalidDecimals { index: usize, value: u8 },

    /// Natural unit is finer than the component decimals permit
    NaturalUnitBelowMinimum { natural_unit: u128, minimum: u128 },

    /// The same component address appears more than once
    DuplicateComponent(TokenAddress),

    /// A component failed the token capability check
    UnsupportedToken(TokenAddress),

    /// A component address could not be parsed
    InvalidAddress(String),

    /// Solver configuration is inconsistent
    InvalidConfig(String),

    /// Arithmetic failed (overflow of the integer or decimal range)
    Numeric(NumericError),
}

impl fmt::Display for BasketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasketError::EmptyBasket => write!(f, "basket must contain at least one component"),
            BasketError::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "length mismatch: {} has {} entries, expected {}",
                field, actual, expected
            ),
            BasketError::ProportionSum { sum } => {
                write!(f, "proportions must sum to exactly 1, got {}", sum)
            },
            BasketError::NonPositive {
                field,
                index: Some(index),
                value,
            } => write!(f, "{}[{}] must be positive, got {}", field, index, value),
            BasketError::NonPositive {
                field,
                index: None,
                value,
            } => write!(f, "{} must be positive, got {}", field, value),
            BasketError::ProportionAboveOne { index, value } => {
                write!(f, "proportions[{}] must not exceed 1, got {}", index, value)
            },
            BasketError::InvalidDecimals { index, value } => {
                write!(f, "decimals[{}] must be within 0..=18, got {}", index, value)
            },
            BasketError::NaturalUnitBelowMinimum {
                natural_unit,
                minimum,
            } => write!(
                f,
                "natural unit {} is below the minimum {} permitted by component decimals",
                natural_unit, minimum
            ),
            BasketError::DuplicateComponent(address) => {
                write!(f, "component {} appears more than once", address)
            },
            BasketError::UnsupportedToken(address) => {
                write!(f, "component {} does not expose the token interface", address)
            },
            BasketError::InvalidAddress(input) => write!(f, "invalid token address: {}", input),
            BasketError::InvalidConfig(reason) => write!(f, "invalid solver config: {}", reason),
            BasketError::Numeric(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BasketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BasketError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for BasketError {
    fn from(err: NumericError) -> Self {
        BasketError::Numeric(err)
    }
}

/// Result type alias for basket operations
pub type BasketResult<T> = Result<T, BasketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_field() {
        let err = BasketError::LengthMismatch {
            field: "prices",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: prices has 2 entries, expected 3"
        );

        let err = BasketError::NonPositive {
            field: "prices",
            index: Some(1),
            value: Decimal::ZERO,
        };
        assert_eq!(err.to_string(), "prices[1] must be positive, got 0");

        let err = BasketError::NonPositive {
            field: "target_price",
            index: None,
            value: Decimal::NEGATIVE_ONE,
        };
        assert_eq!(err.to_string(), "target_price must be positive, got -1");
    }

    #[test]
    fn test_numeric_error_conversion() {
        let err: BasketError = NumericError::Overflow.into();
        assert_eq!(err, BasketError::Numeric(NumericError::Overflow));
        assert!(std::error::Error::source(&err).is_some());
    }
}
