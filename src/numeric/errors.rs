// ============================================================================
// Numeric Errors
// Error types for exact decimal and power-of-ten arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during basket arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the range of the target type
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Operand outside the domain of the operation (e.g. log of zero)
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => {
                write!(f, "invalid input: operand outside the operation's domain")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
