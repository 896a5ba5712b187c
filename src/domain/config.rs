// ============================================================================
// Solver Configuration
// Tolerance, decimal defaults and refinement limits for the unit solver
// ============================================================================

use super::basket::PriceErrorTolerance;
use super::errors::{BasketError, BasketResult};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Decimals assumed for a component whose precision cannot be read.
/// Most ledger tokens use 18.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Scale of one whole basket token; units are expressed against `10^18`.
pub const REFERENCE_DECIMALS: u8 = 18;

/// Default percent-error tolerance (10%).
pub const DEFAULT_PERCENT_ERROR: Decimal = Decimal::TEN;

/// Safety cap on natural-unit refinement passes.
pub const DEFAULT_MAX_ITERATIONS: u32 = 32;

// ============================================================================
// Solver Configuration
// ============================================================================

/// Configuration for the unit solver and decimal resolver
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Accepted deviation of the implied price from the target, in percent
    pub percent_error: Decimal,

    /// Upper bound on refinement passes (each pass multiplies the natural unit by 10)
    pub max_iterations: u32,

    /// Decimals assigned to a component whose lookup fails
    pub default_decimals: u8,
}

impl SolverConfig {
    /// Create a new configuration with the given tolerance
    pub fn new(percent_error: Decimal) -> Self {
        Self {
            percent_error,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            default_decimals: DEFAULT_DECIMALS,
        }
    }

    /// Builder method: Set percent-error tolerance
    pub fn with_percent_error(mut self, percent_error: Decimal) -> Self {
        self.percent_error = percent_error;
        self
    }

    /// Builder method: Set refinement iteration cap
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: Set fallback decimals for unreadable components
    pub fn with_default_decimals(mut self, default_decimals: u8) -> Self {
        self.default_decimals = default_decimals;
        self
    }

    /// Tolerance as a validated value
    pub fn tolerance(&self) -> BasketResult<PriceErrorTolerance> {
        PriceErrorTolerance::from_percent(self.percent_error)
    }

    /// Validate the configuration
    pub fn validate(&self) -> BasketResult<()> {
        if self.percent_error <= Decimal::ZERO {
            return Err(BasketError::InvalidConfig(
                "percent error must be positive".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(BasketError::InvalidConfig(
                "at least one refinement iteration is required".to_string(),
            ));
        }

        if self.default_decimals > REFERENCE_DECIMALS {
            return Err(BasketError::InvalidConfig(format!(
                "default decimals must be within 0..={}",
                REFERENCE_DECIMALS
            )));
        }

        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENT_ERROR)
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl SolverConfig {
    /// Tight pricing: implied price within 1% of target
    pub fn strict() -> Self {
        Self::new(Decimal::ONE)
    }

    /// Default pricing: implied price within 10% of target
    pub fn relaxed() -> Self {
        Self::new(DEFAULT_PERCENT_ERROR)
    }
}
