// ============================================================================
// Basket Units Library
// Unit and natural-unit calculation engine for multi-asset basket tokens
// ============================================================================

//! # Basket Units
//!
//! Computes the integer composition of a basket token: one unit per
//! component plus a shared natural unit, such that one basket token priced
//! from the rounded units lands within a tolerance of a target price.
//!
//! ## Features
//!
//! - **Exact arithmetic**: `rust_decimal` inputs, 1024-bit rationals for unit
//!   derivation, no floating point
//! - **Ceiling-only rounding** so a basket is never under-collateralized
//! - **Bounded refinement** of the natural unit with an explicit iteration cap
//! - **Failure-isolated decimal resolution**, sequential, threaded or async
//! - **Creation gate** for `(units, natural_unit)` pairs
//!
//! ## Example
//!
//! ```rust
//! use basket_units::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let components = vec![
//!     Component::new(TokenAddress::from_bytes([1u8; 20]), 18, Decimal::TWO, Decimal::new(5, 1)),
//!     Component::new(TokenAddress::from_bytes([2u8; 20]), 18, Decimal::TWO, Decimal::new(5, 1)),
//! ];
//!
//! let solver = UnitSolver::default();
//! let result = solver.solve(&components, Decimal::TEN).unwrap();
//!
//! assert_eq!(result.units, vec![25, 25]);
//! assert_eq!(result.natural_unit, 10);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        BasketCreation, BasketError, BasketResult, BasketUnitsResult, Component,
        PriceErrorTolerance, SolverConfig, TokenAddress, DEFAULT_DECIMALS,
    };
    pub use crate::engine::{
        calculate_units, minimum_natural_unit, resolve_decimals, validate_basket_creation,
        BasketValidator, DecimalResolver, ResolvedDecimals, SolveReport, StopReason, UnitSolver,
    };
    #[cfg(feature = "async")]
    pub use crate::interfaces::AsyncDecimalReader;
    pub use crate::interfaces::{
        AcceptAllProbe, DecimalReadError, DecimalReader, StaticDecimalReader, TokenProbe,
    };
}
