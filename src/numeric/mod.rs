// ============================================================================
// Numeric Module
// Exact arithmetic for basket unit calculations
// ============================================================================
//
// This module provides:
// - ExactRatio: non-negative rationals over a 1024-bit integer
// - Power-of-ten helpers over u128 and the wide integer
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Final integer amounts are u128, matching on-chain uint semantics

mod errors;
mod ratio;
mod scaling;

pub use errors::{NumericError, NumericResult};
pub use ratio::{ExactRatio, U1024};
pub use scaling::{pow10_u128, pow10_wide, MAX_U128_EXPONENT, MAX_WIDE_EXPONENT};
