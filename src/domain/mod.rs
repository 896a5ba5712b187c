// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod basket;
pub mod config;
pub mod errors;
pub mod token;

pub use basket::{BasketCreation, BasketUnitsResult, PriceErrorTolerance};
pub use config::{
    SolverConfig, DEFAULT_DECIMALS, DEFAULT_MAX_ITERATIONS, DEFAULT_PERCENT_ERROR,
    REFERENCE_DECIMALS,
};
pub use errors::{BasketError, BasketResult};
pub use token::{Component, TokenAddress};
