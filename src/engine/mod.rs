// ============================================================================
// Engine Module
// Contains the basket unit calculation logic
// ============================================================================

mod decimal_resolver;
mod unit_solver;
mod validation;

pub mod pricing;

#[cfg(test)]
mod properties;

pub use decimal_resolver::{
    minimum_natural_unit, resolve_decimals, DecimalResolver, ResolvedDecimals,
};
pub use pricing::{
    implied_basket_price, percent_error, required_component_units, target_component_values,
};
pub use unit_solver::{calculate_units, SolveReport, StopReason, UnitSolver};
pub use validation::{check_token_interfaces, validate_basket_creation, BasketValidator};
