// ============================================================================
// Unit Solver
// Derives integer component units and a shared natural unit for a basket
// ============================================================================

use super::decimal_resolver::{minimum_natural_unit, DecimalResolver};
use super::pricing::{exact_required_units, implied_price_at, relative_error};
use crate::domain::{
    BasketError, BasketResult, BasketUnitsResult, Component, PriceErrorTolerance, SolverConfig,
    TokenAddress, REFERENCE_DECIMALS,
};
use crate::interfaces::DecimalReader;
use crate::numeric::{pow10_u128, ExactRatio, NumericError, NumericResult, MAX_U128_EXPONENT};
use rust_decimal::Decimal;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit Solver
///
/// Finds the coarsest natural unit (a power of ten) whose ceiling-rounded
/// component units price one basket token within the configured tolerance
/// of the target price.
///
/// # Example
/// ```text
/// Two 18-decimal tokens at $2, 50/50, target $10:
///   required units per basket token: 2.5e18 each
///   natural unit 1:  units [3, 3]   → implied $12, error 20%
///   natural unit 10: units [25, 25] → implied $10, error 0%
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitSolver {
    config: SolverConfig,
}

/// Why the refinement loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// The implied price is within tolerance
    ToleranceMet,
    /// A finer natural unit no longer reduced the error
    Stalled,
    /// The configured iteration cap was reached
    IterationCap,
    /// The next natural unit does not fit the integer range
    Overflow,
}

/// Solver result together with refinement diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveReport {
    pub result: BasketUnitsResult,

    /// Basket price implied by the returned units
    pub implied_price: Decimal,

    /// `|implied - target| / target`
    pub price_error: Decimal,

    /// Refinement passes attempted
    pub iterations: u32,

    pub stop_reason: StopReason,
}

impl SolveReport {
    pub fn tolerance_met(&self) -> bool {
        self.stop_reason == StopReason::ToleranceMet
    }
}

/// Validated, per-component inputs of one calculation.
struct BasketInputs<'a> {
    decimals: &'a [u8],
    prices: Vec<ExactRatio>,
    /// `proportion × target_price / price × 10^decimals`, unrounded
    required_units: Vec<ExactRatio>,
    target_price: ExactRatio,
}

/// Units evaluated at one natural unit.
struct Candidate {
    natural_unit_exp: u32,
    units: Vec<u128>,
    implied_price: ExactRatio,
    error: ExactRatio,
}

impl UnitSolver {
    /// Create a solver from a validated configuration
    pub fn new(config: SolverConfig) -> BasketResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for a list of fully described components.
    pub fn solve(
        &self,
        components: &[Component],
        target_price: Decimal,
    ) -> BasketResult<BasketUnitsResult> {
        Ok(self.solve_report(components, target_price)?.result)
    }

    /// Solve with an explicit tolerance instead of the configured one.
    pub fn solve_with_tolerance(
        &self,
        components: &[Component],
        target_price: Decimal,
        tolerance: PriceErrorTolerance,
    ) -> BasketResult<BasketUnitsResult> {
        let (decimals, prices, proportions) = split_components(components);
        let report = self.run(&decimals, &prices, &proportions, target_price, tolerance)?;
        Ok(report.result)
    }

    /// Solve and return refinement diagnostics alongside the result.
    pub fn solve_report(
        &self,
        components: &[Component],
        target_price: Decimal,
    ) -> BasketResult<SolveReport> {
        let (decimals, prices, proportions) = split_components(components);
        self.run(
            &decimals,
            &prices,
            &proportions,
            target_price,
            self.config.tolerance()?,
        )
    }

    /// Resolve component decimals through `reader`, then solve.
    ///
    /// Unreadable components use the configured default decimals.
    pub fn solve_with_reader<R>(
        &self,
        reader: &R,
        components: &[TokenAddress],
        prices: &[Decimal],
        proportions: &[Decimal],
        target_price: Decimal,
    ) -> BasketResult<BasketUnitsResult>
    where
        R: DecimalReader + ?Sized,
    {
        check_lengths(
            components.len(),
            &[("prices", prices.len()), ("proportions", proportions.len())],
        )?;

        let resolved = DecimalResolver::from_config(&self.config).resolve(reader, components);
        let decimals = resolved.decimals();
        let report = self.run(
            &decimals,
            prices,
            proportions,
            target_price,
            self.config.tolerance()?,
        )?;
        Ok(report.result)
    }

    /// Validate inputs and run the refinement loop.
    pub fn solve_raw(
        &self,
        decimals: &[u8],
        prices: &[Decimal],
        proportions: &[Decimal],
        target_price: Decimal,
        tolerance: PriceErrorTolerance,
    ) -> BasketResult<SolveReport> {
        self.run(decimals, prices, proportions, target_price, tolerance)
    }

    fn run(
        &self,
        decimals: &[u8],
        prices: &[Decimal],
        proportions: &[Decimal],
        target_price: Decimal,
        tolerance: PriceErrorTolerance,
    ) -> BasketResult<SolveReport> {
        let inputs = validate_inputs(decimals, prices, proportions, target_price)?;
        let tolerance = ExactRatio::from_decimal(tolerance.as_fraction())?;
        self.refine(&inputs, tolerance)
    }

    fn refine(
        &self,
        inputs: &BasketInputs<'_>,
        tolerance: ExactRatio,
    ) -> BasketResult<SolveReport> {
        let mut natural_unit_exp = initial_natural_unit_exp(inputs)?;
        // No previous error on the first pass
        let mut previous_error: Option<ExactRatio> = None;
        let mut best: Option<Candidate> = None;
        let mut iterations = 0u32;

        let stop_reason = loop {
            iterations += 1;

            let candidate = match evaluate(inputs, natural_unit_exp) {
                Ok(candidate) => candidate,
                Err(err) if best.is_some() => {
                    tracing::warn!(
                        "Refinement stopped at natural unit 10^{}: {}",
                        natural_unit_exp,
                        err
                    );
                    break StopReason::Overflow;
                }
                Err(err) => return Err(err.into()),
            };

            tracing::debug!(
                "Refinement pass {}: natural unit 10^{}, units {:?}",
                iterations,
                candidate.natural_unit_exp,
                candidate.units
            );

            let error = candidate.error;
            let improving = match &previous_error {
                Some(previous) => error.checked_cmp(previous)? == Ordering::Less,
                None => true,
            };
            let is_best = match &best {
                Some(b) => error.checked_cmp(&b.error)? == Ordering::Less,
                None => true,
            };
            if is_best {
                best = Some(candidate);
            }

            if error.checked_cmp(&tolerance)? != Ordering::Greater {
                break StopReason::ToleranceMet;
            }
            if !improving {
                break StopReason::Stalled;
            }
            if iterations >= self.config.max_iterations {
                tracing::warn!(
                    "Refinement hit the {} iteration cap with error above tolerance {}",
                    self.config.max_iterations,
                    tolerance.to_decimal()?
                );
                break StopReason::IterationCap;
            }
            if natural_unit_exp >= MAX_U128_EXPONENT {
                tracing::warn!(
                    "Natural unit 10^{} cannot grow further, keeping best candidate",
                    natural_unit_exp
                );
                break StopReason::Overflow;
            }

            previous_error = Some(error);
            natural_unit_exp += 1;
        };

        let best = best.ok_or(BasketError::Numeric(NumericError::InvalidInput))?;
        let natural_unit = pow10_u128(best.natural_unit_exp)?;
        let implied_price = best.implied_price.to_decimal()?;
        let price_error = best.error.to_decimal()?;

        tracing::debug!(
            "Basket units {:?} at natural unit {} after {} passes ({:?}): price {}, error {}",
            best.units,
            natural_unit,
            iterations,
            stop_reason,
            implied_price,
            price_error
        );

        Ok(SolveReport {
            result: BasketUnitsResult::new(best.units, natural_unit),
            implied_price,
            price_error,
            iterations,
            stop_reason,
        })
    }
}

/// Calculate basket units with the default iteration cap.
///
/// `percent_error` is a percentage (`10` accepts an implied price within 10%
/// of `target_price`). `components` only fixes the expected length and order.
pub fn calculate_units(
    components: &[TokenAddress],
    decimals: &[u8],
    prices: &[Decimal],
    proportions: &[Decimal],
    target_price: Decimal,
    percent_error: Decimal,
) -> BasketResult<BasketUnitsResult> {
    check_lengths(
        components.len(),
        &[
            ("decimals", decimals.len()),
            ("prices", prices.len()),
            ("proportions", proportions.len()),
        ],
    )?;

    let tolerance = PriceErrorTolerance::from_percent(percent_error)?;
    let solver = UnitSolver::new(SolverConfig::new(percent_error))?;
    Ok(solver
        .run(decimals, prices, proportions, target_price, tolerance)?
        .result)
}

// ============================================================================
// Validation
// ============================================================================

fn check_lengths(expected: usize, fields: &[(&'static str, usize)]) -> BasketResult<()> {
    for &(field, actual) in fields {
        if actual != expected {
            return Err(BasketError::LengthMismatch {
                field,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

fn validate_inputs<'a>(
    decimals: &'a [u8],
    prices: &[Decimal],
    proportions: &[Decimal],
    target_price: Decimal,
) -> BasketResult<BasketInputs<'a>> {
    check_lengths(
        decimals.len(),
        &[("prices", prices.len()), ("proportions", proportions.len())],
    )?;

    if decimals.is_empty() {
        return Err(BasketError::EmptyBasket);
    }

    if target_price <= Decimal::ZERO {
        return Err(BasketError::NonPositive {
            field: "target_price",
            index: None,
            value: target_price,
        });
    }

    for (index, &value) in decimals.iter().enumerate() {
        if value > REFERENCE_DECIMALS {
            return Err(BasketError::InvalidDecimals { index, value });
        }
    }

    for (index, &value) in prices.iter().enumerate() {
        if value <= Decimal::ZERO {
            return Err(BasketError::NonPositive {
                field: "prices",
                index: Some(index),
                value,
            });
        }
    }

    let mut sum = Decimal::ZERO;
    for (index, &value) in proportions.iter().enumerate() {
        if value <= Decimal::ZERO {
            return Err(BasketError::NonPositive {
                field: "proportions",
                index: Some(index),
                value,
            });
        }
        if value > Decimal::ONE {
            return Err(BasketError::ProportionAboveOne { index, value });
        }
        sum += value;
    }

    if sum != Decimal::ONE {
        return Err(BasketError::ProportionSum { sum });
    }

    let target_price = ExactRatio::from_decimal(target_price)?;
    let prices = prices
        .iter()
        .map(|price| ExactRatio::from_decimal(*price))
        .collect::<NumericResult<Vec<_>>>()?;
    let required_units = decimals
        .iter()
        .zip(&prices)
        .zip(proportions)
        .map(|((&decimals, &price), &proportion)| {
            exact_required_units(decimals, price, proportion, target_price)
        })
        .collect::<NumericResult<Vec<_>>>()?;

    Ok(BasketInputs {
        decimals,
        prices,
        required_units,
        target_price,
    })
}

fn split_components(components: &[Component]) -> (Vec<u8>, Vec<Decimal>, Vec<Decimal>) {
    let decimals = components.iter().map(|c| c.decimals).collect();
    let prices = components.iter().map(|c| c.price).collect();
    let proportions = components.iter().map(|c| c.proportion).collect();
    (decimals, prices, proportions)
}

// ============================================================================
// Refinement Steps
// ============================================================================

/// Exponent of the starting natural unit.
///
/// `18 - exponent(min required units)`, raised to the floor implied by the
/// smallest component decimal.
///
/// # Errors
/// Returns `Numeric(Overflow)` when the natural unit would exceed `10^38`,
/// the largest power of ten a `u128` holds.
fn initial_natural_unit_exp(inputs: &BasketInputs<'_>) -> BasketResult<u32> {
    let mut min_exponent = i32::MAX;
    for required in &inputs.required_units {
        min_exponent = min_exponent.min(required.exponent()?);
    }

    let derived_exp = i32::from(REFERENCE_DECIMALS) - min_exponent;
    let floor_exp = minimum_natural_unit(inputs.decimals).ilog10() as i32;
    let exp = derived_exp.max(floor_exp);

    tracing::trace!(
        "Initial natural unit: derived 10^{}, floor 10^{}",
        derived_exp,
        floor_exp
    );

    if exp > MAX_U128_EXPONENT as i32 {
        tracing::warn!(
            "Natural unit 10^{} exceeds the u128 range for these components",
            exp
        );
        return Err(BasketError::Numeric(NumericError::Overflow));
    }
    Ok(exp as u32)
}

/// Units and price error at natural unit `10^natural_unit_exp`.
fn evaluate(inputs: &BasketInputs<'_>, natural_unit_exp: u32) -> NumericResult<Candidate> {
    // required × natural_unit / 10^18
    let exp = natural_unit_exp as i32 - i32::from(REFERENCE_DECIMALS);
    let units = inputs
        .required_units
        .iter()
        .map(|required| -> NumericResult<u128> { Ok(required.shift(exp)?.ceil_u128()?.max(1)) })
        .collect::<NumericResult<Vec<_>>>()?;

    let implied_price =
        implied_price_at(&units, natural_unit_exp, &inputs.prices, inputs.decimals)?;
    let error = relative_error(implied_price, inputs.target_price)?;

    Ok(Candidate {
        natural_unit_exp,
        units,
        implied_price,
        error,
    })
}

// ============================================================================
// Tests
// ============================================================================
