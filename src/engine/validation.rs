// ============================================================================
// Basket Creation Validation
// Precondition gate for a (units, natural unit) pair before creation
// ============================================================================

use super::decimal_resolver::DecimalResolver;
use crate::domain::{BasketCreation, BasketError, BasketResult, TokenAddress};
use crate::interfaces::{DecimalReader, TokenProbe};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Check a creation request against a known minimum natural unit.
///
/// Runs without I/O: component/unit lengths, positive natural unit at or
/// above `minimum_natural_unit`, positive units and distinct components.
pub fn validate_basket_creation(
    creation: &BasketCreation,
    minimum_natural_unit: u128,
) -> BasketResult<()> {
    if creation.components.is_empty() {
        return Err(BasketError::EmptyBasket);
    }

    if creation.units.len() != creation.components.len() {
        return Err(BasketError::LengthMismatch {
            field: "units",
            expected: creation.components.len(),
            actual: creation.units.len(),
        });
    }

    if creation.natural_unit == 0 {
        return Err(BasketError::NonPositive {
            field: "natural_unit",
            index: None,
            value: Decimal::ZERO,
        });
    }

    if creation.natural_unit < minimum_natural_unit {
        return Err(BasketError::NaturalUnitBelowMinimum {
            natural_unit: creation.natural_unit,
            minimum: minimum_natural_unit,
        });
    }

    if let Some(index) = creation.units.iter().position(|&unit| unit == 0) {
        return Err(BasketError::NonPositive {
            field: "units",
            index: Some(index),
            value: Decimal::ZERO,
        });
    }

    let mut seen = HashSet::with_capacity(creation.components.len());
    for address in &creation.components {
        if !seen.insert(*address) {
            return Err(BasketError::DuplicateComponent(*address));
        }
    }

    Ok(())
}

/// Confirm every component exposes the token capability set.
pub fn check_token_interfaces<P>(probe: &P, components: &[TokenAddress]) -> BasketResult<()>
where
    P: TokenProbe + ?Sized,
{
    match components
        .iter()
        .find(|token| !probe.supports_token_interface(token))
    {
        Some(token) => Err(BasketError::UnsupportedToken(*token)),
        None => Ok(()),
    }
}

/// Full precondition gate for basket creation.
///
/// Local checks run first; the minimum natural unit then comes from the
/// ledger decimals (a failed lookup forces `10^18`), and finally every
/// component is probed for the token interface.
pub struct BasketValidator<'a, R: ?Sized, P: ?Sized> {
    reader: &'a R,
    probe: &'a P,
    resolver: DecimalResolver,
}

impl<'a, R, P> BasketValidator<'a, R, P>
where
    R: DecimalReader + ?Sized,
    P: TokenProbe + ?Sized,
{
    pub fn new(reader: &'a R, probe: &'a P) -> Self {
        Self {
            reader,
            probe,
            resolver: DecimalResolver::default(),
        }
    }

    /// Minimum natural unit for `components` as read from the ledger.
    pub fn minimum_natural_unit(&self, components: &[TokenAddress]) -> u128 {
        self.resolver
            .resolve_concurrent(self.reader, components)
            .minimum_natural_unit()
    }

    pub fn validate(&self, creation: &BasketCreation) -> BasketResult<()> {
        // Structural checks before any ledger reads
        validate_basket_creation(creation, 0)?;

        let minimum = self.minimum_natural_unit(&creation.components);
        validate_basket_creation(creation, minimum)?;

        check_token_interfaces(self.probe, &creation.components)?;

        tracing::debug!(
            "Basket creation accepted: {} components, natural unit {}",
            creation.components.len(),
            creation.natural_unit
        );
        Ok(())
    }
}
