// ============================================================================
// Token Domain Model
// Component identifiers and per-component basket inputs
// ============================================================================

use super::errors::{BasketError, BasketResult};
use crate::numeric::NumericError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a ledger account address in bytes.
const ADDRESS_LEN: usize = 20;

/// Opaque handle of a component token on the ledger.
///
/// Parsed from and displayed as a `0x`-prefixed, 40 digit hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenAddress([u8; ADDRESS_LEN]);

impl TokenAddress {
    /// Create from raw address bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for TokenAddress {
    type Err = BasketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex.len() != ADDRESS_LEN * 2 || !hex.is_ascii() {
            return Err(BasketError::InvalidAddress(s.to_string()));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| BasketError::InvalidAddress(s.to_string()))?;
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAddress({})", self)
    }
}

/// One asset of a basket together with its pricing inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    /// Token handle on the ledger
    pub address: TokenAddress,

    /// Decimal precision of the token (0-18)
    pub decimals: u8,

    /// Fiat price of one whole token
    pub price: Decimal,

    /// Share of the basket value held in this token, in (0, 1]
    pub proportion: Decimal,
}

impl Component {
    pub fn new(address: TokenAddress, decimals: u8, price: Decimal, proportion: Decimal) -> Self {
        Self {
            address,
            decimals,
            price,
            proportion,
        }
    }

    /// Fiat value this component should contribute to a basket priced at `target_price`.
    pub fn target_value(&self, target_price: Decimal) -> BasketResult<Decimal> {
        self.proportion
            .checked_mul(target_price)
            .ok_or(BasketError::Numeric(NumericError::Overflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_and_display() {
        let text = "0x00000000000000000000000000000000000000ff";
        let address: TokenAddress = text.parse().unwrap();
        assert_eq!(address.as_bytes()[19], 0xff);
        assert_eq!(address.to_string(), text);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let address: TokenAddress = "0101010101010101010101010101010101010101".parse().unwrap();
        assert_eq!(address, TokenAddress::from_bytes([1u8; 20]));
    }

    #[test]
    fn test_address_parse_invalid() {
        assert!(matches!(
            "0x1234".parse::<TokenAddress>(),
            Err(BasketError::InvalidAddress(_))
        ));
        assert!(matches!(
            "0xzz00000000000000000000000000000000000000".parse::<TokenAddress>(),
            Err(BasketError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_address_ordering() {
        let lo = TokenAddress::from_bytes([0u8; 20]);
        let hi = TokenAddress::from_bytes([1u8; 20]);
        assert!(lo < hi);
    }

    #[test]
    fn test_component_target_value() {
        let component = Component::new(
            TokenAddress::from_bytes([1u8; 20]),
            18,
            Decimal::from(2),
            Decimal::new(5, 1),
        );
        assert_eq!(component.target_value(Decimal::from(10)).unwrap(), Decimal::from(5));
    }
}
