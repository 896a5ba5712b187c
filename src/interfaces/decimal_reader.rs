// ============================================================================
// Decimal Reader Interface
// Contract for reading a component's decimal precision from the ledger
// ============================================================================

use crate::domain::TokenAddress;
use std::collections::HashMap;
use std::fmt;

/// Why a component's decimals could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalReadError {
    /// The token does not expose a `decimals` accessor
    NotExposed,
    /// The ledger call itself failed
    Transport(String),
}

impl fmt::Display for DecimalReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalReadError::NotExposed => write!(f, "token does not expose decimals"),
            DecimalReadError::Transport(reason) => write!(f, "decimals read failed: {}", reason),
        }
    }
}

impl std::error::Error for DecimalReadError {}

/// Reads the decimal precision of a component token.
///
/// Implementations talk to the ledger; a failure for one token must not
/// affect reads of other tokens.
pub trait DecimalReader: Send + Sync {
    fn read_decimals(&self, token: &TokenAddress) -> Result<u8, DecimalReadError>;
}

/// Async flavour of [`DecimalReader`] for ledgers reached through an async client.
#[cfg(feature = "async")]
pub trait AsyncDecimalReader: Send + Sync + 'static {
    fn read_decimals(
        &self,
        token: TokenAddress,
    ) -> impl std::future::Future<Output = Result<u8, DecimalReadError>> + Send;
}

/// In-memory reader for callers that already know component decimals.
///
/// Tokens missing from the table read as [`DecimalReadError::NotExposed`].
#[derive(Debug, Clone, Default)]
pub struct StaticDecimalReader {
    decimals: HashMap<TokenAddress, u8>,
}

impl StaticDecimalReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: register a token's decimals
    pub fn with_token(mut self, token: TokenAddress, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }
}

impl FromIterator<(TokenAddress, u8)> for StaticDecimalReader {
    fn from_iter<I: IntoIterator<Item = (TokenAddress, u8)>>(iter: I) -> Self {
        Self {
            decimals: iter.into_iter().collect(),
        }
    }
}

impl DecimalReader for StaticDecimalReader {
    fn read_decimals(&self, token: &TokenAddress) -> Result<u8, DecimalReadError> {
        self.decimals
            .get(token)
            .copied()
            .ok_or(DecimalReadError::NotExposed)
    }
}

#[cfg(feature = "async")]
impl AsyncDecimalReader for StaticDecimalReader {
    async fn read_decimals(&self, token: TokenAddress) -> Result<u8, DecimalReadError> {
        DecimalReader::read_decimals(self, &token)
    }
}
