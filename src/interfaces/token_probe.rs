// ============================================================================
// Token Probe Interface
// Capability check gating basket creation
// ============================================================================

use crate::domain::TokenAddress;

/// Confirms that a component exposes the token capability set
/// (balance, decimals and transfer) required for basket creation.
pub trait TokenProbe: Send + Sync {
    fn supports_token_interface(&self, token: &TokenAddress) -> bool;
}

/// Probe that accepts every token, for callers that verified components upstream
pub struct AcceptAllProbe;

impl TokenProbe for AcceptAllProbe {
    fn supports_token_interface(&self, _token: &TokenAddress) -> bool {
        true
    }
}

impl<F> TokenProbe for F
where
    F: Fn(&TokenAddress) -> bool + Send + Sync,
{
    fn supports_token_interface(&self, token: &TokenAddress) -> bool {
        self(token)
    }
}
