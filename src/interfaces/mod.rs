// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts for external collaborators
// ============================================================================

mod decimal_reader;
mod token_probe;

#[cfg(feature = "async")]
pub use decimal_reader::AsyncDecimalReader;
pub use decimal_reader::{DecimalReadError, DecimalReader, StaticDecimalReader};
pub use token_probe::{AcceptAllProbe, TokenProbe};
