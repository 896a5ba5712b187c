// ============================================================================
// Decimal Resolver
// Per-component decimal lookup with failure-isolated fallback
// ============================================================================

use crate::domain::{SolverConfig, TokenAddress, DEFAULT_DECIMALS, REFERENCE_DECIMALS};
use crate::interfaces::DecimalReader;

#[cfg(feature = "async")]
use crate::interfaces::AsyncDecimalReader;
#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum natural unit permitted by a set of component decimals.
///
/// `10^(18 - min(decimals))`. An empty slice counts as decimal 0 and yields
/// `10^18`; decimals above 18 clamp the exponent at 0.
pub fn minimum_natural_unit(decimals: &[u8]) -> u128 {
    let min_decimal = decimals.iter().copied().min().unwrap_or(0);
    10u128.pow(u32::from(REFERENCE_DECIMALS.saturating_sub(min_decimal)))
}

/// Outcome of resolving decimals for an ordered list of components.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedDecimals {
    /// `None` where the lookup failed
    lookups: Vec<Option<u8>>,
    default_decimals: u8,
}

impl ResolvedDecimals {
    pub fn new(lookups: Vec<Option<u8>>, default_decimals: u8) -> Self {
        Self {
            lookups,
            default_decimals,
        }
    }

    /// Decimals per component, failed lookups replaced by the default.
    pub fn decimals(&self) -> Vec<u8> {
        self.lookups
            .iter()
            .map(|lookup| lookup.unwrap_or(self.default_decimals))
            .collect()
    }

    /// Indices of components whose lookup failed.
    pub fn failed(&self) -> Vec<usize> {
        self.lookups
            .iter()
            .enumerate()
            .filter_map(|(index, lookup)| lookup.is_none().then_some(index))
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.lookups.iter().all(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }

    /// Minimum natural unit for basket creation.
    ///
    /// A failed lookup means the component's granularity is unknown, so the
    /// minimum decimal is taken as 0 and the floor becomes `10^18`.
    pub fn minimum_natural_unit(&self) -> u128 {
        if !self.all_succeeded() {
            return minimum_natural_unit(&[]);
        }
        minimum_natural_unit(&self.decimals())
    }
}

/// Resolves component decimals through a [`DecimalReader`].
///
/// Each component is read independently; a failure is logged and replaced
/// by the configured default without affecting the other components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalResolver {
    default_decimals: u8,
}

impl DecimalResolver {
    pub fn new(default_decimals: u8) -> Self {
        Self { default_decimals }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.default_decimals)
    }

    pub fn default_decimals(&self) -> u8 {
        self.default_decimals
    }

    /// Read decimals one component after another.
    pub fn resolve<R>(&self, reader: &R, components: &[TokenAddress]) -> ResolvedDecimals
    where
        R: DecimalReader + ?Sized,
    {
        let lookups = components
            .iter()
            .map(|token| self.read_one(reader, token))
            .collect();

        ResolvedDecimals::new(lookups, self.default_decimals)
    }

    /// Read decimals for all components in parallel on scoped threads.
    ///
    /// The call returns once every read has completed or fallen back. A
    /// reader that panics for one token only affects that token.
    pub fn resolve_concurrent<R>(&self, reader: &R, components: &[TokenAddress]) -> ResolvedDecimals
    where
        R: DecimalReader + ?Sized,
    {
        let lookups = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = components
                .iter()
                .map(|token| scope.spawn(move |_| self.read_one(reader, token)))
                .collect();

            handles
                .into_iter()
                .zip(components)
                .map(|(handle, token)| {
                    handle.join().unwrap_or_else(|_| {
                        tracing::warn!(
                            "Decimals lookup for {} panicked, defaulting to {}",
                            token,
                            self.default_decimals
                        );
                        None
                    })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|_| vec![None; components.len()]);

        ResolvedDecimals::new(lookups, self.default_decimals)
    }

    /// Read decimals for all components as independent tokio tasks.
    #[cfg(feature = "async")]
    pub async fn resolve_async<R>(
        &self,
        reader: Arc<R>,
        components: &[TokenAddress],
    ) -> ResolvedDecimals
    where
        R: AsyncDecimalReader,
    {
        let mut tasks = tokio::task::JoinSet::new();
        for (index, token) in components.iter().copied().enumerate() {
            let reader = Arc::clone(&reader);
            tasks.spawn(async move {
                let lookup = AsyncDecimalReader::read_decimals(&*reader, token).await;
                (index, token, lookup)
            });
        }

        let mut lookups = vec![None; components.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(decimals))) => lookups[index] = Some(decimals),
                Ok((_, token, Err(err))) => {
                    tracing::warn!(
                        "Decimals lookup failed for {}: {}, defaulting to {}",
                        token,
                        err,
                        self.default_decimals
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        "Decimals lookup task failed: {}, defaulting to {}",
                        err,
                        self.default_decimals
                    );
                }
            }
        }

        ResolvedDecimals::new(lookups, self.default_decimals)
    }

    fn read_one<R>(&self, reader: &R, token: &TokenAddress) -> Option<u8>
    where
        R: DecimalReader + ?Sized,
    {
        match DecimalReader::read_decimals(reader, token) {
            Ok(decimals) => {
                tracing::trace!("Read {} decimals for {}", decimals, token);
                Some(decimals)
            }
            Err(err) => {
                tracing::warn!(
                    "Decimals lookup failed for {}: {}, defaulting to {}",
                    token,
                    err,
                    self.default_decimals
                );
                None
            }
        }
    }
}

impl Default for DecimalResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

/// Resolve decimals with the default fallback of 18.
pub fn resolve_decimals<R>(reader: &R, components: &[TokenAddress]) -> ResolvedDecimals
where
    R: DecimalReader + ?Sized,
{
    DecimalResolver::default().resolve(reader, components)
}
