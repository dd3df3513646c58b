//! Provider registry: the aggregator behind the lookup surface.
//!
//! The registry keeps providers in registration order, deduplicated by
//! [`ProviderId`]. Two lookup paths exist and they intentionally differ:
//!
//! - [`resolve`](ProviderRegistry::resolve) answers a single token by asking
//!   every provider in order and taking the first value.
//! - [`replace_placeholders`](ProviderRegistry::replace_placeholders), the
//!   text-level entry point, is bound to the **first** registered provider
//!   only. Later providers still register (and get their callback) but never
//!   take part in text resolution. [`total_placeholder_count`] follows the
//!   same rule.
//!
//! [`total_placeholder_count`]: ProviderRegistry::total_placeholder_count

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{PlaceholderError, PlaceholderResult};
use crate::pack::PlaceholderPack;
use crate::player::PlayerContext;
use crate::provider::{BoxedProvider, ProviderId};
use crate::resolver;

/// Ordered, deduplicated set of placeholder providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<BoxedProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` and runs its registration callback with `custom`.
    ///
    /// Returns `Ok(true)` if the provider was appended, `Ok(false)` if a
    /// provider with the same id was already present. The callback runs in
    /// both cases. Fails if the provider id is empty.
    pub fn register(
        &self,
        provider: BoxedProvider,
        custom: &Arc<PlaceholderPack>,
    ) -> PlaceholderResult<bool> {
        if provider.id().is_empty() {
            return Err(PlaceholderError::invalid("provider id is empty"));
        }

        // Callback runs outside the lock so it may query the registry.
        provider.on_register(custom);

        let mut providers = self.providers.write();
        if providers.iter().any(|p| p.id() == provider.id()) {
            info!(provider = %provider.id(), "Hooked into placeholder provider again");
            return Ok(false);
        }
        info!(provider = %provider.id(), "Hooked into placeholder provider");
        providers.push(provider);
        Ok(true)
    }

    /// Returns the number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.read().len()
    }

    /// Returns `true` if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.provider_count() == 0
    }

    /// Returns the ids of all providers in registration order.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers.read().iter().map(|p| p.id().clone()).collect()
    }

    /// Returns the provider registered first, if any.
    pub fn primary(&self) -> Option<BoxedProvider> {
        self.providers.read().first().cloned()
    }

    /// Returns the provider with the given id.
    pub fn get(&self, id: &ProviderId) -> Option<BoxedProvider> {
        self.providers.read().iter().find(|p| p.id() == id).cloned()
    }

    /// Renders a single token against all providers in registration order.
    ///
    /// Returns `None` if no provider produced a value.
    pub fn try_resolve(&self, player: &PlayerContext, token: &str) -> Option<String> {
        let providers = self.providers.read().clone();
        providers
            .iter()
            .find_map(|provider| provider.render(player, token))
    }

    /// Renders a single token, passing unknown tokens through unchanged.
    ///
    /// `token` is given without braces and is returned as-is when nothing
    /// matches.
    pub fn resolve(&self, player: &PlayerContext, token: &str) -> String {
        self.try_resolve(player, token)
            .unwrap_or_else(|| token.to_string())
    }

    /// Replaces every placeholder in `input` using the first registered provider.
    ///
    /// Fails with [`PlaceholderError::NoProviderAvailable`] when no provider
    /// is registered; callers fall back to the unchanged input.
    pub fn replace_placeholders<'a>(
        &self,
        player: &PlayerContext,
        input: &'a str,
    ) -> PlaceholderResult<Cow<'a, str>> {
        let primary = self
            .primary()
            .ok_or(PlaceholderError::NoProviderAvailable)?;
        debug!(provider = %primary.id(), "Replacing placeholders");
        Ok(resolver::replace_with(input, |token| {
            primary.render(player, token)
        }))
    }

    /// Returns the first registered provider's placeholder count.
    pub fn total_placeholder_count(&self) -> PlaceholderResult<usize> {
        self.primary()
            .map(|p| p.placeholder_count())
            .ok_or(PlaceholderError::NoProviderAvailable)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_ids())
            .finish()
    }
}

/// Logs the standard "no provider installed" notice.
pub fn warn_no_provider() {
    warn!("There is no placeholder provider installed!");
    warn!("Register a placeholder provider before resolving placeholders.");
}
