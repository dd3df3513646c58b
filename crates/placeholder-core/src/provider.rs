//! Placeholder providers.
//!
//! A provider is an external module that contributes placeholders. It is
//! identified by an opaque [`ProviderId`], owns one [`PlaceholderPack`] for
//! its lifetime, and gets a registration callback each time it is hooked
//! into a [`ProviderRegistry`](crate::ProviderRegistry).
//!
//! [`PackProvider`] is the stock implementation: a pack plus a link to the
//! shared custom pack, which it consults after its own entries.
//!
//! ```rust,ignore
//! let pack = Arc::new(PlaceholderPack::new("stats"));
//! pack.add_placeholder("kills", "Total kills", false, Replacer::value(kills))?;
//!
//! api.register_provider(Arc::new(PackProvider::new("stats-plugin", pack)));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::pack::{PlaceholderEntry, PlaceholderPack};
use crate::player::PlayerContext;

/// Opaque identity of a provider (plugin or module).
///
/// Used only for logging and as the dedup key of the provider sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a provider id. Emptiness is checked at registration time.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A source of placeholders registered with a [`ProviderRegistry`].
///
/// [`ProviderRegistry`]: crate::ProviderRegistry
pub trait PlaceholderProvider: Send + Sync + 'static {
    /// Identity used for dedup and logging.
    fn id(&self) -> &ProviderId;

    /// The provider's own pack.
    fn pack(&self) -> &Arc<PlaceholderPack>;

    /// Registration callback, run on every registration of this provider,
    /// including repeated ones.
    ///
    /// `custom` is the shared pack that ad-hoc placeholders are registered
    /// into. Implementations must tolerate being called more than once.
    fn on_register(&self, custom: &Arc<PlaceholderPack>) {
        let _ = custom;
    }

    /// Finds the entry this provider serves for `name`.
    ///
    /// The default looks only at [`pack`](Self::pack).
    fn lookup(&self, name: &str) -> Option<Arc<PlaceholderEntry>> {
        self.pack().lookup(name)
    }

    /// Renders `token` for `player`, or `None` if this provider has no value.
    fn render(&self, player: &PlayerContext, token: &str) -> Option<String> {
        self.lookup(token)?.render(player, token)
    }

    /// Number of placeholders in the provider's own pack.
    fn placeholder_count(&self) -> usize {
        self.pack().count()
    }
}

/// Shared handle to a registered provider.
pub type BoxedProvider = Arc<dyn PlaceholderProvider>;

/// A provider backed by a single pack that also serves the shared custom pack.
///
/// The custom pack is linked by [`on_register`](PlaceholderProvider::on_register);
/// until then only the provider's own entries resolve. Own entries take
/// precedence over custom ones with the same name.
pub struct PackProvider {
    id: ProviderId,
    pack: Arc<PlaceholderPack>,
    custom: RwLock<Option<Arc<PlaceholderPack>>>,
}

impl PackProvider {
    /// Creates a provider serving `pack`.
    pub fn new(id: impl Into<ProviderId>, pack: Arc<PlaceholderPack>) -> Self {
        Self {
            id: id.into(),
            pack,
            custom: RwLock::new(None),
        }
    }

    /// Returns `true` once the shared custom pack has been linked.
    pub fn is_linked(&self) -> bool {
        self.custom.read().is_some()
    }
}

impl PlaceholderProvider for PackProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn pack(&self) -> &Arc<PlaceholderPack> {
        &self.pack
    }

    fn on_register(&self, custom: &Arc<PlaceholderPack>) {
        *self.custom.write() = Some(Arc::clone(custom));
    }

    fn lookup(&self, name: &str) -> Option<Arc<PlaceholderEntry>> {
        if let Some(entry) = self.pack.lookup(name) {
            return Some(entry);
        }
        let custom = self.custom.read().clone()?;
        custom.lookup(name)
    }
}

impl fmt::Debug for PackProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackProvider")
            .field("id", &self.id)
            .field("pack", &self.pack)
            .field("linked", &self.is_linked())
            .finish()
    }
}
