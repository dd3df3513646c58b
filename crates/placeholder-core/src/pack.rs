//! Placeholder entries and the packs that own them.
//!
//! A [`PlaceholderPack`] is the addressable collection of entries contributed
//! by one provider. Lookup is an exact, case-insensitive match on the
//! normalised name; there is no prefix or fuzzy matching at this layer.
//! Parameterized placeholders such as `{stat_kills_5}` are registered under
//! their full name, and the replacer parses the token it is handed.
//!
//! # Concurrency
//!
//! The entry map sits behind a `parking_lot::RwLock`. Entries are stored as
//! `Arc`s so that lookups release the lock before a replacer runs; a
//! replacer may therefore call back into the same pack.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::PlaceholderResult;
use crate::name::PlaceholderName;
use crate::player::PlayerContext;
use crate::replacer::{ReplaceEvent, Replacer};

// =============================================================================
// PlaceholderEntry
// =============================================================================

/// One registered placeholder.
///
/// Immutable once registered; re-registering the same name replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct PlaceholderEntry {
    name: PlaceholderName,
    description: String,
    requires_online_player: bool,
    replacer: Replacer,
}

impl PlaceholderEntry {
    /// Creates an entry.
    pub fn new(
        name: PlaceholderName,
        description: impl Into<String>,
        requires_online_player: bool,
        replacer: Replacer,
    ) -> Self {
        Self {
            name,
            description: description.into(),
            requires_online_player,
            replacer,
        }
    }

    /// Returns the normalised name.
    pub fn name(&self) -> &PlaceholderName {
        &self.name
    }

    /// Returns the human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` if the replacer needs a connected player.
    pub fn requires_online_player(&self) -> bool {
        self.requires_online_player
    }

    /// Returns the replacer.
    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    /// Renders the entry for `player`.
    ///
    /// `token` is the matched text as written, passed through to the
    /// replacer. Offline players get `None` when the entry requires an
    /// online player.
    pub fn render(&self, player: &PlayerContext, token: &str) -> Option<String> {
        if self.requires_online_player && !player.is_online() {
            trace!(placeholder = %self.name, "Placeholder requires an online player");
            return None;
        }
        self.replacer.replace(&ReplaceEvent::new(player, token))
    }

    /// Returns a serialisable summary of this entry.
    pub fn info(&self) -> PlaceholderInfo {
        PlaceholderInfo {
            name: self.name.to_string(),
            description: self.description.clone(),
            requires_online_player: self.requires_online_player,
        }
    }
}

/// Serialisable description of a registered placeholder, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderInfo {
    /// Normalised name without braces.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the placeholder needs a connected player.
    pub requires_online_player: bool,
}

// =============================================================================
// PlaceholderPack
// =============================================================================

#[derive(Default)]
struct PackInner {
    entries: HashMap<PlaceholderName, Arc<PlaceholderEntry>>,
    /// Names in first-registration order, for listings.
    order: Vec<PlaceholderName>,
}

/// A named collection of placeholder entries owned by one provider.
pub struct PlaceholderPack {
    name: String,
    inner: RwLock<PackInner>,
}

impl PlaceholderPack {
    /// Creates an empty pack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(PackInner::default()),
        }
    }

    /// Returns the pack's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a placeholder, replacing any entry with the same name.
    ///
    /// Fails with [`InvalidArgument`](crate::PlaceholderError::InvalidArgument)
    /// if `name` is empty or contains a delimiter.
    pub fn add_placeholder(
        &self,
        name: &str,
        description: impl Into<String>,
        requires_online_player: bool,
        replacer: Replacer,
    ) -> PlaceholderResult<()> {
        let name = PlaceholderName::new(name)?;
        self.insert(PlaceholderEntry::new(
            name,
            description,
            requires_online_player,
            replacer,
        ));
        Ok(())
    }

    /// Inserts a prepared entry, replacing any entry with the same name.
    ///
    /// Returns `true` if an earlier entry was overwritten.
    pub fn insert(&self, entry: PlaceholderEntry) -> bool {
        let name = entry.name().clone();
        let mut inner = self.inner.write();
        let replaced = inner
            .entries
            .insert(name.clone(), Arc::new(entry))
            .is_some();
        if replaced {
            debug!(pack = %self.name, placeholder = %name, "Placeholder redefined");
        } else {
            inner.order.push(name);
        }
        replaced
    }

    /// Removes the placeholder named `name`.
    ///
    /// Returns `true` if an entry existed and was removed.
    pub fn remove_placeholder(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        let mut inner = self.inner.write();
        if inner.entries.remove(key.as_str()).is_none() {
            return false;
        }
        inner.order.retain(|n| n.as_str() != key);
        debug!(pack = %self.name, placeholder = %key, "Placeholder removed");
        true
    }

    /// Looks up an entry by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<Arc<PlaceholderEntry>> {
        let key = name.to_lowercase();
        self.inner.read().entries.get(key.as_str()).cloned()
    }

    /// Returns `true` if a placeholder named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the number of distinct registered names.
    pub fn count(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Returns `true` if the pack has no entries.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the registered names in first-registration order.
    pub fn names(&self) -> Vec<PlaceholderName> {
        self.inner.read().order.clone()
    }

    /// Returns a summary of every entry in first-registration order.
    pub fn entries(&self) -> Vec<PlaceholderInfo> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|name| inner.entries.get(name))
            .map(|entry| entry.info())
            .collect()
    }

    /// Renders the placeholder named `token` for `player`.
    ///
    /// Returns `None` if the name is unknown or the replacer produced no value.
    pub fn render(&self, player: &PlayerContext, token: &str) -> Option<String> {
        let entry = self.lookup(token)?;
        entry.render(player, token)
    }
}

impl std::fmt::Debug for PlaceholderPack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderPack")
            .field("name", &self.name)
            .field("count", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaceholderError;
    use crate::player::{OfflinePlayer, OnlinePlayer};
    use uuid::Uuid;

    fn offline() -> PlayerContext {
        OfflinePlayer::new(Uuid::new_v4(), Some("Notch".into())).into()
    }

    fn online() -> PlayerContext {
        OnlinePlayer::new(Uuid::new_v4(), "Notch").into()
    }

    #[test]
    fn test_add_and_lookup_is_case_insensitive() {
        let pack = PlaceholderPack::new("test");
        pack.add_placeholder("Player_Name", "name", false, Replacer::fixed("Notch"))
            .unwrap();

        assert!(pack.lookup("player_name").is_some());
        assert!(pack.lookup("PLAYER_NAME").is_some());
        assert_eq!(
            pack.lookup("player_name").unwrap().name().as_str(),
            "player_name"
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let pack = PlaceholderPack::new("test");
        let err = pack
            .add_placeholder("", "empty", false, Replacer::fixed("x"))
            .unwrap_err();

        assert!(matches!(err, PlaceholderError::InvalidArgument { .. }));
        assert!(pack.is_empty());
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let pack = PlaceholderPack::new("test");
        pack.add_placeholder("x", "first", false, Replacer::fixed("A"))
            .unwrap();
        pack.add_placeholder("X", "second", false, Replacer::fixed("B"))
            .unwrap();

        assert_eq!(pack.count(), 1);
        assert_eq!(pack.render(&offline(), "x"), Some("B".to_string()));
        assert_eq!(pack.lookup("x").unwrap().description(), "second");
    }

    #[test]
    fn test_remove_placeholder() {
        let pack = PlaceholderPack::new("test");
        pack.add_placeholder("a", "", false, Replacer::fixed("1"))
            .unwrap();
        pack.add_placeholder("b", "", false, Replacer::fixed("2"))
            .unwrap();

        assert!(pack.remove_placeholder("A"));
        assert!(!pack.remove_placeholder("a"));
        assert_eq!(pack.count(), 1);
        assert_eq!(pack.names(), vec![PlaceholderName::new("b").unwrap()]);
    }

    #[test]
    fn test_no_prefix_matching() {
        let pack = PlaceholderPack::new("test");
        pack.add_placeholder("stat", "", false, Replacer::fixed("1"))
            .unwrap();

        assert!(pack.lookup("stat_kills").is_none());
        assert!(pack.lookup("sta").is_none());
    }

    #[test]
    fn test_online_requirement() {
        let pack = PlaceholderPack::new("test");
        pack.add_placeholder(
            "world",
            "current world",
            true,
            Replacer::value(|p| p.online().and_then(|o| o.world.clone())),
        )
        .unwrap();
        pack.add_placeholder("always", "", true, Replacer::fixed("yes"))
            .unwrap();

        assert_eq!(pack.render(&offline(), "always"), None);
        assert_eq!(pack.render(&online(), "always"), Some("yes".to_string()));
        assert_eq!(pack.render(&online(), "world"), None);
    }

    #[test]
    fn test_entries_listing_keeps_insertion_order() {
        let pack = PlaceholderPack::new("test");
        for name in ["zeta", "alpha", "mid"] {
            pack.add_placeholder(name, format!("{name} desc"), false, Replacer::fixed(""))
                .unwrap();
        }
        pack.add_placeholder("alpha", "redefined", true, Replacer::fixed(""))
            .unwrap();

        let listed: Vec<_> = pack.entries().into_iter().map(|i| i.name).collect();
        assert_eq!(listed, vec!["zeta", "alpha", "mid"]);

        let alpha = &pack.entries()[1];
        assert_eq!(alpha.description, "redefined");
        assert!(alpha.requires_online_player);
    }

    #[test]
    fn test_info_serializes() {
        let entry = PlaceholderEntry::new(
            PlaceholderName::new("rank").unwrap(),
            "Player rank",
            false,
            Replacer::fixed("Gold"),
        );
        let json = serde_json::to_value(entry.info()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "rank",
                "description": "Player rank",
                "requires_online_player": false
            })
        );
    }

    #[test]
    fn test_replacer_can_reenter_pack() {
        let pack = Arc::new(PlaceholderPack::new("test"));
        let weak = Arc::downgrade(&pack);
        pack.add_placeholder(
            "count",
            "",
            false,
            Replacer::value(move |_| weak.upgrade().map(|p| p.count().to_string())),
        )
        .unwrap();

        assert_eq!(pack.render(&offline(), "count"), Some("1".to_string()));
    }
}
