//! Replacers: the functions that produce a placeholder's value.
//!
//! Every replacer has the same shape: it receives a [`ReplaceEvent`] (the
//! player context plus the exact token text that matched) and returns
//! `Some(value)` or `None` for "no value". The two flavours a provider
//! usually wants are thin constructors over that shape:
//!
//! ```rust,ignore
//! // Value replacer: only looks at the player.
//! let name = Replacer::value(|player| player.name().map(str::to_owned));
//!
//! // Parameterized replacer: parses the matched token, e.g. `{stat_kills_5}`.
//! let stat = Replacer::parameterized(|player, token| {
//!     let days = token.rsplit('_').next()?;
//!     Some(format!("{} over {days} days", lookup_kills(player)))
//! });
//!
//! // Fixed replacer: ignores its inputs.
//! let rank = Replacer::fixed("Gold");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::player::{OfflinePlayer, OnlinePlayer, PlayerContext};

/// Data handed to a replacer for one token occurrence.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceEvent<'a> {
    player: &'a PlayerContext,
    placeholder: &'a str,
}

impl<'a> ReplaceEvent<'a> {
    /// Creates an event for `placeholder` (token text without braces).
    pub fn new(player: &'a PlayerContext, placeholder: &'a str) -> Self {
        Self {
            player,
            placeholder,
        }
    }

    /// Returns the player context.
    pub fn player(&self) -> &'a PlayerContext {
        self.player
    }

    /// Returns the persisted player record.
    pub fn offline_player(&self) -> &'a OfflinePlayer {
        self.player.offline()
    }

    /// Returns the connected player, or `None` if the player is offline.
    pub fn online_player(&self) -> Option<&'a OnlinePlayer> {
        self.player.online()
    }

    /// Returns `true` if the player is connected.
    pub fn is_online(&self) -> bool {
        self.player.is_online()
    }

    /// Returns the matched token text exactly as written (case preserved).
    pub fn placeholder(&self) -> &'a str {
        self.placeholder
    }
}

type ReplaceFn = dyn Fn(&ReplaceEvent<'_>) -> Option<String> + Send + Sync;

/// A shareable placeholder resolution function.
///
/// Cloning is cheap; clones call the same underlying closure.
#[derive(Clone)]
pub struct Replacer {
    inner: Arc<ReplaceFn>,
}

impl Replacer {
    /// Wraps a closure that receives the full [`ReplaceEvent`].
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ReplaceEvent<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Creates a replacer that only depends on the player.
    pub fn value<F>(f: F) -> Self
    where
        F: Fn(&PlayerContext) -> Option<String> + Send + Sync + 'static,
    {
        Self::new(move |event| f(event.player()))
    }

    /// Creates a replacer that also receives the matched token text.
    pub fn parameterized<F>(f: F) -> Self
    where
        F: Fn(&PlayerContext, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self::new(move |event| f(event.player(), event.placeholder()))
    }

    /// Creates a replacer that always returns `value`.
    pub fn fixed(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(move |_| Some(value.clone()))
    }

    /// Runs the replacer.
    pub fn replace(&self, event: &ReplaceEvent<'_>) -> Option<String> {
        (self.inner)(event)
    }

    /// Returns `true` if both handles call the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replacer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn online() -> PlayerContext {
        OnlinePlayer::new(Uuid::new_v4(), "Alex").into()
    }

    #[test]
    fn test_value_replacer_ignores_token() {
        let replacer = Replacer::value(|p| p.name().map(str::to_owned));
        let player = online();

        assert_eq!(
            replacer.replace(&ReplaceEvent::new(&player, "PLAYER_NAME")),
            Some("Alex".to_string())
        );
    }

    #[test]
    fn test_parameterized_replacer_sees_original_case() {
        let replacer = Replacer::parameterized(|_, token| Some(token.to_string()));
        let player = online();

        assert_eq!(
            replacer.replace(&ReplaceEvent::new(&player, "Stat_Kills_5")),
            Some("Stat_Kills_5".to_string())
        );
    }

    #[test]
    fn test_fixed_replacer_for_offline_player() {
        let replacer = Replacer::fixed("Gold");
        let player = PlayerContext::from(OfflinePlayer::unknown(Uuid::new_v4()));

        assert_eq!(
            replacer.replace(&ReplaceEvent::new(&player, "rank")),
            Some("Gold".to_string())
        );
    }

    #[test]
    fn test_clones_share_closure() {
        let a = Replacer::fixed("x");
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Replacer::fixed("x")));
    }
}
