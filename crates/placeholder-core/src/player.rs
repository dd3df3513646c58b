//! Player context passed to replacers.
//!
//! The core never looks players up itself. Callers hand in a
//! [`PlayerContext`] built from whatever player source the host has, and
//! replacers read from it.
//!
//! A context is either:
//!
//! - [`PlayerContext::Offline`]: a persisted record (uuid and last known
//!   name) for a player that is not currently connected, or
//! - [`PlayerContext::Online`]: a connected player with richer session data.
//!
//! Replacers that require the online variant get "no value" for offline
//! contexts instead of failing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted player record, available whether or not the player is connected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfflinePlayer {
    /// Stable player identifier.
    pub uuid: Uuid,
    /// Last known name, if the player ever joined.
    pub name: Option<String>,
}

impl OfflinePlayer {
    /// Creates an offline record.
    pub fn new(uuid: Uuid, name: Option<String>) -> Self {
        Self { uuid, name }
    }

    /// Creates a record for a player that has never joined.
    pub fn unknown(uuid: Uuid) -> Self {
        Self { uuid, name: None }
    }
}

/// A currently connected player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlinePlayer {
    /// The persisted part of the player.
    pub profile: OfflinePlayer,
    /// Name shown in chat and the tab list.
    pub display_name: String,
    /// World the player is currently in.
    pub world: Option<String>,
}

impl OnlinePlayer {
    /// Creates an online player whose display name equals `name`.
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            profile: OfflinePlayer::new(uuid, Some(name.clone())),
            display_name: name,
            world: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the current world.
    pub fn with_world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    /// Returns the player's name.
    pub fn name(&self) -> &str {
        self.profile.name.as_deref().unwrap_or(&self.display_name)
    }
}

/// The player a piece of text is being resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerContext {
    /// Player is not connected; only the persisted record is available.
    Offline(OfflinePlayer),
    /// Player is connected.
    Online(OnlinePlayer),
}

impl PlayerContext {
    /// Returns the persisted record, which every context carries.
    pub fn offline(&self) -> &OfflinePlayer {
        match self {
            Self::Offline(player) => player,
            Self::Online(player) => &player.profile,
        }
    }

    /// Returns the connected player, if any.
    pub fn online(&self) -> Option<&OnlinePlayer> {
        match self {
            Self::Offline(_) => None,
            Self::Online(player) => Some(player),
        }
    }

    /// Returns `true` if the player is connected.
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online(_))
    }

    /// Returns the player's uuid.
    pub fn uuid(&self) -> Uuid {
        self.offline().uuid
    }

    /// Returns the last known name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Offline(player) => player.name.as_deref(),
            Self::Online(player) => Some(player.name()),
        }
    }
}

impl From<OfflinePlayer> for PlayerContext {
    fn from(player: OfflinePlayer) -> Self {
        Self::Offline(player)
    }
}

impl From<OnlinePlayer> for PlayerContext {
    fn from(player: OnlinePlayer) -> Self {
        Self::Online(player)
    }
}
