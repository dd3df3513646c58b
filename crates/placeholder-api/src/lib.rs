//! # Placeholder API
//!
//! Register named placeholders such as `{player_name}` or `{rank}` and
//! substitute them in free-form text for a given player.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────┐  register   ┌──────────────────┐  first provider  ┌────────────────┐
//! │  Providers   │───────────▶│  PlaceholderApi  │────────────────▶│ PlaceholderPack │
//! │ (own packs)  │             │ registry, custom │                  │ name → Replacer │
//! └──────────────┘             │ pack, listeners  │                  └────────────────┘
//!                              └──────────────────┘
//! ```
//!
//! - **Providers** own a pack of placeholders and are registered once at startup.
//! - **Custom placeholders** registered ad hoc land in a shared pack that the
//!   active provider serves after its own entries.
//! - **Listeners** are told synchronously about every registration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use placeholder_api::prelude::*;
//! use std::sync::Arc;
//!
//! let api = PlaceholderApi::new();
//!
//! let pack = Arc::new(PlaceholderPack::new("core"));
//! pack.add_placeholder("greeting", "Says hello", false, Replacer::fixed("Hello"))?;
//! api.register_provider(Arc::new(PackProvider::new("core", pack)));
//!
//! api.register_static_placeholder("myplugin", "rank", "Gold");
//!
//! let player = PlayerContext::from(OfflinePlayer::unknown(uuid::Uuid::new_v4()));
//! assert_eq!(
//!     api.replace_placeholders(&player, "{greeting}, [{rank}] {missing}"),
//!     "Hello, [Gold] {missing}"
//! );
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use placeholder_core as core;
pub use placeholder_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use placeholder_api::prelude::*;
/// ```
pub mod prelude {
    // Context object - main entry point
    pub use placeholder_runtime::{ApiConfig, PlaceholderApi};

    // Building providers and packs
    pub use placeholder_core::{
        BoxedProvider, PackProvider, PlaceholderEntry, PlaceholderPack, PlaceholderProvider,
        ProviderId,
    };

    // Replacers and the data they receive
    pub use placeholder_core::{OfflinePlayer, OnlinePlayer, PlayerContext, ReplaceEvent, Replacer};

    // Change notification
    pub use placeholder_core::{PlaceholderAddedEvent, PlaceholderListener};

    pub use placeholder_core::uuid;
}
