//! # Placeholder Core
//!
//! The registration and resolution engine behind the placeholder API.
//!
//! Providers register named placeholders (`{name}` tokens) together with a
//! [`Replacer`] that turns a player context into a string. Consumers hand in
//! free-form text and get every recognised token substituted in one pass.
//!
//! ## Building blocks
//!
//! - **Replacer** ([`Replacer`], [`ReplaceEvent`]): the per-placeholder function.
//! - **Entry** ([`PlaceholderEntry`]): name, description, online requirement, replacer.
//! - **Pack** ([`PlaceholderPack`]): one provider's entries, with add/remove/lookup.
//! - **Provider** ([`PlaceholderProvider`], [`PackProvider`]): owner of a pack.
//! - **Registry** ([`ProviderRegistry`]): ordered providers behind one lookup surface.
//! - **Resolver** ([`resolver`]): the single-pass `{token}` scanner.
//! - **Listeners** ([`ListenerRegistry`]): synchronous "placeholder added" notifications.
//!
//! ## Flow
//!
//! ```text
//! provider ──add──▶ PlaceholderPack ──register──▶ ProviderRegistry
//!                                                      │
//! text + player ──▶ resolver::replace_with ──token──▶ first provider ──▶ value | verbatim
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use placeholder_core::*;
//! use std::sync::Arc;
//!
//! let pack = Arc::new(PlaceholderPack::new("greetings"));
//! pack.add_placeholder("greeting", "Says hello", false, Replacer::fixed("Hello"))?;
//!
//! let registry = ProviderRegistry::new();
//! let custom = Arc::new(PlaceholderPack::new("custom"));
//! registry.register(Arc::new(PackProvider::new("greeter", pack)), &custom)?;
//!
//! let out = registry.replace_placeholders(&player, "{greeting}, world! {missing}")?;
//! assert_eq!(out, "Hello, world! {missing}");
//! ```

pub mod error;
pub mod listener;
pub mod name;
pub mod pack;
pub mod player;
pub mod provider;
pub mod registry;
pub mod replacer;
pub mod resolver;

pub use error::{PlaceholderError, PlaceholderResult};
pub use listener::{ListenerRegistry, PlaceholderAddedEvent, PlaceholderListener};
pub use name::PlaceholderName;
pub use pack::{PlaceholderEntry, PlaceholderInfo, PlaceholderPack};
pub use player::{OfflinePlayer, OnlinePlayer, PlayerContext};
pub use provider::{BoxedProvider, PackProvider, PlaceholderProvider, ProviderId};
pub use registry::ProviderRegistry;
pub use replacer::{ReplaceEvent, Replacer};
pub use resolver::{TokenMatch, Tokens, replace_with, tokens};

// Re-export uuid so hosts can build player contexts without a direct dependency.
pub use uuid;
