//! Placeholder Runtime - the host-facing layer of the placeholder API.
//!
//! This crate provides:
//! - The shared context object (`PlaceholderApi`) owning the provider
//!   registry, the custom pack and the registration listeners
//! - Layered configuration loading with figment (`config`)
//! - Logging setup on top of `tracing-subscriber` (`logging`)
//!
//! # Example
//!
//! ```ignore
//! use placeholder_runtime::PlaceholderApi;
//! use placeholder_core::{PackProvider, PlaceholderPack, Replacer};
//! use std::sync::Arc;
//!
//! let api = PlaceholderApi::builder()
//!     .profile("production")
//!     .build()?;
//!
//! let pack = Arc::new(PlaceholderPack::new("core"));
//! pack.add_placeholder("greeting", "Says hello", false, Replacer::fixed("Hello"))?;
//! api.register_provider(Arc::new(PackProvider::new("core", pack)));
//!
//! assert_eq!(api.replace_placeholders(&player, "{greeting}!"), "Hello!");
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use api::{ApiBuilder, CONFIG_PROVIDER_ID, CUSTOM_PACK_NAME, PlaceholderApi};
pub use config::{
    ApiConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig, PlaceholderConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;

// Re-export tracing for use by hosts
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
