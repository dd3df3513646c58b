//! The placeholder API context object.
//!
//! A [`PlaceholderApi`] owns everything the API shares between callers: the
//! provider registry, the custom pack that ad-hoc placeholders land in, and
//! the list of registration listeners. The host creates one at startup and
//! passes it (usually behind an `Arc`) to whoever needs it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use placeholder_runtime::PlaceholderApi;
//!
//! // Auto-loads config from the current directory
//! let api = PlaceholderApi::new();
//!
//! // Custom configuration path
//! let api = PlaceholderApi::builder()
//!     .config_file("config/placeholders.toml")
//!     .build()?;
//!
//! api.register_provider(Arc::new(PackProvider::new("core", pack)));
//! api.register_static_placeholder("myplugin", "rank", "Gold");
//! let line = api.replace_placeholders(&player, "[{rank}] {player_name}");
//! ```
//!
//! All public operations are fail-soft: invalid input is reported as
//! `false` (or `0`) and a warning in the log, never as a panic.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use placeholder_core::registry::warn_no_provider;
use placeholder_core::{
    BoxedProvider, ListenerRegistry, PlaceholderAddedEvent, PlaceholderEntry, PlaceholderListener,
    PlaceholderName, PlaceholderPack, PlayerContext, ProviderId, ProviderRegistry, Replacer,
};
use tracing::{debug, info, warn};

use crate::config::{ApiConfig, ConfigLoader, validate_config};
use crate::error::RuntimeResult;
use crate::logging;

/// Name of the shared pack that ad-hoc placeholders are registered into.
pub const CUSTOM_PACK_NAME: &str = "custom";

/// Provider id used for static placeholders declared in configuration.
pub const CONFIG_PROVIDER_ID: &str = "config";

/// The shared placeholder state of one host process.
pub struct PlaceholderApi {
    config: ApiConfig,
    registry: ProviderRegistry,
    custom: Arc<PlaceholderPack>,
    listeners: ListenerRegistry,
}

impl PlaceholderApi {
    /// Creates an API context with automatic configuration loading.
    ///
    /// Searches the current directory for a configuration file, initializes
    /// logging and installs configured static placeholders. Falls back to
    /// defaults if the configuration cannot be loaded or is invalid.
    pub fn new() -> Self {
        let config = ConfigLoader::new()
            .with_current_dir()
            .load()
            .and_then(|config| validate_config(&config).map(|()| config))
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config ({e}), using defaults");
                ApiConfig::default()
            });

        Self::from_config(&config)
    }

    /// Creates a builder for custom configuration.
    pub fn builder() -> ApiBuilder {
        ApiBuilder::new()
    }

    /// Creates an API context from configuration and initializes logging.
    pub fn from_config(config: &ApiConfig) -> Self {
        logging::init_from_config(&config.logging);
        Self::with_config(config.clone())
    }

    /// Creates an API context without touching the global log subscriber.
    pub fn with_config(config: ApiConfig) -> Self {
        let api = Self {
            config,
            registry: ProviderRegistry::new(),
            custom: Arc::new(PlaceholderPack::new(CUSTOM_PACK_NAME)),
            listeners: ListenerRegistry::new(),
        };

        for (name, value) in &api.config.placeholders.static_placeholders {
            api.register_static_placeholder(CONFIG_PROVIDER_ID, name, value.as_str());
        }

        info!(
            log_level = %api.config.logging.level,
            static_placeholders = api.custom.count(),
            "Placeholder API initialized"
        );
        api
    }

    /// Returns the configuration this context was built from.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the provider registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the shared custom pack.
    pub fn custom_pack(&self) -> &Arc<PlaceholderPack> {
        &self.custom
    }

    /// Returns the registration listeners.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    // =========================================================================
    // Providers
    // =========================================================================

    /// Registers a placeholder provider.
    ///
    /// The provider's registration callback runs with the custom pack on
    /// every call. Returns `true` if the provider was added, `false` if it
    /// was already present or was rejected.
    pub fn register_provider(&self, provider: BoxedProvider) -> bool {
        match self.registry.register(provider, &self.custom) {
            Ok(added) => added,
            Err(e) => {
                warn!(error = %e, "Rejected placeholder provider");
                false
            }
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Replaces every `{placeholder}` in `input` for `player`.
    ///
    /// Only the first registered provider is consulted. Unknown tokens are
    /// left as written. With no provider installed the input comes back
    /// unchanged.
    pub fn replace_placeholders<'a>(
        &self,
        player: &PlayerContext,
        input: &'a str,
    ) -> Cow<'a, str> {
        match self.registry.replace_placeholders(player, input) {
            Ok(output) => output,
            Err(_) => {
                self.warn_missing_provider();
                Cow::Borrowed(input)
            }
        }
    }

    /// Resolves a single token (without braces) against every provider in
    /// registration order, returning the token unchanged if none has a value.
    pub fn resolve(&self, player: &PlayerContext, token: &str) -> String {
        self.registry.resolve(player, token)
    }

    /// Returns the number of placeholders served by the first provider, or
    /// `0` with no provider installed.
    pub fn loaded_placeholder_count(&self) -> usize {
        self.registry.total_placeholder_count().unwrap_or_else(|_| {
            self.warn_missing_provider();
            0
        })
    }

    fn warn_missing_provider(&self) {
        if self.config.placeholders.warn_missing_provider {
            warn_no_provider();
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers `name` in the custom pack on behalf of `provider`.
    ///
    /// Overwrites any earlier placeholder of the same name, then notifies
    /// every listener, including on overwrite. Returns `false` if the
    /// provider id or the name is unusable.
    pub fn register_placeholder(
        &self,
        provider: impl Into<ProviderId>,
        name: &str,
        replacer: Replacer,
    ) -> bool {
        let provider = provider.into();
        if provider.is_empty() {
            warn!(placeholder = name, "Rejected custom placeholder: provider id is empty");
            return false;
        }
        let name = match PlaceholderName::new(name) {
            Ok(name) => name,
            Err(e) => {
                warn!(provider = %provider, error = %e, "Rejected custom placeholder");
                return false;
            }
        };

        let entry = PlaceholderEntry::new(
            name.clone(),
            self.config.placeholders.custom_description.as_str(),
            false,
            replacer.clone(),
        );
        let replaced = self.custom.insert(entry);
        info!(
            provider = %provider,
            placeholder = %name,
            replaced,
            "{provider} added custom placeholder {}",
            name.token()
        );

        self.listeners.notify(&PlaceholderAddedEvent {
            provider,
            name,
            replacer,
        });
        true
    }

    /// Registers a placeholder that always resolves to `value`.
    pub fn register_static_placeholder(
        &self,
        provider: impl Into<ProviderId>,
        name: &str,
        value: impl Into<String>,
    ) -> bool {
        self.register_placeholder(provider, name, Replacer::fixed(value))
    }

    /// Subscribes `listener` to all future placeholder registrations.
    pub fn add_placeholder_listener<L>(&self, listener: L)
    where
        L: PlaceholderListener + 'static,
    {
        self.listeners.add(Arc::new(listener));
        debug!(listeners = self.listeners.len(), "Placeholder listener added");
    }
}

impl Default for PlaceholderApi {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlaceholderApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderApi")
            .field("registry", &self.registry)
            .field("custom", &self.custom)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ApiBuilder
// =============================================================================

/// Builder for creating a [`PlaceholderApi`] with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// let api = PlaceholderApi::builder()
///     .config_file("config/placeholders.toml")
///     .profile("production")
///     .build()?;
/// ```
pub struct ApiBuilder {
    config_loader: ConfigLoader,
    init_logging: bool,
}

impl ApiBuilder {
    /// Creates a new builder searching the current directory.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
            init_logging: true,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: ApiConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Leaves the global log subscriber to the host.
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    /// Loads and validates the configuration, then builds the context.
    pub fn build(self) -> RuntimeResult<PlaceholderApi> {
        let config = self.config_loader.load()?;
        validate_config(&config)?;
        if self.init_logging {
            Ok(PlaceholderApi::from_config(&config))
        } else {
            Ok(PlaceholderApi::with_config(config))
        }
    }
}

impl Default for ApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placeholder_core::uuid::Uuid;
    use placeholder_core::{OfflinePlayer, OnlinePlayer, PackProvider, ReplaceEvent};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn api() -> PlaceholderApi {
        PlaceholderApi::with_config(ApiConfig::default())
    }

    fn offline() -> PlayerContext {
        OfflinePlayer::new(Uuid::new_v4(), Some("Steve".to_string())).into()
    }

    fn online() -> PlayerContext {
        OnlinePlayer::new(Uuid::new_v4(), "Alex").into()
    }

    fn provider(id: &str, entries: &[(&str, Replacer)]) -> BoxedProvider {
        let pack = Arc::new(PlaceholderPack::new(id));
        for (name, replacer) in entries {
            pack.add_placeholder(name, "", false, replacer.clone())
                .unwrap();
        }
        Arc::new(PackProvider::new(id, pack))
    }

    fn api_with_provider() -> PlaceholderApi {
        let api = api();
        assert!(api.register_provider(provider(
            "core",
            &[("player_name", Replacer::value(|p| p.name().map(str::to_owned)))],
        )));
        api
    }

    #[test]
    fn test_literal_text_passes_through() {
        let api = api_with_provider();
        for input in ["", "plain text", "no tokens } here {", "a { b"] {
            let out = api.replace_placeholders(&offline(), input);
            assert_eq!(out, input);
            assert!(matches!(out, Cow::Borrowed(_)));
        }
    }

    #[test]
    fn test_unknown_token_preserved() {
        let api = api_with_provider();
        assert_eq!(api.replace_placeholders(&offline(), "{unknown}"), "{unknown}");
    }

    #[test]
    fn test_case_insensitive_match() {
        let api = api_with_provider();
        let player = online();

        let upper = api.replace_placeholders(&player, "{PLAYER_NAME}");
        let lower = api.replace_placeholders(&player, "{player_name}");

        assert_eq!(upper, "Alex");
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_overwrite_uses_latest_and_notifies_twice() {
        let api = api_with_provider();
        let events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&events);
        api.add_placeholder_listener(move |_: &PlaceholderAddedEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(api.register_placeholder("plugin", "x", Replacer::fixed("A")));
        assert!(api.register_placeholder("plugin", "X", Replacer::fixed("B")));

        assert_eq!(api.replace_placeholders(&offline(), "{x}"), "B");
        assert_eq!(events.load(Ordering::SeqCst), 2);
        assert_eq!(api.custom_pack().count(), 1);
    }

    #[test]
    fn test_no_recursive_expansion() {
        let api = api_with_provider();
        api.register_static_placeholder("plugin", "a", "{b}");
        api.register_static_placeholder("plugin", "b", "nope");

        assert_eq!(api.replace_placeholders(&offline(), "{a}"), "{b}");
    }

    #[test]
    fn test_empty_registry() {
        let api = api();

        assert_eq!(api.replace_placeholders(&offline(), "hello {x}"), "hello {x}");
        assert_eq!(api.loaded_placeholder_count(), 0);
    }

    #[test]
    fn test_static_placeholder_for_offline_player() {
        let api = api_with_provider();
        assert!(api.register_static_placeholder("plugin", "rank", "Gold"));

        assert_eq!(api.replace_placeholders(&offline(), "[{rank}]"), "[Gold]");
        assert_eq!(api.replace_placeholders(&online(), "[{rank}]"), "[Gold]");
    }

    #[test]
    fn test_listener_receives_normalized_event() {
        let api = api();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        api.add_placeholder_listener(move |e: &PlaceholderAddedEvent| {
            log.lock().push(e.clone());
        });

        let replacer = Replacer::fixed("v");
        api.register_placeholder("MyPlugin", "Server_Name", replacer.clone());

        let events = seen.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].provider.as_str(), "MyPlugin");
        assert_eq!(events[0].name.as_str(), "server_name");
        assert!(events[0].replacer.ptr_eq(&replacer));
    }

    #[test]
    fn test_static_listener_event_carries_fixed_replacer() {
        let api = api();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        api.add_placeholder_listener(move |e: &PlaceholderAddedEvent| {
            log.lock().push(e.replacer.clone());
        });

        api.register_static_placeholder("plugin", "rank", "Gold");

        let replacers = seen.lock();
        assert_eq!(replacers.len(), 1);
        for player in [offline(), online()] {
            let event = ReplaceEvent::new(&player, "RANK");
            assert_eq!(replacers[0].replace(&event), Some("Gold".to_string()));
        }
    }

    /// Log sink shared with a scoped subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn capture_logs<F: FnOnce()>(f: F) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn test_missing_provider_warns() {
        let api = api();

        let resolve_logs = capture_logs(|| {
            assert_eq!(api.replace_placeholders(&offline(), "hello {x}"), "hello {x}");
        });
        assert!(resolve_logs.contains("WARN"));
        assert!(resolve_logs.contains("There is no placeholder provider installed!"));

        let count_logs = capture_logs(|| {
            assert_eq!(api.loaded_placeholder_count(), 0);
        });
        assert!(count_logs.contains("There is no placeholder provider installed!"));
    }

    #[test]
    fn test_missing_provider_warning_can_be_disabled() {
        let mut config = ApiConfig::default();
        config.placeholders.warn_missing_provider = false;
        let api = PlaceholderApi::with_config(config);

        let logs = capture_logs(|| {
            assert_eq!(api.replace_placeholders(&offline(), "hello {x}"), "hello {x}");
            assert_eq!(api.loaded_placeholder_count(), 0);
        });

        assert!(!logs.contains("no placeholder provider"));
    }

    #[test]
    fn test_invalid_registration_fails_closed() {
        let api = api();
        let events = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&events);
        api.add_placeholder_listener(move |_: &PlaceholderAddedEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!api.register_placeholder("", "rank", Replacer::fixed("x")));
        assert!(!api.register_placeholder("plugin", "", Replacer::fixed("x")));
        assert!(!api.register_static_placeholder("plugin", "{rank}", "x"));

        assert_eq!(events.load(Ordering::SeqCst), 0);
        assert!(api.custom_pack().is_empty());
    }

    #[test]
    fn test_custom_entries_carry_configured_description() {
        let mut config = ApiConfig::default();
        config.placeholders.custom_description = "Server placeholder".to_string();
        let api = PlaceholderApi::with_config(config);

        api.register_static_placeholder("plugin", "motd", "Welcome");

        let infos = api.custom_pack().entries();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].description, "Server placeholder");
        assert!(!infos[0].requires_online_player);
    }

    #[test]
    fn test_static_placeholders_from_config() {
        let mut config = ApiConfig::default();
        config
            .placeholders
            .static_placeholders
            .insert("Server".to_string(), "Lobby-1".to_string());
        let api = PlaceholderApi::with_config(config);
        api.register_provider(provider("core", &[]));

        assert!(api.custom_pack().contains("server"));
        assert_eq!(api.replace_placeholders(&offline(), "{server}"), "Lobby-1");
    }

    #[test]
    fn test_register_provider_twice() {
        let api = api();
        let p = provider("core", &[]);

        assert!(api.register_provider(Arc::clone(&p)));
        assert!(!api.register_provider(Arc::clone(&p)));
        assert!(!api.register_provider(provider("", &[])));

        assert_eq!(api.registry().provider_count(), 1);
        assert_eq!(api.resolve(&offline(), "missing"), "missing");
    }

    #[test]
    fn test_loaded_count_uses_first_provider() {
        let api = api();
        api.register_provider(provider(
            "first",
            &[("a", Replacer::fixed("1")), ("b", Replacer::fixed("2"))],
        ));
        api.register_provider(provider("second", &[("c", Replacer::fixed("3"))]));

        assert_eq!(api.loaded_placeholder_count(), 2);
        assert_eq!(api.resolve(&offline(), "c"), "3");
        assert_eq!(api.replace_placeholders(&offline(), "{a}{c}"), "1{c}");
    }

    #[test]
    fn test_listener_may_register_from_callback() {
        let api = Arc::new(api_with_provider());
        let inner = Arc::downgrade(&api);
        api.add_placeholder_listener(move |e: &PlaceholderAddedEvent| {
            if e.name.as_str() == "origin" {
                if let Some(api) = inner.upgrade() {
                    api.register_static_placeholder("mirror", "copy", "copied");
                }
            }
        });

        api.register_static_placeholder("plugin", "origin", "o");

        assert_eq!(api.replace_placeholders(&offline(), "{copy}"), "copied");
    }

    #[test]
    fn test_concurrent_registration_and_resolution() {
        let api = api_with_provider();
        api.register_static_placeholder("plugin", "shared", "start");

        std::thread::scope(|s| {
            for writer in 0..4 {
                let api = &api;
                s.spawn(move || {
                    for i in 0..100 {
                        let name = format!("w{writer}_{i}");
                        assert!(api.register_static_placeholder("plugin", &name, "v"));
                        api.register_static_placeholder("plugin", "shared", format!("{i}"));
                    }
                });
            }
            for _ in 0..4 {
                let api = &api;
                s.spawn(move || {
                    let player = offline();
                    for _ in 0..100 {
                        let out = api.replace_placeholders(&player, "{shared}");
                        assert!(out.parse::<u32>().is_ok() || out == "start");
                    }
                });
            }
        });

        // 400 generated names plus "shared"
        assert_eq!(api.custom_pack().count(), 401);
    }

    #[test]
    fn test_builder_with_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "placeholders.toml",
                r#"
                [placeholders]
                custom_description = "From file"

                [placeholders.static_placeholders]
                rank = "Gold"
                "#,
            )?;

            let api = PlaceholderApi::builder()
                .search_path(jail.directory())
                .without_env()
                .without_logging()
                .build()
                .unwrap();

            assert_eq!(api.config().placeholders.custom_description, "From file");
            assert!(api.custom_pack().contains("rank"));
            Ok(())
        });
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("placeholders.toml", "[logging]\noutput = \"file\"\n")?;

            let result = PlaceholderApi::builder()
                .search_path(jail.directory())
                .without_env()
                .without_logging()
                .build();

            assert!(matches!(
                result,
                Err(crate::error::RuntimeError::Config(_))
            ));
            Ok(())
        });
    }
}
