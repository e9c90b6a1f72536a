//! Shopsearch: a product search screen as a Zellij plugin.
//!
//! Shopsearch provides:
//! - A search input with debounced autocomplete suggestions
//! - Trending searches and category browsing
//! - Product search with a results table
//! - Refresh of the browse lists, with loading and error states
//!
//! All data comes from an external search API reached over HTTP.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce                         │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────┐                   ┌───────────────┐
//! │ UI Layer      │                   │ API Layer     │
//! │ (ui/)         │                   │ (api/)        │
//! │ - Rendering   │                   │ - Request ids │
//! │ - Theming     │                   │ - HTTP calls  │
//! │ - Components  │                   │ - Decoding    │
//! └───────────────┘                   └───────────────┘
//!         │                                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Product model (domain/product)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based span export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/shopsearch.wasm" {
//!         api_url "https://shop.example.com/api"
//!         api_token "secret"
//!         debounce_ms "300"
//!         max_suggestions "8"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request web access, subscribe to events.
//! 2. **Permission granted**: `Event::Ready` fetches categories and trending
//!    searches in parallel.
//! 3. **Typing**: every keystroke schedules a debounce timer; the last timer
//!    of a burst fetches suggestions.
//! 4. **Enter / selection**: a product search fills the results table.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Ready)?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use api::{ApiRequest, ApiResponse, ApiSettings};
pub use app::{handle_event, Action, AppState, Event, Focus, Screen};
pub use domain::{Product, Result, SearchError, SearchResults};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Search API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/shopsearch.wasm" {
///     api_url "http://localhost:8080/api"
///     debounce_ms "250"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the search API, without trailing slash.
    pub api_url: String,

    /// Bearer token sent with every request, if set.
    pub api_token: Option<String>,

    /// Quiet period after the last keystroke before suggestions are fetched.
    ///
    /// Default: 300
    pub debounce_ms: u64,

    /// Maximum number of suggestions shown. Default: 8
    pub max_suggestions: usize,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; a leading `~` refers to `/host`.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            debounce_ms: 300,
            max_suggestions: app::state::DEFAULT_MAX_SUGGESTIONS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and malformed values fall back to defaults:
    /// a blank `api_url`, a non-numeric `debounce_ms`, or a `max_suggestions`
    /// that is not a positive integer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use shopsearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://shop.example.com/api".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://shop.example.com/api");
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let debounce_ms = non_blank("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let max_suggestions = non_blank("max_suggestions")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_suggestions);

        Self {
            api_url: non_blank("api_url").unwrap_or(defaults.api_url),
            api_token: non_blank("api_token"),
            debounce_ms,
            max_suggestions,
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
        }
    }

    /// HTTP settings for the search API.
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings::new(&self.api_url, self.api_token.clone())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Loads the configured theme: `theme_file` first, then `theme_name`,
    /// then the default. Failures are logged and fall through to the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial screen state from configuration.
///
/// The state starts empty; the shim sends [`Event::Ready`] once web access is
/// granted to load the browse lists.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        api_url = %config.api_url,
        debounce_ms = config.debounce_ms,
        max_suggestions = config.max_suggestions,
        "initializing shopsearch plugin"
    );

    AppState::with_settings(config.load_theme(), config.debounce(), config.max_suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "https://shop.example.com/api/"),
            ("api_token", "abc"),
            ("debounce_ms", "150"),
            ("max_suggestions", "5"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_url, "https://shop.example.com/api/");
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "   "),
            ("api_token", ""),
            ("debounce_ms", "-1"),
            ("max_suggestions", "0"),
        ]));

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.max_suggestions, 8);
    }

    #[test]
    fn theme_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = include_str!("../themes/catppuccin-latte.toml").replace("catppuccin-latte", "mine");
        file.write_all(contents.as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "mine");
    }

    #[test]
    fn bad_theme_sources_fall_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            theme_file: Some("/definitely/missing.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());
    }

    #[test]
    fn initialize_applies_settings() {
        let config = Config {
            debounce_ms: 50,
            max_suggestions: 3,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.max_suggestions, 3);
        assert_eq!(state.debouncer.delay(), Duration::from_millis(50));
        assert_eq!(state.screen(), Screen::Empty);
    }
}
