//! Relay and widget configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Both binaries ship usable defaults so
//! that `parlor-relay` and `parlor-chat` find each other with no setup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ChatError;

/// Default relay bind address and the widget's matching endpoint.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9876";

/// Default endpoint the widget connects to.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:9876/";

/// How the relay routes chat frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayMode {
    /// Forward every frame to all other connections, prefixed with the
    /// sender's display name.
    #[default]
    Broadcast,
    /// Send every frame back to its sender, verbatim.
    Echo,
}

impl FromStr for RelayMode {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broadcast" => Ok(Self::Broadcast),
            "echo" => Ok(Self::Echo),
            other => Err(ChatError::Config(format!("unknown RELAY_MODE {other:?}"))),
        }
    }
}

/// Log output format for the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the relay to (e.g. `127.0.0.1:9876`).
    pub listen_addr: SocketAddr,

    /// Capacity of the event bus broadcast channel.
    pub event_bus_capacity: usize,

    /// Maximum number of simultaneous WebSocket connections.
    pub max_clients: usize,

    /// Frame routing mode.
    pub mode: RelayMode,

    /// Whether to read operator commands from stdin.
    pub console_enabled: bool,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 9876)),
            event_bus_capacity: 1024,
            max_clients: 256,
            mode: RelayMode::Broadcast,
            console_enabled: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if `LISTEN_ADDR` or `RELAY_MODE` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, ChatError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| ChatError::Config(format!("LISTEN_ADDR: {e}")))?;

        let mode = match std::env::var("RELAY_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => RelayMode::default(),
        };

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json" | "JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1024).max(1),
            max_clients: parse_env("MAX_CLIENTS", 256),
            mode,
            console_enabled: parse_env_bool("RELAY_CONSOLE", true),
            log_format,
        })
    }
}

/// Chat widget configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay.
    pub server_url: String,

    /// Where the display name is persisted.
    pub name_file: PathBuf,

    /// How long the disconnect banner stays before fading.
    pub banner_dismiss_after: Duration,

    /// Length of the banner fade before removal.
    pub banner_fade: Duration,

    /// File that receives log output. `None` discards logs.
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            name_file: PathBuf::from(".parlor-name.json"),
            banner_dismiss_after: Duration::from_millis(5000),
            banner_fade: Duration::from_millis(400),
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Every key is optional; invalid numeric values fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            server_url: std::env::var("SERVER_URL").unwrap_or(defaults.server_url),
            name_file: std::env::var("NAME_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.name_file),
            banner_dismiss_after: Duration::from_millis(parse_env("BANNER_DISMISS_MS", 5000)),
            banner_fade: Duration::from_millis(parse_env("BANNER_FADE_MS", 400)),
            log_file: std::env::var("CHAT_LOG_FILE").ok().map(PathBuf::from),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true" | "TRUE" | "1") => true,
        Some("false" | "FALSE" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_mode_parses_case_insensitively() {
        assert_eq!("Echo".parse::<RelayMode>().ok(), Some(RelayMode::Echo));
        assert_eq!(" broadcast ".parse::<RelayMode>().ok(), Some(RelayMode::Broadcast));
        assert!("fanout".parse::<RelayMode>().is_err());
    }

    #[test]
    fn defaults_point_at_each_other() {
        let relay = RelayConfig::default();
        let client = ClientConfig::default();
        assert_eq!(relay.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert!(client.server_url.contains(DEFAULT_LISTEN_ADDR));
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("PARLOR_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
        assert!(parse_env_bool("PARLOR_TEST_SURELY_UNSET_KEY", true));
    }
}
