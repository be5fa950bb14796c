use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::presence::HeartbeatConfig;
use crate::room::DEFAULT_ROOM_ID;
use crate::shared::AppError;

/// Server settings, read from the environment with sensible defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub default_room: String,
    pub heartbeat: HeartbeatConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            default_room: DEFAULT_ROOM_ID.to_string(),
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `SHRIMP_BIND_ADDR`, `SHRIMP_PORT`, `SHRIMP_DEFAULT_ROOM`,
    /// `HEARTBEAT_INTERVAL_MS`, `HEARTBEAT_MAX_MISSED` and
    /// `HEARTBEAT_PING_EXPIRY_TICKS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let interval_ms = parse_or(
            &lookup,
            "HEARTBEAT_INTERVAL_MS",
            defaults.heartbeat.interval.as_millis() as u64,
        );

        Self {
            bind_addr: lookup("SHRIMP_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or(&lookup, "SHRIMP_PORT", defaults.port),
            default_room: lookup("SHRIMP_DEFAULT_ROOM")
                .filter(|room| !room.trim().is_empty())
                .unwrap_or(defaults.default_room),
            heartbeat: HeartbeatConfig {
                interval: Duration::from_millis(interval_ms),
                max_missed_pings: parse_or(
                    &lookup,
                    "HEARTBEAT_MAX_MISSED",
                    defaults.heartbeat.max_missed_pings,
                ),
                ping_expiry_ticks: parse_or(
                    &lookup,
                    "HEARTBEAT_PING_EXPIRY_TICKS",
                    defaults.heartbeat.ping_expiry_ticks,
                ),
            },
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.heartbeat.validate()
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = %key, value = %raw, "Ignoring unparsable config value");
            default
        }),
        None => default,
    }
}
