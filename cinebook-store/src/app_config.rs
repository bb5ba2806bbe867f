use serde::Deserialize;
use std::env;
use cinebook_catalog::{default_catalog, ShowtimeConfig, SEAT_COUNT};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<ShowtimeConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Pending requests the booking queue holds before callers wait.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Events a slow `/events` subscriber may lag behind before skipping.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Ticket ceiling for showtimes that don't set their own.
    #[serde(default = "default_max_tickets")]
    pub max_tickets: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            event_buffer: default_event_buffer(),
            max_tickets: default_max_tickets(),
        }
    }
}

/// Settings for talking to a remote booking service. When `enabled`, the API
/// forwards every operation there instead of keeping a local store.
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_port() -> u16 { 8000 }
fn default_queue_capacity() -> usize { 64 }
fn default_event_buffer() -> usize { 100 }
fn default_max_tickets() -> usize { SEAT_COUNT }
fn default_base_url() -> String { "http://127.0.0.1:8000".to_string() }
fn default_timeout_seconds() -> u64 { 10 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `CINEBOOK__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("CINEBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parses a TOML document on its own, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            booking: BookingConfig::default(),
            remote: RemoteConfig::default(),
            catalog: default_catalog(),
        }
    }
}
