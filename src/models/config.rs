//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_drain_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Copy, Debug, Deserialize)]
/// Global token-bucket settings shared by every endpoint.
pub struct RateLimitConfig {
    /// Maximum number of requests admitted back to back.
    #[serde(default = "RateLimitConfig::default_burst")]
    pub burst: u32,
    /// Tokens restored per second.
    #[serde(default = "RateLimitConfig::default_per_second")]
    pub per_second: f64,
}

impl RateLimitConfig {
    fn default_burst() -> u32 {
        3
    }

    fn default_per_second() -> f64 {
        1.0
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: Self::default_burst(),
            per_second: Self::default_per_second(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Signing key for flash-message cookies, at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }
}
