use std::time::Duration;

use config::ConfigError;
use gatewatch_core::{ConfigSource, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub environment: Environment,
    pub feed_address: String,
    pub zones_address: String,
    /// Fixed delay before reconnecting after the feed closes.
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,
    /// Cadence of animation frames.
    #[serde(with = "humantime_serde")]
    pub frame_interval: Duration,
    pub channel_buffer_size: usize,
}

impl Settings {
    pub fn new(source: ConfigSource) -> Result<Self, ConfigError> {
        source.config("GATEWATCH_CONSUMER", Self::defaults(source.environment))
    }

    fn defaults(environment: Environment) -> Settings {
        Settings {
            environment,
            feed_address: "http://localhost:8080/ws".to_string(),
            zones_address: "http://localhost:8080/zones/custom".to_string(),
            reconnect_delay: Duration::from_millis(1500),
            frame_interval: Duration::from_millis(33),
            channel_buffer_size: 64,
        }
    }
}
