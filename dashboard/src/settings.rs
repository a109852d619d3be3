use std::time::Duration;

use config::ConfigError;
use gatewatch_core::{ConfigSource, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub environment: Environment,
    pub bookings_address: String,
    pub login_address: String,
    /// Fixed cadence of the bookings re-fetch.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// The opaque bearer token of the signed-in user, when one exists.
    pub token: Option<String>,
}

impl Settings {
    pub fn new(source: ConfigSource) -> Result<Self, ConfigError> {
        source.config("GATEWATCH_DASHBOARD", Self::defaults(source.environment))
    }

    fn defaults(environment: Environment) -> Settings {
        Settings {
            environment,
            bookings_address: "http://localhost:8080/api/location/active".to_string(),
            login_address: "http://localhost:8080/admin/login".to_string(),
            poll_interval: Duration::from_secs(10),
            token: None,
        }
    }
}
