use std::str::FromStr;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::EnumString;

/// Which deployment flavor the process runs as, selected by the
/// `APP_ENVIRONMENT` variable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, EnumString, strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Production,
    Development,
    Local,
    Test,
}

/// Root of all service configuration: struct defaults, overridden by an
/// optional per-environment yaml file, overridden by prefixed environment
/// variables.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSource {
    pub environment: Environment,
}

impl ConfigSource {
    pub fn new() -> Result<ConfigSource, ConfigError> {
        let environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(value) => Environment::from_str(&value)
                .map_err(|e| ConfigError::Message(format!("invalid APP_ENVIRONMENT: {e}")))?,
            Err(_) => Environment::Local,
        };

        Ok(ConfigSource { environment })
    }

    pub fn config<T>(&self, env_prefix: &str, defaults: T) -> Result<T, ConfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        let file = format!("config/{}", self.environment.to_string().to_lowercase());

        Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::with_name(&file).required(false))
            .add_source(EnvironmentSource::with_prefix(env_prefix).separator("__"))
            .build()?
            .try_deserialize()
    }
}
