use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Database used when neither `MONGO_DATABASE` nor the URI path names one.
pub const DEFAULT_DATABASE: &str = "test";

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MongoConfig {
    /// Connection string. A missing value is not a load error: the service
    /// starts degraded and `/items` answers 503.
    pub uri: Option<String>,
    /// Overrides the database named in the URI path.
    pub database: Option<String>,
}

impl ItemsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(ItemsConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: non_empty_env("MONGO_URI"),
                database: non_empty_env("MONGO_DATABASE"),
            },
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
