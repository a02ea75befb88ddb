use serde::Deserialize;
use std::{env, fmt, str::FromStr};

use crate::storage::repository::DEFAULT_KEY_PREFIX;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
    Mongo,
}

impl FromStr for StorageBackend {
    type Err = config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(config::ConfigError::Message(format!(
                "unknown storage backend: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
            Self::Mongo => "mongo",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub storage_backend: StorageBackend,
    pub key_prefix: String,
    pub redis_uri: String,
    pub mongo_uri: String,
    pub mongo_database: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, then the local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env_name = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml, then APP__SECTION__KEY overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_addr = settings
            .get_string("server.addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let storage_backend = match settings.get_string("storage.backend") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Memory,
        };

        let key_prefix = settings
            .get_string("storage.key_prefix")
            .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string());

        let redis_uri = settings
            .get_string("redis.uri")
            .or_else(|_| env::var("REDIS_URI"))
            .unwrap_or_else(|_| {
                let host = env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
                let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
                format!("redis://{}:{}/0", host, port)
            });

        let mongo_uri = settings
            .get_string("database.mongo_uri")
            .or_else(|_| env::var("MONGO_URI"))
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mongo_database = settings
            .get_string("database.mongo_database")
            .or_else(|_| env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "edubattle".to_string());

        let config = Config {
            bind_addr,
            storage_backend,
            key_prefix,
            redis_uri,
            mongo_uri,
            mongo_database,
        };
        config.validate()?;
        Ok(config)
    }

    /// Memory backend with default keys, for tests and local runs.
    pub fn in_memory() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            storage_backend: StorageBackend::Memory,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            redis_uri: "redis://127.0.0.1:6379/0".to_string(),
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: "edubattle".to_string(),
        }
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.key_prefix.is_empty() {
            return Err(config::ConfigError::Message(
                "storage.key_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
