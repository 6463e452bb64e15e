use std::fmt;

use serde::Deserialize;
use config::{Config, ConfigError};
use tracing::debug;

pub const DEFAULT_CONFIG: &str = "config/default";

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const REGION_NAME_VAR: &str = "AWS_REGION_NAME";
pub const REGION_VAR: &str = "AWS_REGION";

/// Loads `.env` from the working directory into the process environment.
///
/// Call once from `main`, before anything reads the environment. A missing
/// file is not an error.
pub fn init_env() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = ?path, "Loaded environment file"),
        Err(e) => debug!(error = %e, "No environment file loaded"),
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the object store lives. Empty means the AWS default endpoint.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path(DEFAULT_CONFIG)
    }

    /// Reads the optional settings file at `path` (extension inferred), then
    /// `APP_`-prefixed environment variables such as `APP_STORAGE__ENDPOINT`.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;

        debug!(
            endpoint = ?settings.storage.endpoint,
            force_path_style = settings.storage.force_path_style,
            "Parsed storage settings"
        );

        Ok(settings)
    }
}

/// Static credentials for the object store, read once at startup.
///
/// Nothing here is validated; bad values surface when the bucket probe fails.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
}

impl Credentials {
    pub fn resolve() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            access_key_id: read(ACCESS_KEY_ID_VAR),
            secret_access_key: read(SECRET_ACCESS_KEY_VAR),
            region: read(REGION_NAME_VAR).or_else(|| read(REGION_VAR)),
        }
    }

    /// Both halves of the key pair, when present.
    pub fn key_pair(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .finish()
    }
}
