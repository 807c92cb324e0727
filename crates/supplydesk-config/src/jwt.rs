//! Token signing settings.
//!
//! Loaded from the environment:
//!
//! | variable | default |
//! |----------|---------|
//! | `JWT_SECRET` | required |
//! | `JWT_EXPIRY_HOURS` | `2` |
//! | `JWT_ISSUER` | `supplydesk` |
//! | `JWT_AUDIENCE` | `https://localhost` |
//!
//! or, when `APP_SETTINGS_FILE` points to a JSON file, from its
//! `AppSettings` section:
//!
//! ```json
//! {"AppSettings": {"secret": "...", "expiracaoHora": 2, "emissor": "supplydesk", "validoEm": "https://localhost"}}
//! ```

use std::{env, fmt, fs, path::Path};

use serde::Deserialize;

const DEFAULT_EXPIRY_HOURS: u32 = 2;
const DEFAULT_ISSUER: &str = "supplydesk";
const DEFAULT_AUDIENCE: &str = "https://localhost";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("signing secret is missing or empty")]
    MissingSecret,
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable signing settings, loaded once and shared by reference.
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(rename = "expiracaoHora", default = "default_expiry_hours")]
    pub expiry_hours: u32,
    #[serde(rename = "emissor", default = "default_issuer")]
    pub issuer: String,
    #[serde(rename = "validoEm", default = "default_audience")]
    pub audience: String,
}

#[derive(Deserialize)]
struct SettingsFile {
    #[serde(rename = "AppSettings")]
    app_settings: JwtConfig,
}

fn default_expiry_hours() -> u32 {
    DEFAULT_EXPIRY_HOURS
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

impl JwtConfig {
    /// Reads `APP_SETTINGS_FILE` when set, the `JWT_*` variables otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var("APP_SETTINGS_FILE") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, validating the result.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expiry_hours = match lookup("JWT_EXPIRY_HOURS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "JWT_EXPIRY_HOURS",
                value: raw,
            })?,
            None => DEFAULT_EXPIRY_HOURS,
        };

        Self {
            secret: lookup("JWT_SECRET").unwrap_or_default(),
            expiry_hours,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(default_issuer),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(default_audience),
        }
        .validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Accepts either a document with an `AppSettings` section or the bare
    /// settings object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let config = if value.get("AppSettings").is_some() {
            serde_json::from_value::<SettingsFile>(value)?.app_settings
        } else {
            serde_json::from_value::<JwtConfig>(value)?
        };
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.expiry_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "expiry_hours",
                value: "0".to_string(),
            });
        }
        Ok(self)
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        i64::from(self.expiry_hours) * 3600
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_hours", &self.expiry_hours)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
