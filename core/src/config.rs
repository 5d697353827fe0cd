//! Client configuration and default values.
//!
//! # Design
//! Defaults live here as constants so that the verb shorthands in
//! `RestClient` and `RestyConfig::default()` agree on them. Environment
//! parsing goes through `from_lookup`, which takes a plain lookup closure, so
//! it can be tested without touching the process environment.

use std::time::Duration;

use crate::error::{RestError, Result};

/// Default connection timeout applied when a call does not pass one.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default read timeout applied when a call does not pass one.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(5000);

/// Media type used for request bodies when a call does not pass one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

pub const ENV_DEV_MODE: &str = "RESTY_DEV_MODE";
pub const ENV_CONNECTION_TIMEOUT_MS: &str = "RESTY_CONNECTION_TIMEOUT_MS";
pub const ENV_READ_TIMEOUT_MS: &str = "RESTY_READ_TIMEOUT_MS";
pub const ENV_MEDIA_TYPE: &str = "RESTY_MEDIA_TYPE";

/// Connect and read timeouts for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connection: Duration,
    pub read: Duration,
}

impl Timeouts {
    pub fn new(connection: Duration, read: Duration) -> Self {
        Self { connection, read }
    }

    /// Both timeouts given in milliseconds.
    pub fn from_millis(connection_ms: u64, read_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(connection_ms),
            Duration::from_millis(read_ms),
        )
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }
}

/// Settings for a `Resty` client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestyConfig {
    /// Accept any TLS certificate. Local and mock endpoints only.
    pub dev_mode: bool,
    /// Timeouts used by the verb shorthands.
    pub timeouts: Timeouts,
    /// Media type used by the body-carrying verb shorthands.
    pub media_type: String,
}

impl Default for RestyConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            timeouts: Timeouts::default(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
        }
    }
}

impl RestyConfig {
    /// Reads `RESTY_DEV_MODE`, `RESTY_CONNECTION_TIMEOUT_MS`,
    /// `RESTY_READ_TIMEOUT_MS` and `RESTY_MEDIA_TYPE`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DEV_MODE) {
            config.dev_mode = parse_flag(&raw)
                .ok_or_else(|| RestError::config("dev_mode", format!("not a boolean: {raw:?}")))?;
        }
        if let Some(raw) = lookup(ENV_CONNECTION_TIMEOUT_MS) {
            config.timeouts.connection = parse_millis("connection_timeout", &raw)?;
        }
        if let Some(raw) = lookup(ENV_READ_TIMEOUT_MS) {
            config.timeouts.read = parse_millis("read_timeout", &raw)?;
        }
        if let Some(raw) = lookup(ENV_MEDIA_TYPE) {
            config.media_type = raw.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects zero timeouts and media types that do not parse.
    pub fn validate(&self) -> Result<()> {
        if self.timeouts.connection.is_zero() {
            return Err(RestError::config(
                "connection_timeout",
                "must be greater than zero",
            ));
        }
        if self.timeouts.read.is_zero() {
            return Err(RestError::config("read_timeout", "must be greater than zero"));
        }
        if self.media_type.parse::<mime::Mime>().is_err() {
            return Err(RestError::config(
                "media_type",
                format!("not a media type: {:?}", self.media_type),
            ));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_millis(field: &'static str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| RestError::config(field, format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_five_seconds_and_json() {
        let config = RestyConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.timeouts.connection, Duration::from_millis(5000));
        assert_eq!(config.timeouts.read, Duration::from_millis(5000));
        assert_eq!(config.media_type, "application/json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = RestyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RestyConfig::default());
    }

    #[test]
    fn environment_overrides_every_field() {
        let config = RestyConfig::from_lookup(lookup(&[
            (ENV_DEV_MODE, "true"),
            (ENV_CONNECTION_TIMEOUT_MS, "250"),
            (ENV_READ_TIMEOUT_MS, " 1500 "),
            (ENV_MEDIA_TYPE, "text/plain"),
        ]))
        .unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.timeouts, Timeouts::from_millis(250, 1500));
        assert_eq!(config.media_type, "text/plain");
    }

    #[test]
    fn malformed_flag_is_rejected() {
        let err = RestyConfig::from_lookup(lookup(&[(ENV_DEV_MODE, "maybe")])).unwrap_err();
        assert!(matches!(err, RestError::Config { field: "dev_mode", .. }));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err =
            RestyConfig::from_lookup(lookup(&[(ENV_READ_TIMEOUT_MS, "5s")])).unwrap_err();
        assert!(matches!(err, RestError::Config { field: "read_timeout", .. }));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let err = RestyConfig::from_lookup(lookup(&[(ENV_CONNECTION_TIMEOUT_MS, "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RestError::Config {
                field: "connection_timeout",
                ..
            }
        ));
    }

    #[test]
    fn unparseable_media_type_fails_validation() {
        let config = RestyConfig {
            media_type: "json".to_string(),
            ..RestyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RestError::Config { field: "media_type", .. })
        ));
    }
}
