//! services/learner/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Default order in which story text fields are tried.
pub const DEFAULT_STORY_TEXT_FIELDS: [&str; 4] = ["body", "content", "text", "description"];

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub log_level: Level,
    pub session_size: usize,
    pub examples_per_word: usize,
    /// Comma-separated translation resource ids passed to the verse search.
    pub example_translations: String,
    /// Field names tried, in order, when reading a story's text.
    pub story_text_fields: Vec<String>,
    pub id_token: Option<String>,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub guest: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            request_timeout: Duration::from_millis(15_000),
            log_level: Level::INFO,
            session_size: 10,
            examples_per_word: 2,
            example_translations: "161".to_string(),
            story_text_fields: DEFAULT_STORY_TEXT_FIELDS.iter().map(|f| f.to_string()).collect(),
            id_token: None,
            uid: None,
            email: None,
            guest: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // --- Remote API ---
        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "API_BASE_URL".to_string(),
                format!("'{}' is not an http(s) URL", api_base_url),
            ));
        }

        let request_timeout = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number("REQUEST_TIMEOUT_MS", &raw)?),
            None => defaults.request_timeout,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Session Settings ---
        let session_size = match lookup("SESSION_SIZE") {
            Some(raw) => parse_number("SESSION_SIZE", &raw)? as usize,
            None => defaults.session_size,
        };
        if session_size == 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let examples_per_word = match lookup("EXAMPLES_PER_WORD") {
            Some(raw) => parse_number("EXAMPLES_PER_WORD", &raw)? as usize,
            None => defaults.examples_per_word,
        };
        let example_translations =
            lookup("EXAMPLE_TRANSLATIONS").unwrap_or(defaults.example_translations);

        let story_text_fields = match lookup("STORY_TEXT_FIELDS") {
            Some(raw) => {
                let fields: Vec<String> = raw
                    .split(',')
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty())
                    .collect();
                if fields.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "STORY_TEXT_FIELDS".to_string(),
                        "needs at least one field name".to_string(),
                    ));
                }
                fields
            }
            None => defaults.story_text_fields,
        };

        // --- Identity ---
        let id_token = lookup("LEARNER_ID_TOKEN").filter(|t| !t.is_empty());
        let uid = lookup("LEARNER_UID");
        let email = lookup("LEARNER_EMAIL");
        let guest = match lookup("LEARNER_GUEST") {
            Some(raw) => parse_bool("LEARNER_GUEST", &raw)?,
            None => false,
        };
        if uid.is_some() && id_token.is_none() && !guest {
            return Err(ConfigError::MissingVar("LEARNER_ID_TOKEN".to_string()));
        }

        Ok(Self {
            api_base_url,
            request_timeout,
            log_level,
            session_size,
            examples_per_word,
            example_translations,
            story_text_fields,
            id_token,
            uid,
            email,
            guest,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' is not a boolean", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.session_size, 10);
        assert_eq!(config.examples_per_word, 2);
        assert_eq!(config.story_text_fields, vec!["body", "content", "text", "description"]);
        assert!(!config.guest);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("API_BASE_URL", "https://vocab.example.org/api/"),
            ("SESSION_SIZE", "5"),
            ("STORY_TEXT_FIELDS", "text, body"),
            ("LEARNER_GUEST", "yes"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://vocab.example.org/api");
        assert_eq!(config.session_size, 5);
        assert_eq!(config.story_text_fields, vec!["text", "body"]);
        assert!(config.guest);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SESSION_SIZE", "ten")])),
            Err(ConfigError::InvalidValue(key, _)) if key == "SESSION_SIZE"
        ));
        assert!(Config::from_lookup(lookup(&[("SESSION_SIZE", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("API_BASE_URL", "ftp://x")])).is_err());
        assert!(Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])).is_err());
        assert!(matches!(
            Config::from_lookup(lookup(&[("LEARNER_UID", "u-1")])),
            Err(ConfigError::MissingVar(key)) if key == "LEARNER_ID_TOKEN"
        ));
    }
}
