//! Configuration management for redline
//!
//! Settings load from environment variables with sensible defaults.
//! Configuration covers backend selection, request limits and logging.
//!
//! # Environment Variables
//!
//! ## Redline Configuration
//! - `REDLINE_PROVIDER`: Provider selection (openai|anthropic|gemini|groq|xai|ollama) - default: "openai"
//! - `REDLINE_MODEL`: Model name - default depends on provider
//! - `REDLINE_REQUEST_TIMEOUT`: Per-request timeout in seconds - default: "120"
//! - `REDLINE_MAX_CLAUSES`: Cap on analyzed clauses per contract, 0 = unlimited - default: "0"
//! - `REDLINE_LOG_LEVEL`: Logging level - default: "info"
//! - `REDLINE_API_BASE_URL`: Custom endpoint for OpenAI-compatible servers - optional
//!
//! ## Provider Configuration
//! These environment variables are read directly by the genai library:
//! - **OpenAI**: `OPENAI_API_KEY` (required)
//! - **Anthropic**: `ANTHROPIC_API_KEY` (required)
//! - **Gemini**: `GEMINI_API_KEY` (required)
//! - **Groq**: `GROQ_API_KEY` (required)
//! - **xAI**: `XAI_API_KEY` (required)
//! - **Ollama**: `OLLAMA_HOST` (default: http://localhost:11434)
//!
//! # Example
//!
//! ```no_run
//! use redline::config::RedlineConfig;
//!
//! let config = RedlineConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use genai::adapter::AdapterKind;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_CLAUSES: usize = 0; // unlimited

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Request timeout must be between 1 and 600 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Main configuration structure for redline
///
/// Constructed with `Default::default()`, which reads REDLINE_* environment
/// variables and falls back to sensible defaults for missing or unparseable
/// values.
#[derive(Debug, Clone)]
pub struct RedlineConfig {
    /// LLM provider (from genai)
    pub provider: AdapterKind,

    /// Model name to use for analysis (provider-specific)
    pub model: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Cap on analyzed clauses per contract; 0 means unlimited
    pub max_clauses: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RedlineConfig {
    fn default() -> Self {
        let provider = env::var("REDLINE_PROVIDER")
            .ok()
            .and_then(|s| parse_provider(&s))
            .unwrap_or(AdapterKind::OpenAI);

        let model = env::var("REDLINE_MODEL")
            .ok()
            .unwrap_or_else(|| default_model(provider));

        let request_timeout_secs = env::var("REDLINE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_clauses = env::var("REDLINE_MAX_CLAUSES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CLAUSES);

        let log_level = env::var("REDLINE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            request_timeout_secs,
            max_clauses,
            log_level,
        }
    }
}

impl RedlineConfig {
    /// Validates the configuration
    ///
    /// Provider-specific validation (API keys, endpoints) is handled by
    /// genai when the backend is initialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Timeout must be at least 1 second, at most 10 minutes
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            return Err(ConfigError::InvalidTimeout(self.request_timeout_secs));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Display for RedlineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Redline Configuration:")?;
        writeln!(f, "  Provider: {:?}", self.provider)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        if self.max_clauses > 0 {
            writeln!(f, "  Max Clauses: {}", self.max_clauses)?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

/// Maps a provider name from configuration to its genai adapter. Accepts
/// the vendor aliases users actually type.
pub fn parse_provider(s: &str) -> Option<AdapterKind> {
    match s.to_lowercase().as_str() {
        "openai" => Some(AdapterKind::OpenAI),
        "anthropic" | "claude" => Some(AdapterKind::Anthropic),
        "gemini" | "google" => Some(AdapterKind::Gemini),
        "groq" => Some(AdapterKind::Groq),
        "xai" | "grok" => Some(AdapterKind::Xai),
        "ollama" => Some(AdapterKind::Ollama),
        _ => None,
    }
}

/// Default model for a provider, used when `REDLINE_MODEL` is not set.
pub fn default_model(provider: AdapterKind) -> String {
    let model = match provider {
        AdapterKind::Ollama => DEFAULT_OLLAMA_MODEL,
        AdapterKind::Anthropic => "claude-3-5-haiku-latest",
        AdapterKind::Gemini => "gemini-2.0-flash",
        AdapterKind::Groq => "llama-3.3-70b-versatile",
        AdapterKind::Xai => "grok-2-latest",
        _ => DEFAULT_OPENAI_MODEL,
    };
    model.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("REDLINE_PROVIDER"),
            EnvGuard::unset("REDLINE_MODEL"),
            EnvGuard::unset("REDLINE_REQUEST_TIMEOUT"),
            EnvGuard::unset("REDLINE_MAX_CLAUSES"),
            EnvGuard::unset("REDLINE_LOG_LEVEL"),
        ];

        let config = RedlineConfig::default();

        assert!(matches!(config.provider, AdapterKind::OpenAI));
        assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_clauses, DEFAULT_MAX_CLAUSES);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("REDLINE_PROVIDER", "ollama"),
            EnvGuard::set("REDLINE_MODEL", "custom-model"),
            EnvGuard::set("REDLINE_REQUEST_TIMEOUT", "60"),
            EnvGuard::set("REDLINE_MAX_CLAUSES", "25"),
            EnvGuard::set("REDLINE_LOG_LEVEL", "debug"),
        ];

        let config = RedlineConfig::default();

        assert!(matches!(config.provider, AdapterKind::Ollama));
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_clauses, 25);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_provider_default_model() {
        let _guards = vec![
            EnvGuard::set("REDLINE_PROVIDER", "ollama"),
            EnvGuard::unset("REDLINE_MODEL"),
        ];

        let config = RedlineConfig::default();
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back() {
        let _guards = vec![
            EnvGuard::set("REDLINE_PROVIDER", "not-a-provider"),
            EnvGuard::unset("REDLINE_MODEL"),
            EnvGuard::set("REDLINE_REQUEST_TIMEOUT", "abc"),
            EnvGuard::set("REDLINE_MAX_CLAUSES", "-3"),
        ];

        let config = RedlineConfig::default();

        assert!(matches!(config.provider, AdapterKind::OpenAI));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_clauses, DEFAULT_MAX_CLAUSES);
    }

    #[test]
    fn test_configuration_validation_valid() {
        let config = RedlineConfig {
            provider: AdapterKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 120,
            max_clauses: 0,
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_validation_invalid_timeout() {
        let mut config = RedlineConfig {
            provider: AdapterKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 0,
            max_clauses: 0,
            log_level: "info".to_string(),
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(0))
        ));

        config.request_timeout_secs = 601;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(601))
        ));
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let config = RedlineConfig {
            provider: AdapterKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 120,
            max_clauses: 0,
            log_level: "verbose".to_string(),
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_parse_provider_aliases() {
        assert!(matches!(
            parse_provider("claude"),
            Some(AdapterKind::Anthropic)
        ));
        assert!(matches!(parse_provider("grok"), Some(AdapterKind::Xai)));
        assert!(matches!(parse_provider("OpenAI"), Some(AdapterKind::OpenAI)));
        assert!(parse_provider("mistral").is_none());
    }

    #[test]
    fn test_config_display() {
        let config = RedlineConfig {
            provider: AdapterKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 120,
            max_clauses: 0,
            log_level: "info".to_string(),
        };

        let display = format!("{}", config);
        assert!(display.contains("Redline Configuration:"));
        assert!(display.contains("Provider:"));
        assert!(display.contains("gpt-4o-mini"));
    }
}
