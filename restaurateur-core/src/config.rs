//! Configuration from environment variables.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::llm::{
    FakeProvider, GenerationParams, GroqProvider, LlmError, LlmProvider, RetryingProvider,
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

/// Environment variable holding the completion-service credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Default server listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },
}

/// Which provider backs the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    /// Canned offline responses, no credential needed.
    Fake,
}

/// Application configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub provider: ProviderKind,
    /// Required when `provider` is [`ProviderKind::Groq`].
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Only read by the server.
    pub bind_addr: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `RESTAURATEUR_PROVIDER`: "groq" (default) or "fake"
    /// - `GROQ_API_KEY`: required for "groq"
    /// - `RESTAURATEUR_MODEL`: model name (default: "llama-3.1-8b-instant")
    /// - `RESTAURATEUR_TEMPERATURE`: sampling temperature (default: 0.7)
    /// - `RESTAURATEUR_BASE_URL`: API base URL
    /// - `RESTAURATEUR_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `RESTAURATEUR_MAX_RETRIES`: retries of transient failures (default: 1)
    /// - `RESTAURATEUR_BIND_ADDR`: server listen address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("RESTAURATEUR_PROVIDER").as_deref() {
            None | Some("groq") => ProviderKind::Groq,
            Some("fake") => ProviderKind::Fake,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "RESTAURATEUR_PROVIDER".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let api_key = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty());
        if provider == ProviderKind::Groq && api_key.is_none() {
            return Err(ConfigError::MissingEnvVar(API_KEY_VAR.to_string()));
        }

        let model = lookup("RESTAURATEUR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            lookup("RESTAURATEUR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let temperature = parse_var(&lookup, "RESTAURATEUR_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                var: "RESTAURATEUR_TEMPERATURE".to_string(),
                value: temperature.to_string(),
            });
        }

        let timeout_secs = parse_var(&lookup, "RESTAURATEUR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_retries = parse_var(&lookup, "RESTAURATEUR_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        let bind_addr =
            lookup("RESTAURATEUR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            provider,
            api_key,
            model,
            temperature,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            bind_addr,
        })
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::new(self.model.clone(), self.temperature)
    }

    /// Build the configured provider stack.
    pub fn build_provider(&self) -> Result<Arc<dyn LlmProvider>, LlmError> {
        match self.provider {
            ProviderKind::Fake => Ok(Arc::new(FakeProvider::with_restaurant_responses())),
            ProviderKind::Groq => {
                let api_key = self.api_key.clone().ok_or_else(|| {
                    LlmError::Authentication(format!("{} is not set", API_KEY_VAR))
                })?;
                let groq = GroqProvider::new(api_key, self.base_url.clone(), self.timeout)?;
                Ok(Arc::new(RetryingProvider::new(groq, self.max_retries)))
            }
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("GROQ_API_KEY", "gsk_test")]).unwrap();
        assert_eq!(config.provider, ProviderKind::Groq);
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_api_key_is_fatal_for_groq() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GROQ_API_KEY"));

        let err = config(&[("GROQ_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_fake_provider_needs_no_key() {
        let config = config(&[("RESTAURATEUR_PROVIDER", "fake")]).unwrap();
        assert_eq!(config.provider, ProviderKind::Fake);
        assert_eq!(config.build_provider().unwrap().provider_name(), "fake");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GROQ_API_KEY", "k"),
            ("RESTAURATEUR_MODEL", "llama-3.3-70b-versatile"),
            ("RESTAURATEUR_TEMPERATURE", "0.6"),
            ("RESTAURATEUR_TIMEOUT_SECS", "5"),
            ("RESTAURATEUR_MAX_RETRIES", "0"),
            ("RESTAURATEUR_BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.generation_params().model, "llama-3.3-70b-versatile");
        assert_eq!(config.generation_params().temperature, 0.6);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_invalid_values() {
        let err = config(&[("GROQ_API_KEY", "k"), ("RESTAURATEUR_TIMEOUT_SECS", "soon")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "RESTAURATEUR_TIMEOUT_SECS"));

        let err = config(&[("GROQ_API_KEY", "k"), ("RESTAURATEUR_TEMPERATURE", "3.5")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = config(&[("RESTAURATEUR_PROVIDER", "openai")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config(&[("GROQ_API_KEY", "gsk_secret")]).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_build_groq_provider() {
        let config = config(&[("GROQ_API_KEY", "k")]).unwrap();
        assert_eq!(config.build_provider().unwrap().provider_name(), "groq");
    }
}
