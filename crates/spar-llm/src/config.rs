//! Provider configuration
//!
//! Handles API keys, provider selection and model names.

use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

use crate::{GeminiProvider, LlmProvider, MockProvider, OllamaProvider};

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key (env: GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// Ollama base URL (default: http://localhost:11434)
    pub ollama_url: String,
    /// Default provider (env: SPAR_PROVIDER)
    pub default_provider: String,
    /// Default model (env: SPAR_MODEL)
    pub default_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            ollama_url: "http://localhost:11434".to_string(),
            default_provider: "gemini".to_string(),
            default_model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            default_provider: env::var("SPAR_PROVIDER").unwrap_or(defaults.default_provider),
            default_model: env::var("SPAR_MODEL").unwrap_or(defaults.default_model),
        }
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        match provider.to_lowercase().as_str() {
            "gemini" => self.gemini_api_key.as_deref(),
            _ => None,
        }
    }

    /// Check if a provider is configured
    pub fn is_configured(&self, provider: &str) -> bool {
        match provider.to_lowercase().as_str() {
            "gemini" => self.gemini_api_key.is_some(),
            "ollama" | "mock" => true, // No key needed
            _ => false,
        }
    }

    /// List available providers
    pub fn available_providers(&self) -> Vec<&str> {
        let mut providers = vec!["mock", "ollama"];
        if self.gemini_api_key.is_some() {
            providers.push("gemini");
        }
        providers
    }

    /// Construct the named provider, or the default one when `name` is `None`
    pub fn build_provider(&self, name: Option<&str>) -> Result<Arc<dyn LlmProvider>, ConfigError> {
        let name = name.unwrap_or(&self.default_provider).to_lowercase();
        match name.as_str() {
            "gemini" => {
                let key = self
                    .gemini_api_key
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
                Ok(Arc::new(GeminiProvider::new(key, &self.default_model)))
            }
            "ollama" => {
                // Gemini model names mean nothing to a local server
                let model = if self.default_model.starts_with("gemini") {
                    "llama3"
                } else {
                    &self.default_model
                };
                Ok(Arc::new(OllamaProvider::with_url(&self.ollama_url, model)))
            }
            "mock" => Ok(Arc::new(MockProvider::smart())),
            other => Err(ConfigError::Invalid(format!("unknown provider '{other}'"))),
        }
    }
}
