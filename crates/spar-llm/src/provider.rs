//! Model client trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spar_core::{ConversationTurn, Sender};
use thiserror::Error;

/// Errors from model backends
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Provider not available")]
    NotAvailable,
}

/// Role of a turn in the model's own conversation format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    User,
    Model,
}

impl ModelRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// A history entry as the model sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTurn {
    pub role: ModelRole,
    pub text: String,
}

impl From<&ConversationTurn> for ModelTurn {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.sender {
            Sender::User => ModelRole::User,
            Sender::Assistant => ModelRole::Model,
        };
        Self {
            role,
            text: turn.content.clone(),
        }
    }
}

/// Sampling parameters for a single call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,
    /// Top-k sampling cutoff
    pub top_k: Option<u32>,
    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: None,
            top_p: None,
            max_tokens: 1024,
        }
    }
}

/// A request to a model backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// The message sent on this call
    pub prompt: String,
    /// Prior conversation, oldest first
    pub history: Vec<ModelTurn>,
    /// Sampling parameters
    pub params: GenerationParams,
}

impl LlmRequest {
    /// Create a simple request with default settings and no history
    pub fn simple(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            history: Vec::new(),
            params: GenerationParams::default(),
        }
    }

    /// Create a request continuing a conversation
    pub fn with_history(prompt: &str, history: Vec<ModelTurn>, params: GenerationParams) -> Self {
        Self {
            prompt: prompt.to_string(),
            history,
            params,
        }
    }
}

/// Response from a model backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,
    /// Model used
    pub model: String,
    /// Tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Time taken in milliseconds
    pub latency_ms: u64,
}

/// Trait for model backends.
///
/// One request, one response; no streaming. Implementations make exactly one
/// upstream attempt per call.
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Generate a completion
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Generate with a simple prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.complete(LlmRequest::simple(prompt)).await?;
        Ok(response.content)
    }
}
