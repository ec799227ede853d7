//! Errors surfaced by the debate core

use spar_llm::LlmError;
use thiserror::Error;

/// Debate result type alias
pub type DebateResult<T> = Result<T, DebateError>;

#[derive(Debug, Error)]
pub enum DebateError {
    /// The upstream generation call failed and nothing was cached for the request
    #[error("Model invocation failed: {source}")]
    ModelInvocation {
        #[from]
        source: LlmError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
