//! # Spar LLM
//!
//! The model client capability used by the Spar debate core.
//!
//! ## Supported Backends
//!
//! | Provider | Type | Key Required |
//! |----------|------|--------------|
//! | Gemini | API | `GEMINI_API_KEY` |
//! | Ollama | Local | None |
//! | Mock | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use spar_llm::{LlmProvider, MockProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockProvider::constant("Pineapple belongs nowhere near a pizza.");
//!     let response = llm.ask("Is pineapple a good pizza topping?").await.unwrap();
//!     println!("{}", response);
//! }
//! ```
//!
//! ## With Gemini
//!
//! ```rust,ignore
//! use spar_llm::GeminiProvider;
//!
//! let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//! let llm = GeminiProvider::flash(&api_key);
//!
//! let response = llm.ask("Argue against remote work").await.unwrap();
//! ```

pub mod config;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod provider;

pub use config::{ConfigError, LlmConfig};
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{
    GenerationParams, LlmError, LlmProvider, LlmRequest, LlmResponse, ModelRole, ModelTurn,
};
