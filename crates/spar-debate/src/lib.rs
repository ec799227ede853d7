//! # Spar Debate
//!
//! The response-orchestration core of the Spar debate assistant.
//!
//! ## Key Types
//!
//! - [`ResponseOrchestrator`] - fingerprint, cache, prompt, call, sanitize
//! - [`StanceClassifier`] - per-turn [`Policy`](spar_core::Policy) selection
//! - [`PromptComposer`] - persona, stance and depth instructions
//! - [`CacheStore`] - in-process TTL store shared by both paths
//! - [`sanitize::clean`] - markdown stripping for plain conversational output
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use spar_debate::{DebateCache, DebateConfig, ResponseOrchestrator};
//! use spar_llm::MockProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = Arc::new(DebateCache::default());
//!     let llm = Arc::new(MockProvider::smart());
//!     let spar = ResponseOrchestrator::new(llm, cache, DebateConfig::default());
//!
//!     let mut session = spar.open("Is pineapple a good pizza topping?").await.unwrap();
//!     let reply = spar.reply(&mut session, "It balances the salt!").await.unwrap();
//!     assert!(!reply.contains('*'));
//! }
//! ```

pub mod cache;
pub mod classifier;
pub mod config;
pub mod error;
pub mod key;
pub mod orchestrator;
pub mod prompt;
pub mod sanitize;

pub use cache::{CacheConfig, CacheStats, CacheStore, CachedValue, DebateCache};
pub use classifier::{parse_policy, StanceClassifier};
pub use config::DebateConfig;
pub use error::{DebateError, DebateResult};
pub use key::{derive, CacheKey, KeyDeriver};
pub use orchestrator::ResponseOrchestrator;
pub use prompt::PromptComposer;
pub use sanitize::clean;
