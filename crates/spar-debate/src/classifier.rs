//! Per-turn stance and depth selection
//!
//! Short histories get the opening policy outright. Longer ones ask the
//! model for a one-line verdict, cached per (message, recent turns).
//! Classification never fails outward: anything that goes wrong yields
//! [`Policy::default`].

use once_cell::sync::Lazy;
use regex::Regex;
use spar_core::{ConversationTurn, Depth, Policy, Stance};
use spar_llm::{LlmError, LlmProvider, LlmRequest};
use std::sync::Arc;

use crate::cache::{CachedValue, DebateCache};
use crate::config::DebateConfig;
use crate::key::{compact_history, CacheKey, KeyDeriver, SENTIMENT_PURPOSE};
use crate::prompt::PromptComposer;

static STANCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)stance:\s*(supportive|challenging|neutral)").unwrap());
static DEPTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)depth:\s*(surface|deep|expert)").unwrap());

/// Parse a `stance: <value>, depth: <value>` verdict.
///
/// Each field is extracted independently; a missing or unknown value keeps
/// that field's default.
pub fn parse_policy(analysis: &str) -> Policy {
    let defaults = Policy::default();
    let stance = STANCE_PATTERN
        .captures(analysis)
        .and_then(|c| c[1].parse::<Stance>().ok())
        .unwrap_or(defaults.stance);
    let depth = DEPTH_PATTERN
        .captures(analysis)
        .and_then(|c| c[1].parse::<Depth>().ok())
        .unwrap_or(defaults.depth);
    Policy::new(stance, depth)
}

/// Decides the [`Policy`] for each turn
#[derive(Debug)]
pub struct StanceClassifier<P: LlmProvider + ?Sized> {
    llm: Arc<P>,
    cache: Arc<DebateCache>,
    config: DebateConfig,
}

impl<P: LlmProvider + ?Sized> StanceClassifier<P> {
    pub fn new(llm: Arc<P>, cache: Arc<DebateCache>, config: DebateConfig) -> Self {
        Self { llm, cache, config }
    }

    /// Cache address of the decision for `message` after `recent`
    pub fn decision_key(&self, message: &str, recent: &[ConversationTurn]) -> CacheKey {
        KeyDeriver::new(SENTIMENT_PURPOSE)
            .part(message)
            .part(compact_history(recent, self.config.turn_excerpt_chars))
            .finish()
    }

    /// Pick the stance and depth for replying to `message`
    pub async fn classify(&self, message: &str, history: &[ConversationTurn]) -> Policy {
        if history.len() < self.config.bootstrap_turns {
            tracing::debug!(
                turns = history.len(),
                "Opening turns, using challenging stance"
            );
            return Policy::opening();
        }

        let start = history.len().saturating_sub(self.config.analysis_window);
        let recent = &history[start..];
        let key = self.decision_key(message, recent);

        match self.analyze(&key, message, recent).await {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!(error = %e, "Stance analysis failed, using default policy");
                Policy::default()
            }
        }
    }

    async fn analyze(
        &self,
        key: &CacheKey,
        message: &str,
        recent: &[ConversationTurn],
    ) -> Result<Policy, LlmError> {
        if let Some(CachedValue::Policy(policy)) = self.cache.get(key.as_str()).await {
            tracing::debug!(cache_key = %key, %policy, "Stance cache hit");
            return Ok(policy);
        }

        let request = LlmRequest::with_history(
            &PromptComposer::analysis_prompt(recent, message),
            Vec::new(),
            self.config.analysis_params(),
        );
        let response = self.llm.complete(request).await?;
        let policy = parse_policy(&response.content);

        let stored = self
            .cache
            .set(
                key.as_str(),
                CachedValue::Policy(policy),
                self.config.sentiment_ttl.as_secs(),
            )
            .await;
        if !stored {
            tracing::warn!(cache_key = %key, "Could not cache stance decision");
        }

        tracing::debug!(
            cache_key = %key,
            stance = %policy.stance,
            depth = %policy.depth,
            "Stance analysed"
        );
        Ok(policy)
    }
}
