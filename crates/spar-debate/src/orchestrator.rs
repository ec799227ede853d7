//! Response orchestration: the entry point of the debate core
//!
//! `generate` fingerprints the request, serves a cached reply when one
//! exists, and otherwise composes the prompt, calls the model once,
//! sanitizes the text and caches it. Failed calls are never cached or
//! retried.

use spar_core::{ConversationTurn, DebateSession, Policy, Sender};
use spar_llm::{LlmProvider, LlmRequest, ModelTurn};
use std::sync::Arc;

use crate::cache::{CachedValue, DebateCache};
use crate::classifier::StanceClassifier;
use crate::config::DebateConfig;
use crate::error::{DebateError, DebateResult};
use crate::key::{compact_history, CacheKey, KeyDeriver, RESPONSE_PURPOSE};
use crate::prompt::PromptComposer;
use crate::sanitize;

/// Produces sanitized debate replies
#[derive(Debug)]
pub struct ResponseOrchestrator<P: LlmProvider + ?Sized> {
    llm: Arc<P>,
    cache: Arc<DebateCache>,
    composer: PromptComposer,
    classifier: StanceClassifier<P>,
    config: DebateConfig,
}

impl<P: LlmProvider + ?Sized> ResponseOrchestrator<P> {
    /// Create an orchestrator over a model client and a shared cache
    pub fn new(llm: Arc<P>, cache: Arc<DebateCache>, config: DebateConfig) -> Self {
        let composer = PromptComposer::new().restating_policy(config.restate_policy_each_turn);
        let classifier = StanceClassifier::new(llm.clone(), cache.clone(), config.clone());
        Self {
            llm,
            cache,
            composer,
            classifier,
            config,
        }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<DebateCache> {
        &self.cache
    }

    pub fn classifier(&self) -> &StanceClassifier<P> {
        &self.classifier
    }

    /// Choose the policy for the next reply; never fails
    pub async fn classify(&self, message: &str, history: &[ConversationTurn]) -> Policy {
        self.classifier.classify(message, history).await
    }

    /// Cache address of a reply. The whole history is part of the fingerprint.
    pub fn response_key(
        &self,
        user_text: &str,
        history: &[ConversationTurn],
        policy: Policy,
    ) -> CacheKey {
        KeyDeriver::new(RESPONSE_PURPOSE)
            .part(user_text)
            .part(compact_history(history, self.config.turn_excerpt_chars))
            .part(policy.stance)
            .part(policy.depth)
            .finish()
    }

    /// Generate the reply to `user_text`.
    ///
    /// `policy` defaults to [`Policy::default`]; classification is the
    /// caller's job (see [`Self::classify`]).
    pub async fn generate(
        &self,
        user_text: &str,
        history: &[ConversationTurn],
        policy: Option<Policy>,
    ) -> DebateResult<String> {
        let policy = policy.unwrap_or_default();
        let key = self.response_key(user_text, history, policy);

        if let Some(CachedValue::Response(text)) = self.cache.get(key.as_str()).await {
            tracing::debug!(cache_key = %key, "Reply served from cache");
            return Ok(text);
        }

        let prompt = self.composer.compose(user_text, policy, history.is_empty());
        let request = LlmRequest::with_history(
            &prompt,
            history.iter().map(ModelTurn::from).collect(),
            self.config.generation_params(policy.stance),
        );

        let response = self.llm.complete(request).await.map_err(|e| {
            tracing::error!(
                provider = %self.llm.name(),
                error = %e,
                "Failed to generate debate reply"
            );
            DebateError::from(e)
        })?;

        let text = sanitize::clean(&response.content);

        let stored = self
            .cache
            .set(
                key.as_str(),
                CachedValue::Response(text.clone()),
                self.config.response_ttl.as_secs(),
            )
            .await;
        if !stored {
            tracing::warn!(cache_key = %key, "Could not cache debate reply");
        }

        tracing::debug!(
            cache_key = %key,
            stance = %policy.stance,
            depth = %policy.depth,
            latency_ms = response.latency_ms,
            "Debate reply generated"
        );
        Ok(text)
    }

    /// Open a debate on `topic` and record the opening exchange
    pub async fn open(&self, topic: &str) -> DebateResult<DebateSession> {
        let mut session = DebateSession::new(topic);
        let policy = self.classify(topic, session.history()).await;
        let prompt = PromptComposer::opening_prompt(topic);
        let reply = self
            .generate(&prompt, session.history(), Some(policy))
            .await?;

        session.push(Sender::User, topic);
        session.push(Sender::Assistant, reply);
        tracing::info!(session_id = %session.id, %policy, "Debate opened");
        Ok(session)
    }

    /// Answer `message` within `session`.
    ///
    /// Both turns are appended only when generation succeeds.
    pub async fn reply(&self, session: &mut DebateSession, message: &str) -> DebateResult<String> {
        let policy = self.classify(message, session.history()).await;
        let reply = self.generate(message, session.history(), Some(policy)).await?;

        session.push(Sender::User, message);
        session.push(Sender::Assistant, reply.clone());
        Ok(reply)
    }
}
