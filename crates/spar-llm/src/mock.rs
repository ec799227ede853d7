//! Mock model backend for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// A mock model backend that returns predefined responses.
///
/// Records every request it receives so tests can assert on prompts,
/// history and sampling parameters.
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Canned responses (cycles through them)
    responses: Vec<String>,
    /// Current response index
    index: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
    /// Fail every call instead of answering
    fail: bool,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            latency_ms: 0,
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock whose every call fails as an unreachable upstream
    pub fn failing() -> Self {
        Self {
            name: "failing-mock".to_string(),
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Create a smart mock that responds based on prompt content
    pub fn smart() -> Self {
        Self {
            name: "smart-mock".to_string(),
            ..Self::new(Vec::new())
        }
    }

    /// Simulate upstream latency on every call
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of calls received so far, failed ones included
    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests().pop()
    }

    fn generate_smart_response(&self, request: &LlmRequest) -> String {
        let prompt_lower = request.prompt.to_lowercase();

        // Stance/depth analysis request
        if prompt_lower.contains("stance: [stance]") {
            let hesitant = ["not sure", "confused", "i don't understand", "help me"]
                .iter()
                .any(|cue| prompt_lower.contains(cue));
            return if hesitant {
                "stance: supportive, depth: surface".to_string()
            } else {
                "stance: challenging, depth: expert".to_string()
            };
        }

        // Debate reply, deliberately formatted so the sanitizer has work to do
        format!(
            "**Counterpoint:** I see it differently.\n\n\
             * You said \"{}\", but consider the other side.\n\
             1. Evidence cuts both ways\n\
             2. *Context* matters\n\n\n\
             What would change your mind?",
            request.prompt.chars().take(50).collect::<String>()
        )
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.fail
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }

        if self.fail {
            return Err(LlmError::ConnectionFailed(
                "mock upstream unreachable".to_string(),
            ));
        }

        let content = if self.responses.is_empty() {
            self.generate_smart_response(&request)
        } else {
            // Cycle through canned responses
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            self.responses[idx % self.responses.len()].clone()
        };

        Ok(LlmResponse {
            content,
            model: self.name.clone(),
            tokens_used: Some((request.prompt.len() / 4) as u32 + 100),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let mock = MockProvider::constant("Hello, world!");
        let response = mock.ask("test").await.unwrap();
        assert_eq!(response, "Hello, world!");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_responses_cycle() {
        let mock = MockProvider::new(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(mock.ask("a").await.unwrap(), "one");
        assert_eq!(mock.ask("b").await.unwrap(), "two");
        assert_eq!(mock.ask("c").await.unwrap(), "one");
        assert_eq!(mock.last_request().unwrap().prompt, "c");
    }

    #[tokio::test]
    async fn test_failing_mock_records_the_attempt() {
        let mock = MockProvider::failing();
        assert!(matches!(
            mock.ask("x").await,
            Err(LlmError::ConnectionFailed(_))
        ));
        assert_eq!(mock.calls(), 1);
        assert!(!mock.is_available().await);
    }

    #[tokio::test]
    async fn test_smart_mock_answers_analysis_prompts() {
        let mock = MockProvider::smart();
        let prompt = concat!(
            "USER: I'm not sure about this\n",
            "Format your response exactly as: stance: [stance], depth: [depth]"
        );
        let response = mock.ask(prompt).await.unwrap();
        assert_eq!(response, "stance: supportive, depth: surface");
    }
}
