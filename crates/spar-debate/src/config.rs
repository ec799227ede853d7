//! Tunables for classification and generation

use serde::{Deserialize, Serialize};
use spar_core::Stance;
use spar_llm::GenerationParams;
use std::env;
use std::time::Duration;

use crate::error::DebateError;

/// Debate core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Lifetime of a cached reply (env: SPAR_RESPONSE_TTL, seconds)
    pub response_ttl: Duration,
    /// Lifetime of a cached stance/depth decision (env: SPAR_SENTIMENT_TTL, seconds)
    pub sentiment_ttl: Duration,
    /// Histories shorter than this skip classification
    pub bootstrap_turns: usize,
    /// Characters of each turn kept in cache fingerprints
    pub turn_excerpt_chars: usize,
    /// Turns of recent history shown to the stance analysis
    pub analysis_window: usize,
    pub challenging_temperature: f32,
    pub default_temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub analysis_temperature: f32,
    pub analysis_max_tokens: u32,
    /// Prefix later turns with a stance/depth reminder (env: SPAR_RESTATE_POLICY)
    pub restate_policy_each_turn: bool,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            response_ttl: Duration::from_secs(3600),
            sentiment_ttl: Duration::from_secs(1800),
            bootstrap_turns: 3,
            turn_excerpt_chars: 100,
            analysis_window: 3,
            challenging_temperature: 0.8,
            default_temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 800,
            analysis_temperature: 0.1,
            analysis_max_tokens: 100,
            restate_policy_each_turn: false,
        }
    }
}

fn parse_secs(name: &str, raw: Option<String>) -> Result<Option<Duration>, DebateError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| {
                DebateError::Config(format!("{} must be whole seconds, got '{}'", name, raw))
            }),
        None => Ok(None),
    }
}

impl DebateConfig {
    /// Load overrides from the environment on top of the defaults
    pub fn from_env() -> Result<Self, DebateError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load overrides from any variable source on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DebateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(ttl) = parse_secs("SPAR_RESPONSE_TTL", lookup("SPAR_RESPONSE_TTL"))? {
            config.response_ttl = ttl;
        }
        if let Some(ttl) = parse_secs("SPAR_SENTIMENT_TTL", lookup("SPAR_SENTIMENT_TTL"))? {
            config.sentiment_ttl = ttl;
        }
        config.restate_policy_each_turn = lookup("SPAR_RESTATE_POLICY")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        Ok(config)
    }

    /// Sampling parameters for a reply under `stance`
    pub fn generation_params(&self, stance: Stance) -> GenerationParams {
        let temperature = if stance == Stance::Challenging {
            self.challenging_temperature
        } else {
            self.default_temperature
        };
        GenerationParams {
            temperature,
            top_k: Some(self.top_k),
            top_p: Some(self.top_p),
            max_tokens: self.max_output_tokens,
        }
    }

    /// Near-deterministic parameters for the stance analysis call
    pub fn analysis_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.analysis_temperature,
            top_k: None,
            top_p: None,
            max_tokens: self.analysis_max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebateConfig::default();
        assert_eq!(config.response_ttl.as_secs(), 3600);
        assert_eq!(config.sentiment_ttl.as_secs(), 1800);
        assert_eq!(config.bootstrap_turns, 3);
        assert!(!config.restate_policy_each_turn);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DebateConfig::from_lookup(vars(&[
            ("SPAR_RESPONSE_TTL", "60"),
            ("SPAR_SENTIMENT_TTL", " 0 "),
            ("SPAR_RESTATE_POLICY", "true"),
        ]))
        .unwrap();
        assert_eq!(config.response_ttl.as_secs(), 60);
        assert_eq!(config.sentiment_ttl.as_secs(), 0);
        assert!(config.restate_policy_each_turn);

        let untouched = DebateConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(untouched.response_ttl.as_secs(), 3600);
    }

    #[test]
    fn test_invalid_ttl_is_a_config_error() {
        let err = DebateConfig::from_lookup(vars(&[("SPAR_RESPONSE_TTL", "abc")]))
            .unwrap_err();
        match err {
            DebateError::Config(msg) => assert!(msg.contains("SPAR_RESPONSE_TTL")),
            other => panic!("unexpected error: {other}"),
        }

        let negative = vars(&[("SPAR_SENTIMENT_TTL", "-5")]);
        assert!(DebateConfig::from_lookup(negative).is_err());
    }

    #[test]
    fn test_temperature_follows_stance() {
        let config = DebateConfig::default();
        let temperature = |stance| config.generation_params(stance).temperature;
        assert_eq!(temperature(Stance::Challenging), 0.8);
        assert_eq!(temperature(Stance::Neutral), 0.7);
        assert_eq!(temperature(Stance::Supportive), 0.7);

        let params = config.generation_params(Stance::Neutral);
        assert_eq!(params.top_k, Some(40));
        assert_eq!(params.top_p, Some(0.95));
        assert_eq!(params.max_tokens, 800);
    }

    #[test]
    fn test_analysis_params_are_tight() {
        let params = DebateConfig::default().analysis_params();
        assert_eq!(params.temperature, 0.1);
        assert_eq!(params.max_tokens, 100);
    }
}
