//! End-to-end behaviour of the debate core against a mock model

use std::sync::Arc;

use spar_core::{ConversationTurn, Depth, Policy, Stance};
use spar_debate::{
    clean, derive, CachedValue, DebateCache, DebateConfig, DebateError, ResponseOrchestrator,
};
use spar_llm::MockProvider;

type Harness = (
    Arc<MockProvider>,
    Arc<DebateCache>,
    ResponseOrchestrator<MockProvider>,
);

fn setup(mock: MockProvider) -> Harness {
    let mock = Arc::new(mock);
    let cache = Arc::new(DebateCache::default());
    let orchestrator =
        ResponseOrchestrator::new(mock.clone(), cache.clone(), DebateConfig::default());
    (mock, cache, orchestrator)
}

/// Opening debate gets a provocative counter-stance without a model call
#[tokio::test]
async fn test_opening_message_is_challenged_without_model_call() {
    let (mock, _, spar) = setup(MockProvider::smart());

    let policy = spar.classify("Is pineapple a good pizza topping?", &[]).await;

    assert_eq!(policy, Policy::new(Stance::Challenging, Depth::Deep));
    assert_eq!(mock.calls(), 0);
}

#[test]
fn test_markdown_reply_is_flattened() {
    let raw = "**Yes** it is!\n1. Great taste\n\n\n2. Versatile";
    assert_eq!(clean(raw), "Yes it is!\nGreat taste\n\nVersatile");
}

/// Identical requests are served from cache even if the model would now say something else
#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let (mock, _, spar) = setup(MockProvider::new(vec![
        "First **take**".to_string(),
        "Second take".to_string(),
    ]));
    let history = vec![
        ConversationTurn::user("Cats are better"),
        ConversationTurn::assistant("Dogs, surely"),
    ];
    let policy = Some(Policy::new(Stance::Supportive, Depth::Surface));

    let first = spar.generate("Cats nap more", &history, policy).await.unwrap();
    let second = spar.generate("Cats nap more", &history, policy).await.unwrap();

    assert_eq!(first, "First take");
    assert_eq!(second, first);
    assert_eq!(mock.calls(), 1);
}

/// Upstream failure surfaces as ModelInvocation and leaves no cache entry
#[tokio::test]
async fn test_upstream_failure_is_surfaced_and_not_cached() {
    let (mock, cache, spar) = setup(MockProvider::failing());
    let policy = Policy::default();

    let result = spar.generate("Is tea better than coffee?", &[], Some(policy)).await;

    assert!(matches!(result, Err(DebateError::ModelInvocation { .. })));
    let key = spar.response_key("Is tea better than coffee?", &[], policy);
    assert!(cache.get(key.as_str()).await.is_none());
    assert!(cache.is_empty().await);
    assert_eq!(mock.calls(), 1);
}

/// A turn containing the history separator must not share a key with two real turns
#[tokio::test]
async fn test_lookalike_histories_get_their_own_replies() {
    let (mock, _, spar) = setup(MockProvider::new(vec!["A".to_string(), "B".to_string()]));
    let forged = vec![ConversationTurn::user("x|assistant:y")];
    let genuine = vec![
        ConversationTurn::user("x"),
        ConversationTurn::assistant("y"),
    ];
    let policy = Some(Policy::default());

    let first = spar.generate("q", &forged, policy).await.unwrap();
    let second = spar.generate("q", &genuine, policy).await.unwrap();

    assert_eq!(first, "A");
    assert_eq!(second, "B");
    assert_eq!(mock.calls(), 2);
}

/// A cached reply survives a later upstream outage
#[tokio::test]
async fn test_cached_reply_survives_outage() {
    let cache = Arc::new(DebateCache::default());
    let healthy = ResponseOrchestrator::new(
        Arc::new(MockProvider::constant("Tea wins.")),
        cache.clone(),
        DebateConfig::default(),
    );
    let broken = ResponseOrchestrator::new(
        Arc::new(MockProvider::failing()),
        cache.clone(),
        DebateConfig::default(),
    );

    healthy.generate("Tea?", &[], None).await.unwrap();
    let served = broken.generate("Tea?", &[], None).await.unwrap();
    assert_eq!(served, "Tea wins.");
}

/// Sentiment and response entries share one store under disjoint keys
#[tokio::test]
async fn test_namespaces_share_store() {
    let (_, cache, spar) = setup(MockProvider::smart());
    let history: Vec<_> = (0..4)
        .map(|i| ConversationTurn::user(format!("turn {}", i)))
        .collect();

    let policy = spar.classify("I'm not sure anymore", &history).await;
    assert_eq!(policy, Policy::new(Stance::Supportive, Depth::Surface));
    spar.generate("I'm not sure anymore", &history, Some(policy)).await.unwrap();

    assert_eq!(cache.len().await, 2);
    let decision_key = spar.classifier().decision_key("I'm not sure anymore", &history[1..]);
    assert_eq!(
        cache.get(decision_key.as_str()).await,
        Some(CachedValue::Policy(policy))
    );
}

/// A full debate: opening, two classified replies, then a model-picked stance
#[tokio::test]
async fn test_debate_session_flow() {
    let (mock, _, spar) = setup(MockProvider::smart());

    let mut session = spar.open("Remote work beats the office").await.unwrap();
    spar.reply(&mut session, "No commute is huge").await.unwrap();
    assert_eq!(session.len(), 4);
    assert_eq!(mock.calls(), 2);

    // Four turns of history now: classification consults the model
    spar.reply(&mut session, "Why do you disagree?").await.unwrap();
    assert_eq!(session.len(), 6);
    assert_eq!(mock.calls(), 4);

    for turn in session.history() {
        assert!(!turn.content.contains('*'));
    }
}

#[test]
fn test_key_derivation_properties() {
    assert_eq!(derive("p", &["a", "b"]), derive("p", &["a", "b"]));
    assert_ne!(derive("p", &["a"]), derive("p", &["b"]));
}
