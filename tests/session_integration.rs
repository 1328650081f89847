//! End-to-end turns through `Session` against a mocked Ollama server.

use serde_json::json;
use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bubblechat::config::{ChatConfig, OllamaConfig, DEFAULT_FALLBACK_MESSAGE};
use bubblechat::display::{BubbleKind, MemoryDisplay};
use bubblechat::providers::OllamaProvider;
use bubblechat::session::{Role, Session, SessionState, TurnOutcome};

mod common;

fn session_for(server: &MockServer) -> (Session, Arc<MemoryDisplay>) {
    let config = OllamaConfig {
        host: server.uri(),
        model: "llama3.2:latest".to_string(),
    };
    let provider = OllamaProvider::new(config, 5).unwrap();
    let display = Arc::new(MemoryDisplay::new());
    let session = Session::new(provider, display.clone(), &ChatConfig::default());
    (session, display)
}

fn kinds(display: &MemoryDisplay) -> Vec<BubbleKind> {
    display.bubbles().iter().map(|b| b.kind).collect()
}

#[tokio::test]
async fn test_first_turn_success() {
    let server = MockServer::start().await;
    common::mount_ollama_replies(&server, &["Hi there"]).await;
    let (mut session, display) = session_for(&server);

    let outcome = session.submit("Hello").await;

    assert_eq!(outcome, TurnOutcome::Replied("Hi there".to_string()));
    assert_eq!(
        common::sent_messages(&server).await,
        vec![json!([{"role": "user", "content": "Hello"}])]
    );
    assert_eq!(kinds(&display), vec![BubbleKind::User, BubbleKind::Assistant]);
    assert_eq!(display.bubbles()[1].text, "Hi there");
    assert_eq!(display.loading_events(), vec![true, false]);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_second_turn_carries_history() {
    let server = MockServer::start().await;
    common::mount_ollama_replies(&server, &["Hi there", "Fine"]).await;
    let (mut session, _display) = session_for(&server);

    session.submit("Hello").await;
    session.submit("How are you?").await;

    let sent = common::sent_messages(&server).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[1],
        json!([
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi there"},
            {"role": "user", "content": "How are you?"}
        ])
    );
    assert_eq!(session.transcript().len(), 4);
}

#[tokio::test]
async fn test_service_failure_shows_fallback_and_keeps_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;
    let (mut session, display) = session_for(&server);

    let outcome = session.submit("test").await;

    assert_eq!(outcome, TurnOutcome::Failed);
    assert_eq!(kinds(&display), vec![BubbleKind::User, BubbleKind::Error]);
    assert_eq!(display.bubbles()[1].text, DEFAULT_FALLBACK_MESSAGE);
    assert!(!display.is_loading());

    let entries: Vec<(Role, &str)> = session
        .transcript()
        .iter()
        .map(|m| (m.role(), m.content()))
        .collect();
    assert_eq!(entries, vec![(Role::User, "test")]);
}

#[tokio::test]
async fn test_recovery_after_failure_resends_unanswered_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    common::mount_ollama_replies(&server, &["Back online"]).await;
    let (mut session, display) = session_for(&server);

    assert_eq!(session.submit("first").await, TurnOutcome::Failed);
    assert_eq!(
        session.submit("second").await,
        TurnOutcome::Replied("Back online".to_string())
    );

    let sent = common::sent_messages(&server).await;
    assert_eq!(
        sent[1],
        json!([
            {"role": "user", "content": "first"},
            {"role": "user", "content": "second"}
        ])
    );
    assert_eq!(
        kinds(&display),
        vec![
            BubbleKind::User,
            BubbleKind::Error,
            BubbleKind::User,
            BubbleKind::Assistant
        ]
    );
}

#[tokio::test]
async fn test_whitespace_reply_is_appended_as_returned() {
    let server = MockServer::start().await;
    common::mount_ollama_replies(&server, &["  "]).await;
    let (mut session, display) = session_for(&server);

    let outcome = session.submit("Hello").await;

    assert_eq!(outcome, TurnOutcome::Replied("  ".to_string()));
    assert_eq!(kinds(&display), vec![BubbleKind::User, BubbleKind::Assistant]);
    assert_eq!(display.bubbles()[1].text, "  ");
    let last = session.transcript().last().unwrap();
    assert_eq!((last.role(), last.content()), (Role::Assistant, "  "));
}

#[tokio::test]
async fn test_empty_reply_shows_fallback() {
    let server = MockServer::start().await;
    common::mount_ollama_replies(&server, &[""]).await;
    let (mut session, display) = session_for(&server);

    assert_eq!(session.submit("Hello").await, TurnOutcome::Failed);
    assert_eq!(kinds(&display), vec![BubbleKind::User, BubbleKind::Error]);
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test]
async fn test_blank_input_never_reaches_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ollama_reply("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let (mut session, display) = session_for(&server);

    assert_eq!(session.submit("   \n").await, TurnOutcome::Ignored);
    assert!(display.bubbles().is_empty());
    assert!(session.transcript().is_empty());
}

#[tokio::test]
async fn test_history_json_matches_transcript() {
    let server = MockServer::start().await;
    common::mount_ollama_replies(&server, &["Hi there"]).await;
    let (mut session, _display) = session_for(&server);

    session.submit("Hello").await;

    let history: serde_json::Value =
        serde_json::from_str(&session.transcript().to_json().unwrap()).unwrap();
    assert_eq!(
        history,
        json!([
            {"content": "Hello", "role": "user"},
            {"content": "Hi there", "role": "assistant"}
        ])
    );
}
