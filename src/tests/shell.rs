// Unit Tests for the Host Integration Shell
//
// UNIT UNDER TEST: run_enhance, show_welcome_once, StatusGuard
//
// BUSINESS RESPONSIBILITY:
//   - Prefers the editor selection, falls back to a prompt, and aborts
//     silently when the user provides no text
//   - Surfaces configuration problems with an affordance to open the
//     specific missing setting
//   - Keeps the busy indicator balanced on every exit path
//   - Routes results back into the selection or a new viewer and converts
//     every dispatch failure into a single notification
//   - Shows the welcome message exactly once across sessions
//
// TEST COVERAGE:
//   - Cancellation paths (no selection, cancelled or empty prompt)
//   - Config-error affordances for provider, API key, and instruction
//   - Success routing for selection and prompt input (mocked transport)
//   - Busy/idle ordering on both success and failure
//   - Welcome flag read-once/write-once behavior

use crate::config::keys;
use crate::shell::{
    run_enhance, show_welcome_once, EnhanceOutcome, MockEditorHost, MockStateStore,
    MockStatusIndicator, StatusGuard,
};
use crate::tests::helpers::settings_for;
use mockall::predicate::eq;
use mockall::Sequence;
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_success_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Status mock expecting exactly one busy followed by one idle.
fn balanced_status() -> MockStatusIndicator {
    let mut status = MockStatusIndicator::new();
    let mut seq = Sequence::new();
    status
        .expect_set_busy()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    status
        .expect_set_idle()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    status
}

#[tokio::test]
async fn test_cancelled_when_prompt_dismissed() {
    let mut host = MockEditorHost::new();
    host.expect_selected_text().return_const(None);
    host.expect_prompt_input().return_const(None);
    let status = MockStatusIndicator::new();

    let outcome = run_enhance(&mut host, &status, &settings_for("openai")).await;

    assert_eq!(outcome, EnhanceOutcome::Cancelled);
}

#[tokio::test]
async fn test_cancelled_when_prompt_input_is_blank() {
    let mut host = MockEditorHost::new();
    host.expect_selected_text().return_const(None);
    host.expect_prompt_input()
        .return_const(Some("   ".to_string()));
    let status = MockStatusIndicator::new();

    let outcome = run_enhance(&mut host, &status, &settings_for("openai")).await;

    assert_eq!(outcome, EnhanceOutcome::Cancelled);
}

#[tokio::test]
async fn test_missing_model_type_offers_settings() {
    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("some text".to_string()));
    host.expect_offer_open_settings()
        .withf(|_msg, setting| setting == keys::MODEL_TYPE)
        .times(1)
        .return_const(());
    let status = MockStatusIndicator::new();

    let mut settings = settings_for("openai");
    settings.model_type = None;
    let outcome = run_enhance(&mut host, &status, &settings).await;

    assert_eq!(outcome, EnhanceOutcome::Failed);
}

#[tokio::test]
async fn test_unknown_model_type_notifies_error() {
    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("some text".to_string()));
    host.expect_notify_error()
        .withf(|msg| msg.contains("gemini"))
        .times(1)
        .return_const(());
    let status = MockStatusIndicator::new();

    let outcome = run_enhance(&mut host, &status, &settings_for("gemini")).await;

    assert_eq!(outcome, EnhanceOutcome::Failed);
}

#[tokio::test]
#[serial]
async fn test_missing_api_key_offers_provider_setting() {
    std::env::remove_var("CLAUDE_API_KEY");

    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("some text".to_string()));
    host.expect_offer_open_settings()
        .withf(|_msg, setting| setting == keys::CLAUDE_API_KEY)
        .times(1)
        .return_const(());
    let status = MockStatusIndicator::new();

    let mut settings = settings_for("claude");
    settings.claude_api_key = None;
    let outcome = run_enhance(&mut host, &status, &settings).await;

    assert_eq!(outcome, EnhanceOutcome::Failed);
}

#[tokio::test]
#[serial]
async fn test_missing_instruction_offers_instruction_setting() {
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("OPENAI_BASE_URL");

    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("some text".to_string()));
    host.expect_offer_open_settings()
        .withf(|_msg, setting| setting == keys::INSTRUCTION)
        .times(1)
        .return_const(());
    let status = MockStatusIndicator::new();

    let mut settings = settings_for("openai");
    settings.enhancement_instruction = None;
    let outcome = run_enhance(&mut host, &status, &settings).await;

    assert_eq!(outcome, EnhanceOutcome::Failed);
}

#[tokio::test]
#[serial]
async fn test_selection_is_replaced_on_success() {
    let mock_server = MockServer::start().await;
    std::env::set_var("OPENAI_BASE_URL", mock_server.uri());
    std::env::remove_var("OPENAI_API_KEY");

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_success_body("Fix grammar in this sentence.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("fix grammar in this sentence".to_string()));
    host.expect_replace_selection()
        .with(eq("Fix grammar in this sentence."))
        .times(1)
        .return_const(());
    host.expect_notify_info().times(1).return_const(());
    let status = balanced_status();

    let outcome = run_enhance(&mut host, &status, &settings_for("openai")).await;

    assert_eq!(outcome, EnhanceOutcome::Replaced);
    std::env::remove_var("OPENAI_BASE_URL");
}

#[tokio::test]
#[serial]
async fn test_prompt_input_opens_viewer_on_success() {
    let mock_server = MockServer::start().await;
    std::env::set_var("OPENAI_BASE_URL", mock_server.uri());
    std::env::remove_var("OPENAI_API_KEY");

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success_body("Enhanced.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut host = MockEditorHost::new();
    host.expect_selected_text().return_const(None);
    host.expect_prompt_input()
        .return_const(Some("raw text".to_string()));
    host.expect_open_viewer()
        .with(eq("Enhanced."))
        .times(1)
        .return_const(());
    host.expect_notify_info().times(1).return_const(());
    let status = balanced_status();

    let outcome = run_enhance(&mut host, &status, &settings_for("openai")).await;

    assert_eq!(outcome, EnhanceOutcome::OpenedViewer);
    std::env::remove_var("OPENAI_BASE_URL");
}

#[tokio::test]
#[serial]
async fn test_dispatch_failure_notifies_and_resets_status() {
    let mock_server = MockServer::start().await;
    std::env::set_var("OPENAI_BASE_URL", mock_server.uri());
    std::env::remove_var("OPENAI_API_KEY");

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "bad key" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut host = MockEditorHost::new();
    host.expect_selected_text()
        .return_const(Some("some text".to_string()));
    host.expect_notify_error()
        .withf(|msg| msg.contains("bad key"))
        .times(1)
        .return_const(());
    // Busy indicator must come back to idle even though the call failed
    let status = balanced_status();

    let outcome = run_enhance(&mut host, &status, &settings_for("openai")).await;

    assert_eq!(outcome, EnhanceOutcome::Failed);
    std::env::remove_var("OPENAI_BASE_URL");
}

#[test]
fn test_status_guard_resets_on_drop() {
    let status = balanced_status();

    let guard = StatusGuard::busy(&status);
    drop(guard);
}

#[test]
fn test_welcome_shown_once() {
    let mut state = MockStateStore::new();
    state.expect_welcome_shown().return_const(false);
    state.expect_mark_welcome_shown().times(1).return_const(());

    let mut host = MockEditorHost::new();
    host.expect_offer_open_settings()
        .withf(|_msg, setting| setting == keys::SECTION)
        .times(1)
        .return_const(());

    show_welcome_once(&mut state, &mut host);
}

#[test]
fn test_welcome_not_repeated() {
    let mut state = MockStateStore::new();
    state.expect_welcome_shown().return_const(true);
    // mark_welcome_shown and any host interaction would panic as unexpected

    let mut host = MockEditorHost::new();

    show_welcome_once(&mut state, &mut host);
}
