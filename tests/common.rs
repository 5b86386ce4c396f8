//! Shared helpers for dispatcher integration tests.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use prompt_enhancer::{EnhancementRequest, ProviderConfig, ProviderId};

pub fn test_request() -> EnhancementRequest {
    EnhancementRequest::new(
        "fix grammar in this sentence",
        "Improve clarity and grammar.",
    )
}

/// Config pointed at a mock server instead of the provider's fixed host.
pub fn test_config(provider: ProviderId, base_url: &str) -> ProviderConfig {
    let endpoint = (provider == ProviderId::AzureOpenAi).then(|| base_url.to_string());
    ProviderConfig {
        provider,
        api_key: "test-key".to_string(),
        endpoint,
        base_url: Some(base_url.to_string()),
    }
}

/// Success body in the chat-completions shape (OpenAI, Deepseek, Azure).
pub fn chat_completions_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Success body in the Anthropic Messages shape (Claude).
pub fn claude_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": content }],
        "model": "claude-3-sonnet-20240229",
        "stop_reason": "end_turn"
    })
}
