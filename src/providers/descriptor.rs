//! Per-provider request descriptors.
//!
//! Each provider's fixed endpoint template, auth-header convention, and
//! request/response wire shape lives here as data. The HTTP call itself is
//! shared; only the descriptor varies by provider.

use crate::config::{ProviderConfig, ProviderId};
use crate::error::{EnhanceError, EnhanceResult};
use crate::providers::EnhancementRequest;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

const OPENAI_MODEL: &str = "gpt-4";
const DEEPSEEK_MODEL: &str = "deepseek-coder";
const CLAUDE_MODEL: &str = "claude-3-sonnet-20240229";
const AZURE_DEPLOYMENT: &str = "gpt-4";
const AZURE_API_VERSION: &str = "2023-05-15";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const TEMPERATURE: f64 = 0.7;
const CLAUDE_MAX_TOKENS: u32 = 1000;

/// A fully built provider request: where to POST, with which headers, and
/// what JSON body. Built once per enhancement call.
#[derive(Debug)]
pub(crate) struct RequestDescriptor {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RequestDescriptor {
    /// Build the request descriptor for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::ConfigError`] if the API key cannot be encoded
    /// as a header value, or if the Azure endpoint is missing.
    pub fn build(
        request: &EnhancementRequest,
        config: &ProviderConfig,
    ) -> EnhanceResult<Self> {
        match config.provider {
            ProviderId::OpenAi => Self::openai_compatible(
                format!(
                    "{}/v1/chat/completions",
                    config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL)
                ),
                OPENAI_MODEL,
                request,
                &config.api_key,
            ),
            ProviderId::Deepseek => Self::openai_compatible(
                format!(
                    "{}/v1/chat/completions",
                    config.base_url.as_deref().unwrap_or(DEEPSEEK_BASE_URL)
                ),
                DEEPSEEK_MODEL,
                request,
                &config.api_key,
            ),
            ProviderId::AzureOpenAi => Self::azure(request, config),
            ProviderId::Claude => Self::claude(request, config),
        }
    }

    /// OpenAI and Deepseek share the chat-completions wire shape and bearer
    /// auth; they differ only in host and model.
    fn openai_compatible(
        url: String,
        model: &str,
        request: &EnhancementRequest,
        api_key: &str,
    ) -> EnhanceResult<Self> {
        let body = json!({
            "model": model,
            "messages": chat_messages(request),
            "temperature": TEMPERATURE,
        });

        let mut headers = json_headers();
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {api_key}"))?,
        );

        Ok(Self { url, headers, body })
    }

    /// Azure routes by deployment path instead of a model field and uses the
    /// `api-key` header.
    fn azure(request: &EnhancementRequest, config: &ProviderConfig) -> EnhanceResult<Self> {
        let endpoint = config.endpoint.as_deref().ok_or_else(|| {
            EnhanceError::config_error(
                "Azure OpenAI endpoint is not set",
                Some(crate::config::keys::AZURE_OPENAI_ENDPOINT),
            )
        })?;
        let url = format!(
            "{endpoint}/openai/deployments/{AZURE_DEPLOYMENT}/chat/completions?api-version={AZURE_API_VERSION}"
        );

        let mut headers = json_headers();
        headers.insert("api-key", header_value(&config.api_key)?);

        Ok(Self {
            url,
            headers,
            body: json!({
                "messages": chat_messages(request),
                "temperature": TEMPERATURE,
            }),
        })
    }

    /// Claude uses the Anthropic Messages API: top-level `system` field,
    /// user-only messages, and an explicit `max_tokens`.
    fn claude(request: &EnhancementRequest, config: &ProviderConfig) -> EnhanceResult<Self> {
        let url = format!(
            "{}/v1/messages",
            config.base_url.as_deref().unwrap_or(ANTHROPIC_BASE_URL)
        );

        let mut headers = json_headers();
        headers.insert("x-api-key", header_value(&config.api_key)?);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        Ok(Self {
            url,
            headers,
            body: json!({
                "model": CLAUDE_MODEL,
                "system": request.instruction,
                "messages": [
                    { "role": "user", "content": request.input_text }
                ],
                "temperature": TEMPERATURE,
                "max_tokens": CLAUDE_MAX_TOKENS,
            }),
        })
    }
}

/// Extract the completion text from a success body at the provider's fixed
/// response path.
///
/// # Errors
///
/// Returns [`EnhanceError::TransportError`] when the expected field is
/// absent; a success response without a completion is treated the same as a
/// malformed body.
pub(crate) fn extract_completion(provider: ProviderId, body: &Value) -> EnhanceResult<String> {
    let (text, path) = match provider {
        ProviderId::Claude => (
            body.pointer("/content/0/text").and_then(Value::as_str),
            "content[0].text",
        ),
        _ => (
            body.pointer("/choices/0/message/content")
                .and_then(Value::as_str),
            "choices[0].message.content",
        ),
    };

    text.map(str::to_string).ok_or_else(|| {
        EnhanceError::transport_error(
            provider.as_str(),
            format!("Response is missing {path}"),
            None,
        )
    })
}

/// System-instruction plus user-text message pair shared by the three
/// chat-completions providers.
fn chat_messages(request: &EnhancementRequest) -> Value {
    json!([
        { "role": "system", "content": request.instruction },
        { "role": "user", "content": request.input_text }
    ])
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn header_value(value: &str) -> EnhanceResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| EnhanceError::config_error(format!("Invalid API key format: {e}"), None))
}
