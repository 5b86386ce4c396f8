//! Shared HTTP transport for all providers.
//!
//! One POST per enhancement call, no retry, no streaming. Error mapping:
//! non-success statuses become [`EnhanceError::ProviderError`] with the
//! provider-supplied `error.message` when present; everything that prevents
//! a parsed body becomes [`EnhanceError::TransportError`].

use crate::error::{EnhanceError, EnhanceResult};
use crate::logging::log_error;
use crate::providers::descriptor::RequestDescriptor;
use serde_json::Value;

/// Thin wrapper over a [`reqwest::Client`] shared by all provider variants.
#[derive(Debug, Default)]
pub(crate) struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Execute a single request and return the parsed JSON body.
    pub async fn execute(
        &self,
        provider: &'static str,
        descriptor: &RequestDescriptor,
    ) -> EnhanceResult<Value> {
        let response = self
            .client
            .post(&descriptor.url)
            .headers(descriptor.headers.clone())
            .json(&descriptor.body)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    provider = provider,
                    url = %descriptor.url,
                    error = %e,
                    "HTTP request failed"
                );
                EnhanceError::transport_error(
                    provider,
                    format!("Request failed: {e}"),
                    Some(Box::new(e)),
                )
            })?;

        if !response.status().is_success() {
            return Err(handle_error_response(provider, response).await);
        }

        parse_success_response(provider, response).await
    }
}

/// Handle non-success HTTP responses.
///
/// The message is `body.error.message` when the body carries one, else the
/// HTTP status text.
async fn handle_error_response(provider: &'static str, response: reqwest::Response) -> EnhanceError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();

    log_error!(
        provider = provider,
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    let provider_message = serde_json::from_str::<Value>(&error_text)
        .ok()
        .and_then(|body| {
            body.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });

    let message = provider_message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_string)
    });

    EnhanceError::provider_error(provider, message)
}

/// Parse a successful HTTP response body into JSON.
async fn parse_success_response(
    provider: &'static str,
    response: reqwest::Response,
) -> EnhanceResult<Value> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            provider = provider,
            error = %e,
            "Failed to read response body"
        );
        EnhanceError::transport_error(
            provider,
            format!("Failed to read response: {e}"),
            Some(Box::new(e)),
        )
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            provider = provider,
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        EnhanceError::transport_error(
            provider,
            format!("Invalid response: {e}"),
            Some(Box::new(e)),
        )
    })
}
