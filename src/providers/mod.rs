//! Enhancement Dispatcher
//!
//! Given input text, an instruction, and a resolved [`ProviderConfig`],
//! issues exactly one HTTP request to the selected provider's completion
//! endpoint and returns the extracted completion text.
//!
//! ## Architecture
//!
//! ```text
//! descriptor.rs  <- per-provider endpoint/auth/body data and response paths
//! http.rs        <- shared single-shot HTTP transport and error mapping
//! ```
//!
//! OpenAI, Deepseek, and Azure OpenAI share the chat-completions wire shape;
//! Claude uses the Anthropic Messages API. The call logic is written once and
//! parameterized by the descriptor, not duplicated per provider.

pub(crate) mod descriptor;
pub(crate) mod http;

use crate::config::ProviderConfig;
use crate::error::EnhanceResult;
use crate::logging::log_debug;
use descriptor::RequestDescriptor;
use http::HttpDispatcher;

/// A single enhancement request.
///
/// `instruction` is the fixed system directive from configuration, not
/// user-authored per call. Both fields are expected to be non-empty; the
/// shell rejects empty input before dispatching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementRequest {
    /// The text to enhance.
    pub input_text: String,
    /// System directive describing how to transform the text.
    pub instruction: String,
}

impl EnhancementRequest {
    pub fn new(input_text: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            instruction: instruction.into(),
        }
    }
}

/// Enhancement dispatcher holding the shared HTTP client.
///
/// Stateless between calls; each [`enhance`](Self::enhance) is one
/// request-response exchange with no side effects beyond the network call.
#[derive(Debug, Default)]
pub struct EnhancementDispatcher {
    http: HttpDispatcher,
}

impl EnhancementDispatcher {
    pub fn new() -> Self {
        Self {
            http: HttpDispatcher::new(),
        }
    }

    /// Send `request` to the configured provider and return the completion.
    ///
    /// # Errors
    ///
    /// - [`EnhanceError::ConfigError`] if the config invariant does not hold
    ///   (checked before any request is issued)
    /// - [`EnhanceError::ProviderError`] on a non-success HTTP status
    /// - [`EnhanceError::TransportError`] on network failure or an
    ///   unparsable/incomplete response body
    ///
    /// [`EnhanceError::ConfigError`]: crate::EnhanceError::ConfigError
    /// [`EnhanceError::ProviderError`]: crate::EnhanceError::ProviderError
    /// [`EnhanceError::TransportError`]: crate::EnhanceError::TransportError
    pub async fn enhance(
        &self,
        request: &EnhancementRequest,
        config: &ProviderConfig,
    ) -> EnhanceResult<String> {
        config.validate()?;

        let descriptor = RequestDescriptor::build(request, config)?;
        log_debug!(
            provider = config.provider.as_str(),
            url = %descriptor.url,
            input_len = request.input_text.len(),
            "Dispatching enhancement request"
        );

        let body = self
            .http
            .execute(config.provider.as_str(), &descriptor)
            .await?;
        let completion = descriptor::extract_completion(config.provider, &body)?;

        log_debug!(
            provider = config.provider.as_str(),
            completion_len = completion.len(),
            "Enhancement completed"
        );
        Ok(completion)
    }
}

/// Convenience wrapper: dispatch one enhancement with a fresh client.
pub async fn enhance(
    request: &EnhancementRequest,
    config: &ProviderConfig,
) -> EnhanceResult<String> {
    EnhancementDispatcher::new().enhance(request, config).await
}
