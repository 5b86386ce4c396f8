//! Error types for enhancement operations.
//!
//! This module provides structured error handling for prompt-enhancer
//! operations. The main error type is [`EnhanceError`], which covers all
//! failure modes:
//! - Configuration errors (missing provider selection, credentials, endpoint)
//! - Unsupported provider names
//! - Provider errors (non-success HTTP responses with a provider message)
//! - Transport errors (network failures, malformed response bodies)
//!
//! # Result Type
//!
//! Use [`EnhanceResult<T>`] as a convenient alias for `Result<T, EnhanceError>`:
//!
//! ```rust
//! use prompt_enhancer::EnhanceResult;
//!
//! fn my_function() -> EnhanceResult<String> {
//!     Ok("Success".to_string())
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`EnhanceError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Client errors (invalid provider name, missing configuration).
    ///
    /// The caller made a mistake that they can fix (select a provider,
    /// set an API key, configure the Azure endpoint).
    Client,

    /// External service failures (provider errors, network issues).
    ///
    /// The provider or network had an issue. Not fixable from settings.
    External,
}

/// Convenient result type for enhancement operations.
///
/// Alias for `Result<T, EnhanceError>`.
pub type EnhanceResult<T> = std::result::Result<T, EnhanceError>;

/// Errors that can occur during an enhancement call.
///
/// Each variant carries the context the shell needs to surface a useful
/// notification. None of these errors is retried automatically; the shell
/// converts every one into a single user-visible message.
///
/// # Creating Errors
///
/// Use the constructor methods which automatically log the error:
///
/// ```rust
/// use prompt_enhancer::EnhanceError;
///
/// let err = EnhanceError::config_error("Enhancement instruction is not set", None);
/// let err = EnhanceError::unsupported_provider("gemini");
/// ```
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// Provider selection, credential, endpoint, or instruction is missing.
    ///
    /// `setting` names the settings key the shell's "open settings"
    /// affordance should navigate to, when one applies.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem.
        message: String,
        /// The settings key to open for fixing the problem.
        setting: Option<&'static str>,
    },

    /// The specified provider is not supported.
    ///
    /// Supported providers: "openai", "deepseek", "azure_openai", "claude"
    #[error("Unsupported provider: {provider}")]
    UnsupportedProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// The provider returned a non-success HTTP status.
    ///
    /// `message` is the provider-supplied `error.message` when the body
    /// carried one, otherwise the HTTP status text.
    #[error("{provider} API error: {message}")]
    ProviderError {
        /// Which provider produced the error.
        provider: &'static str,
        /// Provider-supplied error message or HTTP status text.
        message: String,
    },

    /// The request never produced a usable response.
    ///
    /// Covers connection failures, unreadable bodies, and success responses
    /// whose JSON cannot be parsed or lacks the expected completion field.
    #[error("{provider} request failed: {message}")]
    TransportError {
        /// Which provider the request targeted.
        provider: &'static str,
        /// Description of the underlying cause.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EnhanceError {
    /// Get the error category for routing and handling decisions.
    ///
    /// `Client` errors are fixable from settings and get the shell's
    /// open-settings affordance; `External` errors are shown as-is.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Client,
            Self::UnsupportedProvider { .. } => ErrorCategory::Client,
            Self::ProviderError { .. } => ErrorCategory::External,
            Self::TransportError { .. } => ErrorCategory::External,
        }
    }

    /// The settings key associated with this error, if any.
    ///
    /// Only `ConfigError` carries one; the shell uses it to open the
    /// specific missing setting.
    pub fn setting(&self) -> Option<&'static str> {
        match self {
            Self::ConfigError { setting, .. } => *setting,
            _ => None,
        }
    }

    /// Convert to a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigError { message, .. } => message.clone(),
            Self::UnsupportedProvider { provider } => {
                format!("The provider \"{provider}\" is not supported")
            }
            Self::ProviderError { provider, message } => {
                format!("{provider} error: {message}")
            }
            Self::TransportError { provider, .. } => {
                format!("Unable to reach {provider}. Please try again")
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods automatically log the error at the appropriate level.
    // Use them instead of constructing variants directly.

    /// Create a configuration error (logs at ERROR level).
    pub fn config_error(message: impl Into<String>, setting: Option<&'static str>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "config_error",
            message = %message,
            setting = setting.unwrap_or("none"),
            "Enhancement configuration validation failed"
        );
        Self::ConfigError { message, setting }
    }

    /// Create an unsupported provider error (logs at ERROR level).
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unsupported_provider",
            "Unsupported provider requested"
        );
        Self::UnsupportedProvider { provider }
    }

    /// Create a provider error from a non-success HTTP response (logs at ERROR level).
    pub fn provider_error(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            provider = provider,
            error_type = "provider_error",
            message = %message,
            "Provider returned an error response"
        );
        Self::ProviderError { provider, message }
    }

    /// Create a transport error (logs at WARN level).
    pub fn transport_error(
        provider: &'static str,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_warn!(
            provider = provider,
            error_type = "transport_error",
            message = %message,
            has_source = source.is_some(),
            "Provider request failed in transit"
        );
        Self::TransportError {
            provider,
            message,
            source,
        }
    }
}
