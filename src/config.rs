//! Provider selection and credential resolution.
//!
//! Configuration comes from two places: the host settings store (mirrored by
//! [`Settings`]) and process environment variables. Environment variables
//! take precedence over settings values; the resolution order is part of the
//! contract and must not change.

use crate::error::{EnhanceError, EnhanceResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settings keys in the host settings store.
///
/// The shell passes these to the host's open-settings affordance so a
/// configuration error lands the user on the specific missing setting.
pub mod keys {
    /// The settings namespace itself, for affordances that open the whole section.
    pub const SECTION: &str = "promptEnhancer";
    pub const MODEL_TYPE: &str = "promptEnhancer.modelType";
    pub const OPENAI_API_KEY: &str = "promptEnhancer.openaiApiKey";
    pub const DEEPSEEK_API_KEY: &str = "promptEnhancer.deepseekApiKey";
    pub const AZURE_OPENAI_API_KEY: &str = "promptEnhancer.azureOpenaiApiKey";
    pub const AZURE_OPENAI_ENDPOINT: &str = "promptEnhancer.azureOpenaiEndpoint";
    pub const CLAUDE_API_KEY: &str = "promptEnhancer.claudeApiKey";
    pub const INSTRUCTION: &str = "promptEnhancer.enhancementInstruction";
}

/// The four supported enhancement providers.
///
/// This is a closed set; each variant carries its fixed endpoint, auth
/// convention, and wire shape as data in the dispatch layer. Parsing an
/// unknown name fails with [`EnhanceError::UnsupportedProvider`] before any
/// network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    OpenAi,
    Deepseek,
    AzureOpenAi,
    Claude,
}

impl ProviderId {
    /// Canonical provider name as it appears in settings and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Deepseek => "deepseek",
            Self::AzureOpenAi => "azure_openai",
            Self::Claude => "claude",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Deepseek => "DEEPSEEK_API_KEY",
            Self::AzureOpenAi => "AZURE_OPENAI_API_KEY",
            Self::Claude => "CLAUDE_API_KEY",
        }
    }

    /// Settings key holding this provider's API key.
    pub fn api_key_setting(self) -> &'static str {
        match self {
            Self::OpenAi => keys::OPENAI_API_KEY,
            Self::Deepseek => keys::DEEPSEEK_API_KEY,
            Self::AzureOpenAi => keys::AZURE_OPENAI_API_KEY,
            Self::Claude => keys::CLAUDE_API_KEY,
        }
    }

    /// Environment variable that overrides the fixed provider host.
    ///
    /// Azure has no fixed host; its endpoint is configuration, not an
    /// override.
    pub fn base_url_env(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_BASE_URL"),
            Self::Deepseek => Some("DEEPSEEK_BASE_URL"),
            Self::Claude => Some("CLAUDE_BASE_URL"),
            Self::AzureOpenAi => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "deepseek" => Ok(Self::Deepseek),
            "azure_openai" => Ok(Self::AzureOpenAi),
            "claude" => Ok(Self::Claude),
            _ => Err(EnhanceError::unsupported_provider(s)),
        }
    }
}

/// Snapshot of the host settings store relevant to enhancement.
///
/// All fields are optional; resolution decides what is actually required
/// for the selected provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Selected provider name (`openai`, `deepseek`, `azure_openai`, `claude`).
    pub model_type: Option<String>,
    pub openai_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub azure_openai_api_key: Option<String>,
    pub azure_openai_endpoint: Option<String>,
    pub claude_api_key: Option<String>,
    /// Fixed system directive sent with every enhancement request.
    pub enhancement_instruction: Option<String>,
}

impl Settings {
    fn api_key_for(&self, provider: ProviderId) -> Option<&str> {
        let value = match provider {
            ProviderId::OpenAi => &self.openai_api_key,
            ProviderId::Deepseek => &self.deepseek_api_key,
            ProviderId::AzureOpenAi => &self.azure_openai_api_key,
            ProviderId::Claude => &self.claude_api_key,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Resolved per-invocation provider configuration.
///
/// Built fresh from environment and settings for each call and discarded
/// afterward. Invariants: `api_key` non-empty; `endpoint` present exactly
/// when the provider is Azure OpenAI.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub api_key: String,
    /// Azure OpenAI resource endpoint. Required iff `provider` is Azure.
    pub endpoint: Option<String>,
    /// Override of the fixed provider host. Used for OpenAI-compatible
    /// gateways and tests; `None` means the provider's standard host.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Resolve configuration for `provider` from the process environment and
    /// the given settings, environment first.
    pub fn resolve(provider: ProviderId, settings: &Settings) -> EnhanceResult<Self> {
        Self::resolve_with_lookup(provider, settings, |name| std::env::var(name).ok())
    }

    /// Resolution with an injectable environment lookup.
    ///
    /// The lookup stands in for `std::env::var`; unit tests supply a closure
    /// over a map instead of mutating process state.
    pub fn resolve_with_lookup<F>(
        provider: ProviderId,
        settings: &Settings,
        lookup: F,
    ) -> EnhanceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_key = lookup(provider.api_key_env()).filter(|v| !v.is_empty());
        let from_env = env_key.is_some();
        let api_key = env_key
            .or_else(|| settings.api_key_for(provider).map(str::to_string))
            .ok_or_else(|| {
                EnhanceError::config_error(
                    format!(
                        "Please configure the API key for {provider} in the extension settings or environment"
                    ),
                    Some(provider.api_key_setting()),
                )
            })?;

        log_debug!(
            provider = provider.as_str(),
            api_key_source = if from_env { "environment" } else { "settings" },
            "API key resolved"
        );

        let endpoint = if provider == ProviderId::AzureOpenAi {
            let endpoint = lookup("AZURE_OPENAI_ENDPOINT")
                .filter(|v| !v.is_empty())
                .or_else(|| {
                    settings
                        .azure_openai_endpoint
                        .clone()
                        .filter(|v| !v.is_empty())
                })
                .ok_or_else(|| {
                    EnhanceError::config_error(
                        "Please configure the Azure OpenAI endpoint in the extension settings or environment",
                        Some(keys::AZURE_OPENAI_ENDPOINT),
                    )
                })?;
            Some(endpoint)
        } else {
            None
        };

        let base_url = provider
            .base_url_env()
            .and_then(|name| lookup(name))
            .filter(|v| !v.is_empty());

        let config = Self {
            provider,
            api_key,
            endpoint,
            base_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the ProviderConfig invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::ConfigError`] if the API key is empty, or if
    /// the provider is Azure OpenAI and no endpoint is set.
    pub fn validate(&self) -> EnhanceResult<()> {
        if self.api_key.is_empty() {
            return Err(EnhanceError::config_error(
                format!("{} API key is required", self.provider),
                Some(self.provider.api_key_setting()),
            ));
        }
        if self.provider == ProviderId::AzureOpenAi
            && self.endpoint.as_deref().unwrap_or("").is_empty()
        {
            return Err(EnhanceError::config_error(
                "Azure OpenAI endpoint is not set",
                Some(keys::AZURE_OPENAI_ENDPOINT),
            ));
        }
        Ok(())
    }
}
