//! # prompt-enhancer
//!
//! Text enhancement core with provider dispatch for OpenAI, Deepseek,
//! Azure OpenAI, and Claude.
//!
//! ## Key Features
//!
//! - **Four Providers**: one dispatch call, fixed wire shapes per provider
//! - **Typed Errors**: config, provider, and transport failures stay distinct
//! - **Env-first Credentials**: environment variables override settings values
//! - **Host Seams**: editor, status, and state storage as narrow traits
//!
//! ## Example
//!
//! ```rust,no_run
//! use prompt_enhancer::{enhance, EnhancementRequest, ProviderConfig, ProviderId};
//!
//! # async fn example() -> prompt_enhancer::EnhanceResult<()> {
//! let config = ProviderConfig {
//!     provider: ProviderId::OpenAi,
//!     api_key: "your-api-key".to_string(),
//!     endpoint: None,
//!     base_url: None,
//! };
//!
//! let request = EnhancementRequest::new(
//!     "fix grammar in this sentence",
//!     "Improve clarity and grammar.",
//! );
//! let enhanced = enhance(&request, &config).await?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod config;
pub mod error;
pub mod providers;
pub mod shell;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{keys, ProviderConfig, ProviderId, Settings};
pub use error::{EnhanceError, EnhanceResult, ErrorCategory};
pub use providers::{enhance, EnhancementDispatcher, EnhancementRequest};
pub use shell::{
    run_enhance, show_welcome_once, EditorHost, EnhanceOutcome, StateStore, StatusGuard,
    StatusIndicator,
};
