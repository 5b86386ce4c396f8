//! Host Integration Shell
//!
//! Reproduces the enhance command flow against a host editor: obtain input
//! text (selection first, prompt second), resolve provider and credentials,
//! dispatch, then route the result back into the editor or a new viewer.
//!
//! The host's UI surfaces are narrow traits passed in explicitly rather than
//! ambient globals. The busy indicator is managed by [`StatusGuard`], whose
//! drop resets it on every exit path. No error escapes [`run_enhance`]; each
//! one becomes a single user-facing notification.

use crate::config::{keys, ProviderConfig, ProviderId, Settings};
use crate::error::EnhanceError;
use crate::logging::{log_debug, log_error, log_info};
use crate::providers::{self, EnhancementRequest};

const INPUT_PROMPT: &str = "Enter text to enhance";
const INPUT_PLACEHOLDER: &str = "Write your text here and press Enter to enhance it";
const SUCCESS_MESSAGE: &str = "Text enhanced! The improved version has been applied.";
const WELCOME_MESSAGE: &str =
    "Thank you for installing Text Enhancer! Please configure your preferred AI model.";

/// The editing context the shell reads from and writes to.
///
/// Implemented by the host editor binding; tests use mocks.
#[cfg_attr(test, mockall::automock)]
pub trait EditorHost {
    /// Current selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// Blocking input prompt. `None` means the user cancelled.
    fn prompt_input(&mut self, prompt: &str, placeholder: &str) -> Option<String>;

    /// Replace the current selection in place.
    fn replace_selection(&mut self, text: &str);

    /// Open a new viewer document containing `text`.
    fn open_viewer(&mut self, text: &str);

    fn notify_info(&mut self, message: &str);

    fn notify_error(&mut self, message: &str);

    /// Show an error with an affordance to open the named setting.
    fn offer_open_settings(&mut self, message: &str, setting: &str);
}

/// Display-only busy/idle indicator.
///
/// Not read for correctness by anything; the shell only guarantees it is
/// idle again on every exit path.
#[cfg_attr(test, mockall::automock)]
pub trait StatusIndicator {
    fn set_busy(&self);
    fn set_idle(&self);
}

/// Host-provided durable storage for the single persisted flag.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore {
    /// Has the welcome message been shown in a previous session?
    fn welcome_shown(&self) -> bool;

    fn mark_welcome_shown(&mut self);
}

/// Sets the indicator busy on construction and idle on drop, so the reset
/// holds across early returns and dispatch failures alike.
pub struct StatusGuard<'a> {
    status: &'a dyn StatusIndicator,
}

impl<'a> StatusGuard<'a> {
    pub fn busy(status: &'a dyn StatusIndicator) -> Self {
        status.set_busy();
        Self { status }
    }
}

impl Drop for StatusGuard<'_> {
    fn drop(&mut self) {
        self.status.set_idle();
    }
}

/// What a single enhance invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// The selection was replaced with the enhanced text.
    Replaced,
    /// No selection; the enhanced text was opened in a new viewer.
    OpenedViewer,
    /// The user provided no text; nothing happened.
    Cancelled,
    /// Configuration or dispatch failed; the user was notified.
    Failed,
}

/// Run one enhance command against the host.
///
/// Reproduces the command sequence: selection-else-prompt, provider and
/// credential resolution (environment over settings), instruction lookup,
/// one dispatcher call under a busy indicator, then result routing. Every
/// failure is converted to a notification; config errors carry an
/// open-settings affordance targeting the specific missing key.
pub async fn run_enhance(
    host: &mut dyn EditorHost,
    status: &dyn StatusIndicator,
    settings: &Settings,
) -> EnhanceOutcome {
    let selection = host.selected_text().filter(|s| !s.trim().is_empty());
    let from_selection = selection.is_some();

    let input = match selection {
        Some(text) => text,
        None => match host.prompt_input(INPUT_PROMPT, INPUT_PLACEHOLDER) {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                log_debug!("No text provided, cancelling operation");
                return EnhanceOutcome::Cancelled;
            }
        },
    };

    let Some(model_type) = settings.model_type.as_deref().filter(|s| !s.is_empty()) else {
        log_debug!("Model type not configured");
        host.offer_open_settings(
            "Please configure the AI model type in the extension settings.",
            keys::MODEL_TYPE,
        );
        return EnhanceOutcome::Failed;
    };

    let provider = match model_type.parse::<ProviderId>() {
        Ok(provider) => provider,
        Err(err) => {
            report_error(host, &err);
            return EnhanceOutcome::Failed;
        }
    };

    let config = match ProviderConfig::resolve(provider, settings) {
        Ok(config) => config,
        Err(err) => {
            report_error(host, &err);
            return EnhanceOutcome::Failed;
        }
    };

    let Some(instruction) = settings
        .enhancement_instruction
        .clone()
        .filter(|s| !s.is_empty())
    else {
        host.offer_open_settings(
            "Enhancement instruction is not set in the extension settings",
            keys::INSTRUCTION,
        );
        return EnhanceOutcome::Failed;
    };

    let request = EnhancementRequest::new(input, instruction);
    let _busy = StatusGuard::busy(status);
    log_info!(
        provider = provider.as_str(),
        from_selection = from_selection,
        "Starting text enhancement"
    );

    match providers::enhance(&request, &config).await {
        Ok(enhanced) => {
            if from_selection {
                log_debug!("Replacing selected text in editor");
                host.replace_selection(&enhanced);
            } else {
                log_debug!("Opening viewer with enhanced text");
                host.open_viewer(&enhanced);
            }
            host.notify_info(SUCCESS_MESSAGE);
            if from_selection {
                EnhanceOutcome::Replaced
            } else {
                EnhanceOutcome::OpenedViewer
            }
        }
        Err(err) => {
            log_error!(error = %err, "Error enhancing text");
            report_error(host, &err);
            EnhanceOutcome::Failed
        }
    }
}

/// Show the one-time welcome message with a configure affordance.
///
/// The flag is read once at startup and written once after first display.
pub fn show_welcome_once(state: &mut dyn StateStore, host: &mut dyn EditorHost) {
    if state.welcome_shown() {
        return;
    }
    log_debug!("Showing welcome message");
    host.offer_open_settings(WELCOME_MESSAGE, keys::SECTION);
    state.mark_welcome_shown();
}

fn report_error(host: &mut dyn EditorHost, err: &EnhanceError) {
    match err.setting() {
        Some(setting) => host.offer_open_settings(&err.user_message(), setting),
        None => host.notify_error(&err.user_message()),
    }
}
