// Shared helpers for unit tests.

use crate::config::Settings;

/// Settings with every field populated for the given provider name.
pub fn settings_for(provider: &str) -> Settings {
    Settings {
        model_type: Some(provider.to_string()),
        openai_api_key: Some("settings-openai-key".to_string()),
        deepseek_api_key: Some("settings-deepseek-key".to_string()),
        azure_openai_api_key: Some("settings-azure-key".to_string()),
        azure_openai_endpoint: Some("https://example.openai.azure.com".to_string()),
        claude_api_key: Some("settings-claude-key".to_string()),
        enhancement_instruction: Some("Improve clarity and grammar.".to_string()),
    }
}

/// An environment lookup that never finds anything.
pub fn empty_env(_name: &str) -> Option<String> {
    None
}
