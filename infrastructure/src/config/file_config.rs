//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use parley_application::GenerationParams;
use parley_domain::Model;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("generation.max_output_tokens cannot be 0")]
    InvalidMaxOutputTokens,

    #[error("auth.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Raw model configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Target model name
    pub name: Model,
    /// Optional fixed system instruction sent with every request
    pub system_instruction: Option<String>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: Model::default(),
            system_instruction: None,
        }
    }
}

/// Raw generation configuration from TOML
///
/// Mirrors [`GenerationParams`]; values are forwarded to the remote
/// service unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

impl FileGenerationConfig {
    /// Convert into the application-layer params struct
    pub fn to_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Raw auth configuration from TOML
///
/// The key itself never lives in the config file, only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while waiting for replies
    pub show_progress: bool,
    /// Path to readline history file
    pub history_file: Option<String>,
    /// Path to the JSONL conversation log (disabled when unset)
    pub conversation_log: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            conversation_log: None,
        }
    }
}

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub model: FileModelConfig,
    pub generation: FileGenerationConfig,
    pub auth: FileAuthConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.generation.max_output_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxOutputTokens);
        }
        if self.auth.api_key_env.is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generation_params() {
        let config = FileConfig::default();
        assert_eq!(config.model.name, Model::Gemini15Flash);
        assert_eq!(config.generation.to_params(), GenerationParams::default());
        assert_eq!(config.auth.api_key_env, "GEMINI_API_KEY");
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: FileConfig = toml::from_str(
            r#"
            [model]
            name = "gemini-1.5-pro"
            system_instruction = "You are a translator"

            [generation]
            temperature = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(config.model.name, Model::Gemini15Pro);
        assert_eq!(
            config.model.system_instruction.as_deref(),
            Some("You are a translator")
        );
        assert_eq!(config.generation.temperature, 0.4);
        // Unspecified fields fall back to defaults
        assert_eq!(config.generation.top_k, 64);
        assert_eq!(config.auth.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_validate_rejects_zero_token_budget() {
        let mut config = FileConfig::default();
        config.generation.max_output_tokens = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxOutputTokens)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_key_env() {
        let mut config = FileConfig::default();
        config.auth.api_key_env = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyApiKeyEnv)
        ));
    }
}
