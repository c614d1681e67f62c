use serde::{Deserialize, Serialize};

/// Model provider and the choices offered in the configuration panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// "gemini_llm" or one of the OpenAI-compatible providers
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The first entry is the default selection
    #[serde(default = "default_model_options")]
    pub model_options: Vec<String>,

    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model_options() -> Vec<String> {
    vec!["gemini-1.5-flash".to_string()]
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl TranslatorConfig {
    pub fn default_model(&self) -> &str {
        self.model_options
            .first()
            .map(String::as_str)
            .unwrap_or("gemini-1.5-flash")
    }

    pub fn is_model_allowed(&self, model: &str) -> bool {
        self.model_options.iter().any(|m| m == model)
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            base_url: default_base_url(),
            model_options: default_model_options(),
            default_temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
