use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::agent::stateless_llm::{GeminiLLM, OpenAICompatibleLLM, StatelessLLMInterface};
use crate::config_manager::translator::TranslatorConfig;

/// Everything needed to construct one model client.
#[derive(Clone, PartialEq)]
pub struct ModelParams {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl fmt::Debug for ModelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelParams")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Builds model clients from their construction parameters.
pub trait LLMFactory: Send + Sync {
    fn create_llm(&self, params: &ModelParams) -> Result<Arc<dyn StatelessLLMInterface>>;
}

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory {
    llm_provider: String,
    base_url: String,
    client: Client,
}

impl StatelessLLMFactory {
    pub fn new(llm_provider: &str, base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            llm_provider: llm_provider.to_string(),
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        Self::new(
            &config.llm_provider,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

impl LLMFactory for StatelessLLMFactory {
    fn create_llm(&self, params: &ModelParams) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {} ({})", self.llm_provider, params.model);

        if params.api_key.trim().is_empty() {
            anyhow::bail!("API key is empty");
        }

        match self.llm_provider.as_str() {
            "gemini_llm" => Ok(Arc::new(GeminiLLM::new(
                self.client.clone(),
                self.base_url.clone(),
                params.model.clone(),
                params.api_key.clone(),
                params.temperature,
            ))),
            "openai_compatible_llm" | "openai_llm" | "deepseek_llm" | "groq_llm"
            | "mistral_llm" => Ok(Arc::new(OpenAICompatibleLLM::new(
                self.client.clone(),
                self.base_url.clone(),
                params.model.clone(),
                params.api_key.clone(),
                params.temperature,
            ))),
            _ => Err(anyhow::anyhow!(
                "Unsupported LLM provider: {}",
                self.llm_provider
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ModelParams {
        ModelParams {
            api_key: "secret-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
        }
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", params());
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("gemini-1.5-flash"));
    }

    #[test]
    fn rejects_unknown_provider() {
        let factory =
            StatelessLLMFactory::new("carrier_pigeon", "http://localhost", Duration::from_secs(5))
                .unwrap();
        let err = factory.create_llm(&params()).err().unwrap();
        assert!(err.to_string().contains("Unsupported LLM provider"));
    }

    #[test]
    fn rejects_blank_api_key() {
        let factory =
            StatelessLLMFactory::new("gemini_llm", "http://localhost", Duration::from_secs(5))
                .unwrap();
        let mut params = params();
        params.api_key = "  ".to_string();
        assert!(factory.create_llm(&params).is_err());
    }

    #[test]
    fn builds_known_providers() {
        for provider in ["gemini_llm", "openai_compatible_llm", "groq_llm"] {
            let factory =
                StatelessLLMFactory::new(provider, "http://localhost", Duration::from_secs(5))
                    .unwrap();
            assert!(factory.create_llm(&params()).is_ok(), "{}", provider);
        }
    }
}
