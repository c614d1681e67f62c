use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::stateless_llm_interface::{ChatMessage, Role, StatelessLLMInterface};

/// OpenAI compatible LLM implementation
/// Works with any provider exposing `/chat/completions`
pub struct OpenAICompatibleLLM {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl OpenAICompatibleLLM {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        api_key: String,
        temperature: f32,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client,
            base_url,
            model,
            api_key,
            temperature,
        }
    }

    fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let messages: Vec<Value> = messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => "system",
                    Role::Human => "user",
                };
                json!({ "role": role, "content": m.content })
            })
            .collect();

        json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "stream": false,
        })
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(messages))
            .send()
            .await
            .context("Chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Chat completion error: {} - {}", status, error_text));
        }

        let response_json: Value = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        response_json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Chat completion response contained no content"))
    }
}
