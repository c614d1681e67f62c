use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::stateless_llm_interface::{ChatMessage, Role, StatelessLLMInterface};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini LLM implementation
/// Talks to the `generateContent` REST endpoint directly
pub struct GeminiLLM {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiLLM {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        api_key: String,
        temperature: f32,
    ) -> Self {
        info!(
            "Initialized GeminiLLM: model={}, base_url={}, temperature={}",
            model, base_url, temperature
        );
        Self {
            client,
            base_url,
            model,
            api_key,
            temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// System messages become `systemInstruction`, everything else is sent as user turns
    fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let system_parts: Vec<Value> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| json!({ "text": m.content }))
            .collect();

        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| m.role == Role::Human)
            .map(|m| json!({ "role": "user", "parts": [{ "text": m.content }] }))
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.temperature,
            }
        });

        if !system_parts.is_empty() {
            body["systemInstruction"] = json!({ "parts": system_parts });
        }

        body
    }
}

fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl StatelessLLMInterface for GeminiLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let body = self.build_request_body(messages);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Gemini API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error: {} - {}", status, error_text));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to parse Gemini response")?;

        extract_text(&response_json).ok_or_else(|| anyhow!("Gemini response contained no text"))
    }
}
