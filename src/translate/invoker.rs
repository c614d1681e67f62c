use thiserror::Error;
use tracing::{debug, error};

use super::languages::{Language, SourceLanguage};
use crate::agent::stateless_llm::{ChatMessage, StatelessLLMInterface};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("Please provide a Google Gemini API key")]
    MissingCredential,

    #[error("Please enter text to translate")]
    EmptyInput,

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Translation error: {0}")]
    CallFailed(String),
}

pub fn system_instruction(source: Language, target: Language) -> String {
    format!("You are an expert translator from {} to {}", source, target)
}

/// The two-message prompt sent for one translation. The text is passed through untouched.
pub fn build_messages(text: &str, source: SourceLanguage, target: Language) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_instruction(source.resolve(), target)),
        ChatMessage::human(text),
    ]
}

/// Translate `text` with `model`. Blank input short-circuits without calling the model.
pub async fn translate(
    model: &dyn StatelessLLMInterface,
    text: &str,
    source: SourceLanguage,
    target: Language,
) -> Result<String, TranslateError> {
    if text.trim().is_empty() {
        return Err(TranslateError::EmptyInput);
    }

    let messages = build_messages(text, source, target);
    debug!("Translating {} chars: {} -> {}", text.len(), source, target);

    model.chat_completion(&messages).await.map_err(|e| {
        error!("Translation call failed: {:#}", e);
        TranslateError::CallFailed(format!("{:#}", e))
    })
}
