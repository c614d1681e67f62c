use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::languages::{Language, SourceLanguage};

/// One translate action as submitted from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    #[serde(default)]
    pub source_language: SourceLanguage,
    pub target_language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub language_pair: String,
    pub history_len: usize,
}

/// A retained result of one successful translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub source: String,
    pub translation: String,
    pub language_pair: String,
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    pub fn new(source: String, translation: String, language_pair: String) -> Self {
        Self {
            source,
            translation,
            language_pair,
            created_at: Utc::now(),
        }
    }
}
