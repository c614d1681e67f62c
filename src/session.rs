use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::agent::ModelParams;
use crate::config_manager::TranslatorConfig;
use crate::history::TranslationHistory;
use crate::translate::TranslateError;

/// Values entered in the configuration panel.
#[derive(Clone, PartialEq)]
pub struct ModelSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

impl ModelSettings {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self {
            api_key: None,
            model: config.default_model().to_string(),
            temperature: config.default_temperature,
        }
    }

    /// Store the key only when it has content; a blank entry clears it.
    pub fn set_api_key(&mut self, api_key: &str) {
        let trimmed = api_key.trim();
        self.api_key = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model_params(&self) -> Result<ModelParams, TranslateError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(TranslateError::MissingCredential)?;
        Ok(ModelParams {
            api_key,
            model: self.model.clone(),
            temperature: self.temperature,
        })
    }

    pub fn view(&self) -> SettingsView {
        SettingsView {
            has_api_key: self.has_api_key(),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("has_api_key", &self.has_api_key())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Settings as returned to the client, without the key itself.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub has_api_key: bool,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Calling,
}

#[derive(Debug)]
pub struct Session {
    pub settings: ModelSettings,
    pub history: TranslationHistory,
    pub phase: SessionPhase,
    pub last_access: Instant,
}

impl Session {
    pub fn new(settings: ModelSettings) -> Self {
        Self {
            settings,
            history: TranslationHistory::new(),
            phase: SessionPhase::Idle,
            last_access: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    /// A session mid-call is never considered idle.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.phase == SessionPhase::Idle && now.saturating_duration_since(self.last_access) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_clears_credential() {
        let mut settings = ModelSettings::from_config(&TranslatorConfig::default());
        settings.set_api_key("  abc  ");
        assert_eq!(settings.api_key.as_deref(), Some("abc"));
        settings.set_api_key("   ");
        assert!(!settings.has_api_key());
        assert_eq!(settings.model_params(), Err(TranslateError::MissingCredential));
    }

    #[test]
    fn params_carry_model_and_temperature() {
        let mut settings = ModelSettings::from_config(&TranslatorConfig::default());
        settings.set_api_key("abc");
        let params = settings.model_params().unwrap();
        assert_eq!(params.model, "gemini-1.5-flash");
        assert_eq!(params.temperature, 0.7);
        assert!(!format!("{:?}", settings).contains("abc"));
    }

    #[test]
    fn expiry_skips_sessions_in_flight() {
        let mut session = Session::new(ModelSettings::from_config(&TranslatorConfig::default()));
        let later = session.last_access + Duration::from_secs(120);

        assert!(!session.is_expired(Duration::from_secs(60), session.last_access));
        assert!(session.is_expired(Duration::from_secs(60), later));

        session.phase = SessionPhase::Calling;
        assert!(!session.is_expired(Duration::from_secs(60), later));
    }
}
