use std::sync::Arc;

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::agent::ModelParams;
use crate::error::ApiError;
use crate::session::{Session, SessionPhase, SettingsView};
use crate::state::AppState;
use crate::translate::{
    language_pair_label, translate, TranslateError, TranslationRecord, TranslationRequest,
    TranslationResponse,
};

/// Partial update from the configuration panel; absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Look up a session and mark it as used, keeping it clear of idle expiry.
fn session_mut<'a>(
    state: &'a AppState,
    session_id: &str,
) -> Result<RefMut<'a, String, Session>, ApiError> {
    let mut session = state
        .sessions
        .get_mut(session_id)
        .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))?;
    session.touch();
    Ok(session)
}

pub fn session_settings(state: &AppState, session_id: &str) -> Result<SettingsView, ApiError> {
    Ok(session_mut(state, session_id)?.settings.view())
}

pub fn close_session(state: &AppState, session_id: &str) -> Result<(), ApiError> {
    if state.remove_session(session_id) {
        Ok(())
    } else {
        Err(ApiError::SessionNotFound(session_id.to_string()))
    }
}

pub fn update_settings(
    state: &AppState,
    session_id: &str,
    update: SettingsUpdate,
) -> Result<SettingsView, ApiError> {
    let translator_config = &state.config.translator_config;

    if let Some(model) = &update.model {
        if !translator_config.is_model_allowed(model) {
            warn!("Rejected model selection: {}", model);
            return Err(ApiError::Validation(format!("Unsupported model: {}", model)));
        }
    }
    if let Some(temperature) = update.temperature {
        if !(0.0..=1.0).contains(&temperature) {
            warn!("Rejected temperature: {}", temperature);
            return Err(ApiError::Validation(format!(
                "Temperature must be between 0.0 and 1.0, got {}",
                temperature
            )));
        }
    }

    let mut session = session_mut(state, session_id)?;

    if let Some(api_key) = &update.api_key {
        session.settings.set_api_key(api_key);
    }
    if let Some(model) = update.model {
        session.settings.model = model;
    }
    if let Some(temperature) = update.temperature {
        session.settings.temperature = temperature;
    }

    Ok(session.settings.view())
}

/// Resets the session to `Idle` however the call ends, including when the request is dropped.
struct CallGuard {
    sessions: Arc<DashMap<String, Session>>,
    session_id: String,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        if let Some(mut session) = self.sessions.get_mut(&self.session_id) {
            session.phase = SessionPhase::Idle;
        }
    }
}

fn begin_call(
    state: &AppState,
    session_id: &str,
    request: &TranslationRequest,
) -> Result<(ModelParams, CallGuard), ApiError> {
    let mut session = session_mut(state, session_id)?;

    let params = session.settings.model_params()?;

    if request.text.trim().is_empty() {
        return Err(TranslateError::EmptyInput.into());
    }
    if session.phase == SessionPhase::Calling {
        return Err(ApiError::Busy);
    }

    session.phase = SessionPhase::Calling;
    let guard = CallGuard {
        sessions: state.sessions.clone(),
        session_id: session_id.to_string(),
    };
    Ok((params, guard))
}

async fn invoke_model(
    state: &AppState,
    params: &ModelParams,
    request: &TranslationRequest,
) -> Result<String, TranslateError> {
    let model = state.model_cache.get_or_create(params).map_err(|e| {
        error!("Model initialization failed: {:#}", e);
        TranslateError::ModelInit(format!("{:#}", e))
    })?;
    debug!("{} model client(s) cached", state.model_cache.len());

    translate(
        model.as_ref(),
        &request.text,
        request.source_language,
        request.target_language,
    )
    .await
}

/// The translate action: validate, call the model, record the result.
pub async fn run_translation(
    state: &AppState,
    session_id: &str,
    request: TranslationRequest,
) -> Result<TranslationResponse, ApiError> {
    let (params, guard) = begin_call(state, session_id, &request)?;
    let outcome = invoke_model(state, &params, &request).await;
    drop(guard);

    let translated_text = outcome?;
    let language_pair = language_pair_label(request.source_language, request.target_language);

    let mut session = session_mut(state, session_id)?;

    if !translated_text.is_empty() {
        session.history.append(TranslationRecord::new(
            request.text,
            translated_text.clone(),
            language_pair.clone(),
        ));
        info!(
            "Session {} translated {} ({} records)",
            session_id,
            language_pair,
            session.history.len()
        );
    } else {
        warn!("Model returned an empty translation for session {}", session_id);
    }

    Ok(TranslationResponse {
        translated_text,
        language_pair,
        history_len: session.history.len(),
    })
}

pub fn history_records(
    state: &AppState,
    session_id: &str,
) -> Result<Vec<TranslationRecord>, ApiError> {
    let session = session_mut(state, session_id)?;
    Ok(session.history.iter_recent_first().cloned().collect())
}

pub fn render_history(state: &AppState, session_id: &str) -> Result<String, ApiError> {
    let session = session_mut(state, session_id)?;
    Ok(session.history.render_all())
}
