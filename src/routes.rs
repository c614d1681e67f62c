use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers::{self, SettingsUpdate};
use crate::session::SettingsView;
use crate::state::AppState;
use crate::translate::{
    Language, SourceLanguage, TranslationRecord, TranslationRequest, TranslationResponse,
};

pub fn create_routes(state: AppState) -> Router {
    let static_dir = state.config.system_config.static_dir.clone();

    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        .route("/api/options", get(get_options))

        // Sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:session_id", delete(close_session))
        .route(
            "/api/sessions/:session_id/config",
            get(get_config).put(update_config),
        )
        .route("/api/sessions/:session_id/translate", post(translate))
        .route("/api/sessions/:session_id/history", get(get_history))
        .route(
            "/api/sessions/:session_id/history/rendered",
            get(get_rendered_history),
        )

        // Single-page form
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_options(State(state): State<AppState>) -> Json<Value> {
    let translator = &state.config.translator_config;
    let source_languages: Vec<&str> = SourceLanguage::all()
        .into_iter()
        .map(|l| l.label())
        .collect();
    let target_languages: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();

    Json(json!({
        "source_languages": source_languages,
        "target_languages": target_languages,
        "model_options": translator.model_options,
        "default_temperature": translator.default_temperature,
    }))
}

async fn create_session(State(state): State<AppState>) -> Json<Value> {
    let session_id = state.create_session();
    Json(json!({ "session_id": session_id }))
}

async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    handlers::close_session(&state, &session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_config(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SettingsView>, ApiError> {
    handlers::session_settings(&state, &session_id).map(Json)
}

async fn update_config(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<SettingsView>, ApiError> {
    let update = json_body(payload)?;
    handlers::update_settings(&state, &session_id, update).map(Json)
}

async fn translate(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let request = json_body(payload)?;
    handlers::run_translation(&state, &session_id, request)
        .await
        .map(Json)
}

async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<TranslationRecord>>, ApiError> {
    handlers::history_records(&state, &session_id).map(Json)
}

async fn get_rendered_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rendered = handlers::render_history(&state, &session_id)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], rendered))
}
