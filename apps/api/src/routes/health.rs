use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::prompts::CONNECTIVITY_PROMPT;
use crate::state::AppState;

/// GET /health
/// Returns service status, version and which optional backends are wired.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "mitra-api",
        "model": state.llm.model_name(),
        "perplexity_scorer": state.evaluator.is_some()
    }))
}

/// GET /api/test
/// Round-trips a fixed prompt through the configured model.
pub async fn llm_check_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let response = state
        .llm
        .send_prompt(CONNECTIVITY_PROMPT)
        .await
        .map_err(|e| AppError::Llm(format!("Connectivity check failed: {e}")))?;

    Ok(Json(json!({ "response": response })))
}
