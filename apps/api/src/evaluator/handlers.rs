use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluator::EvaluationResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume: Option<String>,
    pub job_description: Option<String>,
}

/// POST /api/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EvaluationResult>, AppError> {
    let evaluator = state.evaluator.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Perplexity scorer is not configured".to_string())
    })?;

    let missing = || {
        AppError::Validation("Missing required fields: 'resume' and 'job_description'".to_string())
    };
    let request: EvaluateRequest = serde_json::from_slice(&body).map_err(|_| missing())?;
    let (Some(resume), Some(job_description)) = (request.resume, request.job_description) else {
        return Err(missing());
    };

    if resume.trim().is_empty() || job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume and job description cannot be empty".to_string(),
        ));
    }

    Ok(Json(evaluator.evaluate(&resume, &job_description).await))
}
