//! Axum route handler for mock interview questions.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::interview::questions::{generate_mock_questions, MockQuestions, UNSUPPORTED_FILE_CONTENT};
use crate::state::AppState;

/// POST /api/generatemockquestions
///
/// Multipart form: `jobDescription` (text) and an optional `file` (PDF resume).
/// A non-PDF upload is not rejected; the model just sees "Unsupported file format."
/// in place of the resume.
pub async fn handle_generate_mock_questions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MockQuestions>, AppError> {
    let mut job_description: Option<String> = None;
    let mut resume_content = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("jobDescription") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid jobDescription: {e}")))?;
                job_description = Some(text);
            }
            Some("file") => {
                let is_pdf = field
                    .file_name()
                    .map(|name| name.to_lowercase().ends_with(".pdf"))
                    .unwrap_or(false);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;
                resume_content = if is_pdf {
                    state.extractor.extract(bytes).await
                } else {
                    UNSUPPORTED_FILE_CONTENT.to_string()
                };
            }
            _ => {}
        }
    }

    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("jobDescription cannot be empty".to_string()))?;

    let questions =
        generate_mock_questions(&job_description, &resume_content, state.llm.as_ref()).await?;

    Ok(Json(questions))
}
