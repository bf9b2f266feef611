//! Axum route handler for the Shortlist API.

use axum::{body::Bytes, extract::State, Json};

use crate::errors::AppError;
use crate::shortlist::models::{ShortlistRequest, ShortlistResponse};
use crate::shortlist::pipeline::INVALID_INPUT_MESSAGE;
use crate::state::AppState;

/// POST /api/resumeshortlist
///
/// Scores every resume in the batch and returns the top `count`, best first.
/// The body is decoded by hand so a malformed payload is a 400 like any other
/// invalid input.
pub async fn handle_resume_shortlist(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ShortlistResponse>, AppError> {
    let request: ShortlistRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::Validation(INVALID_INPUT_MESSAGE.to_string()))?;

    let shortlisted = state.shortlist.shortlist(request).await?;

    Ok(Json(ShortlistResponse { shortlisted }))
}
