pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluator::handlers::handle_evaluate;
use crate::interview::handlers::handle_generate_mock_questions;
use crate::shortlist::handlers::handle_resume_shortlist;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/test", get(health::llm_check_handler))
        // Shortlisting
        .route("/api/resumeshortlist", post(handle_resume_shortlist))
        // Interview prep
        .route(
            "/api/generatemockquestions",
            post(handle_generate_mock_questions),
        )
        // Perplexity fit
        .route("/api/evaluate", post(handle_evaluate))
        .with_state(state)
}
