//! Perplexity Evaluator — resume/JD fit from a fine-tuned causal LM.
//!
//! The model scores how "expected" the joint resume + JD text is. Lower
//! perplexity means a better fit:
//!
//!   score = clamp(100 × (1 − ln(ppl) / ln(1000)), 0, 100)
//!
//! The LM itself runs in a scorer sidecar; `PerplexityModel` is the seam.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod handlers;

/// Perplexity at (or above) which the score bottoms out at 0.
const MAX_PERPLEXITY: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scorer returned status {status}: {message}")]
    Scorer { status: u16, message: String },
}

#[async_trait]
pub trait PerplexityModel: Send + Sync {
    async fn perplexity(&self, text: &str) -> Result<f64, EvaluatorError>;
}

/// Output of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// 0 – 100, two decimals.
    pub match_score: f64,
    /// `None` when the model could not produce a finite perplexity.
    pub perplexity: Option<f64>,
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ResumeEvaluator {
    model: Arc<dyn PerplexityModel>,
}

impl ResumeEvaluator {
    pub fn new(model: Arc<dyn PerplexityModel>) -> Self {
        Self { model }
    }

    /// Never fails: a model error counts as infinite perplexity (score 0).
    pub async fn evaluate(&self, resume_text: &str, job_description: &str) -> EvaluationResult {
        let input = format!("Resume: {resume_text}\nJob Description: {job_description}");

        let perplexity = match self.model.perplexity(&input).await {
            Ok(ppl) => ppl,
            Err(e) => {
                warn!("Error calculating perplexity: {e}");
                f64::INFINITY
            }
        };

        let score = round2(perplexity_to_score(perplexity));

        EvaluationResult {
            match_score: score,
            perplexity: Some(perplexity)
                .filter(|ppl| ppl.is_finite())
                .map(round2),
            feedback: feedback_for(score).to_string(),
            timestamp: Utc::now(),
        }
    }
}

pub fn perplexity_to_score(perplexity: f64) -> f64 {
    // Perplexity is >= 1 for any real model; anything else is garbage.
    if perplexity.is_nan() || perplexity <= 0.0 {
        return 0.0;
    }
    (100.0 * (1.0 - perplexity.ln() / MAX_PERPLEXITY.ln())).clamp(0.0, 100.0)
}

pub fn feedback_for(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent match! The resume strongly aligns with the job requirements."
    } else if score >= 60.0 {
        "Good match. The resume contains many relevant qualifications."
    } else if score >= 40.0 {
        "Moderate match. Consider highlighting more relevant skills and experiences."
    } else {
        "Low match. The resume might need significant adjustments to better match this role."
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
struct PerplexityRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PerplexityResponse {
    perplexity: f64,
}

/// Client for the scorer sidecar hosting the fine-tuned model.
/// `POST {url}` with `{"text": ...}` answers `{"perplexity": <f64>}`.
pub struct RemotePerplexityModel {
    client: Client,
    url: String,
}

impl RemotePerplexityModel {
    pub fn new(url: String, timeout: Duration) -> Result<Self, EvaluatorError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }
}

#[async_trait]
impl PerplexityModel for RemotePerplexityModel {
    async fn perplexity(&self, text: &str) -> Result<f64, EvaluatorError> {
        let response = self
            .client
            .post(&self.url)
            .json(&PerplexityRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EvaluatorError::Scorer {
                status: status.as_u16(),
                message,
            });
        }

        let body: PerplexityResponse = response.json().await?;
        Ok(body.perplexity)
    }
}
