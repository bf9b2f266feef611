//! Shortlist Pipeline — scores a batch of remote resumes and keeps the top `count`.
//!
//! Per resume: fetch → extract → build prompt → model → parse score.
//! A fetch failure or an empty document skips the resume entirely. A model
//! failure or an unparseable reply still records the resume, with score 0.
//!
//! Resumes run concurrently (bounded by a semaphore). Each result carries its
//! input index so the final stable ranking does not depend on completion order.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::documents::{DocumentFetcher, TextExtractor};
use crate::llm_client::{LanguageModelGateway, LlmError};
use crate::shortlist::models::{ScoredResume, ShortlistRequest};
use crate::shortlist::prompts::build_scoring_prompt;
use crate::shortlist::score_parser::{parse_score, FALLBACK_SCORE};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input: No resumes or invalid count.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("Unexpected shortlist failure: {0}")]
    Unexpected(String),
}

/// Why a resume was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("download failed: {0}")]
    Fetch(String),

    #[error("no text could be extracted")]
    EmptyDocument,
}

/// Terminal state of one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    Skipped(SkipReason),
    Scored(ScoredResume),
}

/// A validated entry, tagged with its position in the request.
#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    name: String,
    url: String,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Resumes processed at once.
    pub concurrency: usize,
    /// Upper bound on one gateway call; exceeding it counts as a gateway failure.
    pub gateway_timeout: Duration,
}

/// Collaborators held behind trait objects; built once at startup.
pub struct ShortlistPipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn TextExtractor>,
    gateway: Arc<dyn LanguageModelGateway>,
    settings: PipelineSettings,
}

impl ShortlistPipeline {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: Arc<dyn TextExtractor>,
        gateway: Arc<dyn LanguageModelGateway>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            gateway,
            settings,
        }
    }

    pub async fn shortlist(
        &self,
        request: ShortlistRequest,
    ) -> Result<Vec<ScoredResume>, PipelineError> {
        let (count, candidates) = validate(request)?;
        let submitted = candidates.len();

        let permits = Arc::new(Semaphore::new(self.settings.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for candidate in candidates {
            let permits = permits.clone();
            let fetcher = self.fetcher.clone();
            let extractor = self.extractor.clone();
            let gateway = self.gateway.clone();
            let gateway_timeout = self.settings.gateway_timeout;

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| PipelineError::Unexpected(e.to_string()))?;
                let index = candidate.index;
                let outcome = process_resume(
                    fetcher.as_ref(),
                    extractor.as_ref(),
                    gateway.as_ref(),
                    gateway_timeout,
                    candidate,
                )
                .await;
                Ok::<_, PipelineError>((index, outcome))
            });
        }

        let mut scored = Vec::with_capacity(submitted);
        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) =
                joined.map_err(|e| PipelineError::Unexpected(format!("resume task failed: {e}")))??;
            if let ResumeOutcome::Scored(resume) = outcome {
                scored.push((index, resume));
            }
        }

        let recorded = scored.len();
        let shortlisted = rank(scored, count);

        info!(
            "Shortlisted {} of {} scored resumes ({} submitted, {} skipped)",
            shortlisted.len(),
            recorded,
            submitted,
            submitted - recorded
        );
        for resume in &shortlisted {
            debug!("Shortlisted name={} score={}", resume.name, resume.score);
        }

        Ok(shortlisted)
    }
}

/// Rejects the whole request on a bad `count` or an empty `resumes` list, and
/// silently drops entries missing a name or URL.
fn validate(request: ShortlistRequest) -> Result<(usize, Vec<Candidate>), PipelineError> {
    let count = match request.count {
        Some(count) if count > 0 => usize::try_from(count).unwrap_or(usize::MAX),
        _ => return Err(PipelineError::Validation(INVALID_INPUT_MESSAGE.to_string())),
    };
    if request.resumes.is_empty() {
        return Err(PipelineError::Validation(INVALID_INPUT_MESSAGE.to_string()));
    }

    let candidates = request
        .resumes
        .iter()
        .enumerate()
        .filter_map(|(index, resume)| {
            resume.valid_parts().map(|(name, url)| Candidate {
                index,
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect();

    Ok((count, candidates))
}

async fn process_resume(
    fetcher: &dyn DocumentFetcher,
    extractor: &dyn TextExtractor,
    gateway: &dyn LanguageModelGateway,
    gateway_timeout: Duration,
    candidate: Candidate,
) -> ResumeOutcome {
    let skip = |reason: SkipReason| {
        warn!("Skipping {} ({}): {reason}", candidate.name, candidate.url);
        ResumeOutcome::Skipped(reason)
    };

    let bytes = match fetcher.fetch(&candidate.url).await {
        Ok(bytes) => bytes,
        Err(e) => return skip(SkipReason::Fetch(e.to_string())),
    };

    let text = extractor.extract(bytes).await;
    if text.is_empty() {
        return skip(SkipReason::EmptyDocument);
    }

    let prompt = build_scoring_prompt(&text);

    let reply = match tokio::time::timeout(gateway_timeout, gateway.send_prompt(&prompt)).await {
        Ok(reply) => reply,
        Err(_) => Err(LlmError::Timeout(gateway_timeout)),
    };

    let score = match reply {
        Ok(reply) => {
            debug!("Model reply for {}: {}", candidate.name, reply.trim());
            parse_score(&reply)
        }
        Err(e) => {
            warn!(
                "Scoring {} with {} failed, recording score {FALLBACK_SCORE}: {e}",
                candidate.name,
                gateway.model_name()
            );
            FALLBACK_SCORE
        }
    };

    ResumeOutcome::Scored(ScoredResume {
        name: candidate.name,
        resume_url: candidate.url,
        score,
    })
}

/// Highest score first; equal scores keep input order. Truncates to `count`.
fn rank(mut scored: Vec<(usize, ScoredResume)>, count: usize) -> Vec<ScoredResume> {
    scored.sort_by(|(a_index, a), (b_index, b)| {
        b.score.cmp(&a.score).then(a_index.cmp(b_index))
    });
    scored
        .into_iter()
        .take(count)
        .map(|(_, resume)| resume)
        .collect()
}
