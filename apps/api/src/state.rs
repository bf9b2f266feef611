use std::sync::Arc;

use crate::documents::TextExtractor;
use crate::evaluator::ResumeEvaluator;
use crate::llm_client::LanguageModelGateway;
use crate::shortlist::pipeline::ShortlistPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend. Default: `GeminiClient`.
    pub llm: Arc<dyn LanguageModelGateway>,
    pub extractor: Arc<dyn TextExtractor>,
    pub shortlist: Arc<ShortlistPipeline>,
    /// Perplexity scorer; `None` when no scorer sidecar is configured.
    pub evaluator: Option<Arc<ResumeEvaluator>>,
}
