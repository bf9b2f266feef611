// Resume shortlisting: fetch → extract → prompt → score → rank.
// All model calls go through llm_client::LanguageModelGateway.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod score_parser;
