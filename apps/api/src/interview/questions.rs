//! Mock question generation: one technical and one behavioral question.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::interview::prompts::build_mock_questions_prompt;
use crate::llm_client::json::find_json_object;
use crate::llm_client::LanguageModelGateway;

pub const UNSUPPORTED_FILE_CONTENT: &str = "Unsupported file format.";
const NO_JSON_MESSAGE: &str = "Valid JSON was not found in the response.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockQuestions {
    #[serde(default)]
    pub technical_questions: Vec<String>,
    #[serde(default)]
    pub behavioral_questions: Vec<String>,
}

pub async fn generate_mock_questions(
    job_description: &str,
    resume_content: &str,
    llm: &dyn LanguageModelGateway,
) -> Result<MockQuestions, AppError> {
    let prompt = build_mock_questions_prompt(job_description, resume_content);

    let reply = llm
        .send_prompt(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Mock question generation failed: {e}")))?;
    debug!("Mock question reply: {}", reply.trim());

    parse_mock_questions(&reply)
}

fn parse_mock_questions(reply: &str) -> Result<MockQuestions, AppError> {
    let json = find_json_object(reply.trim())
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!(NO_JSON_MESSAGE)))?;

    serde_json::from_str(json)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("{NO_JSON_MESSAGE} ({e})")))
}
