// Prompt template for mock interview questions.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Renders the prompt in a single pass, so placeholder-like text inside either
/// input is kept literally and never expanded into the other input.
pub fn build_mock_questions_prompt(job_description: &str, resume_content: &str) -> String {
    format!(
        r#"Based on the following job description and resume content, generate the following:

1. Only one technical question relevant to the job description and the candidate's experience.
2. Only one behavioral question to understand how the candidate has approached challenges and demonstrated skills in previous roles.

Return the output strictly in the following JSON format:
{{
  "technical_questions": [],
  "behavioral_questions": []
}}

Job Description: {job_description}
Resume Content: {resume_content}

Please ensure the JSON is correctly structured. {JSON_ONLY_INSTRUCTION}"#
    )
}
