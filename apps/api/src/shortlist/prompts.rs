// Prompt template for ATS scoring.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// ATS scoring prompt template. Replace `{resume_text}` and `{json_only}` before sending.
const ATS_SCORE_PROMPT_TEMPLATE: &str = r#"Please perform the following task:
You are a strict and specialized ATS (Applicant Tracking System) evaluator.
Analyze the provided resume content internally, considering factors such as structure, formatting, keyword optimization, and overall quality.

Resume content:
{resume_text}

Instructions:
1. Evaluate the resume internally without providing any analysis or explanation.
2. Respond with the ATS score as a numerical value only in the following exact JSON format:
{
    "score": <ATS_SCORE>
}
3. Replace <ATS_SCORE> with the numerical value of the score (an integer between 0 and 100).
4. {json_only}"#;

/// Renders the scoring prompt for one resume. Pure: same text, same prompt.
pub fn build_scoring_prompt(resume_text: &str) -> String {
    // Substitute the fixed fragment first so resume text containing
    // `{json_only}` is never expanded.
    ATS_SCORE_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}
