// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Do not include any other text, explanation, \
    or markdown code fences beyond the JSON.";

/// Fixed prompt used by the `/api/test` connectivity check.
pub const CONNECTIVITY_PROMPT: &str = "Reply with a single short sentence confirming you are reachable.";
