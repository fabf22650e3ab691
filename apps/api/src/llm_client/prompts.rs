// Cross-cutting prompt fragments shared by every generation step.

/// Age-appropriateness rules prepended to all story prompts.
pub const AGE_APPROPRIATE_INSTRUCTION: &str = "CONTENT RULES: \
    The reader is a young child. Keep every sentence warm, gentle, and \
    age-appropriate. No violence, no peril beyond mild suspense, no scary \
    imagery, no romance, no brand names. Resolve every page on a hopeful note.";

/// JSON-only output rules appended to system prompts whose responses are
/// parsed with `call_json`.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
