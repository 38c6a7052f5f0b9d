// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt for the extraction call.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";

/// Closing instruction for every JSON-mode prompt.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Answer with JSON only. Do not add any explanation.";
