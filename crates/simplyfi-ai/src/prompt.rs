//! Prompt templates for code explanations

/// System prompt for chat-style providers.
pub const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a patient programming tutor. Explain code briefly and clearly for a reader who is learning.";

/// Build the single request sent to the model.
///
/// A blank instruction is treated as absent.
pub fn explain_prompt(code: &str, instruction: Option<&str>) -> String {
    match instruction.map(str::trim).filter(|i| !i.is_empty()) {
        Some(instruction) => format!("Explain this code in short: {}. {}", code, instruction),
        None => format!("Explain this code in short: {}", code),
    }
}
