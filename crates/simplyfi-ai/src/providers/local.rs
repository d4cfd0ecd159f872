//! Local provider for offline explanations

use simplyfi_flow::{scan_steps, split_lines, LineStep};

use super::super::bridge::{ExplainProvider, ExplainRequest, Explanation};
use super::super::error::ExplainError;

/// Describes code from its comment and declaration lines without any model.
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }

    fn summarize(code: &str) -> String {
        let line_count = split_lines(code).filter(|l| !l.trim().is_empty()).count();
        let steps = scan_steps(code);
        let functions: Vec<&str> = steps
            .iter()
            .filter(|s| matches!(s.step, LineStep::Declaration(_)))
            .map(|s| s.step.label())
            .collect();
        let notes: Vec<&str> = steps
            .iter()
            .filter(|s| matches!(s.step, LineStep::Comment(_)))
            .map(|s| s.step.label())
            .filter(|label| !label.is_empty())
            .collect();

        let mut summary = format!(
            "This code has {} non-blank line{}.",
            line_count,
            if line_count == 1 { "" } else { "s" }
        );
        if functions.is_empty() {
            summary.push_str(" It declares no functions that could be detected.");
        } else {
            summary.push_str(&format!(" It declares or calls: {}.", functions.join(", ")));
        }
        if !notes.is_empty() {
            summary.push_str(&format!(" Its comments describe: {}.", notes.join("; ")));
        }
        summary
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ExplainProvider for LocalProvider {
    async fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ExplainError> {
        let mut text = Self::summarize(&request.code);
        if let Some(instruction) = request.instruction.as_deref().filter(|i| !i.trim().is_empty()) {
            text.push_str(&format!(
                " (The offline provider cannot follow the instruction {:?}.)",
                instruction.trim()
            ));
        }
        Ok(Explanation {
            text,
            provider: self.name().to_string(),
            tokens_used: None,
        })
    }

    fn name(&self) -> &str {
        "Local (Heuristic)"
    }
}
