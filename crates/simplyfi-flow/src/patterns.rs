//! Ordered table of line-opening patterns approximating function declarations

use std::sync::LazyLock;

use regex::Regex;

/// One entry of the declaration table: a regex anchored at the start of a
/// trimmed line and the capture group that holds the declared name.
#[derive(Debug, Clone)]
pub struct DeclarationPattern {
    tag: String,
    regex: Regex,
    name_group: usize,
}

impl DeclarationPattern {
    /// Compile a pattern. A leading `^` is added when missing so the pattern
    /// only matches at the start of the line.
    pub fn new(tag: impl Into<String>, pattern: &str, name_group: usize) -> Result<Self, regex::Error> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^(?:{})", pattern)
        };
        Ok(DeclarationPattern {
            tag: tag.into(),
            regex: Regex::new(&anchored)?,
            name_group,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Name declared on this line, if the pattern matches.
    pub fn extract_name(&self, line: &str) -> Option<String> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(self.name_group))
            .map(|m| m.as_str().to_string())
    }
}

static DEFAULT_PATTERNS: LazyLock<Vec<DeclarationPattern>> = LazyLock::new(|| {
    [
        ("python", r"def\s+(\w+)\s*\(", 1),
        ("javascript", r"function\s+(\w+)\s*\(", 1),
        // Java, C, C++, C#: optional leading word (return type or modifier)
        ("c-family", r"(\w+\s+)?(\w+)\s*\(", 2),
    ]
    .into_iter()
    .map(|(tag, pattern, group)| {
        DeclarationPattern::new(tag, pattern, group).expect("built-in declaration pattern is valid")
    })
    .collect()
});

/// The built-in table, in priority order.
pub fn default_patterns() -> Vec<DeclarationPattern> {
    DEFAULT_PATTERNS.clone()
}
