//! Syntax highlighting to self-contained HTML via syntect

use simplyfi_core::Language;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Holds the loaded syntax and theme sets; build once and share.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes.remove(DEFAULT_THEME).unwrap_or_default(),
        }
    }

    /// Highlighted `<pre>` block with inline styles. On any failure the code
    /// is returned escaped but unstyled.
    pub fn highlight_html(&self, code: &str, language: Language) -> String {
        let Some(syntax) = self.syntaxes.find_syntax_by_extension(language.extension()) else {
            tracing::warn!("No syntax definition for {}, serving plain code", language);
            return plain_html(code);
        };

        match highlighted_html_for_string(code, &self.syntaxes, syntax, &self.theme) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Syntax highlighting failed: {}", e);
                plain_html(code)
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_html(code: &str) -> String {
    format!("<pre>{}</pre>\n", escape_html(code))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
