//! Line-heuristic flowchart builder
//!
//! Every line is classified at most once: a comment step if the trimmed line
//! opens with `//` or `#`, otherwise a function step named by the first
//! declaration pattern that matches, otherwise nothing. Steps are chained in
//! source order between a synthetic Start and End node.

use std::sync::LazyLock;

use regex::Regex;
use simplyfi_core::{Graph, GraphNode, Language, NodeKind};

use crate::patterns::{default_patterns, DeclarationPattern};

const COMMENT_MARKERS: [&str; 2] = ["//", "#"];

/// Every line boundary Python's `str.splitlines` recognises.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]").expect("line break pattern is valid")
});

/// Split text into lines on `\n`, `\r\n`, a lone `\r`, and the Unicode line
/// and paragraph separators.
pub fn split_lines(code: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK.split(code)
}

/// What a single source line contributes to the flowchart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStep {
    /// Comment text with markers and surrounding whitespace removed.
    Comment(String),
    /// Name extracted by a declaration pattern.
    Declaration(String),
}

impl LineStep {
    pub fn label(&self) -> &str {
        match self {
            LineStep::Comment(text) | LineStep::Declaration(text) => text,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            LineStep::Comment(_) => NodeKind::Comment,
            LineStep::Declaration(_) => NodeKind::Function,
        }
    }
}

/// A step together with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStep {
    pub line: u32,
    pub step: LineStep,
}

/// Builds flowcharts from an ordered declaration-pattern table.
#[derive(Debug, Clone)]
pub struct FlowchartBuilder {
    patterns: Vec<DeclarationPattern>,
}

impl FlowchartBuilder {
    pub fn new() -> Self {
        FlowchartBuilder {
            patterns: default_patterns(),
        }
    }

    /// Append a pattern; it is tried after every existing entry.
    pub fn with_pattern(mut self, pattern: DeclarationPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn patterns(&self) -> &[DeclarationPattern] {
        &self.patterns
    }

    /// Classify one line. Comments win over declarations.
    pub fn classify_line(&self, line: &str) -> Option<LineStep> {
        let trimmed = line.trim();
        if COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
            let text = trimmed.trim_start_matches(['/', '#']).trim();
            return Some(LineStep::Comment(text.to_string()));
        }

        self.patterns
            .iter()
            .find_map(|p| p.extract_name(trimmed))
            .map(LineStep::Declaration)
    }

    /// Classify every line, dropping the ones that match nothing.
    pub fn scan(&self, code: &str) -> Vec<SourceStep> {
        split_lines(code)
            .enumerate()
            .filter_map(|(idx, line)| {
                self.classify_line(line).map(|step| SourceStep {
                    line: idx as u32 + 1,
                    step,
                })
            })
            .collect()
    }

    /// Build the Start → steps → End chain. Never fails.
    ///
    /// Repeated labels become separate nodes, so every step keeps its edge.
    pub fn build(&self, code: &str, language: Language) -> Graph {
        let mut graph = Graph::with_title(format!("{} flowchart", language));
        let mut cursor = graph.add_node(GraphNode::new(NodeKind::Start, "Start"));

        let steps = self.scan(code);
        for SourceStep { line, step } in &steps {
            let node = GraphNode::new(step.kind(), step.label()).with_line(*line);
            let id = graph.add_node(node);
            graph.add_edge(cursor, id);
            cursor = id;
        }

        let end = graph.add_node(GraphNode::new(NodeKind::End, "End"));
        graph.add_edge(cursor, end);

        tracing::debug!(
            "Built {} flowchart: {} steps, {} nodes",
            language,
            steps.len(),
            graph.node_count()
        );
        graph
    }
}

impl Default for FlowchartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a line with the built-in pattern table.
pub fn classify_line(line: &str) -> Option<LineStep> {
    FlowchartBuilder::new().classify_line(line)
}

/// Scan source text with the built-in pattern table.
pub fn scan_steps(code: &str) -> Vec<SourceStep> {
    FlowchartBuilder::new().scan(code)
}

/// Build a flowchart with the built-in pattern table.
pub fn build_flowchart(code: &str, language: Language) -> Graph {
    FlowchartBuilder::new().build(code, language)
}
