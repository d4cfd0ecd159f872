//! Core data structures for flowchart and syntax-tree graphs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Unique identifier for a node, assigned by the graph in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Unique edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Discriminates what a node stands for in the rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // ── Flowchart ───────────────────────────────────────────
    Start,
    End,
    Comment,
    Function,

    // ── Syntax tree ─────────────────────────────────────────
    SyntaxNode,
    SyntaxLeaf,
}

impl NodeKind {
    /// Default rendering hints for this kind.
    pub fn default_style(&self) -> NodeStyle {
        match self {
            NodeKind::Start | NodeKind::End => NodeStyle::new("ellipse", "filled", "lightblue"),
            NodeKind::Comment => NodeStyle::new("box", "rounded,filled", "lightgrey"),
            NodeKind::Function => NodeStyle::new("parallelogram", "filled", "lightyellow"),
            NodeKind::SyntaxNode => NodeStyle::new("box", "filled", "white"),
            NodeKind::SyntaxLeaf => NodeStyle::new("plaintext", "", "black"),
        }
    }
}

/// Shape and colour hints handed to the graph renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub shape: String,
    pub style: String,
    pub color: String,
}

impl NodeStyle {
    pub fn new(shape: &str, style: &str, color: &str) -> Self {
        NodeStyle {
            shape: shape.to_string(),
            style: style.to_string(),
            color: color.to_string(),
        }
    }
}

/// A single node in a diagram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Human-readable text; may collide with other nodes' labels.
    pub label: String,
    pub style: NodeStyle,
    /// 1-based source line this node was derived from.
    pub line: Option<u32>,
}

impl GraphNode {
    /// Build a node with the kind's default style. The id is assigned on insertion.
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        GraphNode {
            id: NodeId::default(),
            kind,
            label: label.into(),
            style: kind.default_style(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

/// Languages offered by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Cpp,
    CSharp,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
        Language::CSharp,
    ];

    /// Name shown in selectors and diagram titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
        }
    }

    /// File extension, also accepted as a syntax token by highlighters.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::CSharp => "cs",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "c++" | "cpp" | "cxx" => Ok(Language::Cpp),
            "c#" | "cs" | "csharp" => Ok(Language::CSharp),
            _ => Err(CoreError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Serializable snapshot of a graph, nodes and edges in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphData {
    pub title: Option<String>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
