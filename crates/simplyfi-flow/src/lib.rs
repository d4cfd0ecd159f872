//! Source text to diagram builders
//!
//! Two independent, stateless builders live here: the line-heuristic
//! flowchart builder that works on any language, and the Python
//! syntax-tree grapher backed by tree-sitter.

pub mod error;
pub mod flowchart;
pub mod patterns;
pub mod syntax_tree;


pub use error::FlowError;
pub use flowchart::{build_flowchart, classify_line, scan_steps, split_lines, FlowchartBuilder, LineStep, SourceStep};
pub use patterns::{default_patterns, DeclarationPattern};
pub use syntax_tree::{build_syntax_tree, SyntaxTreeGrapher};
