//! Python syntax-tree grapher using tree-sitter

use simplyfi_core::{Graph, GraphNode, Language, NodeId, NodeKind};
use tree_sitter::{Node, Parser, Point, Tree};

use crate::error::FlowError;

/// Node kinds graphed as values rather than syntactic categories.
const VALUE_KINDS: &[&str] = &[
    "identifier",
    "integer",
    "float",
    "string",
    "true",
    "false",
    "none",
    "ellipsis",
];

/// Node kinds tree-sitter accepts from Python 2 that Python 3 rejects.
const LEGACY_KINDS: &[&str] = &["print_statement", "exec_statement", "chevron"];

/// Converts Python source into a graph mirroring its syntax tree.
///
/// Holds no parser between calls; each call builds its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxTreeGrapher;

impl SyntaxTreeGrapher {
    pub fn new() -> Self {
        SyntaxTreeGrapher
    }

    /// Only Python has a grammar wired in.
    pub fn supports(language: Language) -> bool {
        language == Language::Python
    }

    /// Graph source text in the given language.
    pub fn build_for(&self, code: &str, language: Language) -> Result<Graph, FlowError> {
        if !Self::supports(language) {
            return Err(FlowError::UnsupportedLanguage(language));
        }
        self.build(code)
    }

    /// Graph Python source. Fails with `InvalidSyntax` when the tree has any
    /// error or missing node; no partial graph is returned.
    pub fn build(&self, code: &str) -> Result<Graph, FlowError> {
        let tree = parse_python(code)?;
        let root = tree.root_node();

        let invalid_at = if root.has_error() {
            Some(first_error_position(root).unwrap_or_else(|| root.start_position()))
        } else {
            first_rejected_construct(root)
        };
        if let Some(point) = invalid_at {
            return Err(FlowError::InvalidSyntax {
                language: Language::Python,
                line: point.row as u32 + 1,
                column: point.column as u32 + 1,
            });
        }

        let source = code.as_bytes();
        let mut graph = Graph::with_title("Python syntax tree");
        // Pre-order DFS with an explicit stack; children pushed in reverse so
        // they pop in grammar order.
        let mut stack: Vec<(Node, Option<NodeId>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let line = node.start_position().row as u32 + 1;
            let is_value = VALUE_KINDS.contains(&node.kind());
            let graph_node = if is_value {
                let text = node.utf8_text(source).unwrap_or(node.kind());
                GraphNode::new(NodeKind::SyntaxLeaf, text)
            } else {
                GraphNode::new(NodeKind::SyntaxNode, node.kind())
            };
            let id = graph.add_node(graph_node.with_line(line));
            if let Some(parent) = parent {
                graph.add_edge(parent, id);
            }

            if is_value {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node
                .named_children(&mut cursor)
                .filter(|child| !child.is_extra())
                .collect();
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        tracing::debug!(
            "Built Python syntax tree: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

fn parse_python(code: &str) -> Result<Tree, FlowError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| FlowError::Grammar {
            language: Language::Python,
            message: e.to_string(),
        })?;
    parser.parse(code, None).ok_or(FlowError::ParseAborted)
}

/// Position of the first ERROR or MISSING node in document order.
fn first_error_position(root: Node) -> Option<Point> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position());
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Position of the first node the grammar accepts but Python 3 does not:
/// Python 2 print/exec statements, and `:=` used as a bare statement.
fn first_rejected_construct(root: Node) -> Option<Point> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let kind = node.kind();
        let bare_walrus = kind == "named_expression"
            && node.parent().is_some_and(|p| p.kind() == "expression_statement");
        if LEGACY_KINDS.contains(&kind) || bare_walrus {
            return Some(node.start_position());
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Graph Python source with a fresh grapher.
pub fn build_syntax_tree(code: &str) -> Result<Graph, FlowError> {
    SyntaxTreeGrapher::new().build(code)
}
