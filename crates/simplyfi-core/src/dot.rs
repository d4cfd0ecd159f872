//! Graphviz DOT rendering on top of petgraph's dot writer

use std::fmt;

use petgraph::dot::{Config, Dot};
use petgraph::stable_graph::StableDiGraph;

use crate::graph::Graph;
use crate::model::{GraphEdge, GraphNode};

// petgraph's writer requires Display weights even when labels are supplied
// through attribute getters.
impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Escape a string for use inside a double-quoted DOT attribute.
pub fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn node_attributes(node: &GraphNode) -> String {
    let mut attrs = format!(
        "label = \"{}\" shape = \"{}\" color = \"{}\"",
        escape_label(&node.label),
        node.style.shape,
        node.style.color
    );
    if !node.style.style.is_empty() {
        attrs.push_str(&format!(" style = \"{}\"", node.style.style));
    }
    attrs.push(' ');
    attrs
}

/// Render a graph as a Graphviz `digraph`.
pub fn to_dot(graph: &Graph) -> String {
    let inner: &StableDiGraph<GraphNode, GraphEdge> = graph.inner();
    let body = Dot::with_attr_getters(
        inner,
        &[Config::NodeNoLabel, Config::EdgeNoLabel, Config::GraphContentOnly],
        &|_, _| String::new(),
        &|_, (_, node)| node_attributes(node),
    );

    let mut out = String::from("digraph {\n");
    if let Some(title) = graph.title() {
        out.push_str(&format!("    label = \"{}\"\n", escape_label(title)));
        out.push_str("    labelloc = \"t\"\n");
    }
    out.push_str(&body.to_string());
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_label("a\\b"), "a\\\\b");
        assert_eq!(escape_label("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_dot_contains_styles_and_edges() {
        let mut graph = Graph::with_title("Python flowchart");
        let start = graph.add_node(GraphNode::new(NodeKind::Start, "Start"));
        let func = graph.add_node(GraphNode::new(NodeKind::Function, "main"));
        graph.add_edge(start, func);

        let dot = to_dot(&graph);
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"Python flowchart\""));
        assert!(dot.contains("label = \"main\" shape = \"parallelogram\""));
        assert!(dot.contains("style = \"filled\""));
        assert!(dot.contains("0 -> 1"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_leaf_without_style_attribute() {
        let mut graph = Graph::new();
        graph.add_node(GraphNode::new(NodeKind::SyntaxLeaf, "x"));
        let dot = to_dot(&graph);
        assert!(dot.contains("shape = \"plaintext\""));
        assert!(!dot.contains("style ="));
    }
}
