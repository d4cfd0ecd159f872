//! Unit tests for simplyfi-core module

use crate::*;

fn chain_graph(labels: &[&str]) -> Graph {
    let mut graph = Graph::new();
    let mut previous = graph.add_node(GraphNode::new(NodeKind::Start, "Start"));
    for label in labels {
        let id = graph.add_node(GraphNode::new(NodeKind::Comment, *label));
        graph.add_edge(previous, id);
        previous = id;
    }
    let end = graph.add_node(GraphNode::new(NodeKind::End, "End"));
    graph.add_edge(previous, end);
    graph
}

#[test]
fn test_node_ids_follow_insertion_order() {
    let mut graph = Graph::new();
    let a = graph.add_node(GraphNode::new(NodeKind::Comment, "same"));
    let b = graph.add_node(GraphNode::new(NodeKind::Comment, "same"));

    assert_eq!(a, NodeId(0));
    assert_eq!(b, NodeId(1));
    assert_eq!(graph.node(a).unwrap().id, a);
    assert_eq!(graph.node(b).unwrap().id, b);
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn test_graph_node_creation() {
    let node = GraphNode::new(NodeKind::Function, "main").with_line(3);

    assert_eq!(node.label, "main");
    assert_eq!(node.kind, NodeKind::Function);
    assert_eq!(node.line, Some(3));
    assert_eq!(node.style.shape, "parallelogram");
    assert_eq!(node.style.color, "lightyellow");
}

#[test]
fn test_graph_operations() {
    let graph = chain_graph(&["load", "save"]);

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);

    let start = graph.start().unwrap();
    let end = graph.end().unwrap();
    assert_eq!(graph.children(start).len(), 1);
    assert_eq!(graph.edges_to(end).count(), 1);
    assert_eq!(graph.edges_from(end).count(), 0);
    assert_eq!(graph.find_node_by_label("save"), Some(NodeId(2)));
    assert_eq!(graph.nodes_of_kind(NodeKind::Comment).count(), 2);
}

#[test]
fn test_chain_labels() {
    let graph = chain_graph(&["step one", "step two"]);
    insta::assert_snapshot!(graph.chain_labels().join(" -> "), @"Start -> step one -> step two -> End");
}

#[test]
fn test_chain_without_start_is_empty() {
    let mut graph = Graph::new();
    graph.add_node(GraphNode::new(NodeKind::SyntaxNode, "module"));
    assert!(graph.chain().is_empty());
}

#[test]
fn test_children_in_insertion_order() {
    let mut graph = Graph::new();
    let root = graph.add_node(GraphNode::new(NodeKind::SyntaxNode, "module"));
    let first = graph.add_node(GraphNode::new(NodeKind::SyntaxNode, "a"));
    let second = graph.add_node(GraphNode::new(NodeKind::SyntaxNode, "b"));
    let third = graph.add_node(GraphNode::new(NodeKind::SyntaxNode, "c"));
    graph.add_edge(root, first);
    graph.add_edge(root, second);
    graph.add_edge(root, third);

    assert_eq!(graph.children(root), vec![first, second, third]);
}

#[test]
fn test_to_data_serializes() {
    let graph = chain_graph(&["only"]);
    let data = graph.to_data();
    assert_eq!(data.nodes.len(), 3);
    assert_eq!(data.edges.len(), 2);
    assert_eq!(data.edges[0].source, NodeId(0));
    assert_eq!(data.edges[0].target, NodeId(1));

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["nodes"][1]["label"], "only");
    assert_eq!(json["nodes"][1]["kind"], "Comment");
    assert_eq!(json["nodes"][0]["style"]["shape"], "ellipse");
}

#[test]
fn test_language_parsing() {
    assert_eq!("Python".parse::<Language>(), Ok(Language::Python));
    assert_eq!("js".parse::<Language>(), Ok(Language::JavaScript));
    assert_eq!("C++".parse::<Language>(), Ok(Language::Cpp));
    assert_eq!(" c# ".parse::<Language>(), Ok(Language::CSharp));
    assert_eq!("JAVA".parse::<Language>(), Ok(Language::Java));
    assert!(matches!("cobol".parse::<Language>(), Err(CoreError::UnknownLanguage(_))));
}

#[test]
fn test_language_display_round_trips() {
    for language in Language::ALL {
        assert_eq!(language.display_name().parse::<Language>(), Ok(language));
    }
}
