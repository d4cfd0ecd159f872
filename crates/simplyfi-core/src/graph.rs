//! Graph wrapper using petgraph::StableDiGraph with custom NodeId/EdgeId

use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// A diagram under construction — a directed graph with stable node/edge indices.
///
/// Node and edge ids come from the insertion counter, so iteration order is
/// insertion order and two nodes never share an id even if their labels match.
pub struct Graph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    title: Option<String>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("title", &self.title)
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            title: None,
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Graph {
            inner: StableDiGraph::new(),
            title: Some(title.into()),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<GraphNode, GraphEdge> {
        &self.inner
    }

    /// Add a node to graph. Returns assigned NodeId.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        self.inner[idx].id = id;
        id
    }

    /// Add a directed edge. Returns assigned EdgeId.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        let edge = GraphEdge {
            id: EdgeId::default(),
            source,
            target,
        };
        let idx = self.inner.add_edge(Self::index(source), Self::index(target), edge);
        let id = EdgeId(idx.index() as u64);
        self.inner[idx].id = id;
        id
    }

    fn index(id: NodeId) -> NodeIndex {
        NodeIndex::new(id.0 as usize)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.inner.node_weight(Self::index(id))
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.inner.edge_weight(EdgeIndex::new(id.0 as usize))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Get all outgoing edges from a node, in insertion order.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = &GraphEdge> {
        // petgraph walks adjacency lists newest-first
        let mut edges: Vec<&GraphEdge> = self
            .inner
            .edges_directed(Self::index(source), Direction::Outgoing)
            .filter_map(|edge_ref| self.inner.edge_weight(edge_ref.id()))
            .collect();
        edges.sort_by_key(|e| e.id.0);
        edges.into_iter()
    }

    /// Get all incoming edges to a node.
    pub fn edges_to(&self, target: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edges_directed(Self::index(target), Direction::Incoming)
            .filter_map(move |edge_ref| self.inner.edge_weight(edge_ref.id()))
    }

    /// Direct successors of a node, in insertion order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.edges_from(node).map(|e| e.target).collect()
    }

    /// Find a node by label (first match).
    pub fn find_node_by_label(&self, label: &str) -> Option<NodeId> {
        self.all_nodes().find(|n| n.label == label).map(|n| n.id)
    }

    /// Get all nodes of a specific kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.all_nodes().filter(move |n| n.kind == kind).map(|n| n.id)
    }

    /// The designated start node, if any.
    pub fn start(&self) -> Option<NodeId> {
        self.nodes_of_kind(NodeKind::Start).next()
    }

    /// The designated end node, if any.
    pub fn end(&self) -> Option<NodeId> {
        self.nodes_of_kind(NodeKind::End).next()
    }

    /// Walk from the start node along first outgoing edges.
    ///
    /// Stops at a node with no successors or when a node would repeat.
    pub fn chain(&self) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.start();
        while let Some(id) = current {
            if chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.edges_from(id).next().map(|e| e.target);
        }
        chain
    }

    /// Labels of the chain from start, for quick textual display.
    pub fn chain_labels(&self) -> Vec<&str> {
        self.chain()
            .into_iter()
            .filter_map(|id| self.node(id))
            .map(|n| n.label.as_str())
            .collect()
    }

    /// Labels of every node in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.all_nodes().map(|n| n.label.as_str()).collect()
    }

    /// Snapshot for serialization.
    pub fn to_data(&self) -> GraphData {
        GraphData {
            title: self.title.clone(),
            nodes: self.all_nodes().cloned().collect(),
            edges: self.all_edges().cloned().collect(),
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
