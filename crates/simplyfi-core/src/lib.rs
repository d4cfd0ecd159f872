//! Simplyfi Core — Diagram graph model and DOT rendering

pub mod dot;
pub mod error;
pub mod graph;
pub mod model;

#[cfg(test)]
pub mod tests;

pub use dot::to_dot;
pub use error::CoreError;
pub use graph::Graph;
pub use model::{EdgeId, GraphData, GraphEdge, GraphNode, Language, NodeId, NodeKind, NodeStyle};
