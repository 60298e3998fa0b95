//! The Session Graph
//!
//! Ordered node and edge collections with the structural invariants enforced
//! at insertion time:
//!
//! 1. Node ids are unique within the graph at all times
//! 2. Every edge's endpoints exist in the node collection when it is added
//!
//! Order carries no meaning but stays stable for rendering, so both
//! collections are plain vectors and insertion always appends.

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::{TopicNode, ValidationError};

/// The session graph: ordered nodes plus ordered edges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<TopicNode>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> &[TopicNode] {
        &self.nodes
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&TopicNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node mutably by id
    pub fn node_mut(&mut self, id: &str) -> Option<&mut TopicNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Whether a node with this id exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the node fails structural validation or
    /// its id is already taken.
    pub fn insert_node(&mut self, node: TopicNode) -> Result<(), ValidationError> {
        node.validate()?;

        if self.contains_node(&node.id) {
            return Err(ValidationError::DuplicateNodeId(node.id));
        }

        self.nodes.push(node);
        Ok(())
    }

    /// Append an edge.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the edge fails structural validation,
    /// its id is already taken, or either endpoint is missing from the node
    /// collection.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), ValidationError> {
        edge.validate()?;

        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(ValidationError::DuplicateEdgeId(edge.id));
        }

        if !self.contains_node(&edge.source) {
            return Err(ValidationError::DanglingEdge {
                edge_id: edge.id,
                node_id: edge.source,
            });
        }

        if !self.contains_node(&edge.target) {
            return Err(ValidationError::DanglingEdge {
                edge_id: edge.id,
                node_id: edge.target,
            });
        }

        self.edges.push(edge);
        Ok(())
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
