//! Topic Node Data Structures
//!
//! This module defines the [`TopicNode`] struct and its expansion lifecycle.
//!
//! # Lifecycle
//!
//! Every node moves through `new → loading → {explored | error}`:
//!
//! - `new`: created, eligible for exactly one expansion attempt
//! - `loading`: an expansion (or the initial path generation) is in flight
//! - `explored`: the expansion succeeded and a child was appended
//! - `error`: the remote call failed; `expanded` is reset so the user can retry
//!
//! The `expanded` flag is what makes expansion one-shot: it is set before the
//! remote call resolves and only ever cleared again by the error rollback.
//!
//! # Examples
//!
//! ```rust
//! use topicflow_core::models::{NodeStatus, Position, TopicNode};
//!
//! let node = TopicNode::new(
//!     "path1-2".to_string(),
//!     "Graph Basics".to_string(),
//!     "Vertices, edges, and degrees.".to_string(),
//!     Position::new(160.0, 120.0),
//! );
//!
//! assert_eq!(node.status, NodeStatus::New);
//! assert!(!node.expanded);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for graph data
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Duplicate edge id: {0}")]
    DuplicateEdgeId(String),

    #[error("Edge {edge_id} references a missing node: {node_id}")]
    DanglingEdge { edge_id: String, node_id: String },

    #[error("Invalid node reference: {0}")]
    InvalidReference(String),
}

/// Expansion lifecycle status of a topic node.
///
/// Serialized lowercase; the diagram surface renders these strings directly
/// as status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Created, not yet expanded
    New,
    /// A remote request for this node is in flight
    Loading,
    /// Expansion succeeded; a child was appended
    Explored,
    /// The remote request failed; the node can be retried
    Error,
}

impl NodeStatus {
    /// String form used in logs and the surface contract
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::New => "new",
            NodeStatus::Loading => "loading",
            NodeStatus::Explored => "explored",
            NodeStatus::Error => "error",
        }
    }
}

/// 2D layout coordinate.
///
/// Assigned once at creation and afterwards only written back from
/// drag-position updates reported by the diagram surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The canvas origin
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One topic vertex of the learning graph.
///
/// # Fields
///
/// - `id`: unique identifier, stable for the node's lifetime
/// - `label`: the topic text shown to the user; immutable after creation
/// - `description`: optional topic summary (carries the user-facing message
///   for error-marked nodes); may be empty
/// - `status`: expansion lifecycle state
/// - `expanded`: true once an expansion attempt has been accepted; cleared
///   only by the error rollback
/// - `position`: layout coordinate
/// - `created_at`: creation timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub status: NodeStatus,
    pub expanded: bool,
    pub position: Position,
    pub created_at: DateTime<Utc>,
}

impl TopicNode {
    /// Create a fresh, unexpanded node
    pub fn new(id: String, label: String, description: String, position: Position) -> Self {
        Self {
            id,
            label,
            description,
            status: NodeStatus::New,
            expanded: false,
            position,
            created_at: Utc::now(),
        }
    }

    /// Create a node whose initial content is still being generated.
    ///
    /// Used for the root node a topic submission inserts before the
    /// learning path arrives.
    pub fn pending(id: String, label: String, position: Position) -> Self {
        Self {
            status: NodeStatus::Loading,
            ..Self::new(id, label, String::new(), position)
        }
    }

    /// Create an error-marked node carrying a user-facing message
    pub fn failed(id: String, label: String, message: String, position: Position) -> Self {
        Self {
            status: NodeStatus::Error,
            ..Self::new(id, label, message, position)
        }
    }

    /// Validate node structure
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if `id` or `label` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        if self.label.is_empty() {
            return Err(ValidationError::MissingField("label".to_string()));
        }

        Ok(())
    }

    /// Whether this node is still eligible for an expansion attempt
    pub fn can_expand(&self) -> bool {
        !self.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = TopicNode::new(
            "n1".to_string(),
            "Graph Theory".to_string(),
            "The study of graphs.".to_string(),
            Position::ORIGIN,
        );

        assert_eq!(node.id, "n1");
        assert_eq!(node.status, NodeStatus::New);
        assert!(!node.expanded);
        assert!(node.can_expand());
    }

    #[test]
    fn test_pending_node_is_loading() {
        let node = TopicNode::pending("n1".to_string(), "Graph Theory".to_string(), Position::ORIGIN);

        assert_eq!(node.status, NodeStatus::Loading);
        assert!(node.description.is_empty());
        assert!(!node.expanded);
    }

    #[test]
    fn test_failed_node_carries_message() {
        let node = TopicNode::failed(
            "n1".to_string(),
            "Graph Theory".to_string(),
            "Could not generate a learning path".to_string(),
            Position::ORIGIN,
        );

        assert_eq!(node.status, NodeStatus::Error);
        assert_eq!(node.description, "Could not generate a learning path");
    }

    #[test]
    fn test_node_validation() {
        let node = TopicNode::new(
            "n1".to_string(),
            "Graph Theory".to_string(),
            String::new(),
            Position::ORIGIN,
        );
        assert!(node.validate().is_ok());

        let mut blank_id = node.clone();
        blank_id.id = String::new();
        assert!(matches!(
            blank_id.validate(),
            Err(ValidationError::MissingField(_))
        ));

        let mut blank_label = node;
        blank_label.label = String::new();
        assert!(matches!(
            blank_label.validate(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        // Surface contract: status badges render these strings directly
        assert_eq!(
            serde_json::to_value(NodeStatus::Explored).unwrap(),
            serde_json::json!("explored")
        );
        assert_eq!(
            serde_json::to_value(NodeStatus::New).unwrap(),
            serde_json::json!("new")
        );

        let status: NodeStatus = serde_json::from_str("\"loading\"").unwrap();
        assert_eq!(status, NodeStatus::Loading);
    }

    #[test]
    fn test_node_serialization_uses_camel_case() {
        let node = TopicNode::new(
            "n1".to_string(),
            "Graph Theory".to_string(),
            String::new(),
            Position::ORIGIN,
        );

        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
