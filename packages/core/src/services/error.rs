//! Service Layer Error Types
//!
//! Error types for session-service operations. Nothing here is fatal to the
//! session: path-generation failures leave an error-marked graph, expansion
//! failures roll back the affected node, and lesson failures surface as a
//! panel message.

use crate::models::ValidationError;
use thiserror::Error;
use topicflow_content_client::ContentError;

/// Session service errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Submitted topic was empty after trimming; nothing was mutated
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// Node not found by id
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Graph data failed validation
    #[error("Graph validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// The content-generation service failed
    #[error("Content generation failed: {0}")]
    ContentFailed(#[from] ContentError),
}

impl GraphError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }
}
