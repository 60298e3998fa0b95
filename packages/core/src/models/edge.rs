//! Edge Data Structure
//!
//! A directed parent→child relation. Edges are only ever created by initial
//! path generation or by a successful expansion, so the graph stays a forest.

use serde::{Deserialize, Serialize};

use super::node::ValidationError;

/// A directed prerequisite link between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(id: String, source: String, target: String) -> Self {
        Self { id, source, target }
    }

    /// Derive the id for an expansion edge.
    ///
    /// The sequence number comes from a process-wide monotonic counter, so
    /// concurrent expansions of different nodes can never collide.
    pub fn link_id(parent_id: &str, seq: u64) -> String {
        format!("edge-{parent_id}-{seq}")
    }

    /// Validate edge structure
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any id is empty or the edge is a
    /// self-loop.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        if self.source.is_empty() {
            return Err(ValidationError::MissingField("source".to_string()));
        }

        if self.target.is_empty() {
            return Err(ValidationError::MissingField("target".to_string()));
        }

        if self.source == self.target {
            return Err(ValidationError::InvalidReference(
                "edge cannot connect a node to itself".to_string(),
            ));
        }

        Ok(())
    }
}
