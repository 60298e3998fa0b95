//! Domain Events
//!
//! Events emitted by the graph service whenever the session graph changes.
//! They follow the observer pattern: the diagram surface (or any other
//! listener) subscribes through a tokio broadcast channel and re-renders on
//! change without polling or coupling to graph internals.
//!
//! # Event Flow
//!
//! 1. GraphService mutates the graph (submission, expansion, drag update)
//! 2. A domain event is emitted via the broadcast channel
//! 3. All subscribers receive the event asynchronously

use crate::models::{Edge, Position, TopicNode};

/// Domain events emitted by the graph service
#[derive(Debug, Clone)]
pub enum GraphEvent {
    /// The graph was cleared and reseeded by a topic submission
    GraphReset,

    /// A new node was appended
    NodeAdded(TopicNode),

    /// An existing node changed state (status, expanded flag)
    NodeUpdated(TopicNode),

    /// A new edge was appended
    EdgeAdded(Edge),

    /// A node was dragged to a new position
    NodeMoved { id: String, position: Position },
}

impl GraphEvent {
    /// Get a string representation of the event type, for logging
    pub fn event_type(&self) -> &str {
        match self {
            GraphEvent::GraphReset => "graph:reset",
            GraphEvent::NodeAdded(_) => "node:added",
            GraphEvent::NodeUpdated(_) => "node:updated",
            GraphEvent::EdgeAdded(_) => "edge:added",
            GraphEvent::NodeMoved { .. } => "node:moved",
        }
    }
}
