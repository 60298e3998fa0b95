//! Data Models
//!
//! Core data structures for the learning graph:
//!
//! - [`TopicNode`] - one topic vertex with its expansion lifecycle state
//! - [`Edge`] - a directed parent→child prerequisite link
//! - [`Graph`] - the ordered node/edge collections and their invariants

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::Edge;
pub use graph::Graph;
pub use node::{NodeStatus, Position, TopicNode, ValidationError};
