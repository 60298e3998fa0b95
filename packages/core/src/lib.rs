//! Topicflow Core Session Logic
//!
//! This crate owns the state machine behind an interactive, incrementally-built
//! learning graph: a user submits a topic, the content-generation service turns
//! it into a learning path, and every node can be expanded exactly once into a
//! further subtopic.
//!
//! # Architecture
//!
//! - **Single-owner state**: the graph lives behind one `RwLock`; every
//!   mutation is read-modify-write against the latest state
//! - **Optimistic transitions**: nodes flip to `loading` before the remote
//!   call resolves and are confirmed or rolled back when it completes
//! - **Per-node concurrency guard**: an in-flight set makes double-expansion
//!   structurally impossible
//! - **Command channel**: the diagram surface reports events upward and
//!   receives node/edge lists; it never touches graph internals
//!
//! # Modules
//!
//! - [`models`] - Data structures (TopicNode, Edge, Graph)
//! - [`events`] - Domain events broadcast on every graph change
//! - [`services`] - Session services (GraphService, SelectionService, LessonCache)
//! - [`surface`] - Diagram-surface projection and incoming surface events

pub mod events;
pub mod models;
pub mod services;
pub mod surface;

// Re-export commonly used types
pub use events::*;
pub use models::*;
pub use services::*;
pub use surface::*;
