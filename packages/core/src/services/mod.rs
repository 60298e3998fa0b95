//! Session Services
//!
//! This module contains the session's core logic:
//!
//! - `GraphService` - graph growth state machine (submission, expansion, drag)
//! - `SelectionService` - focused-node tracking and the lesson panel
//! - `LessonCache` - per-label lesson memoization
//! - `Session` - orchestration plus surface event routing
//!
//! Services coordinate between the content-generation client and the diagram
//! surface, implementing the lifecycle and concurrency rules of the graph.

pub mod error;
pub mod graph_service;
pub mod lesson_cache;
pub mod selection_service;
pub mod session;

pub use error::GraphError;
pub use graph_service::{ExpandOutcome, GraphService, LAYOUT_X_OFFSET, LAYOUT_Y_SPACING};
pub use lesson_cache::{LessonCache, LessonCacheStats};
pub use selection_service::{LessonState, Selection, SelectionService};
pub use session::Session;
