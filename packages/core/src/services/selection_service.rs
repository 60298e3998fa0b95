//! Selection Service
//!
//! Tracks which node is focused and drives the lesson panel. Selecting a
//! node projects its `{label, description, status}` and resolves a lesson
//! through the [`LessonCache`]; deselecting clears both.
//!
//! # Staleness
//!
//! Lesson generation can take seconds, and the user may select another node
//! (or deselect) while a fetch is in flight. Every (de)selection bumps a
//! generation counter under the state lock; a fetch that resolves under an
//! older generation discards its result instead of overwriting the panel.

use crate::models::NodeStatus;
use crate::services::error::GraphError;
use crate::services::graph_service::GraphService;
use crate::services::lesson_cache::LessonCache;
use crate::surface::PROMPT_NODE_ID;
use std::sync::Arc;
use tokio::sync::RwLock;
use topicflow_content_client::Lesson;

/// View projection of the currently focused node
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub node_id: String,
    pub label: String,
    pub description: String,
    pub status: NodeStatus,
}

/// Lesson panel state for the current selection
#[derive(Debug, Clone, PartialEq)]
pub enum LessonState {
    /// Nothing selected
    Idle,
    /// A lesson fetch is in flight
    Loading,
    /// The lesson is available
    Ready(Lesson),
    /// The fetch failed; the message is shown inline in the panel
    Failed(String),
}

struct SelectionState {
    current: Option<Selection>,
    lesson: LessonState,

    /// Bumped on every select/deselect; stale fetch results compare against
    /// it and drop themselves
    generation: u64,
}

/// Service tracking the focused node and its lesson
#[derive(Clone)]
pub struct SelectionService {
    graph: GraphService,
    cache: LessonCache,
    state: Arc<RwLock<SelectionState>>,
}

impl SelectionService {
    /// Create a selection service over a graph service and lesson cache
    pub fn new(graph: GraphService, cache: LessonCache) -> Self {
        Self {
            graph,
            cache,
            state: Arc::new(RwLock::new(SelectionState {
                current: None,
                lesson: LessonState::Idle,
                generation: 0,
            })),
        }
    }

    /// Focus a node and resolve its lesson.
    ///
    /// Returns the selection projection, or `None` for the synthetic prompt
    /// placeholder, which never produces a selection. The returned future
    /// completes when the lesson fetch resolves; callers that must not block
    /// (e.g. a surface event loop) spawn it.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeNotFound` when the id does not exist.
    pub async fn select(&self, node_id: &str) -> Result<Option<Selection>, GraphError> {
        if node_id == PROMPT_NODE_ID {
            return Ok(None);
        }

        let Some(node) = self.graph.node(node_id).await else {
            return Err(GraphError::node_not_found(node_id));
        };

        let selection = Selection {
            node_id: node.id,
            label: node.label,
            description: node.description,
            status: node.status,
        };

        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.current = Some(selection.clone());
            state.lesson = LessonState::Loading;
            state.generation
        };

        let context = self.graph.root_topic().await;
        let outcome = self
            .cache
            .get_or_generate(&selection.label, context.as_deref())
            .await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(node = %selection.node_id, "discarding stale lesson result");
            return Ok(Some(selection));
        }

        state.lesson = match outcome {
            Ok(lesson) => LessonState::Ready(lesson),
            Err(err) => {
                tracing::warn!(topic = %selection.label, error = %err, "lesson fetch failed");
                LessonState::Failed(format!("{err:#}"))
            }
        };

        Ok(Some(selection))
    }

    /// Clear the current selection and logically cancel any in-flight fetch
    pub async fn deselect(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.current = None;
        state.lesson = LessonState::Idle;
    }

    /// The currently focused node's projection, if any
    pub async fn selection(&self) -> Option<Selection> {
        self.state.read().await.current.clone()
    }

    /// Current lesson panel state
    pub async fn lesson_state(&self) -> LessonState {
        self.state.read().await.lesson.clone()
    }
}
