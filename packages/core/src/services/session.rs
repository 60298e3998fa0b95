//! Session Orchestration
//!
//! Wires the graph service, lesson cache, and selection service together
//! around one content generator, and routes incoming diagram-surface events
//! to the right operation. This is the single entry point an embedding
//! application needs.

use crate::services::error::GraphError;
use crate::services::graph_service::{ExpandOutcome, GraphService};
use crate::services::lesson_cache::LessonCache;
use crate::services::selection_service::SelectionService;
use crate::surface::{surface_view, SurfaceEdge, SurfaceEvent, SurfaceNode};
use std::sync::Arc;
use topicflow_content_client::ContentGenerator;

/// One interactive learning-graph session
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use topicflow_content_client::{ContentClient, ContentConfig};
/// use topicflow_core::services::Session;
/// use topicflow_core::surface::SurfaceEvent;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Arc::new(ContentClient::new(ContentConfig::default())?);
///     let session = Session::new(client);
///
///     session
///         .handle_surface_event(SurfaceEvent::TopicSubmitted {
///             topic: "Graph Theory".to_string(),
///         })
///         .await;
///
///     let (nodes, edges) = session.surface_view().await;
///     println!("{} nodes, {} edges", nodes.len(), edges.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Session {
    graph: GraphService,
    selection: SelectionService,
}

impl Session {
    /// Create a session over a content generator
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        let graph = GraphService::new(generator.clone());
        let cache = LessonCache::new(generator);
        let selection = SelectionService::new(graph.clone(), cache);

        Self { graph, selection }
    }

    /// The graph growth state machine
    pub fn graph(&self) -> &GraphService {
        &self.graph
    }

    /// The selection service driving the lesson panel
    pub fn selection(&self) -> &SelectionService {
        &self.selection
    }

    /// Node and edge lists for the diagram surface
    pub async fn surface_view(&self) -> (Vec<SurfaceNode>, Vec<SurfaceEdge>) {
        let snapshot = self.graph.snapshot().await;
        surface_view(&snapshot)
    }

    /// Route one event reported by the diagram surface.
    ///
    /// Failures never escape: empty submissions are ignored, content-service
    /// failures have already been folded into node state by the services,
    /// and events referencing vanished nodes (a stale click after a reset)
    /// are dropped.
    pub async fn handle_surface_event(&self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::TopicSubmitted { topic } => {
                match self.graph.submit_topic(&topic).await {
                    Ok(()) => {}
                    // The prompt submits pre-trimmed input, but a direct
                    // caller may not; an empty topic is simply ignored.
                    Err(GraphError::EmptyTopic) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "topic submission failed");
                    }
                }
            }
            SurfaceEvent::NodeExpandRequested { id } => {
                match self.graph.expand_node(&id).await {
                    Ok(ExpandOutcome::Expanded { .. }) | Ok(ExpandOutcome::Skipped) => {}
                    Err(err) => {
                        tracing::warn!(node = %id, error = %err, "expansion failed");
                    }
                }
            }
            SurfaceEvent::NodeClicked { id } => match self.selection.select(&id).await {
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(node = %id, error = %err, "dropping click on unknown node");
                }
            },
            SurfaceEvent::PaneClicked => {
                self.selection.deselect().await;
            }
            SurfaceEvent::NodeMoved { id, position } => {
                if let Err(err) = self.graph.move_node(&id, position).await {
                    tracing::debug!(node = %id, error = %err, "dropping stale drag update");
                }
            }
        }
    }
}
