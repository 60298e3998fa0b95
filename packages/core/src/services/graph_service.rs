//! Graph Growth State Machine
//!
//! This module owns the node/edge collections and every rule by which the
//! graph grows:
//!
//! - `submit_topic` resets the session and replaces the graph with a freshly
//!   generated learning path
//! - `expand_node` appends exactly one child per node, guarded against
//!   double-clicks and re-render races by an in-flight set
//! - `move_node` writes drag positions back from the diagram surface
//!
//! # Concurrency
//!
//! All state lives behind one `RwLock`. Every operation re-acquires the lock
//! after its remote call resolves and mutates the *latest* state, so
//! expansions of different nodes may be in flight concurrently and complete
//! in any order without overwriting each other. A session epoch, bumped on
//! every submission, lets late completions from a discarded session be
//! recognized and dropped.
//!
//! # Optimistic transitions
//!
//! `expand_node` flips the node to `loading`/`expanded` before the remote
//! call resolves. Success confirms the transition (`explored` plus a new
//! child); failure rolls it back (`error`, `expanded = false`) so the user
//! can retry. Success is one-shot: an `explored` node never expands again.

use crate::events::GraphEvent;
use crate::models::{Edge, Graph, NodeStatus, Position, TopicNode};
use crate::services::error::GraphError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use topicflow_content_client::{ContentError, ContentGenerator, GeneratedPath};
use uuid::Uuid;

/// Horizontal stagger applied to alternating rows of a generated path
pub const LAYOUT_X_OFFSET: f64 = 160.0;

/// Vertical spacing between a parent and its child
pub const LAYOUT_Y_SPACING: f64 = 120.0;

/// Broadcast channel capacity for graph events.
///
/// 128 gives enough headroom for a full path replacement (one reset plus one
/// event per node and edge) without lagging subscribers that only track the
/// current frame.
const GRAPH_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Result of an `expand_node` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// A child node and edge were appended
    Expanded { child_id: String, edge_id: String },

    /// Nothing happened: the node was already expanded, an expansion was
    /// already in flight, or the session was reset while the request ran
    Skipped,
}

/// Mutable session state, owned by the lock
struct GraphState {
    graph: Graph,

    /// Ids with an expansion currently in flight.
    ///
    /// Checked-then-set under the write lock before any remote call is
    /// issued, so two attempts for the same id can never both pass.
    expanding: HashSet<String>,

    /// Bumped on every submission; completions from an older epoch are stale
    epoch: u64,
}

/// Core service owning graph growth
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use topicflow_content_client::{ContentClient, ContentConfig};
/// use topicflow_core::services::GraphService;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Arc::new(ContentClient::new(ContentConfig::default())?);
///     let service = GraphService::new(client);
///
///     service.submit_topic("Graph Theory").await?;
///     let snapshot = service.snapshot().await;
///     println!("{} nodes", snapshot.node_count());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GraphService {
    state: Arc<RwLock<GraphState>>,
    generator: Arc<dyn ContentGenerator>,
    event_tx: broadcast::Sender<GraphEvent>,

    /// Monotonic counter distinguishing child/edge ids across concurrent
    /// expansions
    child_seq: Arc<AtomicU64>,
}

impl GraphService {
    /// Create a new GraphService over a content generator
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        let (event_tx, _) = broadcast::channel(GRAPH_EVENT_CHANNEL_CAPACITY);

        Self {
            state: Arc::new(RwLock::new(GraphState {
                graph: Graph::new(),
                expanding: HashSet::new(),
                epoch: 0,
            })),
            generator,
            event_tx,
            child_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to graph change events
    pub fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.event_tx.subscribe()
    }

    /// Clone of the current graph
    pub async fn snapshot(&self) -> Graph {
        self.state.read().await.graph.clone()
    }

    /// Clone of one node, if present
    pub async fn node(&self, id: &str) -> Option<TopicNode> {
        self.state.read().await.graph.node(id).cloned()
    }

    /// Label of the first node of the current path, used as lesson context
    pub async fn root_topic(&self) -> Option<String> {
        self.state
            .read()
            .await
            .graph
            .nodes()
            .first()
            .map(|n| n.label.clone())
    }

    /// Reset the session around a newly submitted topic.
    ///
    /// Clears the current graph unconditionally, shows a single loading root
    /// while the learning path is generated, then replaces the collections
    /// with the generated path (first node `explored`, the rest `new`). On
    /// failure the graph holds a single error-marked node carrying a
    /// user-facing message.
    ///
    /// # Errors
    ///
    /// - `GraphError::EmptyTopic` when the trimmed topic is empty; the graph
    ///   is not touched
    /// - `GraphError::ContentFailed` when path generation fails; the
    ///   error-marked graph has already been applied
    pub async fn submit_topic(&self, topic: &str) -> Result<(), GraphError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GraphError::EmptyTopic);
        }

        let root_id = format!("topic-{}", Uuid::new_v4());
        let submit_epoch = {
            let mut state = self.state.write().await;
            state.epoch += 1;
            state.expanding.clear();
            state.graph.clear();

            let root = TopicNode::pending(root_id.clone(), topic.to_string(), Position::ORIGIN);
            state.graph.insert_node(root.clone())?;

            self.emit(GraphEvent::GraphReset);
            self.emit(GraphEvent::NodeAdded(root));
            state.epoch
        };

        tracing::debug!(topic, "requesting learning path");
        let outcome = self.generator.generate_path(topic).await;

        let mut state = self.state.write().await;
        if state.epoch != submit_epoch {
            tracing::debug!(topic, "discarding learning path from a superseded submission");
            return Ok(());
        }

        let applied = match outcome {
            Ok(path) => build_path_graph(&path, submit_epoch),
            Err(err) => Err(GraphError::from(err)),
        };

        match applied {
            Ok(graph) => {
                state.graph = graph;
                self.emit(GraphEvent::GraphReset);
                for node in state.graph.nodes() {
                    self.emit(GraphEvent::NodeAdded(node.clone()));
                }
                for edge in state.graph.edges() {
                    self.emit(GraphEvent::EdgeAdded(edge.clone()));
                }
                tracing::info!(
                    topic,
                    nodes = state.graph.node_count(),
                    edges = state.graph.edge_count(),
                    "learning path applied"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(topic, error = %err, "learning path generation failed");
                state.graph.clear();
                let failed = TopicNode::failed(
                    root_id,
                    topic.to_string(),
                    format!("Could not generate a learning path: {err}"),
                    Position::ORIGIN,
                );
                state.graph.insert_node(failed.clone())?;
                self.emit(GraphEvent::GraphReset);
                self.emit(GraphEvent::NodeAdded(failed));
                Err(err)
            }
        }
    }

    /// Request one further subtopic for a node and append it as a child.
    ///
    /// At most one child is ever created per call, and never more than one
    /// remote call is outstanding per node: the in-flight set is checked and
    /// updated atomically under the write lock before the request is issued,
    /// so a double-click or re-render race collapses into a single attempt.
    ///
    /// The node optimistically becomes `loading`/`expanded` before the call
    /// resolves. Failure rolls it back to `error` with `expanded = false`,
    /// re-enabling a manual retry.
    ///
    /// # Errors
    ///
    /// - `GraphError::NodeNotFound` when the id does not exist
    /// - `GraphError::ContentFailed` when the expansion request fails; the
    ///   rollback has already been applied
    pub async fn expand_node(&self, node_id: &str) -> Result<ExpandOutcome, GraphError> {
        let (label, position, expand_epoch) = {
            let mut state = self.state.write().await;

            if state.expanding.contains(node_id) {
                tracing::debug!(node = node_id, "expansion already in flight");
                return Ok(ExpandOutcome::Skipped);
            }

            let epoch = state.epoch;
            let Some(node) = state.graph.node_mut(node_id) else {
                return Err(GraphError::node_not_found(node_id));
            };

            if node.expanded {
                tracing::debug!(node = node_id, "node already expanded");
                return Ok(ExpandOutcome::Skipped);
            }

            node.expanded = true;
            node.status = NodeStatus::Loading;
            let label = node.label.clone();
            let position = node.position;
            let updated = node.clone();

            state.expanding.insert(node_id.to_string());
            self.emit(GraphEvent::NodeUpdated(updated));
            (label, position, epoch)
        };

        tracing::debug!(node = node_id, topic = %label, "requesting subtopic");
        let outcome = self.generator.expand_topic(&label).await;

        let mut state = self.state.write().await;

        // The guard is released on every path, including stale completions.
        state.expanding.remove(node_id);

        if state.epoch != expand_epoch || !state.graph.contains_node(node_id) {
            tracing::debug!(node = node_id, "discarding expansion for a reset session");
            return Ok(ExpandOutcome::Skipped);
        }

        // A blank subtopic cannot become a node; route it through the same
        // rollback as a failed request.
        let outcome = outcome.and_then(|expansion| {
            if expansion.subtopic.trim().is_empty() {
                Err(ContentError::InvalidResponse(
                    "service returned an empty subtopic".to_string(),
                ))
            } else {
                Ok(expansion)
            }
        });

        match outcome {
            Ok(expansion) => {
                let seq = self.child_seq.fetch_add(1, Ordering::Relaxed);
                let child_id = format!("{node_id}-child-{seq}");
                let edge_id = Edge::link_id(node_id, seq);

                let child = TopicNode::new(
                    child_id.clone(),
                    expansion.subtopic,
                    expansion.description,
                    Position::new(position.x, position.y + LAYOUT_Y_SPACING),
                );
                state.graph.insert_node(child.clone())?;

                let edge = Edge::new(edge_id.clone(), node_id.to_string(), child_id.clone());
                state.graph.insert_edge(edge.clone())?;

                if let Some(parent) = state.graph.node_mut(node_id) {
                    parent.status = NodeStatus::Explored;
                    let parent = parent.clone();
                    self.emit(GraphEvent::NodeUpdated(parent));
                }
                self.emit(GraphEvent::NodeAdded(child));
                self.emit(GraphEvent::EdgeAdded(edge));

                tracing::info!(node = node_id, child = %child_id, "node expanded");
                Ok(ExpandOutcome::Expanded { child_id, edge_id })
            }
            Err(err) => {
                if let Some(parent) = state.graph.node_mut(node_id) {
                    parent.status = NodeStatus::Error;
                    parent.expanded = false;
                    let parent = parent.clone();
                    self.emit(GraphEvent::NodeUpdated(parent));
                }
                tracing::warn!(node = node_id, error = %err, "expansion failed, rolled back");
                Err(err.into())
            }
        }
    }

    /// Write back a drag position from the diagram surface.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeNotFound` when the id does not exist (for
    /// example a drag finishing after the session was reset).
    pub async fn move_node(&self, node_id: &str, position: Position) -> Result<(), GraphError> {
        let mut state = self.state.write().await;

        let Some(node) = state.graph.node_mut(node_id) else {
            return Err(GraphError::node_not_found(node_id));
        };
        node.position = position;

        self.emit(GraphEvent::NodeMoved {
            id: node_id.to_string(),
            position,
        });
        Ok(())
    }

    fn emit(&self, event: GraphEvent) {
        // No subscribers is fine; the graph is still queryable via snapshot()
        let _ = self.event_tx.send(event);
    }
}

/// Build a graph from a generated path.
///
/// Service-provided node ids are re-keyed under a per-submission prefix so
/// they can never collide with child ids minted by concurrent expansions of
/// an earlier session. The first node is the submitted topic itself and
/// starts `explored`; the rest start `new`. Positions stagger left/right by
/// index parity down a vertical spine.
fn build_path_graph(path: &GeneratedPath, epoch: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    let prefix = format!("path{epoch}");

    for (index, path_node) in path.nodes.iter().enumerate() {
        let x = if index == 0 {
            0.0
        } else if index % 2 == 1 {
            LAYOUT_X_OFFSET
        } else {
            -LAYOUT_X_OFFSET
        };
        let y = index as f64 * LAYOUT_Y_SPACING;

        let mut node = TopicNode::new(
            format!("{prefix}-{}", path_node.id),
            path_node.label.clone(),
            path_node.description.clone(),
            Position::new(x, y),
        );
        // The first node is the submitted topic itself: already explored,
        // and explored means done expanding.
        if index == 0 {
            node.status = NodeStatus::Explored;
            node.expanded = true;
        }

        graph.insert_node(node)?;
    }

    for path_edge in &path.edges {
        let edge = Edge::new(
            format!("{prefix}-edge-{}-{}", path_edge.source, path_edge.target),
            format!("{prefix}-{}", path_edge.source),
            format!("{prefix}-{}", path_edge.target),
        );

        // The referential invariant wins over service output: an edge naming
        // an id the service never returned is dropped, not inserted.
        if let Err(err) = graph.insert_edge(edge) {
            tracing::warn!(error = %err, "dropping unusable path edge");
        }
    }

    Ok(graph)
}
