//! Diagram Surface Interface
//!
//! The diagram surface is an external collaborator: it renders the node and
//! edge lists this module projects, and reports user interaction back as
//! [`SurfaceEvent`] values. It never gets write access to graph internals;
//! everything flows through this explicit command channel.
//!
//! While the graph is empty the projection shows a single synthetic prompt
//! placeholder where the user types the first topic. The placeholder is not
//! part of the graph and clicking it never produces a selection.

use crate::models::{Graph, NodeStatus, Position};
use serde::{Deserialize, Serialize};

/// Id of the synthetic prompt placeholder
pub const PROMPT_NODE_ID: &str = "prompt";

/// Stroke color for expansion and path edges
const EDGE_STROKE: &str = "#52525b";

/// Visual kind of a surface node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceNodeKind {
    /// The synthetic topic-input placeholder
    Prompt,
    /// A topic node of the graph
    Topic,
}

/// One renderable node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceNode {
    pub id: String,
    pub kind: SurfaceNodeKind,
    pub position: Position,
    pub label: String,

    /// `None` for the prompt placeholder, which has no lifecycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    pub expanded: bool,
}

/// One renderable edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub stroke: String,
}

/// User interaction reported upward by the diagram surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// The user submitted a topic from the prompt placeholder
    TopicSubmitted { topic: String },

    /// The user asked to expand a node
    NodeExpandRequested { id: String },

    /// The user clicked a node body
    NodeClicked { id: String },

    /// The user clicked the background pane
    PaneClicked,

    /// The user dragged a node
    NodeMoved { id: String, position: Position },
}

/// Project the graph into the node/edge lists the surface renders.
///
/// An empty graph projects to the prompt placeholder alone.
pub fn surface_view(graph: &Graph) -> (Vec<SurfaceNode>, Vec<SurfaceEdge>) {
    if graph.is_empty() {
        let prompt = SurfaceNode {
            id: PROMPT_NODE_ID.to_string(),
            kind: SurfaceNodeKind::Prompt,
            position: Position::ORIGIN,
            label: String::new(),
            status: None,
            expanded: false,
        };
        return (vec![prompt], Vec::new());
    }

    let nodes = graph
        .nodes()
        .iter()
        .map(|node| SurfaceNode {
            id: node.id.clone(),
            kind: SurfaceNodeKind::Topic,
            position: node.position,
            label: node.label.clone(),
            status: Some(node.status),
            expanded: node.expanded,
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| SurfaceEdge {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            stroke: EDGE_STROKE.to_string(),
        })
        .collect();

    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, TopicNode};

    #[test]
    fn test_empty_graph_projects_prompt_placeholder() {
        let (nodes, edges) = surface_view(&Graph::new());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, PROMPT_NODE_ID);
        assert_eq!(nodes[0].kind, SurfaceNodeKind::Prompt);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_populated_graph_projects_without_prompt() {
        let mut graph = Graph::new();
        graph
            .insert_node(TopicNode::new(
                "a".to_string(),
                "Graph Theory".to_string(),
                String::new(),
                Position::ORIGIN,
            ))
            .unwrap();
        graph
            .insert_node(TopicNode::new(
                "b".to_string(),
                "Trees".to_string(),
                String::new(),
                Position::new(0.0, 120.0),
            ))
            .unwrap();
        graph
            .insert_edge(Edge::new("e1".to_string(), "a".to_string(), "b".to_string()))
            .unwrap();

        let (nodes, edges) = surface_view(&graph);

        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.kind == SurfaceNodeKind::Topic));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].stroke, "#52525b");
    }

    /// Contract test: documents the exact JSON shape the surface consumes.
    ///
    /// The frontend types must match this format; internally-tagged events
    /// carry their discriminator merged with the payload fields, not nested.
    #[test]
    fn test_surface_event_serialization_contract() {
        let event = SurfaceEvent::NodeMoved {
            id: "a".to_string(),
            position: Position::new(10.0, 20.0),
        };

        let parsed = serde_json::to_value(&event).unwrap();
        assert_eq!(parsed.get("type").unwrap(), "nodeMoved");
        assert_eq!(parsed.get("id").unwrap(), "a");
        assert_eq!(parsed["position"]["x"], 10.0);
        assert!(
            parsed.get("nodeMoved").is_none(),
            "Should NOT be nested under a variant key"
        );

        let event: SurfaceEvent = serde_json::from_value(serde_json::json!({
            "type": "topicSubmitted",
            "topic": "Graph Theory"
        }))
        .unwrap();
        assert_eq!(
            event,
            SurfaceEvent::TopicSubmitted {
                topic: "Graph Theory".to_string()
            }
        );
    }

    #[test]
    fn test_surface_node_serialization() {
        let node = SurfaceNode {
            id: "a".to_string(),
            kind: SurfaceNodeKind::Topic,
            position: Position::ORIGIN,
            label: "Graph Theory".to_string(),
            status: Some(NodeStatus::Explored),
            expanded: true,
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "topic");
        assert_eq!(value["status"], "explored");

        // The prompt placeholder omits status entirely
        let prompt = SurfaceNode {
            id: PROMPT_NODE_ID.to_string(),
            kind: SurfaceNodeKind::Prompt,
            position: Position::ORIGIN,
            label: String::new(),
            status: None,
            expanded: false,
        };
        let value = serde_json::to_value(&prompt).unwrap();
        assert!(value.get("status").is_none());
    }
}
