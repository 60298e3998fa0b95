/// HTTP client for the content-generation service
///
/// Three JSON-over-HTTP operations, each a single request/response with no
/// client-side retries:
///
/// - `POST /api/generate-path`   — initial multi-node learning path
/// - `POST /api/expand`          — one further subtopic for a topic
/// - `POST /api/generate-content` — a mini-lesson for a topic
///
/// Non-success responses carry a `{"detail": "..."}` body which is decoded
/// into [`ContentError::Service`]; everything else maps to
/// [`ContentError::Transport`].
use crate::config::ContentConfig;
use crate::error::{ContentError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One node of a generated learning path.
///
/// The `id` is only unique within the generated path; callers are expected
/// to re-key nodes into their own id space before mixing paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

/// A prerequisite link between two path nodes, by path-local id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub source: String,
    pub target: String,
}

/// A generated learning path: ordered nodes plus prerequisite edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPath {
    pub nodes: Vec<PathNode>,
    #[serde(default)]
    pub edges: Vec<PathEdge>,
}

/// The next subtopic to study after a given topic.
///
/// `description` defaults to empty; the service may answer with the bare
/// subtopic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    pub subtopic: String,
    #[serde(default)]
    pub description: String,
}

/// A generated mini-lesson for one topic.
///
/// Every field defaults to empty so a partial service answer still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub practice_question: String,
    #[serde(default)]
    pub further_reading: String,
}

/// Parameters for lesson generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRequest {
    /// Topic to generate the lesson for
    pub topic: String,

    /// Optional learning-path context (e.g. the root topic of the path the
    /// learner is following)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl LessonRequest {
    /// Lesson request without path context
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: None,
        }
    }

    /// Lesson request carrying the learning-path context
    pub fn with_context(topic: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: Some(context.into()),
        }
    }
}

/// The three content-generation operations consumed by the session layer.
///
/// Implemented by [`ContentClient`] for the real service; tests substitute
/// their own implementations to script responses.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate an initial learning path for a topic
    async fn generate_path(&self, topic: &str) -> Result<GeneratedPath>;

    /// Produce the next subtopic to study after `topic`
    async fn expand_topic(&self, topic: &str) -> Result<Expansion>;

    /// Generate a mini-lesson
    async fn generate_lesson(&self, request: &LessonRequest) -> Result<Lesson>;
}

/// Request body shared by the topic-keyed operations
#[derive(Serialize)]
struct TopicRequest<'a> {
    topic: &'a str,
}

/// FastAPI-style error body
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP implementation of [`ContentGenerator`]
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] when the configuration fails
    /// validation, or [`ContentError::Transport`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: ContentConfig) -> Result<Self> {
        config.validate().map_err(ContentError::Config)?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check service liveness via `GET /health`
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Service {
                status: status.as_u16(),
                detail: "health check failed".to_string(),
            });
        }

        Ok(())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // FastAPI error responses carry {"detail": "..."}; fall back to
            // the status reason when the body is not in that shape.
            let detail = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ContentError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ContentError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ContentGenerator for ContentClient {
    async fn generate_path(&self, topic: &str) -> Result<GeneratedPath> {
        tracing::debug!(topic, "requesting learning path");
        let path: GeneratedPath = self
            .post_json("/api/generate-path", &TopicRequest { topic })
            .await?;

        if path.nodes.is_empty() {
            return Err(ContentError::InvalidResponse(
                "service returned an empty learning path".to_string(),
            ));
        }

        Ok(path)
    }

    async fn expand_topic(&self, topic: &str) -> Result<Expansion> {
        tracing::debug!(topic, "requesting subtopic expansion");
        let expansion: Expansion = self
            .post_json("/api/expand", &TopicRequest { topic })
            .await?;

        if expansion.subtopic.trim().is_empty() {
            return Err(ContentError::InvalidResponse(
                "service returned an empty subtopic".to_string(),
            ));
        }

        Ok(expansion)
    }

    async fn generate_lesson(&self, request: &LessonRequest) -> Result<Lesson> {
        tracing::debug!(topic = %request.topic, "requesting lesson");
        self.post_json("/api/generate-content", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_ok;

    #[test]
    fn test_generated_path_deserialization() {
        let path: GeneratedPath = serde_json::from_value(json!({
            "nodes": [
                {"id": "1", "label": "Graph Theory", "description": "The main topic."},
                {"id": "2", "label": "Graph Basics", "description": "Vertices and edges."}
            ],
            "edges": [
                {"source": "1", "target": "2"}
            ]
        }))
        .unwrap();

        assert_eq!(path.nodes.len(), 2);
        assert_eq!(path.nodes[0].label, "Graph Theory");
        assert_eq!(path.edges.len(), 1);
        assert_eq!(path.edges[0].source, "1");
    }

    #[test]
    fn test_expansion_description_defaults_to_empty() {
        // The service may answer with the bare subtopic name
        let expansion: Expansion =
            serde_json::from_value(json!({"subtopic": "Binary Search Trees"})).unwrap();

        assert_eq!(expansion.subtopic, "Binary Search Trees");
        assert!(expansion.description.is_empty());
    }

    #[test]
    fn test_lesson_partial_payload_parses() {
        let lesson: Lesson = serde_json::from_value(json!({
            "summary": "A short overview.",
            "key_concepts": ["One", "Two"]
        }))
        .unwrap();

        assert_eq!(lesson.summary, "A short overview.");
        assert_eq!(lesson.key_concepts, vec!["One", "Two"]);
        assert!(lesson.explanation.is_empty());
        assert!(lesson.practice_question.is_empty());
    }

    #[test]
    fn test_lesson_request_serialization_omits_missing_context() {
        let request = LessonRequest::new("Trees");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value, json!({"topic": "Trees"}));

        let request = LessonRequest::with_context("Trees", "Graph Theory");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value, json!({"topic": "Trees", "context": "Graph Theory"}));
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ContentConfig::with_base_url("not-a-url");
        let result = ContentClient::new(config);

        assert!(matches!(result, Err(ContentError::Config(_))));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = assert_ok!(ContentClient::new(ContentConfig::with_base_url(
            "http://localhost:8000/"
        )));
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
