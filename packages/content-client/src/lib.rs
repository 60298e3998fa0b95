/// Topicflow Content Client - Remote Content-Generation Service
///
/// This crate wraps the three operations of the remote content-generation
/// service behind a single async client:
///
/// - **Learning paths**: turn a topic into an ordered multi-node learning path
/// - **Expansion**: produce the next subtopic for an already-known topic
/// - **Lessons**: generate a mini-lesson for a topic, optionally with path context
///
/// The client keeps no state of its own and performs no retries; failures
/// surface as [`ContentError`] and retry policy belongs to the caller.
///
/// # Example
///
/// ```ignore
/// use topicflow_content_client::{ContentClient, ContentConfig, ContentGenerator};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ContentClient::new(ContentConfig::default())?;
///
///     let path = client.generate_path("Graph Theory").await?;
///     println!("{} nodes in the learning path", path.nodes.len());
///
///     let next = client.expand_topic("Trees").await?;
///     println!("study next: {}", next.subtopic);
///
///     Ok(())
/// }
/// ```
pub mod client;
pub mod config;
pub mod error;

// Re-export main types
pub use client::{
    ContentClient, ContentGenerator, Expansion, GeneratedPath, Lesson, LessonRequest, PathEdge,
    PathNode,
};
pub use config::ContentConfig;
pub use error::{ContentError, Result};
