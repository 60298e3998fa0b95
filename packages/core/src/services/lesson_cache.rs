//! Lesson Cache
//!
//! Memoizes generated lessons per topic label so re-selecting a node never
//! issues a second remote call.
//!
//! # Cache policy
//!
//! Unbounded, session-lifetime, no eviction and no TTL: a generated lesson
//! is the canonical content for its label for the rest of the session, so
//! the same label always yields the same lesson. When two fetches for one
//! label race, the first stored result wins and both callers receive it.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use topicflow_content_client::{ContentGenerator, Lesson, LessonRequest};

/// Cache for generated lessons, keyed by topic label
#[derive(Clone)]
pub struct LessonCache {
    cache: Arc<RwLock<HashMap<String, Lesson>>>,
    generator: Arc<dyn ContentGenerator>,
}

impl LessonCache {
    /// Create an empty cache over a content generator
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            generator,
        }
    }

    /// Cached lesson for a topic, if present. Never issues a remote call.
    pub async fn get(&self, topic: &str) -> Option<Lesson> {
        self.cache.read().await.get(topic).cloned()
    }

    /// Serve a lesson from the cache, generating it remotely on a miss.
    ///
    /// `context` carries the learning-path context (typically the root topic
    /// of the current graph) through to generation; it does not participate
    /// in the cache key.
    pub async fn get_or_generate(
        &self,
        topic: &str,
        context: Option<&str>,
    ) -> anyhow::Result<Lesson> {
        if let Some(hit) = self.get(topic).await {
            tracing::debug!(topic, "lesson cache hit");
            return Ok(hit);
        }

        let request = match context {
            Some(context) => LessonRequest::with_context(topic, context),
            None => LessonRequest::new(topic),
        };

        tracing::debug!(topic, "lesson cache miss, generating");
        let lesson = self.generator.generate_lesson(&request).await?;

        // First stored result wins so one label always maps to one lesson,
        // even when two misses race.
        let mut cache = self.cache.write().await;
        let stored = cache.entry(topic.to_string()).or_insert(lesson);
        Ok(stored.clone())
    }

    /// Get cache statistics (for debugging/monitoring)
    pub async fn stats(&self) -> LessonCacheStats {
        let cache = self.cache.read().await;
        LessonCacheStats {
            topics: cache.len(),
        }
    }
}

/// Statistics about the lesson cache
#[derive(Debug, Clone)]
pub struct LessonCacheStats {
    /// Number of topic labels with a cached lesson
    pub topics: usize,
}
