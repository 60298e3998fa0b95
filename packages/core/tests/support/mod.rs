//! Shared test support: a scriptable in-memory content generator
//!
//! Responses are scripted per operation as a FIFO queue; when the queue is
//! empty a deterministic default derived from the topic is served. The
//! optional gate blocks `expand_topic` / `generate_lesson` calls until the
//! test releases permits, which is how the concurrency and staleness
//! scenarios are driven.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use topicflow_content_client::{
    ContentError, ContentGenerator, Expansion, GeneratedPath, Lesson, LessonRequest, PathEdge,
    PathNode,
};

type Script<T> = Mutex<VecDeque<Result<T, ContentError>>>;

pub struct MockContentService {
    paths: Script<GeneratedPath>,
    expansions: Script<Expansion>,
    lessons: Script<Lesson>,

    pub path_calls: AtomicUsize,
    pub expand_calls: AtomicUsize,
    pub lesson_calls: AtomicUsize,

    /// Most recent lesson request, for asserting on context propagation
    pub last_lesson_request: Mutex<Option<LessonRequest>>,

    /// When present, expand/lesson calls block here until `release` is called
    gate: Option<Arc<Semaphore>>,
}

impl MockContentService {
    /// Ungated mock: every call resolves immediately
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            paths: Mutex::new(VecDeque::new()),
            expansions: Mutex::new(VecDeque::new()),
            lessons: Mutex::new(VecDeque::new()),
            path_calls: AtomicUsize::new(0),
            expand_calls: AtomicUsize::new(0),
            lesson_calls: AtomicUsize::new(0),
            last_lesson_request: Mutex::new(None),
            gate: None,
        })
    }

    /// Gated mock: expand/lesson calls block until permits are released
    pub fn gated() -> Arc<Self> {
        let mut mock = Self {
            paths: Mutex::new(VecDeque::new()),
            expansions: Mutex::new(VecDeque::new()),
            lessons: Mutex::new(VecDeque::new()),
            path_calls: AtomicUsize::new(0),
            expand_calls: AtomicUsize::new(0),
            lesson_calls: AtomicUsize::new(0),
            last_lesson_request: Mutex::new(None),
            gate: None,
        };
        mock.gate = Some(Arc::new(Semaphore::new(0)));
        Arc::new(mock)
    }

    /// Let `n` gated calls proceed
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn push_path(&self, response: Result<GeneratedPath, ContentError>) {
        self.paths.lock().unwrap().push_back(response);
    }

    pub fn push_expansion(&self, response: Result<Expansion, ContentError>) {
        self.expansions.lock().unwrap().push_back(response);
    }

    pub fn push_lesson(&self, response: Result<Lesson, ContentError>) {
        self.lessons.lock().unwrap().push_back(response);
    }

    /// A scripted service failure in the shape the real service produces
    pub fn service_error(detail: &str) -> ContentError {
        ContentError::Service {
            status: 500,
            detail: detail.to_string(),
        }
    }

    async fn wait_at_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate never closes").forget();
        }
    }
}

/// Default learning path: four ordered nodes chained by three edges
pub fn default_path(topic: &str) -> GeneratedPath {
    let labels = [
        topic.to_string(),
        format!("{topic} Basics"),
        format!("{topic} Practice"),
        format!("Advanced {topic}"),
    ];

    let nodes = labels
        .iter()
        .enumerate()
        .map(|(i, label)| PathNode {
            id: (i + 1).to_string(),
            label: label.clone(),
            description: format!("What to learn about {label}."),
        })
        .collect::<Vec<_>>();

    let edges = (1..labels.len())
        .map(|i| PathEdge {
            source: i.to_string(),
            target: (i + 1).to_string(),
        })
        .collect();

    GeneratedPath { nodes, edges }
}

#[async_trait]
impl ContentGenerator for MockContentService {
    async fn generate_path(&self, topic: &str) -> Result<GeneratedPath, ContentError> {
        self.path_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.paths.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response,
            None => Ok(default_path(topic)),
        }
    }

    async fn expand_topic(&self, topic: &str) -> Result<Expansion, ContentError> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_at_gate().await;

        let scripted = self.expansions.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response,
            None => Ok(Expansion {
                subtopic: format!("{topic} Fundamentals"),
                description: format!("The first thing to study after {topic}."),
            }),
        }
    }

    async fn generate_lesson(&self, request: &LessonRequest) -> Result<Lesson, ContentError> {
        self.lesson_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_lesson_request.lock().unwrap() = Some(request.clone());
        self.wait_at_gate().await;

        let scripted = self.lessons.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response,
            None => Ok(Lesson {
                summary: format!("About {}", request.topic),
                key_concepts: vec!["Concept A".to_string(), "Concept B".to_string()],
                explanation: format!("{} explained simply.", request.topic),
                practice_question: format!("How would you apply {}?", request.topic),
                further_reading: "A tutorial or textbook chapter.".to_string(),
            }),
        }
    }
}

/// Initialize test logging once; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Spin until `condition` holds, yielding to the runtime between checks
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
