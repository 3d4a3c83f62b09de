//! Mock implementations for testing without real network calls.
//!
//! Both mocks are cheaply cloneable handles over shared state, so a
//! test can keep a clone for assertions after moving the mock into the
//! pipeline.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{FetchError, FetchResult, ModelError, ModelResult};
use crate::resolver::VideoId;
use crate::sources::TITLE_PLACEHOLDER;
use crate::traits::model::TextModel;
use crate::traits::source::CommentSource;
use crate::types::comment::Comment;

/// A comment source backed by a fixed in-memory list.
#[derive(Clone, Default)]
pub struct MockCommentSource {
    comments: Arc<RwLock<Vec<Comment>>>,
    title: Arc<RwLock<Option<String>>>,
    failure: Arc<RwLock<Option<FetchError>>>,
    calls: Arc<RwLock<Vec<MockSourceCall>>>,
}

/// Record of a call made to the mock source.
#[derive(Debug, Clone)]
pub enum MockSourceCall {
    FetchComments { video: String, max_results: usize },
    FetchTitle { video: String },
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the available comments.
    pub fn with_comments(self, texts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        *self.comments.write().unwrap() = texts.into_iter().map(Comment::new).collect();
        self
    }

    /// Set the title returned by `fetch_title`.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        *self.title.write().unwrap() = Some(title.into());
        self
    }

    /// Make every comment fetch fail with this error.
    pub fn failing_with(self, error: FetchError) -> Self {
        *self.failure.write().unwrap() = Some(error);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockSourceCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl CommentSource for MockCommentSource {
    async fn fetch_comments(
        &self,
        video: &VideoId,
        max_results: usize,
    ) -> FetchResult<Vec<Comment>> {
        self.calls
            .write()
            .unwrap()
            .push(MockSourceCall::FetchComments {
                video: video.as_str().to_string(),
                max_results,
            });

        if let Some(error) = self.failure.read().unwrap().clone() {
            return Err(error);
        }

        let comments = self.comments.read().unwrap();
        Ok(comments.iter().take(max_results).cloned().collect())
    }

    async fn fetch_title(&self, video: &VideoId) -> String {
        self.calls.write().unwrap().push(MockSourceCall::FetchTitle {
            video: video.as_str().to_string(),
        });

        self.title
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string())
    }
}

/// A text model that replays queued replies.
///
/// Structured replies are consumed in order, one per call; an exhausted
/// queue reports an empty reply so unconfigured calls fail loudly.
/// `generate` answers with a canned summary unless overridden.
#[derive(Clone, Default)]
pub struct MockModel {
    structured: Arc<RwLock<VecDeque<ModelResult<Value>>>>,
    text: Arc<RwLock<Option<ModelResult<String>>>>,
    calls: Arc<RwLock<Vec<MockModelCall>>>,
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub enum MockModelCall {
    Generate { prompt: String },
    GenerateStructured { prompt: String },
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one structured reply (or failure).
    pub fn push_structured(self, reply: ModelResult<Value>) -> Self {
        self.structured.write().unwrap().push_back(reply);
        self
    }

    /// Override the reply for every `generate` call.
    pub fn with_text_reply(self, reply: ModelResult<String>) -> Self {
        *self.text.write().unwrap() = Some(reply);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockModelCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for MockModel {
    async fn generate(&self, prompt: &str) -> ModelResult<String> {
        self.calls.write().unwrap().push(MockModelCall::Generate {
            prompt: prompt.to_string(),
        });

        self.text
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok("Mock insight summary.".to_string()))
    }

    async fn generate_structured(&self, prompt: &str, _schema: &Value) -> ModelResult<Value> {
        self.calls
            .write()
            .unwrap()
            .push(MockModelCall::GenerateStructured {
                prompt: prompt.to_string(),
            });

        self.structured
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyReply))
    }
}
