//! Typed errors for the comment-insights library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep every
//! failure mode strongly typed. Fetch-side errors are terminal for a
//! request; model-side errors are absorbed by the fallback path and
//! never surface once comments were fetched.

use thiserror::Error;

/// Errors from the comment-hosting data API.
///
/// None of these are retried internally. Comment counts and quota
/// accounting make blind retry unsafe, so the pipeline surfaces them
/// to the caller instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The creator disabled comments for this video.
    #[error("comments are disabled for this video by the creator")]
    CommentsDisabled,

    /// Daily quota exhausted. Terminal for this request; retry later.
    #[error("API quota exceeded, please try again later")]
    QuotaExceeded,

    /// Bad or removed video id.
    #[error("video not found, please check the video URL")]
    NotFound,

    /// Permission failure without a more specific reason.
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    /// Any other transport or HTTP failure, including timeouts.
    #[error("comment fetch failed: {0}")]
    Transient(String),
}

/// Errors from the remote text-classification service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No API key configured; remote classification cannot run at all.
    #[error("classification API key is not configured")]
    MissingKey,

    /// Transport or HTTP failure.
    #[error("model request failed: {0}")]
    Http(String),

    /// The structured field did not contain parseable JSON.
    #[error("model returned malformed JSON: {0}")]
    MalformedReply(String),

    /// The reply carried no candidate text at all.
    #[error("model returned an empty reply")]
    EmptyReply,
}

/// Terminal errors for an analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The input matched none of the recognized video URL shapes.
    #[error("could not extract a video id from {input:?}")]
    InvalidReference { input: String },

    /// Comment retrieval failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetch succeeded but the video has no comments to analyze.
    #[error("no comments found for this video")]
    NoComments,
}

/// Environment errors, fatal at startup rather than per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
}

/// An analysis failure plus the best-effort video title, when one was
/// fetched before the failure occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct AnalysisFailure {
    pub kind: AnalysisError,
    pub video_title: Option<String>,
}

impl AnalysisFailure {
    pub fn new(kind: impl Into<AnalysisError>) -> Self {
        Self {
            kind: kind.into(),
            video_title: None,
        }
    }

    /// Attach the title fetched before the failure.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.video_title = Some(title.into());
        self
    }
}

/// Result type alias for comment-source operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for text-model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
