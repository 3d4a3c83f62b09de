//! The analysis report handed to the caller.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AnalysisFailure;
use crate::types::comment::{ClassifiedComment, Sentiment};

/// Which classification strategy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Remote,
    Local,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Remote => "remote",
            AnalysisMethod::Local => "local",
        }
    }
}

/// Aggregate analysis of a video's comment threads.
///
/// Built once per request and handed to the web layer; nothing here is
/// persisted. Invariants: `total_comments == comments.len()`, the
/// category counts sum to `total_comments`, and the sentiment
/// percentages sum to 100 (± rounding) whenever comments exist.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub video_title: String,
    pub total_comments: usize,
    /// Sentiment label -> percentage of classified comments. Only labels
    /// that actually occur are present.
    pub sentiment_distribution: BTreeMap<Sentiment, f64>,
    /// Category -> comment count, largest first.
    pub category_distribution: IndexMap<String, usize>,
    pub comments: Vec<ClassifiedComment>,
    /// Markdown summary of the audience feedback.
    pub insights: String,
    pub method: AnalysisMethod,
}

/// The error shape handed to the web layer.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
}

impl From<AnalysisFailure> for ErrorResponse {
    fn from(failure: AnalysisFailure) -> Self {
        Self {
            error: failure.kind.to_string(),
            video_title: failure.video_title,
        }
    }
}
