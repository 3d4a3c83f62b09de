//! Comment and classification data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single top-level comment as returned by the hosting API.
///
/// Comments keep their arrival order and are never deduplicated by
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The four sentiment labels the pipeline recognizes.
///
/// `Mixed` only ever originates from the remote classifier; the local
/// threshold logic cannot produce it. That gap is a deliberate
/// difference in capability between the two strategies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    /// All labels, in display order.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Mixed => "Mixed",
        }
    }

    /// Parse one of the four exact labels. Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Positive" => Some(Sentiment::Positive),
            "Neutral" => Some(Sentiment::Neutral),
            "Negative" => Some(Sentiment::Negative),
            "Mixed" => Some(Sentiment::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comment with its assigned sentiment and category.
///
/// Produced exactly once per comment by whichever classifier ran. The
/// remote path repeats the sentiment label as the category; the local
/// path assigns one of the keyword-driven categories, so sentiment and
/// category can legitimately diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedComment {
    #[serde(rename = "comment")]
    pub text: String,
    pub sentiment: Sentiment,
    pub category: String,
}

impl ClassifiedComment {
    pub fn new(text: impl Into<String>, sentiment: Sentiment, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentiment,
            category: category.into(),
        }
    }
}
