//! Deterministic local classification.
//!
//! Rule-based categories with a lexical polarity fallback. Category and
//! sentiment are computed independently from the same text: a comment
//! reporting a bug in a glowing tone lands in Help with Positive
//! sentiment. The divergence is intentional.

use async_trait::async_trait;

use crate::insights;
use crate::sentiment;
use crate::traits::strategy::AnalysisStrategy;
use crate::types::comment::{ClassifiedComment, Comment, Sentiment};
use crate::types::report::AnalysisMethod;

/// Polarity above this reads Positive; below its negation, Negative.
const POLARITY_THRESHOLD: f32 = 0.1;

// Category keyword sets, in precedence order. First match wins.
const SUGGESTION_KEYWORDS: &[&str] = &[
    "suggestion",
    "suggest",
    "improve",
    "add",
    "consider",
    "feature",
    "ideas",
];
const HELP_KEYWORDS: &[&str] = &[
    "help", "trouble", "issue", "fix", "bug", "question", "how to", "problem",
];
const PRAISE_KEYWORDS: &[&str] = &[
    "thank", "awesome", "great", "love", "amazing", "best", "good",
];
const COMPLAINT_KEYWORDS: &[&str] = &["bad", "hate", "terrible", "worst", "dislike", "cringe"];

fn score_sentiment(score: f32) -> Sentiment {
    if score > POLARITY_THRESHOLD {
        Sentiment::Positive
    } else if score < -POLARITY_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Classify one comment into `(sentiment, category)`.
///
/// The "Neutral/Other" category marks the no-keyword-matched path, as
/// distinct from a keyword-derived label.
pub fn classify_comment(text: &str) -> (Sentiment, String) {
    let score = sentiment::polarity(text);
    let assigned = score_sentiment(score);

    let lower = text.to_lowercase();
    let category = if contains_any(&lower, SUGGESTION_KEYWORDS) {
        "Suggestion".to_string()
    } else if contains_any(&lower, HELP_KEYWORDS) {
        "Help".to_string()
    } else if contains_any(&lower, PRAISE_KEYWORDS) {
        "Positive".to_string()
    } else if contains_any(&lower, COMPLAINT_KEYWORDS) {
        "Negative".to_string()
    } else {
        match assigned {
            Sentiment::Positive => "Positive".to_string(),
            Sentiment::Negative => "Negative".to_string(),
            _ => "Neutral/Other".to_string(),
        }
    };

    (assigned, category)
}

/// The no-network analysis strategy.
///
/// By construction this path never yields `Mixed`: the polarity
/// thresholds only map to Positive, Negative, or Neutral. The remote
/// schema does allow `Mixed`; the gap is an intentional difference in
/// capability between the strategies, not something to paper over here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStrategy;

impl LocalStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisStrategy for LocalStrategy {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::Local
    }

    async fn classify(&self, comments: &[Comment]) -> Vec<ClassifiedComment> {
        comments
            .iter()
            .map(|comment| {
                let (sentiment, category) = classify_comment(&comment.text);
                ClassifiedComment::new(comment.text.clone(), sentiment, category)
            })
            .collect()
    }

    async fn synthesize(&self, classified: &[ClassifiedComment]) -> Option<String> {
        Some(insights::render_local_summary(classified))
    }
}
