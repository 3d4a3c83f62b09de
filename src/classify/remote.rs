//! Remote LLM classification strategy.
//!
//! Batches comments into one structured-output request per batch and
//! degrades per batch: a failed or malformed reply drops only that
//! batch's comments from the remote results. Nothing here ever errors
//! past the strategy boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::insights;
use crate::traits::model::TextModel;
use crate::traits::strategy::AnalysisStrategy;
use crate::types::comment::{ClassifiedComment, Comment, Sentiment};
use crate::types::config::AnalysisConfig;
use crate::types::report::AnalysisMethod;

/// The remote LLM analysis strategy.
pub struct RemoteStrategy {
    model: Arc<dyn TextModel>,
    batch_size: usize,
    exemplars_per_group: usize,
}

impl RemoteStrategy {
    pub fn new(model: Arc<dyn TextModel>, config: &AnalysisConfig) -> Self {
        Self {
            model,
            batch_size: config.classify_batch_size.max(1),
            exemplars_per_group: config.exemplars_per_group,
        }
    }
}

/// Structural output schema: an array of `{comment, sentiment}` objects
/// with the sentiment restricted to the four labels.
fn sentiment_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "comment": {
                    "type": "STRING",
                    "description": "The original comment text."
                },
                "sentiment": {
                    "type": "STRING",
                    "enum": ["Positive", "Neutral", "Negative", "Mixed"],
                    "description": "The sentiment of the comment."
                }
            },
            "required": ["comment", "sentiment"]
        }
    })
}

fn batch_prompt(batch: &[Comment]) -> String {
    let listing = batch
        .iter()
        .map(|comment| format!("- {}", comment.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the sentiment of the following YouTube comments. For each comment, \
         classify its sentiment as 'Positive', 'Neutral', 'Negative', or 'Mixed'. \
         Provide the output as a JSON array of objects, where each object has \
         'comment' (the original comment text) and 'sentiment' fields.\n\n\
         Comments:\n{listing}"
    )
}

/// Outcome of parsing one batch reply.
#[derive(Debug, PartialEq)]
enum BatchReply {
    Classified(Vec<ClassifiedComment>),
    Malformed,
}

/// Parse a structured reply into classified comments.
///
/// A single object is coerced into a one-element array; a reply that is
/// neither object nor array is malformed. Sentiment labels outside the
/// four-label enum coerce to Neutral, and the category repeats the
/// sentiment label on this path.
fn parse_batch_reply(value: Value) -> BatchReply {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        _ => return BatchReply::Malformed,
    };

    let mut classified = Vec::with_capacity(items.len());
    for item in items {
        let text = item
            .get("comment")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string();
        let sentiment = item
            .get("sentiment")
            .and_then(Value::as_str)
            .and_then(Sentiment::from_label)
            .unwrap_or(Sentiment::Neutral);
        classified.push(ClassifiedComment::new(text, sentiment, sentiment.as_str()));
    }

    BatchReply::Classified(classified)
}

#[async_trait]
impl AnalysisStrategy for RemoteStrategy {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::Remote
    }

    async fn classify(&self, comments: &[Comment]) -> Vec<ClassifiedComment> {
        let schema = sentiment_schema();
        let mut classified = Vec::with_capacity(comments.len());

        // Batches run sequentially; one failed batch must not take the
        // others down with it.
        for (index, batch) in comments.chunks(self.batch_size).enumerate() {
            let reply = match self
                .model
                .generate_structured(&batch_prompt(batch), &schema)
                .await
            {
                Ok(value) => value,
                Err(e) => {
                    warn!(batch = index, error = %e, "classification batch failed, dropping");
                    continue;
                }
            };

            match parse_batch_reply(reply) {
                BatchReply::Classified(items) => {
                    debug!(batch = index, classified = items.len(), "batch classified");
                    classified.extend(items);
                }
                BatchReply::Malformed => {
                    warn!(batch = index, "unexpected reply shape, dropping batch");
                }
            }
        }

        classified
    }

    async fn synthesize(&self, classified: &[ClassifiedComment]) -> Option<String> {
        let prompt = insights::insight_prompt(classified, self.exemplars_per_group);
        match self.model.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!("insight generation returned empty text");
                None
            }
            Err(e) => {
                warn!(error = %e, "insight generation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_reply_parses_in_order() {
        let reply = json!([
            { "comment": "first", "sentiment": "Positive" },
            { "comment": "second", "sentiment": "Mixed" },
        ]);

        let BatchReply::Classified(items) = parse_batch_reply(reply) else {
            panic!("expected classified reply");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "first");
        assert_eq!(items[0].sentiment, Sentiment::Positive);
        assert_eq!(items[1].sentiment, Sentiment::Mixed);
    }

    #[test]
    fn single_object_is_coerced_to_one_element() {
        let reply = json!({ "comment": "only one", "sentiment": "Negative" });

        let BatchReply::Classified(items) = parse_batch_reply(reply) else {
            panic!("expected classified reply");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sentiment, Sentiment::Negative);
    }

    #[test]
    fn non_container_replies_are_malformed() {
        assert_eq!(parse_batch_reply(json!("a string")), BatchReply::Malformed);
        assert_eq!(parse_batch_reply(json!(42)), BatchReply::Malformed);
        assert_eq!(parse_batch_reply(json!(null)), BatchReply::Malformed);
    }

    #[test]
    fn out_of_enum_sentiment_coerces_to_neutral() {
        let reply = json!([{ "comment": "odd", "sentiment": "Ambivalent" }]);

        let BatchReply::Classified(items) = parse_batch_reply(reply) else {
            panic!("expected classified reply");
        };
        assert_eq!(items[0].sentiment, Sentiment::Neutral);
        assert_eq!(items[0].category, "Neutral");
    }

    #[test]
    fn category_repeats_the_sentiment_label() {
        let reply = json!([{ "comment": "nice", "sentiment": "Positive" }]);

        let BatchReply::Classified(items) = parse_batch_reply(reply) else {
            panic!("expected classified reply");
        };
        assert_eq!(items[0].category, "Positive");
    }

    #[test]
    fn prompt_lists_every_comment_in_the_batch() {
        let batch = vec![Comment::new("alpha"), Comment::new("beta")];
        let prompt = batch_prompt(&batch);
        assert!(prompt.contains("- alpha"));
        assert!(prompt.contains("- beta"));
        assert!(prompt.contains("'Mixed'"));
    }

    #[test]
    fn schema_restricts_sentiment_to_the_four_labels() {
        let schema = sentiment_schema();
        let labels = schema["items"]["properties"]["sentiment"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(labels.len(), 4);
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
    }
}
