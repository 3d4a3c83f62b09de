//! The dual classification/synthesis strategy.

use async_trait::async_trait;

use crate::types::comment::{ClassifiedComment, Comment};
use crate::types::report::AnalysisMethod;

/// One of the two interchangeable analysis strategies.
///
/// A strategy is selected once per request and used for both
/// classification and synthesis, so the two choices can never diverge:
/// if remote classification ran, remote synthesis is attempted too.
#[async_trait]
pub trait AnalysisStrategy: Send + Sync {
    /// The method tag this strategy reports in the final result.
    fn method(&self) -> AnalysisMethod;

    /// Classify every comment.
    ///
    /// An empty result signals the strategy could not run (the caller
    /// falls back to the other one); it is never an error. Partial
    /// results are valid: the remote path drops failed batches.
    async fn classify(&self, comments: &[Comment]) -> Vec<ClassifiedComment>;

    /// Produce a Markdown insight summary, or `None` when the
    /// strategy's summarizer is unavailable (the caller falls back to
    /// the deterministic template).
    async fn synthesize(&self, classified: &[ClassifiedComment]) -> Option<String>;
}
