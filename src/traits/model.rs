//! Text-model trait for the remote classification service.

use async_trait::async_trait;

use crate::error::ModelResult;

/// A remote text-generation service.
///
/// Implementations wrap a specific provider and handle its wire format.
/// The service accepts a plain prompt and, optionally, a structural
/// output schema constraining the reply shape.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Free-text generation.
    async fn generate(&self, prompt: &str) -> ModelResult<String>;

    /// Generation constrained by a structural output schema.
    ///
    /// Returns the parsed JSON payload. Shape validation beyond "is
    /// JSON" is the caller's job: the service can and does go
    /// off-schema, and callers decide what a salvageable reply is.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> ModelResult<serde_json::Value>;
}
