//! Comment source trait.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::resolver::VideoId;
use crate::types::comment::Comment;

/// A paginated source of top-level comments for a video.
///
/// Implementations wrap a hosting provider's data API and translate its
/// transport and quota failures into the typed fetch taxonomy.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch up to `max_results` top-level comments, in arrival order.
    ///
    /// The cap is respected exactly: a final page's excess is trimmed,
    /// never silently kept. Zero comments on a healthy video is
    /// `Ok(vec![])`, not an error; policy for the empty case belongs to
    /// the caller.
    async fn fetch_comments(
        &self,
        video: &VideoId,
        max_results: usize,
    ) -> FetchResult<Vec<Comment>>;

    /// Fetch the video title, or a placeholder when anything goes wrong.
    ///
    /// Best-effort by contract: title absence must never block comment
    /// analysis, so this returns a string rather than a result.
    async fn fetch_title(&self, video: &VideoId) -> String;
}
