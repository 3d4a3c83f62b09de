//! YouTube Data API v3 comment source.
//!
//! Pages through `commentThreads.list` with the opaque continuation
//! token, accumulating top-level comment text in arrival order, and
//! translates the API's error envelope into the typed fetch taxonomy.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::resolver::VideoId;
use crate::security::SecretString;
use crate::traits::source::CommentSource;
use crate::types::comment::Comment;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The API's hard cap on `maxResults` per page.
const MAX_PAGE_SIZE: usize = 100;

/// Title returned when the metadata lookup fails for any reason.
pub const TITLE_PLACEHOLDER: &str = "Video title unavailable";

/// Comment source backed by the YouTube Data API v3.
///
/// # Example
///
/// ```rust,ignore
/// use comment_insights::sources::YouTubeDataApi;
///
/// let source = YouTubeDataApi::new(credentials.youtube_api_key.clone());
/// let comments = source.fetch_comments(&video, 500).await?;
/// ```
pub struct YouTubeDataApi {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl YouTubeDataApi {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch one page of comment threads.
    async fn list_threads(
        &self,
        video: &VideoId,
        page_size: usize,
        page_token: Option<&str>,
    ) -> FetchResult<ThreadPage> {
        let page_size = page_size.to_string();
        let mut request = self
            .client
            .get(format!("{}/commentThreads", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("videoId", video.as_str()),
                ("textFormat", "plainText"),
                ("maxResults", page_size.as_str()),
                ("key", self.api_key.expose()),
            ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(|e| {
            warn!(video = %video, error = %e, "commentThreads request failed");
            FetchError::Transient(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &body));
        }

        response
            .json::<ThreadPage>()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))
    }

    /// Single `videos.list` call for the title.
    async fn video_title(&self, video: &VideoId) -> FetchResult<Option<String>> {
        let response = self
            .client
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("id", video.as_str()),
                ("key", self.api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &body));
        }

        let listing: VideoListResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        Ok(listing.items.into_iter().next().map(|item| item.snippet.title))
    }
}

#[async_trait]
impl CommentSource for YouTubeDataApi {
    async fn fetch_comments(
        &self,
        video: &VideoId,
        max_results: usize,
    ) -> FetchResult<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;

        while comments.len() < max_results {
            let page_size = page_request_size(comments.len(), max_results);
            let page = self
                .list_threads(video, page_size, page_token.as_deref())
                .await?;
            let next = take_page(&mut comments, page, max_results);
            debug!(video = %video, fetched = comments.len(), "fetched comment page");
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(comments)
    }

    async fn fetch_title(&self, video: &VideoId) -> String {
        match self.video_title(video).await {
            Ok(Some(title)) => title,
            Ok(None) => {
                warn!(video = %video, "video metadata response had no items");
                TITLE_PLACEHOLDER.to_string()
            }
            Err(e) => {
                warn!(video = %video, error = %e, "title fetch failed");
                TITLE_PLACEHOLDER.to_string()
            }
        }
    }
}

/// Page size for the next request: the API cap, or less on the final page.
fn page_request_size(fetched: usize, max_results: usize) -> usize {
    (max_results - fetched).min(MAX_PAGE_SIZE)
}

/// Append a page's comments, trimming any excess over the cap.
///
/// Returns the continuation token, if one was present.
fn take_page(comments: &mut Vec<Comment>, page: ThreadPage, max_results: usize) -> Option<String> {
    for item in page.items {
        if comments.len() >= max_results {
            break;
        }
        comments.push(Comment::new(
            item.snippet.top_level_comment.snippet.text_display,
        ));
    }
    page.next_page_token
}

/// Map the API's error envelope onto the fetch taxonomy.
fn map_api_error(status: StatusCode, body: &str) -> FetchError {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let reason = envelope
        .error
        .errors
        .first()
        .and_then(|detail| detail.reason.clone())
        .unwrap_or_default();
    let message = envelope.error.message.unwrap_or_default();

    match status {
        StatusCode::FORBIDDEN if reason == "commentsDisabled" => FetchError::CommentsDisabled,
        StatusCode::FORBIDDEN
            if reason == "quotaExceeded" || message.contains("dailyLimitExceeded") =>
        {
            FetchError::QuotaExceeded
        }
        StatusCode::FORBIDDEN => FetchError::AccessDenied {
            reason: if message.is_empty() {
                "unknown reason".to_string()
            } else {
                message
            },
        },
        StatusCode::NOT_FOUND => FetchError::NotFound,
        _ => FetchError::Transient(format!(
            "HTTP {}: {}",
            status,
            if message.is_empty() {
                body
            } else {
                message.as_str()
            }
        )),
    }
}

// Wire types for the pieces of the API responses we consume.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadPage {
    #[serde(default)]
    items: Vec<ThreadItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThreadItem {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: ApiError,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: usize, next_token: Option<&str>) -> ThreadPage {
        let items: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "snippet": {
                        "topLevelComment": {
                            "snippet": { "textDisplay": format!("comment {i}") }
                        }
                    }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "items": items,
            "nextPageToken": next_token,
        }))
        .unwrap()
    }

    #[test]
    fn page_request_size_respects_api_cap() {
        assert_eq!(page_request_size(0, 150), 100);
        assert_eq!(page_request_size(100, 150), 50);
        assert_eq!(page_request_size(0, 20), 20);
    }

    #[test]
    fn cap_of_150_over_full_pages_stops_mid_second_page() {
        let mut comments = Vec::new();

        let next = take_page(&mut comments, page(100, Some("token-1")), 150);
        assert_eq!(comments.len(), 100);
        assert_eq!(next.as_deref(), Some("token-1"));

        // The second page arrives oversized; the excess is trimmed.
        let _ = take_page(&mut comments, page(100, Some("token-2")), 150);
        assert_eq!(comments.len(), 150);
        assert_eq!(comments[149].text, "comment 49");
    }

    #[test]
    fn comments_keep_arrival_order() {
        let mut comments = Vec::new();
        take_page(&mut comments, page(3, None), 10);
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["comment 0", "comment 1", "comment 2"]);
    }

    fn google_error(status_reason: &str, message: &str) -> String {
        serde_json::json!({
            "error": {
                "code": 403,
                "message": message,
                "errors": [{ "reason": status_reason, "message": message }]
            }
        })
        .to_string()
    }

    #[test]
    fn comments_disabled_maps_to_typed_error() {
        let body = google_error("commentsDisabled", "The video has disabled comments.");
        assert_eq!(
            map_api_error(StatusCode::FORBIDDEN, &body),
            FetchError::CommentsDisabled
        );
    }

    #[test]
    fn quota_exceeded_maps_from_reason_or_message() {
        let by_reason = google_error("quotaExceeded", "Quota exceeded.");
        assert_eq!(
            map_api_error(StatusCode::FORBIDDEN, &by_reason),
            FetchError::QuotaExceeded
        );

        let by_message = google_error("rateLimitExceeded", "dailyLimitExceeded for project");
        assert_eq!(
            map_api_error(StatusCode::FORBIDDEN, &by_message),
            FetchError::QuotaExceeded
        );
    }

    #[test]
    fn other_403_maps_to_access_denied_with_message() {
        let body = google_error("forbidden", "The caller lacks permission.");
        assert_eq!(
            map_api_error(StatusCode::FORBIDDEN, &body),
            FetchError::AccessDenied {
                reason: "The caller lacks permission.".to_string()
            }
        );
    }

    #[test]
    fn not_found_and_unrecognized_statuses() {
        assert_eq!(
            map_api_error(StatusCode::NOT_FOUND, "{}"),
            FetchError::NotFound
        );
        assert!(matches!(
            map_api_error(StatusCode::INTERNAL_SERVER_ERROR, "backend boom"),
            FetchError::Transient(_)
        ));
    }

    #[test]
    fn malformed_error_bodies_still_map_by_status() {
        assert_eq!(
            map_api_error(StatusCode::NOT_FOUND, "<html>not json</html>"),
            FetchError::NotFound
        );
        assert!(matches!(
            map_api_error(StatusCode::FORBIDDEN, "not json either"),
            FetchError::AccessDenied { .. }
        ));
    }
}
