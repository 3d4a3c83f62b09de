//! The analysis pipeline: resolve, fetch, classify, synthesize, aggregate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::GeminiModel;
use crate::classify::{LocalStrategy, RemoteStrategy};
use crate::error::{AnalysisError, AnalysisFailure};
use crate::insights;
use crate::resolver::VideoId;
use crate::sources::YouTubeDataApi;
use crate::traits::source::CommentSource;
use crate::traits::strategy::AnalysisStrategy;
use crate::types::comment::{ClassifiedComment, Comment};
use crate::types::config::{AnalysisConfig, Credentials};
use crate::types::report::AnalysisReport;

/// One comment-analysis pipeline over a comment source.
///
/// Holds the local strategy, an optional remote strategy (present only
/// when a classification key is configured), and the request tunables.
/// Requests share nothing mutable: each `analyze` call accumulates into
/// fresh containers finalized only on success, so dropping the future
/// mid-flight cannot leave partial state behind.
///
/// # Example
///
/// ```rust,ignore
/// use comment_insights::{AnalysisConfig, Analyzer, Credentials};
///
/// let credentials = Credentials::from_env()?;
/// let analyzer = Analyzer::from_credentials(&credentials, AnalysisConfig::default());
/// let report = analyzer.analyze("https://youtu.be/dQw4w9WgXcQ").await?;
/// ```
pub struct Analyzer<S: CommentSource> {
    source: S,
    remote: Option<Arc<dyn AnalysisStrategy>>,
    local: LocalStrategy,
    config: AnalysisConfig,
}

impl Analyzer<YouTubeDataApi> {
    /// Wire the production pipeline from credentials.
    ///
    /// A missing classification key is a valid configuration: the
    /// pipeline then runs local-only.
    pub fn from_credentials(credentials: &Credentials, config: AnalysisConfig) -> Self {
        let mut analyzer =
            Analyzer::new(YouTubeDataApi::new(credentials.youtube_api_key.clone()))
                .with_config(config.clone());

        if let Some(key) = &credentials.gemini_api_key {
            let model = Arc::new(GeminiModel::new(key.clone()));
            analyzer = analyzer.with_remote(Arc::new(RemoteStrategy::new(model, &config)));
        }

        analyzer
    }
}

impl<S: CommentSource> Analyzer<S> {
    /// Create a local-only pipeline over a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            remote: None,
            local: LocalStrategy::new(),
            config: AnalysisConfig::default(),
        }
    }

    /// Install a remote strategy.
    pub fn with_remote(mut self, strategy: Arc<dyn AnalysisStrategy>) -> Self {
        self.remote = Some(strategy);
        self
    }

    /// Replace the tunables.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline for one video URL or bare id.
    ///
    /// Fetch-side failures are terminal and carry the best-effort video
    /// title; classification and synthesis failures are absorbed via
    /// fallback, so the request always completes once comments were
    /// fetched.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalysisFailure> {
        let video = VideoId::resolve(url).ok_or_else(|| {
            AnalysisFailure::new(AnalysisError::InvalidReference {
                input: url.to_string(),
            })
        })?;
        debug!(video = %video, "resolved video reference");

        // Best-effort; a placeholder title never blocks analysis.
        let video_title = self.source.fetch_title(&video).await;

        let comments = self
            .source
            .fetch_comments(&video, self.config.max_comments)
            .await
            .map_err(|e| AnalysisFailure::new(e).with_title(video_title.clone()))?;
        info!(video = %video, comments = comments.len(), "fetched comment threads");

        if comments.is_empty() {
            return Err(AnalysisFailure::new(AnalysisError::NoComments).with_title(video_title));
        }

        let (classified, strategy) = self.classify(&comments).await;
        let insights_text = match strategy.synthesize(&classified).await {
            Some(text) => text,
            None => {
                warn!("synthesis unavailable, falling back to the templated summary");
                insights::render_local_summary(&classified)
            }
        };

        Ok(AnalysisReport {
            video_title,
            total_comments: classified.len(),
            sentiment_distribution: insights::sentiment_distribution(&classified),
            category_distribution: insights::category_distribution(&classified),
            comments: classified,
            insights: insights_text,
            method: strategy.method(),
        })
    }

    /// Remote first when configured; an empty outcome falls back to the
    /// local path. The strategy returned here also drives synthesis, so
    /// the two selections cannot diverge.
    async fn classify(
        &self,
        comments: &[Comment],
    ) -> (Vec<ClassifiedComment>, &dyn AnalysisStrategy) {
        if let Some(remote) = &self.remote {
            let classified = remote.classify(comments).await;
            if !classified.is_empty() {
                return (classified, remote.as_ref());
            }
            warn!("remote classification produced nothing, falling back to local");
        }

        (self.local.classify(comments).await, &self.local)
    }
}
