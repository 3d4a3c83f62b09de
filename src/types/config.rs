//! Configuration: pipeline tunables and environment credentials.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::security::SecretString;

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Cap on fetched top-level comments. Default: 500.
    pub max_comments: usize,

    /// Comments per remote classification batch.
    ///
    /// One knob on purpose: the right value depends on the model's
    /// context window and rate limits. Default: 100.
    pub classify_batch_size: usize,

    /// Exemplar comments per sentiment group in the synthesis prompt.
    /// The prompt always carries exact group counts even when the
    /// exemplar lists are truncated. Default: 5.
    pub exemplars_per_group: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_comments: 500,
            classify_batch_size: 100,
            exemplars_per_group: 5,
        }
    }
}

impl AnalysisConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comment cap.
    pub fn with_max_comments(mut self, max: usize) -> Self {
        self.max_comments = max;
        self
    }

    /// Set the classification batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.classify_batch_size = size;
        self
    }

    /// Set the exemplar count per sentiment group.
    pub fn with_exemplars_per_group(mut self, count: usize) -> Self {
        self.exemplars_per_group = count;
        self
    }
}

/// API credentials, loaded once at startup and passed in explicitly.
///
/// No component reads ambient process state; everything that needs a
/// key receives it through its constructor.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Key for the comment-hosting data API. Required.
    pub youtube_api_key: SecretString,

    /// Key for the remote classification service. Absence is a valid
    /// configuration and selects local-only analysis.
    pub gemini_api_key: Option<SecretString>,
}

impl Credentials {
    pub fn new(youtube_api_key: impl Into<SecretString>) -> Self {
        Self {
            youtube_api_key: youtube_api_key.into(),
            gemini_api_key: None,
        }
    }

    /// Enable remote classification with this key.
    pub fn with_gemini_key(mut self, key: impl Into<SecretString>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Load from environment variables (reads `.env` in development).
    ///
    /// `YOUTUBE_API_KEY` is required; a missing key is a startup error,
    /// not a per-request one. `GEMINI_API_KEY` is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let youtube = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| ConfigError::MissingVar("YOUTUBE_API_KEY"))?;
        let gemini = std::env::var("GEMINI_API_KEY").ok();

        Ok(Self {
            youtube_api_key: SecretString::new(youtube),
            gemini_api_key: gemini.map(SecretString::new),
        })
    }
}
