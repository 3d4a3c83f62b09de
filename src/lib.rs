//! YouTube comment ingestion and multi-strategy sentiment analysis.
//!
//! Fetches a video's public comment threads through the hosting API,
//! classifies each comment with a remote LLM when one is configured
//! (falling back to a deterministic local classifier otherwise), and
//! aggregates the results into a summary report.
//!
//! Fetch-side failures are terminal and strongly typed; classification
//! and synthesis failures are absorbed by fallback, so a request always
//! completes once comments were fetched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use comment_insights::{AnalysisConfig, Analyzer, Credentials};
//!
//! let credentials = Credentials::from_env()?;
//! let analyzer = Analyzer::from_credentials(&credentials, AnalysisConfig::default());
//!
//! let report = analyzer.analyze("https://youtu.be/dQw4w9WgXcQ").await?;
//! println!("{}", report.insights);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for the external collaborators and the dual strategy
//! - [`types`] - Comment, report, and configuration types
//! - [`sources`] - YouTube Data API comment source
//! - [`ai`] - Gemini text-model client
//! - [`classify`] - Remote and local classification strategies
//! - [`insights`] - Aggregation and summary rendering
//! - [`pipeline`] - The `Analyzer` orchestrator
//! - [`resolver`] - Video URL parsing
//! - [`sentiment`] - Lexical polarity scoring
//! - [`testing`] - Mock implementations for tests

pub mod ai;
pub mod classify;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod resolver;
pub mod security;
pub mod sentiment;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AnalysisError, AnalysisFailure, ConfigError, FetchError, ModelError};
pub use pipeline::Analyzer;
pub use resolver::VideoId;
pub use security::SecretString;
pub use types::{
    comment::{ClassifiedComment, Comment, Sentiment},
    config::{AnalysisConfig, Credentials},
    report::{AnalysisMethod, AnalysisReport, ErrorResponse},
};

// Re-export implementations
pub use ai::GeminiModel;
pub use classify::{LocalStrategy, RemoteStrategy};
pub use sources::YouTubeDataApi;
pub use traits::{model::TextModel, source::CommentSource, strategy::AnalysisStrategy};
