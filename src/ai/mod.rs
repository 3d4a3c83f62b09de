//! Text-model implementations.
//!
//! Reference implementation of the [`TextModel`](crate::traits::model::TextModel)
//! trait. Applications can use it directly or provide their own.

mod gemini;

pub use gemini::GeminiModel;
