//! Classification strategies.
//!
//! Two interchangeable implementations of
//! [`AnalysisStrategy`](crate::traits::strategy::AnalysisStrategy): the
//! remote LLM path and the deterministic local fallback.

mod local;
mod remote;

pub use local::{classify_comment, LocalStrategy};
pub use remote::RemoteStrategy;
