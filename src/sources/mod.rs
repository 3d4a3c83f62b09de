//! Comment source implementations.

mod youtube;

pub use youtube::{YouTubeDataApi, TITLE_PLACEHOLDER};
