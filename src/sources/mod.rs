//! Search source implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceClient`]
//! that queries one provider and maps its payload into search hits.

pub mod bing_news;
pub mod google_news;
pub(crate) mod rss;
pub mod wikipedia;

pub use bing_news::BingNewsSource;
pub use google_news::GoogleNewsSource;
pub use wikipedia::WikipediaSource;
