//! Address suggestions: an upstream provider behind a TTL memoization layer.

pub mod cache;
pub mod provider;

pub use cache::SuggestionCache;
pub use provider::{DaDataProvider, Suggestion, SuggestError, SuggestionProvider};
