//! The adapter trait every provider implements.
//!
//! Adapters are held as `Arc<dyn Platform>` by the registry and shared
//! across concurrent requests, so the trait is object safe and every
//! method takes `&self`.
//!
//! # Example
//!
//! ```ignore
//! use tunelink::platform::{Mode, Platform, SearchKind};
//!
//! async fn first_hit(platform: &dyn Platform) -> Option<String> {
//!     let hits = platform.search(SearchKind::Track, "discovery", 1, Mode::Lazy).await.ok()?;
//!     hits.into_iter().next()?.entity.map(|e| e.title().to_string())
//! }
//! ```

use async_trait::async_trait;

use super::domain::{Capabilities, Mode, PlatformConfig, PlatformError, SearchKind};
use crate::model::PlatformResult;

/// A streaming provider adapter.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Static configuration, fixed at startup.
    fn config(&self) -> &PlatformConfig;

    fn tag(&self) -> &'static str {
        self.config().tag
    }

    fn name(&self) -> &'static str {
        self.config().name
    }

    fn is_enabled_for_api(&self) -> bool {
        self.config().enabled_for_api
    }

    fn is_enabled_for_website(&self) -> bool {
        self.config().enabled_for_website
    }

    fn is_capable_of_track_search(&self) -> bool {
        self.config().capabilities.contains(Capabilities::TRACK_SEARCH)
    }

    fn is_capable_of_album_search(&self) -> bool {
        self.config().capabilities.contains(Capabilities::ALBUM_SEARCH)
    }

    fn is_capable_of_lookup(&self) -> bool {
        self.config().capabilities.contains(Capabilities::LOOKUP)
    }

    fn is_capable_of(&self, kind: SearchKind) -> bool {
        self.config().capabilities.contains(Capabilities::for_search(kind))
    }

    /// Add provider-wide request parameters (app ids, tokens).
    fn add_context_options(&self, params: Vec<(String, String)>) -> Vec<(String, String)> {
        params
    }

    /// Whether `url` belongs to this provider. Network-free.
    fn has_permalink(&self, url: &str) -> bool;

    /// Resolve a provider URL into an entity, or into query words only.
    async fn expand_permalink(&self, url: &str, mode: Mode)
    -> Result<PlatformResult, PlatformError>;

    /// Free-text search, scored and sorted by descending score.
    ///
    /// `limit == 0` means the provider page size.
    async fn search(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
    ) -> Result<Vec<PlatformResult>, PlatformError>;
}
