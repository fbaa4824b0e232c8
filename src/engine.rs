//! The operations exposed to callers (web layer, CLI).
//!
//! An [`Engine`] is built once from configuration and then shared; every
//! method takes `&self` and allocates only per-request state.
//!
//! # Example
//!
//! ```ignore
//! let engine = Engine::from_config(&config::load(None)?)?;
//! let result = engine.resolve_permalink("https://www.deezer.com/track/3135556", Mode::Lazy).await?;
//! ```

use tokio_util::sync::CancellationToken;

use crate::config::{Config, SearchConfig};
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::model::PlatformResult;
use crate::platform::{Mode, PlatformError, PlatformRegistry, PlatformSummary, SearchKind};
use crate::resolver::PermalinkResolver;
use crate::search::{AggregatedResult, SearchAggregator};

#[derive(Clone)]
pub struct Engine {
    registry: PlatformRegistry,
    resolver: PermalinkResolver,
    aggregator: SearchAggregator,
}

impl Engine {
    /// Build the HTTP client and every adapter. Configuration problems
    /// are fatal here.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let fetcher = Fetcher::http(&config.http)?;
        let registry = PlatformRegistry::from_config(config, fetcher)?;
        Ok(Self::with_registry(registry, &config.search))
    }

    /// Engine over an already-built registry.
    pub fn with_registry(registry: PlatformRegistry, search: &SearchConfig) -> Self {
        Self {
            resolver: PermalinkResolver::new(&registry),
            aggregator: SearchAggregator::new(registry.clone(), search),
            registry,
        }
    }

    /// Resolve a platform URL. See [`PermalinkResolver::resolve`].
    pub async fn resolve_permalink(&self, url: &str, mode: Mode) -> Result<PlatformResult, PlatformError> {
        self.resolver.resolve(url, mode).await
    }

    /// Search several platforms at once.
    ///
    /// An empty `tags` list targets the default platforms.
    pub async fn aggregate_search<S: AsRef<str>>(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
        tags: &[S],
    ) -> Vec<AggregatedResult> {
        if tags.is_empty() {
            let defaults = self.registry.default_tags();
            return self.aggregator.aggregate(kind, query, limit, mode, &defaults).await;
        }
        self.aggregator.aggregate(kind, query, limit, mode, tags).await
    }

    /// [`aggregate_search`](Self::aggregate_search) that stops when
    /// `cancel` fires, returning `None`.
    pub async fn aggregate_search_with_cancel<S: AsRef<str>>(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
        tags: &[S],
        cancel: &CancellationToken,
    ) -> Option<Vec<AggregatedResult>> {
        if tags.is_empty() {
            let defaults = self.registry.default_tags();
            return self
                .aggregator
                .aggregate_with_cancel(kind, query, limit, mode, &defaults, cancel)
                .await;
        }
        self.aggregator
            .aggregate_with_cancel(kind, query, limit, mode, tags, cancel)
            .await
    }

    /// Search one platform, surfacing its errors.
    pub async fn search(
        &self,
        tag: &str,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
    ) -> Result<Vec<PlatformResult>, PlatformError> {
        let platform = self
            .registry
            .get(tag)
            .ok_or_else(|| PlatformError::UnknownPlatform(tag.to_string()))?;

        if !platform.is_enabled_for_api() {
            return Err(PlatformError::unsupported(platform.tag(), "api access"));
        }
        if !platform.is_capable_of(kind) {
            return Err(PlatformError::unsupported(platform.tag(), kind.operation()));
        }

        platform.search(kind, query, limit, mode).await
    }

    pub fn list_platforms(&self) -> Vec<PlatformSummary> {
        self.registry.summaries()
    }

    pub fn platform(&self, tag: &str) -> Option<PlatformSummary> {
        self.registry.get(tag).map(|p| PlatformSummary::of(p.as_ref()))
    }

    /// Tags pre-selected when a caller does not pick platforms.
    pub fn default_platforms(&self) -> Vec<&'static str> {
        self.registry.default_tags()
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }
}
