//! Cross-platform aggregate search.
//!
//! One task per targeted adapter, each under its own timeout. Once every
//! task has settled the hits are grouped by [`EntityMatcher`] key, merged
//! and ranked. A failing, slow or panicking adapter only removes its own
//! hits from the result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::matching::{EntityMatcher, NormalizedMatcher};
use crate::config::SearchConfig;
use crate::model::{MusicalEntity, PlatformResult};
use crate::platform::{Mode, Platform, PlatformError, PlatformRegistry, SearchKind};

/// One entity found on one or more platforms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResult {
    /// Links from every platform that returned this entity
    #[serde(flatten)]
    pub entity: MusicalEntity,
    /// Best score among the merged hits
    pub score: f64,
}

type SearchOutcome = Result<Result<Vec<PlatformResult>, PlatformError>, tokio::time::error::Elapsed>;

/// Fans a query out to several platforms and merges the answers.
#[derive(Clone)]
pub struct SearchAggregator {
    registry: PlatformRegistry,
    matcher: Arc<dyn EntityMatcher>,
    adapter_timeout: Duration,
    aggregate_limit: usize,
}

impl SearchAggregator {
    pub fn new(registry: PlatformRegistry, config: &SearchConfig) -> Self {
        Self {
            registry,
            matcher: Arc::new(NormalizedMatcher),
            adapter_timeout: Duration::from_millis(config.adapter_timeout_ms),
            aggregate_limit: config.aggregate_limit.max(1),
        }
    }

    /// Replace the grouping rule.
    pub fn with_matcher(mut self, matcher: Arc<dyn EntityMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    /// Effective result cap: 0 or anything above the configured maximum
    /// means the maximum.
    pub fn effective_limit(&self, limit: usize) -> usize {
        if limit == 0 || limit > self.aggregate_limit {
            self.aggregate_limit
        } else {
            limit
        }
    }

    /// Adapters a request for `tags` actually reaches, in request order.
    ///
    /// Duplicates collapse onto their first occurrence; unknown tags,
    /// api-disabled adapters and adapters unable to search `kind` drop out.
    pub fn targets<S: AsRef<str>>(&self, kind: SearchKind, tags: &[S]) -> Vec<Arc<dyn Platform>> {
        let mut targets: Vec<Arc<dyn Platform>> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            let Some(platform) = self.registry.get(tag) else {
                tracing::debug!(platform = tag, "Skipping unknown platform");
                continue;
            };
            if targets.iter().any(|p| p.tag() == platform.tag()) {
                continue;
            }
            if !platform.is_enabled_for_api() || !platform.is_capable_of(kind) {
                tracing::debug!(platform = tag, %kind, "Platform not eligible for search");
                continue;
            }
            targets.push(platform.clone());
        }
        targets
    }

    /// Search every eligible platform in `tags` and merge the hits.
    pub async fn aggregate<S: AsRef<str>>(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
        tags: &[S],
    ) -> Vec<AggregatedResult> {
        self.aggregate_with_cancel(kind, query, limit, mode, tags, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// Like [`aggregate`](Self::aggregate), but gives up when `cancel`
    /// fires: outstanding searches are aborted and `None` is returned.
    pub async fn aggregate_with_cancel<S: AsRef<str>>(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
        tags: &[S],
        cancel: &CancellationToken,
    ) -> Option<Vec<AggregatedResult>> {
        let limit = self.effective_limit(limit);
        let targets = self.targets(kind, tags);
        if targets.is_empty() {
            tracing::debug!(%kind, query, "No platform to search");
            return Some(Vec::new());
        }

        let handles: Vec<(&'static str, JoinHandle<SearchOutcome>)> = targets
            .iter()
            .map(|platform| (platform.tag(), self.spawn_search(platform.clone(), kind, query, limit, mode)))
            .collect();
        let aborts: Vec<_> = handles.iter().map(|(_, h)| h.abort_handle()).collect();
        let (tags, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();

        let outcomes = tokio::select! {
            _ = cancel.cancelled() => {
                for abort in aborts {
                    abort.abort();
                }
                tracing::debug!(%kind, query, "Aggregate search cancelled");
                return None;
            }
            outcomes = join_all(handles) => outcomes,
        };

        let pages: Vec<Vec<PlatformResult>> = tags
            .into_iter()
            .zip(outcomes)
            .map(|(tag, outcome)| self.settle(tag, outcome))
            .collect();

        let merged = merge(self.matcher.as_ref(), pages, limit);
        tracing::info!(
            %kind,
            query,
            platforms = targets.len(),
            results = merged.len(),
            "Aggregate search complete"
        );
        Some(merged)
    }

    fn spawn_search(
        &self,
        platform: Arc<dyn Platform>,
        kind: SearchKind,
        query: &str,
        limit: usize,
        mode: Mode,
    ) -> JoinHandle<SearchOutcome> {
        let query = query.to_string();
        let timeout = self.adapter_timeout;
        tokio::spawn(async move {
            tokio::time::timeout(timeout, platform.search(kind, &query, limit, mode)).await
        })
    }

    /// Turn one task outcome into a page of hits, logging failures.
    fn settle(
        &self,
        tag: &str,
        outcome: Result<SearchOutcome, tokio::task::JoinError>,
    ) -> Vec<PlatformResult> {
        match outcome {
            Ok(Ok(Ok(hits))) => {
                tracing::debug!(platform = tag, hits = hits.len(), "Platform search done");
                hits
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!(platform = tag, "Platform search failed: {}", e);
                Vec::new()
            }
            Ok(Err(_)) => {
                tracing::warn!(
                    platform = tag,
                    timeout_ms = self.adapter_timeout.as_millis() as u64,
                    "Platform search timed out"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(platform = tag, "Platform search task failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Group hits by matcher key, merge each group and rank the groups.
///
/// Pages are taken in adapter order and hits in rank order, so ties in
/// score keep the order of first appearance.
pub fn merge(
    matcher: &dyn EntityMatcher,
    pages: Vec<Vec<PlatformResult>>,
    limit: usize,
) -> Vec<AggregatedResult> {
    let mut groups: Vec<AggregatedResult> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for hit in pages.into_iter().flatten() {
        let score = hit.score.unwrap_or(0.0);
        let Some(entity) = hit.entity else {
            continue;
        };

        let key = matcher.key(&entity);
        match key.as_ref().and_then(|k| index.get(k)) {
            Some(&i) => {
                let group = &mut groups[i];
                group.entity.merge(&entity);
                group.score = group.score.max(score);
            }
            None => {
                if let Some(key) = key {
                    index.insert(key, groups.len());
                }
                groups.push(AggregatedResult { entity, score });
            }
        }
    }

    groups.sort_by(|a, b| b.score.total_cmp(&a.score));
    groups.truncate(limit);
    groups
}
