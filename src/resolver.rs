//! Permalink resolution: route a URL to the one adapter that owns it.

use std::sync::Arc;

use crate::model::PlatformResult;
use crate::platform::{Mode, Platform, PlatformError, PlatformRegistry};

/// Order in which adapters are asked whether they own a URL.
pub const RESOLUTION_ORDER: [&str; 5] = ["spotify", "deezer", "qobuz", "tidal", "sevendigital"];

/// Routes permalinks to the first matching website-enabled adapter.
#[derive(Clone)]
pub struct PermalinkResolver {
    routes: Vec<Arc<dyn Platform>>,
}

impl PermalinkResolver {
    pub fn new(registry: &PlatformRegistry) -> Self {
        Self::with_order(registry, &RESOLUTION_ORDER)
    }

    /// Resolver walking `order`; tags missing from the registry are skipped.
    pub fn with_order(registry: &PlatformRegistry, order: &[&str]) -> Self {
        let routes = order
            .iter()
            .filter_map(|tag| registry.get(tag))
            .filter(|p| p.is_enabled_for_website())
            .cloned()
            .collect();
        Self { routes }
    }

    /// Tags of the adapters consulted, in order.
    pub fn route_tags(&self) -> Vec<&'static str> {
        self.routes.iter().map(|p| p.tag()).collect()
    }

    /// Resolve `url`.
    ///
    /// A URL nobody claims yields its own text as the only query word.
    /// Errors from the owning adapter are returned as-is.
    pub async fn resolve(&self, url: &str, mode: Mode) -> Result<PlatformResult, PlatformError> {
        let url = url.trim();
        let Some(platform) = self.routes.iter().find(|p| p.has_permalink(url)) else {
            tracing::debug!(url, "No platform claims permalink");
            return Ok(PlatformResult::query_only(vec![url.to_string()]));
        };

        tracing::debug!(url, platform = platform.tag(), "Expanding permalink");
        let result = platform.expand_permalink(url, mode).await;
        if let Err(e) = &result {
            tracing::warn!(platform = platform.tag(), "Permalink resolution failed: {}", e);
        }
        result
    }
}
