//! Platform domain types.
//!
//! These types describe what an adapter can do and how it talks to its
//! provider. They are independent of any specific provider's API shape.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Maximum number of hits a single platform contributes to a search.
pub const PAGE_LIMIT: usize = 10;

/// Default maximum number of aggregated results.
pub const AGGREGATE_LIMIT: usize = 50;

/// A provider call an endpoint can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LookupTrack,
    LookupAlbum,
    LookupArtist,
    SearchTrack,
    SearchAlbum,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LookupTrack => "track lookup",
            Self::LookupAlbum => "album lookup",
            Self::LookupArtist => "artist lookup",
            Self::SearchTrack => "track search",
            Self::SearchAlbum => "album search",
        };
        f.write_str(name)
    }
}

/// What a search is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Track,
    Album,
}

impl SearchKind {
    /// The search operation backing this kind.
    pub fn operation(self) -> Operation {
        match self {
            Self::Track => Operation::SearchTrack,
            Self::Album => Operation::SearchAlbum,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "track" | "tracks" => Ok(Self::Track),
            "album" | "albums" => Ok(Self::Album),
            other => Err(format!("unknown search type '{}'", other)),
        }
    }
}

/// Request-scoped fetch policy.
///
/// `Eager` allows one extra lookup per result to fill fields the
/// provider's list payload leaves blank. It never changes result count
/// or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Lazy,
    Eager,
}

bitflags! {
    /// What an adapter is allowed to do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const TRACK_SEARCH = 0b001;
        const ALBUM_SEARCH = 0b010;
        const LOOKUP       = 0b100;
    }
}

impl Capabilities {
    /// The capability needed to run a search of `kind`.
    pub fn for_search(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Track => Self::TRACK_SEARCH,
            SearchKind::Album => Self::ALBUM_SEARCH,
        }
    }

    /// Human-readable capability names, for listings.
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::TRACK_SEARCH) {
            names.push("track_search");
        }
        if self.contains(Self::ALBUM_SEARCH) {
            names.push("album_search");
        }
        if self.contains(Self::LOOKUP) {
            names.push("lookup");
        }
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Content type the provider answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

/// One provider endpoint.
///
/// When `term` is `None` the query is url-encoded into the `{}`
/// placeholder of `template`; otherwise it is sent as `term=query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub template: &'static str,
    pub term: Option<&'static str>,
    pub options: &'static [(&'static str, &'static str)],
}

impl Endpoint {
    /// Endpoint with the id in the path.
    pub const fn path(template: &'static str) -> Self {
        Self {
            template,
            term: None,
            options: &[],
        }
    }

    /// Endpoint with the query in a parameter.
    pub const fn query(template: &'static str, term: &'static str) -> Self {
        Self {
            template,
            term: Some(term),
            options: &[],
        }
    }

    pub const fn with_options(mut self, options: &'static [(&'static str, &'static str)]) -> Self {
        self.options = options;
        self
    }
}

/// Provider credentials. Either half may be empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &if self.key.is_empty() { "" } else { "***" })
            .field("secret", &if self.secret.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Static description of one adapter, set at startup and never mutated.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub tag: &'static str,
    pub name: &'static str,
    /// Brand color as a hex triplet without `#`
    pub color: &'static str,
    pub homepage: &'static str,
    pub enabled_for_api: bool,
    pub enabled_for_website: bool,
    /// Pre-selected in clients' platform pickers
    pub default: bool,
    pub capabilities: Capabilities,
    pub credentials: Credentials,
    pub method: HttpMethod,
    pub format: ResponseFormat,
    pub needs_oauth: bool,
    endpoints: HashMap<Operation, Endpoint>,
}

impl PlatformConfig {
    /// A platform enabled everywhere with every capability and no endpoint.
    pub fn new(tag: &'static str, name: &'static str) -> Self {
        Self {
            tag,
            name,
            color: "",
            homepage: "",
            enabled_for_api: true,
            enabled_for_website: true,
            default: true,
            capabilities: Capabilities::all(),
            credentials: Credentials::default(),
            method: HttpMethod::Get,
            format: ResponseFormat::Json,
            needs_oauth: false,
            endpoints: HashMap::new(),
        }
    }

    pub fn branding(mut self, color: &'static str, homepage: &'static str) -> Self {
        self.color = color;
        self.homepage = homepage;
        self
    }

    pub fn endpoint(mut self, operation: Operation, endpoint: Endpoint) -> Self {
        self.endpoints.insert(operation, endpoint);
        self
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn oauth(mut self) -> Self {
        self.needs_oauth = true;
        self
    }

    /// Endpoint configured for an operation, if any.
    pub fn endpoint_for(&self, operation: Operation) -> Option<&Endpoint> {
        self.endpoints.get(&operation)
    }
}

/// Failure of a single adapter call.
///
/// The aggregator absorbs every variant; permalink resolution and
/// single-platform search surface them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// Transport failure or timeout
    #[error("{platform} is unavailable: {reason}")]
    Unavailable { platform: String, reason: String },

    /// Explicit provider error or a body missing required fields
    #[error("{platform} could not resolve the request: {reason}")]
    ResolutionFailed { platform: String, reason: String },

    /// Body could not be decoded
    #[error("{platform} returned a malformed response: {reason}")]
    MalformedResponse { platform: String, reason: String },

    /// The adapter is not capable of (or not enabled for) the operation
    #[error("{platform} does not support {operation}")]
    Unsupported { platform: String, operation: String },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

impl PlatformError {
    pub fn unavailable(platform: &str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            platform: platform.to_string(),
            reason: reason.into(),
        }
    }

    pub fn resolution_failed(platform: &str, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            platform: platform.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(platform: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            platform: platform.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(platform: &str, operation: impl fmt::Display) -> Self {
        Self::Unsupported {
            platform: platform.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Tag of the platform the error came from.
    pub fn platform(&self) -> &str {
        match self {
            Self::Unavailable { platform, .. }
            | Self::ResolutionFailed { platform, .. }
            | Self::MalformedResponse { platform, .. }
            | Self::Unsupported { platform, .. } => platform,
            Self::UnknownPlatform(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_parse() {
        assert_eq!("track".parse::<SearchKind>(), Ok(SearchKind::Track));
        assert_eq!("Albums".parse::<SearchKind>(), Ok(SearchKind::Album));
        assert!("artist".parse::<SearchKind>().is_err());
    }

    #[test]
    fn test_capabilities_for_search() {
        let caps = Capabilities::TRACK_SEARCH | Capabilities::LOOKUP;
        assert!(caps.contains(Capabilities::for_search(SearchKind::Track)));
        assert!(!caps.contains(Capabilities::for_search(SearchKind::Album)));
        assert_eq!(caps.names(), ["track_search", "lookup"]);
    }

    #[test]
    fn test_endpoint_lookup() {
        let config = PlatformConfig::new("demo", "Demo")
            .endpoint(Operation::LookupTrack, Endpoint::path("https://api/track/{}"));

        assert!(config.endpoint_for(Operation::LookupTrack).is_some());
        assert!(config.endpoint_for(Operation::SearchAlbum).is_none());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("app-id", "s3cret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("app-id"));
    }

    #[test]
    fn test_platform_error_carries_tag() {
        let err = PlatformError::resolution_failed("qobuz", "status error");
        assert_eq!(err.platform(), "qobuz");
        assert!(err.to_string().contains("qobuz"));
    }
}
