//! Streaming provider adapters.
//!
//! # Architecture
//!
//! Each provider lives in its own module with the same split:
//! - **DTOs** (`dto.rs`) - exact API response shapes, decoded defensively
//! - **Permalinks** (`permalink.rs`) - the provider's historical URL shapes
//! - **Adapter** (`adapter.rs`) - DTO to [`MusicalEntity`] conversion
//! - **Client** (`client.rs`) - the [`Platform`] implementation
//!
//! Adapters are built once from configuration by the [`PlatformRegistry`]
//! and shared as `Arc<dyn Platform>`; nothing in them changes afterwards.
//!
//! [`MusicalEntity`]: crate::model::MusicalEntity

pub mod deezer;
pub mod domain;
pub mod permalink;
pub mod qobuz;
pub mod registry;
pub mod sevendigital;
pub mod spotify;
pub mod tidal;
pub mod traits;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub use domain::{
    AGGREGATE_LIMIT, Capabilities, Credentials, Endpoint, HttpMethod, Mode, Operation,
    PAGE_LIMIT, PlatformConfig, PlatformError, ResponseFormat, SearchKind,
};
pub use registry::{PlatformRegistry, PlatformSummary};
pub use traits::Platform;

use crate::fetch::{Fetcher, Payload};
use crate::model::PlatformResult;

/// Page size actually used for a requested limit (0 means a full page).
pub fn page_limit(limit: usize) -> usize {
    if limit == 0 {
        PAGE_LIMIT
    } else {
        limit.min(PAGE_LIMIT)
    }
}

/// Sort scored hits (stable, descending) and cut the page.
pub(crate) fn finish_page(mut results: Vec<PlatformResult>, limit: usize) -> Vec<PlatformResult> {
    results.sort_by(|a, b| {
        let (a, b) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
        b.total_cmp(&a)
    });
    results.truncate(page_limit(limit));
    results
}

/// Fetch, tagging errors with the platform.
pub(crate) async fn fetch_payload(
    fetcher: &Fetcher,
    platform: &dyn Platform,
    operation: Operation,
    query: &str,
) -> Result<Payload, PlatformError> {
    fetcher
        .fetch(platform, operation, query)
        .await
        .map_err(|e| e.into_platform_error(platform.tag()))
}

/// Decode a payload into a DTO, tagging errors with the platform.
pub(crate) fn decode<T: DeserializeOwned>(payload: &Payload, tag: &str) -> Result<T, PlatformError> {
    payload.decode().map_err(|e| e.into_platform_error(tag))
}

/// Fetch and decode in one step.
pub(crate) async fn fetch_as<T: DeserializeOwned>(
    fetcher: &Fetcher,
    platform: &dyn Platform,
    operation: Operation,
    query: &str,
) -> Result<T, PlatformError> {
    let payload = fetch_payload(fetcher, platform, operation, query).await?;
    decode(&payload, platform.tag())
}

/// Guard shared by every search implementation.
pub(crate) fn ensure_capable(platform: &dyn Platform, kind: SearchKind) -> Result<(), PlatformError> {
    if platform.is_capable_of(kind) {
        Ok(())
    } else {
        Err(PlatformError::unsupported(platform.tag(), kind.operation()))
    }
}

/// Guard for permalink shapes that need a lookup call.
pub(crate) fn ensure_lookup(platform: &dyn Platform, operation: Operation) -> Result<(), PlatformError> {
    if platform.is_capable_of_lookup() {
        Ok(())
    } else {
        Err(PlatformError::unsupported(platform.tag(), operation))
    }
}

/// Accept ids sent either as JSON numbers or strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Null(()) => String::new(),
    })
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Album, MusicalEntity};

    fn hit(score: f64) -> PlatformResult {
        PlatformResult::hit(
            MusicalEntity::album(Album::new(format!("{}", score), "a", ""), "t", "l"),
            score,
        )
    }

    #[test]
    fn test_page_limit() {
        assert_eq!(page_limit(0), PAGE_LIMIT);
        assert_eq!(page_limit(3), 3);
        assert_eq!(page_limit(99), PAGE_LIMIT);
    }

    #[test]
    fn test_finish_page_sorts_and_truncates() {
        let results = finish_page(vec![hit(0.5), hit(1.0), hit(0.8)], 2);
        let scores: Vec<_> = results.iter().filter_map(|r| r.score).collect();
        assert_eq!(scores, vec![1.0, 0.8]);
    }

    #[test]
    fn test_finish_page_is_stable_on_ties() {
        let results = finish_page(vec![hit(0.5), hit(0.5)], 0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_string_or_number() {
        #[derive(Deserialize)]
        struct Id {
            #[serde(deserialize_with = "string_or_number")]
            id: String,
        }

        let a: Id = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let b: Id = serde_json::from_str(r#"{"id": "0886443927087"}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(b.id, "0886443927087");
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Deserialize)]
        struct Named {
            #[serde(default, deserialize_with = "null_as_default")]
            name: String,
            #[serde(default, deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }

        let null: Named = serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();
        let missing: Named = serde_json::from_str("{}").unwrap();
        let set: Named = serde_json::from_str(r#"{"name": "Daft Punk", "tags": ["house"]}"#).unwrap();

        assert_eq!(null.name, "");
        assert!(null.tags.is_empty());
        assert_eq!(missing.name, "");
        assert_eq!(set.name, "Daft Punk");
        assert_eq!(set.tags, vec!["house"]);
    }
}
