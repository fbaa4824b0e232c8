//! Tidal adapter. Every call carries the configured `token` and the
//! `countryCode` catalogue selector.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{TAG, adapter, dto, permalink};
use crate::fetch::Fetcher;
use crate::model::PlatformResult;
use crate::platform::permalink::Permalink;
use crate::platform::{
    Endpoint, Mode, Operation, Platform, PlatformConfig, PlatformError, SearchKind, decode,
    ensure_capable, ensure_lookup, fetch_payload, finish_page,
};

const COUNTRY: &[(&str, &str)] = &[("countryCode", "FR")];
const SEARCH_OPTIONS: &[(&str, &str)] = &[("countryCode", "FR"), ("limit", "10")];

pub fn descriptor() -> PlatformConfig {
    PlatformConfig::new(TAG, "Tidal")
        .branding("00FFFF", "https://tidal.com/")
        .endpoint(
            Operation::LookupTrack,
            Endpoint::path("https://api.tidalhifi.com/v1/tracks/{}").with_options(COUNTRY),
        )
        .endpoint(
            Operation::LookupAlbum,
            Endpoint::path("https://api.tidalhifi.com/v1/albums/{}").with_options(COUNTRY),
        )
        .endpoint(
            Operation::LookupArtist,
            Endpoint::path("https://api.tidalhifi.com/v1/artists/{}").with_options(COUNTRY),
        )
        .endpoint(
            Operation::SearchTrack,
            Endpoint::query("https://api.tidalhifi.com/v1/search/tracks", "query")
                .with_options(SEARCH_OPTIONS),
        )
        .endpoint(
            Operation::SearchAlbum,
            Endpoint::query("https://api.tidalhifi.com/v1/search/albums", "query")
                .with_options(SEARCH_OPTIONS),
        )
}

pub struct TidalPlatform {
    config: PlatformConfig,
    fetcher: Fetcher,
}

impl TidalPlatform {
    pub fn new(config: PlatformConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        query: &str,
    ) -> Result<T, PlatformError> {
        let payload = fetch_payload(&self.fetcher, self, operation, query).await?;

        let status: dto::ErrorResponse = decode(&payload, TAG)?;
        if status.is_error() {
            let message = status
                .user_message
                .unwrap_or_else(|| "status error".to_string());
            return Err(PlatformError::resolution_failed(TAG, message));
        }
        decode(&payload, TAG)
    }
}

#[async_trait]
impl Platform for TidalPlatform {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    fn add_context_options(&self, mut params: Vec<(String, String)>) -> Vec<(String, String)> {
        params.push(("token".to_string(), self.config.credentials.key.clone()));
        params
    }

    fn has_permalink(&self, url: &str) -> bool {
        permalink::has_permalink(url)
    }

    async fn expand_permalink(
        &self,
        url: &str,
        _mode: Mode,
    ) -> Result<PlatformResult, PlatformError> {
        let Some(link) = permalink::parse(url) else {
            return Ok(PlatformResult::query_only(vec![url.to_string()]));
        };

        match link {
            Permalink::Track(id) => {
                ensure_lookup(self, Operation::LookupTrack)?;
                let track: dto::Track = self.call(Operation::LookupTrack, &id).await?;
                let entity = adapter::to_track(&track).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "track is missing a title or url")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Album(id) => {
                ensure_lookup(self, Operation::LookupAlbum)?;
                let album: dto::Album = self.call(Operation::LookupAlbum, &id).await?;
                let entity = adapter::to_album(&album).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "album is missing a title or url")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Artist(id) => {
                ensure_lookup(self, Operation::LookupArtist)?;
                let artist: dto::Artist = self.call(Operation::LookupArtist, &id).await?;
                if artist.name.is_empty() {
                    return Err(PlatformError::resolution_failed(TAG, "artist has no name"));
                }
                Ok(PlatformResult::query_only(vec![artist.name]))
            }
            Permalink::Words(words) => Ok(PlatformResult::query_only(words)),
        }
    }

    async fn search(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        _mode: Mode,
    ) -> Result<Vec<PlatformResult>, PlatformError> {
        ensure_capable(self, kind)?;

        let results = match kind {
            SearchKind::Track => {
                let response: dto::SearchResponse<dto::Track> =
                    self.call(kind.operation(), query).await?;
                adapter::results(&response.items, adapter::to_track)
            }
            SearchKind::Album => {
                let response: dto::SearchResponse<dto::Album> =
                    self.call(kind.operation(), query).await?;
                adapter::results(&response.items, adapter::to_album)
            }
        };

        Ok(finish_page(results, limit))
    }
}
