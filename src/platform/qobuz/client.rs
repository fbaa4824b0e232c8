//! Qobuz adapter. Every call carries the configured `app_id`.

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

pub fn descriptor() -> PlatformConfig {
    PlatformConfig::new(TAG, "Qobuz")
        .branding("2C8FAE", "https://www.qobuz.com/")
        .endpoint(
            Operation::LookupTrack,
            Endpoint::query("https://www.qobuz.com/api.json/0.2/track/get", "track_id"),
        )
        .endpoint(
            Operation::LookupAlbum,
            Endpoint::query("https://www.qobuz.com/api.json/0.2/album/get", "album_id"),
        )
        .endpoint(
            Operation::LookupArtist,
            Endpoint::query("https://www.qobuz.com/api.json/0.2/artist/get", "artist_id"),
        )
        .endpoint(
            Operation::SearchTrack,
            Endpoint::query("https://www.qobuz.com/api.json/0.2/track/search", "query")
                .with_options(&[("limit", "10")]),
        )
        .endpoint(
            Operation::SearchAlbum,
            Endpoint::query("https://www.qobuz.com/api.json/0.2/album/search", "query")
                .with_options(&[("limit", "10")]),
        )
}

pub struct QobuzPlatform {
    config: PlatformConfig,
    fetcher: Fetcher,
}

impl QobuzPlatform {
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
            let message = status.message.unwrap_or_else(|| "status error".to_string());
            return Err(PlatformError::resolution_failed(TAG, message));
        }
        decode(&payload, TAG)
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        operation: Operation,
        id: &str,
    ) -> Result<T, PlatformError> {
        ensure_lookup(self, operation)?;
        self.call(operation, id).await
    }
}

#[async_trait]
impl Platform for QobuzPlatform {
    fn config(&self) -> &PlatformConfig {
        &self.config
    }

    fn add_context_options(&self, mut params: Vec<(String, String)>) -> Vec<(String, String)> {
        params.push(("app_id".to_string(), self.config.credentials.key.clone()));
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
                let track: dto::Track = self.lookup(Operation::LookupTrack, &id).await?;
                let entity = adapter::to_track(&track, false).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "track is missing a title or album")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Album(id) => {
                let album: dto::Album = self.lookup(Operation::LookupAlbum, &id).await?;
                let entity = adapter::to_album(&album).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "album is missing a title")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Artist(id) => {
                let artist: dto::Artist = self.lookup(Operation::LookupArtist, &id).await?;
                let name = artist
                    .name
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| PlatformError::resolution_failed(TAG, "artist has no name"))?;
                Ok(PlatformResult::query_only(vec![name]))
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
        let response: dto::SearchResponse = self.call(kind.operation(), query).await?;

        let results = match kind {
            SearchKind::Track => {
                adapter::track_results(&response.tracks.unwrap_or_default().items)
            }
            SearchKind::Album => {
                adapter::album_results(&response.albums.unwrap_or_default().items)
            }
        };

        Ok(finish_page(results, limit))
    }
}
