//! Deezer adapter.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{TAG, adapter, dto, permalink};
use crate::fetch::Fetcher;
use crate::model::PlatformResult;
use crate::platform::permalink::{Permalink, segment_words};
use crate::platform::{
    Endpoint, Mode, Operation, Platform, PlatformConfig, PlatformError, SearchKind, decode,
    ensure_capable, ensure_lookup, fetch_payload, finish_page,
};

pub fn descriptor() -> PlatformConfig {
    PlatformConfig::new(TAG, "Deezer")
        .branding("181818", "https://www.deezer.com/")
        .endpoint(Operation::LookupTrack, Endpoint::path("https://api.deezer.com/track/{}"))
        .endpoint(Operation::LookupAlbum, Endpoint::path("https://api.deezer.com/album/{}"))
        .endpoint(Operation::LookupArtist, Endpoint::path("https://api.deezer.com/artist/{}"))
        .endpoint(
            Operation::SearchTrack,
            Endpoint::query("https://api.deezer.com/search/track", "q")
                .with_options(&[("nb_items", "10")]),
        )
        .endpoint(
            Operation::SearchAlbum,
            Endpoint::query("https://api.deezer.com/search/album", "q")
                .with_options(&[("nb_items", "10")]),
        )
}

pub struct DeezerPlatform {
    config: PlatformConfig,
    fetcher: Fetcher,
}

/// A lookup answered either with the entity or with Deezer's error object.
enum Lookup<T> {
    Found(T),
    Error(dto::ApiError),
}

impl DeezerPlatform {
    pub fn new(config: PlatformConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        operation: Operation,
        id: &str,
    ) -> Result<Lookup<T>, PlatformError> {
        ensure_lookup(self, operation)?;
        let payload = fetch_payload(&self.fetcher, self, operation, id).await?;

        let envelope: dto::ErrorResponse = decode(&payload, TAG)?;
        match envelope.error {
            Some(error) => Ok(Lookup::Error(error)),
            None => Ok(Lookup::Found(decode(&payload, TAG)?)),
        }
    }
}

fn lookup_failed(error: dto::ApiError) -> PlatformError {
    PlatformError::resolution_failed(TAG, format!("{} ({})", error.message, error.code))
}

#[async_trait]
impl Platform for DeezerPlatform {
    fn config(&self) -> &PlatformConfig {
        &self.config
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
            Permalink::Track(id) => match self.lookup::<dto::Track>(Operation::LookupTrack, &id).await? {
                Lookup::Found(track) => {
                    let entity = adapter::to_track(&track).ok_or_else(|| {
                        PlatformError::resolution_failed(TAG, "track is missing a title or link")
                    })?;
                    Ok(PlatformResult::resolved(entity, self.name()))
                }
                Lookup::Error(error) => Err(lookup_failed(error)),
            },
            Permalink::Album(id) => match self.lookup::<dto::Album>(Operation::LookupAlbum, &id).await? {
                Lookup::Found(album) => {
                    let entity = adapter::to_album(&album).ok_or_else(|| {
                        PlatformError::resolution_failed(TAG, "album is missing a title or link")
                    })?;
                    Ok(PlatformResult::resolved(entity, self.name()))
                }
                Lookup::Error(error) => Err(lookup_failed(error)),
            },
            // Legacy name-based artist pages have no API counterpart; Deezer
            // answers "no data" and the slug itself becomes the query.
            Permalink::Artist(id) => {
                match self.lookup::<dto::Artist>(Operation::LookupArtist, &id).await? {
                    Lookup::Found(artist) if !artist.name.is_empty() => {
                        Ok(PlatformResult::query_only(vec![artist.name]))
                    }
                    Lookup::Error(error) if error.code != dto::NO_DATA => Err(lookup_failed(error)),
                    _ => Ok(PlatformResult::query_only(vec![segment_words(&id, true)])),
                }
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
        let payload = fetch_payload(&self.fetcher, self, kind.operation(), query).await?;

        let envelope: dto::ErrorResponse = decode(&payload, TAG)?;
        if let Some(error) = envelope.error {
            return Err(PlatformError::unavailable(TAG, error.message));
        }

        let results = match kind {
            SearchKind::Track => {
                let response: dto::SearchResponse<dto::Track> = decode(&payload, TAG)?;
                adapter::results(&response.data, adapter::to_track)
            }
            SearchKind::Album => {
                let response: dto::SearchResponse<dto::Album> = decode(&payload, TAG)?;
                adapter::results(&response.data, adapter::to_album)
            }
        };

        Ok(finish_page(results, limit))
    }
}
