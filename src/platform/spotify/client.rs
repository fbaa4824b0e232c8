//! Spotify adapter.
//!
//! Lookups hit `/tracks`, `/albums` and `/artists`; searches hit `/search`.
//! Album search results carry no artist; in eager mode each one costs an
//! extra album lookup to fill it in.
//!
//! With a client id (`key`) and secret configured, every call carries a
//! bearer token from the client-credentials grant. The token is cached
//! until shortly before it expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use super::{TAG, adapter, dto, permalink};
use crate::fetch::{Fetcher, Payload, PreparedRequest};
use crate::model::PlatformResult;
use crate::platform::permalink::Permalink;
use crate::platform::{
    Endpoint, HttpMethod, Mode, Operation, Platform, PlatformConfig, PlatformError,
    ResponseFormat, SearchKind, decode, ensure_capable, ensure_lookup, finish_page, page_limit,
};

pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens are renewed this long before Spotify says they expire
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

/// Default configuration, before user settings are applied.
pub fn descriptor() -> PlatformConfig {
    PlatformConfig::new(TAG, "Spotify")
        .branding("4DA400", "https://www.spotify.com/")
        .endpoint(
            Operation::LookupTrack,
            Endpoint::path("https://api.spotify.com/v1/tracks/{}"),
        )
        .endpoint(
            Operation::LookupAlbum,
            Endpoint::path("https://api.spotify.com/v1/albums/{}"),
        )
        .endpoint(
            Operation::LookupArtist,
            Endpoint::path("https://api.spotify.com/v1/artists/{}"),
        )
        .endpoint(
            Operation::SearchTrack,
            Endpoint::query("https://api.spotify.com/v1/search", "q")
                .with_options(&[("type", "track"), ("limit", "10")]),
        )
        .endpoint(
            Operation::SearchAlbum,
            Endpoint::query("https://api.spotify.com/v1/search", "q")
                .with_options(&[("type", "album"), ("limit", "10")]),
        )
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

pub struct SpotifyPlatform {
    config: PlatformConfig,
    fetcher: Fetcher,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyPlatform {
    pub fn new(config: PlatformConfig, fetcher: Fetcher) -> Self {
        Self {
            config,
            fetcher,
            token: Mutex::new(None),
        }
    }

    /// Bearer token for API calls; `None` when no client credentials are set.
    ///
    /// The lock is held across the grant request so concurrent eager
    /// lookups share one token fetch.
    async fn access_token(&self) -> Result<Option<String>, PlatformError> {
        let credentials = &self.config.credentials;
        if credentials.key.is_empty() || credentials.secret.is_empty() {
            return Ok(None);
        }

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(Some(token.value.clone()));
        }

        let basic = STANDARD.encode(format!("{}:{}", credentials.key, credentials.secret));
        let request = PreparedRequest {
            method: HttpMethod::Post,
            url: TOKEN_URL.to_string(),
            params: vec![("grant_type".to_string(), "client_credentials".to_string())],
            headers: Vec::new(),
        }
        .with_header("Authorization", format!("Basic {}", basic));

        let payload = self
            .fetcher
            .send(&request, ResponseFormat::Json)
            .await
            .map_err(|e| e.into_platform_error(TAG))?;
        let grant: dto::TokenResponse = decode(&payload, TAG)?;
        if grant.access_token.is_empty() {
            let reason = grant.error_description.or(grant.error).unwrap_or_default();
            return Err(PlatformError::unavailable(
                TAG,
                format!("access token refused: {}", reason),
            ));
        }

        debug!(expires_in = grant.expires_in, "Fetched access token");
        let lifetime = Duration::from_secs(grant.expires_in).saturating_sub(TOKEN_MARGIN);
        *cached = Some(AccessToken {
            value: grant.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(Some(grant.access_token))
    }

    /// One API call, authorized when credentials are configured.
    async fn fetch(&self, operation: Operation, query: &str) -> Result<Payload, PlatformError> {
        let mut request = self
            .fetcher
            .prepare(self, operation, query)
            .map_err(|e| e.into_platform_error(TAG))?;
        if let Some(token) = self.access_token().await? {
            request = request.with_header("Authorization", format!("Bearer {}", token));
        }

        debug!(%operation, url = %request.url, "Fetching");
        self.fetcher
            .send(&request, self.config.format)
            .await
            .map_err(|e| e.into_platform_error(TAG))
    }

    /// Lookup that fails on Spotify's error envelope.
    async fn lookup<T: DeserializeOwned>(
        &self,
        operation: Operation,
        id: &str,
    ) -> Result<T, PlatformError> {
        ensure_lookup(self, operation)?;
        let payload = self.fetch(operation, id).await?;

        let envelope: dto::ErrorResponse = decode(&payload, TAG)?;
        if let Some(error) = envelope.error {
            return Err(PlatformError::resolution_failed(
                TAG,
                format!("{} ({})", error.message, error.status),
            ));
        }
        decode(&payload, TAG)
    }

    async fn fill_album_artists(&self, albums: &mut [dto::Album]) {
        let lookups = albums
            .iter()
            .enumerate()
            .filter(|(_, a)| a.artists.is_empty() && !a.id.is_empty())
            .map(|(i, a)| {
                let id = a.id.clone();
                async move {
                    let full = self.lookup::<dto::Album>(Operation::LookupAlbum, &id).await;
                    (i, id, full)
                }
            })
            .collect::<Vec<_>>();

        for (i, id, full) in join_all(lookups).await {
            match full {
                Ok(full) => albums[i].artists = full.artists,
                Err(e) => debug!(album = %id, error = %e, "Eager album lookup failed"),
            }
        }
    }
}

#[async_trait]
impl Platform for SpotifyPlatform {
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
            Permalink::Track(id) => {
                let track: dto::Track = self.lookup(Operation::LookupTrack, &id).await?;
                let entity = adapter::to_track(&track).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "track is missing a name or link")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Album(id) => {
                let album: dto::Album = self.lookup(Operation::LookupAlbum, &id).await?;
                let entity = adapter::to_album(&album).ok_or_else(|| {
                    PlatformError::resolution_failed(TAG, "album is missing a name or link")
                })?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Artist(id) => {
                let artist: dto::Artist = self.lookup(Operation::LookupArtist, &id).await?;
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
        mode: Mode,
    ) -> Result<Vec<PlatformResult>, PlatformError> {
        ensure_capable(self, kind)?;
        let payload = self.fetch(kind.operation(), query).await?;
        let response: dto::SearchResponse = decode(&payload, TAG)?;

        let results = match kind {
            SearchKind::Track => {
                let mut tracks = response.tracks.map(|p| p.items).unwrap_or_default();
                tracks.truncate(page_limit(0));
                adapter::track_results(&tracks)
            }
            SearchKind::Album => {
                let mut albums = response.albums.map(|p| p.items).unwrap_or_default();
                albums.truncate(page_limit(limit));
                if mode == Mode::Eager {
                    self.fill_album_artists(&mut albums).await;
                }
                adapter::album_results(&albums)
            }
        };

        Ok(finish_page(results, limit))
    }
}
