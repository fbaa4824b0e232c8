//! 7digital adapter. XML over OAuth1-signed (two-legged) GET requests.

use async_trait::async_trait;

use super::{TAG, adapter, dto, permalink};
use crate::fetch::Fetcher;
use crate::model::PlatformResult;
use crate::platform::permalink::Permalink;
use crate::platform::{
    Endpoint, Mode, Operation, Platform, PlatformConfig, PlatformError, ResponseFormat,
    SearchKind, ensure_capable, ensure_lookup, fetch_as, finish_page,
};

const PAGE: &[(&str, &str)] = &[("pagesize", "10")];

pub fn descriptor() -> PlatformConfig {
    PlatformConfig::new(TAG, "7digital")
        .branding("0099FF", "https://www.7digital.com/")
        .format(ResponseFormat::Xml)
        .oauth()
        .endpoint(
            Operation::LookupTrack,
            Endpoint::query("https://api.7digital.com/1.2/track/details", "trackid"),
        )
        .endpoint(
            Operation::LookupAlbum,
            Endpoint::query("https://api.7digital.com/1.2/release/details", "releaseid"),
        )
        .endpoint(
            Operation::LookupArtist,
            Endpoint::query("https://api.7digital.com/1.2/artist/details", "artistid"),
        )
        .endpoint(
            Operation::SearchTrack,
            Endpoint::query("https://api.7digital.com/1.2/track/search", "q").with_options(PAGE),
        )
        .endpoint(
            Operation::SearchAlbum,
            Endpoint::query("https://api.7digital.com/1.2/release/search", "q").with_options(PAGE),
        )
}

pub struct SevenDigitalPlatform {
    config: PlatformConfig,
    fetcher: Fetcher,
}

impl SevenDigitalPlatform {
    pub fn new(config: PlatformConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    async fn call(&self, operation: Operation, query: &str) -> Result<dto::Response, PlatformError> {
        let envelope: dto::Envelope = fetch_as(&self.fetcher, self, operation, query).await?;
        let response = envelope.response;

        if response.is_error() {
            let message = response
                .error
                .map(|e| format!("{} ({})", e.message, e.code))
                .unwrap_or_else(|| "status error".to_string());
            return Err(PlatformError::resolution_failed(TAG, message));
        }
        Ok(response)
    }
}

#[async_trait]
impl Platform for SevenDigitalPlatform {
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
                ensure_lookup(self, Operation::LookupTrack)?;
                let response = self.call(Operation::LookupTrack, &id).await?;
                let entity = response
                    .track
                    .as_ref()
                    .and_then(adapter::to_track)
                    .ok_or_else(|| PlatformError::resolution_failed(TAG, "no usable track in response"))?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Album(id) => {
                ensure_lookup(self, Operation::LookupAlbum)?;
                let response = self.call(Operation::LookupAlbum, &id).await?;
                let entity = response
                    .release
                    .as_ref()
                    .and_then(adapter::to_album)
                    .ok_or_else(|| PlatformError::resolution_failed(TAG, "no usable release in response"))?;
                Ok(PlatformResult::resolved(entity, self.name()))
            }
            Permalink::Artist(name) => Ok(PlatformResult::query_only(vec![name])),
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
        let response = self.call(kind.operation(), query).await?;

        let items = response
            .search_results
            .map(|r| r.results.into_vec())
            .unwrap_or_default();

        Ok(finish_page(adapter::results(&items), limit))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::platform::Credentials;
    use crate::test_utils::{StubTransport, fixtures};

    fn platform(transport: StubTransport) -> SevenDigitalPlatform {
        let mut config = descriptor();
        config.credentials = Credentials::new("consumer", "secret");
        SevenDigitalPlatform::new(config, Fetcher::new(Arc::new(transport)))
    }

    #[test]
    fn test_requests_are_signed() {
        let sevendigital = platform(StubTransport::new());
        let request = sevendigital
            .fetcher
            .prepare(&sevendigital, Operation::SearchTrack, "daft punk")
            .unwrap();

        assert!(request.params.iter().any(|(k, v)| k == "oauth_consumer_key" && v == "consumer"));
        assert!(request.params.iter().any(|(k, _)| k == "oauth_signature"));
        assert_eq!(request.url, "https://api.7digital.com/1.2/track/search");
    }

    #[tokio::test]
    async fn test_expand_clip_permalink() {
        let transport = StubTransport::new().with("track/details", fixtures::SEVENDIGITAL_TRACK);

        let result = platform(transport)
            .expand_permalink("http://previews.7digital.com/clip/1234567", Mode::Lazy)
            .await
            .unwrap();

        let entity = result.entity.unwrap();
        assert_eq!(entity.title(), "Something About Us");
        assert_eq!(entity.artist(), "Daft Punk");
        assert_eq!(result.platform.as_deref(), Some("7digital"));
    }

    #[tokio::test]
    async fn test_expand_error_response_fails() {
        let transport = StubTransport::new().with(
            "release/details",
            r#"<response status="error"><error code="2001"><errorMessage>Release not found</errorMessage></error></response>"#,
        );

        let err = platform(transport)
            .expand_permalink("https://www.7digital.com/artist/x/release/y-1", Mode::Lazy)
            .await
            .unwrap_err();

        assert_eq!(err, PlatformError::resolution_failed(TAG, "Release not found (2001)"));
    }

    #[tokio::test]
    async fn test_expand_artist_slug_needs_no_network() {
        let result = platform(StubTransport::new())
            .expand_permalink("https://www.7digital.com/artist/daft-punk", Mode::Lazy)
            .await
            .unwrap();

        assert_eq!(result.query_words, ["daft punk"]);
    }

    #[tokio::test]
    async fn test_album_search() {
        let transport = StubTransport::new().with("release/search", fixtures::SEVENDIGITAL_RELEASE_SEARCH);

        let results = platform(transport)
            .search(SearchKind::Album, "alive", 0, Mode::Lazy)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, Some(1.0));
        assert_eq!(results[0].entity.as_ref().unwrap().title(), "Alive 2007");
    }
}
