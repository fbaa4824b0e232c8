//! Outbound provider calls.
//!
//! [`Fetcher`] turns an (adapter, operation, query) triple into one HTTP
//! request, signs it when the adapter needs OAuth1, and decodes the body
//! into a [`Payload`]. Every failure comes back as a [`FetchError`] value;
//! callers decide whether it is fatal (permalink lookup) or absorbed
//! (aggregate search).
//!
//! The network itself sits behind the [`Transport`] trait so adapters can
//! be exercised against canned bodies in tests.

pub mod oauth;
pub mod payload;
pub mod xml;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::platform::{HttpMethod, Operation, Platform, PlatformError, ResponseFormat};

pub use payload::Payload;

/// User agent sent when the config does not override it
pub const USER_AGENT: &str = concat!("tunelink/", env!("CARGO_PKG_VERSION"));

/// Why a fetch produced no payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("no endpoint configured for {0}")]
    Unsupported(Operation),

    #[error("network error: {0}")]
    Unavailable(String),

    #[error("could not decode response: {0}")]
    Malformed(String),

    #[error("could not sign request: {0}")]
    Signing(String),
}

impl FetchError {
    /// Attach the platform tag.
    pub fn into_platform_error(self, platform: &str) -> PlatformError {
        match self {
            Self::Unsupported(op) => PlatformError::unsupported(platform, op),
            Self::Unavailable(reason) | Self::Signing(reason) => {
                PlatformError::unavailable(platform, reason)
            }
            Self::Malformed(reason) => PlatformError::malformed(platform, reason),
        }
    }
}

/// A fully built request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Query string for GET, form body for POST
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl PreparedRequest {
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// Sends a prepared request and returns the raw body.
///
/// Non-2xx responses still return their body: providers put their
/// explicit error objects there.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> std::result::Result<String, FetchError>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest) -> std::result::Result<String, FetchError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http_client.get(&request.url).query(&request.params),
            HttpMethod::Post => self.http_client.post(&request.url).form(&request.params),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %request.url, %status, "Provider answered with an error status");
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Unavailable(e.to_string()))
    }
}

/// Builds, signs, sends and decodes provider requests.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetcher over a real HTTP client.
    pub fn http(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Build the request for `operation` without sending it.
    pub fn prepare(
        &self,
        platform: &dyn Platform,
        operation: Operation,
        query: &str,
    ) -> std::result::Result<PreparedRequest, FetchError> {
        let config = platform.config();
        let endpoint = config
            .endpoint_for(operation)
            .ok_or(FetchError::Unsupported(operation))?;

        let mut params = Vec::new();
        let url = match endpoint.term {
            None => endpoint
                .template
                .replace("{}", &urlencoding::encode(query)),
            Some(term) => {
                params.push((term.to_string(), query.to_string()));
                endpoint.template.to_string()
            }
        };
        params.extend(
            endpoint
                .options
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        let mut params = platform.add_context_options(params);

        if config.needs_oauth {
            let signed = oauth::sign(config.method, &url, &params, &config.credentials)?;
            params.extend(signed);
        }

        Ok(PreparedRequest {
            method: config.method,
            url,
            params,
            headers: Vec::new(),
        })
    }

    /// Run one provider call and decode its body.
    pub async fn fetch(
        &self,
        platform: &dyn Platform,
        operation: Operation,
        query: &str,
    ) -> std::result::Result<Payload, FetchError> {
        let request = self.prepare(platform, operation, query)?;
        debug!(
            platform = platform.tag(),
            %operation,
            url = %request.url,
            "Fetching"
        );

        self.send(&request, platform.config().format).await
    }

    /// Send a request built (or amended) by the caller and decode its body.
    pub async fn send(
        &self,
        request: &PreparedRequest,
        format: ResponseFormat,
    ) -> std::result::Result<Payload, FetchError> {
        let body = self.transport.send(request).await?;
        Payload::parse(&body, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::mocks::MockPlatform;
    use crate::platform::{Endpoint, PlatformConfig, ResponseFormat};
    use crate::test_utils::StubTransport;

    fn fetcher(transport: StubTransport) -> Fetcher {
        Fetcher::new(Arc::new(transport))
    }

    fn demo_config() -> PlatformConfig {
        PlatformConfig::new("demo", "Demo")
            .endpoint(Operation::LookupTrack, Endpoint::path("https://api.demo/track/{}"))
            .endpoint(
                Operation::SearchTrack,
                Endpoint::query("https://api.demo/search", "q").with_options(&[("limit", "10")]),
            )
    }

    #[test]
    fn test_prepare_path_endpoint_encodes_query() {
        let platform = MockPlatform::new(demo_config());
        let request = fetcher(StubTransport::new())
            .prepare(&platform, Operation::LookupTrack, "a b/c")
            .unwrap();

        assert_eq!(request.url, "https://api.demo/track/a%20b%2Fc");
        assert!(request.params.is_empty());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_prepare_term_endpoint_puts_query_first() {
        let platform = MockPlatform::new(demo_config());
        let request = fetcher(StubTransport::new())
            .prepare(&platform, Operation::SearchTrack, "daft punk")
            .unwrap();

        assert_eq!(request.url, "https://api.demo/search");
        assert_eq!(
            request.params,
            vec![
                ("q".to_string(), "daft punk".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_prepare_without_endpoint_is_unsupported() {
        let platform = MockPlatform::new(demo_config());
        let err = fetcher(StubTransport::new())
            .prepare(&platform, Operation::SearchAlbum, "x")
            .unwrap_err();

        assert_eq!(err, FetchError::Unsupported(Operation::SearchAlbum));
    }

    #[test]
    fn test_prepare_oauth_adds_signature_params() {
        let mut config = demo_config().oauth();
        config.credentials = crate::platform::Credentials::new("key", "secret");
        let platform = MockPlatform::new(config);

        let request = fetcher(StubTransport::new())
            .prepare(&platform, Operation::SearchTrack, "x")
            .unwrap();

        let keys: Vec<&str> = request.params.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"oauth_consumer_key"));
        assert!(keys.contains(&"oauth_signature"));
        assert!(keys.contains(&"oauth_nonce"));
    }

    #[tokio::test]
    async fn test_fetch_decodes_json_and_strips_bom() {
        let platform = MockPlatform::new(demo_config());
        let transport = StubTransport::new().with("/track/42", "\u{feff}{\"title\":\"Aerodynamic\"}");

        let payload = fetcher(transport)
            .fetch(&platform, Operation::LookupTrack, "42")
            .await
            .unwrap();

        assert_eq!(payload.data["title"], "Aerodynamic");
    }

    #[tokio::test]
    async fn test_fetch_decodes_xml() {
        let platform = MockPlatform::new(demo_config().format(ResponseFormat::Xml));
        let transport = StubTransport::new()
            .with("/track/1", "<response status=\"ok\"><track><title>Digital Love</title></track></response>");

        let payload = fetcher(transport)
            .fetch(&platform, Operation::LookupTrack, "1")
            .await
            .unwrap();

        assert_eq!(payload.data["response"]["track"]["title"], "Digital Love");
    }

    #[tokio::test]
    async fn test_fetch_reports_transport_failure() {
        let platform = MockPlatform::new(demo_config());

        let err = fetcher(StubTransport::new())
            .fetch(&platform, Operation::LookupTrack, "404")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_malformed_body() {
        let platform = MockPlatform::new(demo_config());
        let transport = StubTransport::new().with("/track/1", "<html>oops");

        let err = fetcher(transport)
            .fetch(&platform, Operation::LookupTrack, "1")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_fetch_error_maps_to_platform_error() {
        let err = FetchError::Malformed("eof".into()).into_platform_error("deezer");
        assert_eq!(err, PlatformError::malformed("deezer", "eof"));
    }
}
