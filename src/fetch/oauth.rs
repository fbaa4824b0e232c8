//! OAuth 1.0a request signing (HMAC-SHA1), consumer credentials only.
//!
//! See RFC 5849 section 3.4. Providers we call use two-legged OAuth, so the
//! token secret is always empty in production; [`signature`] still takes
//! one so the function can be checked against published vectors.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha1::Sha1;

use super::FetchError;
use crate::platform::{Credentials, HttpMethod};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// RFC 3986 percent-encoding (unreserved characters kept).
fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Signature base string: `METHOD&enc(url)&enc(sorted params)`.
pub fn signature_base_string(method: HttpMethod, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> =
        params.iter().map(|(k, v)| (encode(k), encode(v))).collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}&{}&{}", method.as_str(), encode(url), encode(&normalized))
}

/// Base64 HMAC-SHA1 signature over the base string.
///
/// `params` must already contain every `oauth_*` parameter except
/// `oauth_signature`.
pub fn signature(
    method: HttpMethod,
    url: &str,
    params: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, FetchError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| FetchError::Signing(e.to_string()))?;
    mac.update(signature_base_string(method, url, params).as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Deterministic core of [`sign`].
pub fn sign_with(
    method: HttpMethod,
    url: &str,
    params: &[(String, String)],
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Result<Vec<(String, String)>, FetchError> {
    let mut oauth = vec![
        ("oauth_consumer_key".to_string(), credentials.key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_version".to_string(), VERSION.to_string()),
    ];

    let mut all = params.to_vec();
    all.extend(oauth.iter().cloned());
    let sig = signature(method, url, &all, &credentials.secret, "")?;

    oauth.push(("oauth_signature".to_string(), sig));
    Ok(oauth)
}

/// OAuth parameters to append to a request, with a fresh nonce and the
/// current timestamp.
pub fn sign(
    method: HttpMethod,
    url: &str,
    params: &[(String, String)],
    credentials: &Credentials,
) -> Result<Vec<(String, String)>, FetchError> {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp();

    sign_with(method, url, params, credentials, &nonce, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    // Twitter's published signing walkthrough.
    fn twitter_params() -> Vec<(String, String)> {
        pairs(&[
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ])
    }

    const TWITTER_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

    #[test]
    fn test_base_string_matches_reference() {
        let base = signature_base_string(HttpMethod::Post, TWITTER_URL, &twitter_params());

        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
             %252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_signature_matches_reference() {
        let sig = signature(
            HttpMethod::Post,
            TWITTER_URL,
            &twitter_params(),
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
        .unwrap();

        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_sign_with_is_deterministic() {
        let creds = Credentials::new("consumer", "secret");
        let params = pairs(&[("q", "daft punk")]);

        let a = sign_with(HttpMethod::Get, "https://api/x", &params, &creds, "n", 1).unwrap();
        let b = sign_with(HttpMethod::Get, "https://api/x", &params, &creds, "n", 1).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.last().unwrap().0, "oauth_signature");
        assert_eq!(a[0], ("oauth_consumer_key".to_string(), "consumer".to_string()));
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let params = pairs(&[("q", "daft punk")]);
        let a = sign_with(
            HttpMethod::Get,
            "https://api/x",
            &params,
            &Credentials::new("consumer", "one"),
            "n",
            1,
        )
        .unwrap();
        let b = sign_with(
            HttpMethod::Get,
            "https://api/x",
            &params,
            &Credentials::new("consumer", "two"),
            "n",
            1,
        )
        .unwrap();

        assert_ne!(a.last(), b.last());
    }

    #[test]
    fn test_sign_uses_fresh_nonce() {
        let creds = Credentials::new("consumer", "secret");
        let a = sign(HttpMethod::Get, "https://api/x", &[], &creds).unwrap();
        let b = sign(HttpMethod::Get, "https://api/x", &[], &creds).unwrap();

        assert_ne!(a[1].1, b[1].1);
        assert_eq!(a[1].1.len(), 32);
    }
}
