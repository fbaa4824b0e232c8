//! Registry of configured adapters.
//!
//! Built once at startup from [`Config`]; afterwards it is read-only and
//! shared behind an `Arc`. Construction is where configuration mistakes
//! surface: missing credentials, empty capability sets and duplicate tags
//! are all fatal.

use std::sync::Arc;

use serde::Serialize;

use super::{Credentials, Platform, PlatformConfig, deezer, qobuz, sevendigital, spotify, tidal};
use crate::config::{Config, PlatformSettings};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;

/// Every platform tag this build knows how to talk to.
pub const KNOWN_TAGS: [&str; 5] = [
    spotify::TAG,
    deezer::TAG,
    qobuz::TAG,
    tidal::TAG,
    sevendigital::TAG,
];

/// Which credential halves a platform needs before it can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialNeed {
    None,
    Key,
    KeyAndSecret,
}

fn credential_need(tag: &str) -> CredentialNeed {
    match tag {
        qobuz::TAG | tidal::TAG => CredentialNeed::Key,
        sevendigital::TAG => CredentialNeed::KeyAndSecret,
        _ => CredentialNeed::None,
    }
}

/// Public view of an adapter, for platform listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub tag: String,
    pub name: String,
    pub color: String,
    pub homepage: String,
    pub capabilities: Vec<&'static str>,
    pub enabled_for_api: bool,
    pub enabled_for_website: bool,
    pub default: bool,
}

impl PlatformSummary {
    pub fn of(platform: &dyn Platform) -> Self {
        let config = platform.config();
        Self {
            tag: config.tag.to_string(),
            name: config.name.to_string(),
            color: config.color.to_string(),
            homepage: config.homepage.to_string(),
            capabilities: config.capabilities.names(),
            enabled_for_api: config.enabled_for_api,
            enabled_for_website: config.enabled_for_website,
            default: config.default,
        }
    }
}

/// Fixed set of adapters, unique by tag.
#[derive(Clone)]
pub struct PlatformRegistry {
    platforms: Vec<Arc<dyn Platform>>,
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.platforms.iter().map(|p| p.tag()))
            .finish()
    }
}

impl PlatformRegistry {
    /// Build every known adapter, applying `[platforms.<tag>]` settings.
    ///
    /// Platforms without a settings table are enabled when they need no
    /// credentials and left disabled otherwise.
    pub fn from_config(config: &Config, fetcher: Fetcher) -> Result<Self> {
        for tag in config.platforms.keys() {
            if !KNOWN_TAGS.contains(&tag.as_str()) {
                tracing::warn!(platform = %tag, "Ignoring settings for unknown platform");
            }
        }

        let mut platforms: Vec<Arc<dyn Platform>> = Vec::with_capacity(KNOWN_TAGS.len());
        for tag in KNOWN_TAGS {
            let settings = match config.platforms.get(tag) {
                Some(settings) => settings.clone(),
                None if credential_need(tag) == CredentialNeed::None => PlatformSettings::default(),
                None => PlatformSettings::disabled(),
            };

            let descriptor = apply_settings(descriptor(tag)?, &settings)?;
            if !settings.is_enabled() {
                tracing::debug!(platform = tag, "Platform disabled");
            }
            platforms.push(build(descriptor, fetcher.clone())?);
        }

        Self::from_platforms(platforms)
    }

    /// Wrap already-built adapters. Tags must be unique.
    pub fn from_platforms(platforms: Vec<Arc<dyn Platform>>) -> Result<Self> {
        for (i, platform) in platforms.iter().enumerate() {
            let tag = platform.tag();
            if platforms[..i].iter().any(|p| p.tag().eq_ignore_ascii_case(tag)) {
                return Err(Error::configuration(format!("duplicate platform tag '{}'", tag)));
            }
        }

        tracing::debug!(
            platforms = platforms.len(),
            "Platform registry ready"
        );
        Ok(Self { platforms })
    }

    /// Adapter by tag, case-insensitively.
    pub fn get(&self, tag: &str) -> Option<&Arc<dyn Platform>> {
        self.platforms.iter().find(|p| p.tag().eq_ignore_ascii_case(tag))
    }

    /// Every adapter, in registration order.
    pub fn all(&self) -> &[Arc<dyn Platform>] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn summaries(&self) -> Vec<PlatformSummary> {
        self.platforms.iter().map(|p| PlatformSummary::of(p.as_ref())).collect()
    }

    /// Tags of the enabled-for-api platforms flagged as default.
    pub fn default_tags(&self) -> Vec<&'static str> {
        self.platforms
            .iter()
            .filter(|p| p.config().default && p.is_enabled_for_api())
            .map(|p| p.tag())
            .collect()
    }
}

fn descriptor(tag: &str) -> Result<PlatformConfig> {
    Ok(match tag {
        spotify::TAG => spotify::descriptor(),
        deezer::TAG => deezer::descriptor(),
        qobuz::TAG => qobuz::descriptor(),
        tidal::TAG => tidal::descriptor(),
        sevendigital::TAG => sevendigital::descriptor(),
        other => return Err(Error::configuration(format!("no adapter for '{}'", other))),
    })
}

fn build(config: PlatformConfig, fetcher: Fetcher) -> Result<Arc<dyn Platform>> {
    Ok(match config.tag {
        spotify::TAG => Arc::new(spotify::SpotifyPlatform::new(config, fetcher)),
        deezer::TAG => Arc::new(deezer::DeezerPlatform::new(config, fetcher)),
        qobuz::TAG => Arc::new(qobuz::QobuzPlatform::new(config, fetcher)),
        tidal::TAG => Arc::new(tidal::TidalPlatform::new(config, fetcher)),
        sevendigital::TAG => Arc::new(sevendigital::SevenDigitalPlatform::new(config, fetcher)),
        other => return Err(Error::configuration(format!("no adapter for '{}'", other))),
    })
}

/// Overlay user settings on a built-in descriptor, validating them.
fn apply_settings(mut config: PlatformConfig, settings: &PlatformSettings) -> Result<PlatformConfig> {
    config.enabled_for_api = settings.enable.api;
    config.enabled_for_website = settings.enable.website;
    config.default = settings.default;
    config.capabilities = settings.capabilities.to_capabilities();
    config.credentials = Credentials::new(settings.key.trim(), settings.secret.trim());

    if !settings.is_enabled() {
        return Ok(config);
    }

    if config.capabilities.is_empty() {
        return Err(Error::configuration(format!(
            "{} is enabled but has no capability",
            config.tag
        )));
    }

    let missing = match credential_need(config.tag) {
        CredentialNeed::None => None,
        CredentialNeed::Key if config.credentials.key.is_empty() => Some("key"),
        CredentialNeed::KeyAndSecret if config.credentials.key.is_empty() => Some("key"),
        CredentialNeed::KeyAndSecret if config.credentials.secret.is_empty() => Some("secret"),
        _ => None,
    };
    if let Some(field) = missing {
        return Err(Error::configuration(format!(
            "{} is enabled but has no {} (set [platforms.{}] {} or TUNELINK_{}_{})",
            config.tag,
            field,
            config.tag,
            field,
            config.tag.to_ascii_uppercase(),
            field.to_ascii_uppercase()
        )));
    }

    Ok(config)
}
