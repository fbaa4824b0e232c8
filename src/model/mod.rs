//! Normalized musical entities shared by every platform adapter.
//!
//! Defines [`MusicalEntity`] (a [`Track`] or an [`Album`] plus its playback
//! links) and [`PlatformResult`], the envelope returned by both permalink
//! resolution and per-platform search.
//!
//! Entities are built per request and never persisted by this crate.
//! Construction always takes a first link, so an entity without any
//! platform link cannot exist.

mod title;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use title::safe_title;

/// Ordered links for one platform. Index 0 is the canonical link.
pub type LinkList = SmallVec<[String; 1]>;

/// Platform tag -> ordered playback links.
pub type PlatformLinks = BTreeMap<String, LinkList>;

/// An album as described by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    /// Title stripped of edition/featuring noise, used as a query term
    pub safe_title: String,
    /// Artist name; blank when the provider's list payload omits it
    pub artist: String,
    /// Cover image URL; blank when unknown
    pub picture: String,
}

impl Album {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        picture: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            safe_title: safe_title(&title),
            title,
            artist: artist.into(),
            picture: picture.into(),
        }
    }
}

/// A track, always attached to the album it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub safe_title: String,
    pub album: Arc<Album>,
}

impl Track {
    pub fn new(title: impl Into<String>, album: Album) -> Self {
        let title = title.into();
        Self {
            safe_title: safe_title(&title),
            title,
            album: Arc::new(album),
        }
    }
}

/// Track or album payload of a [`MusicalEntity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityKind {
    Track(Track),
    Album(Album),
}

/// A resolved track or album with its per-platform playback links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicalEntity {
    #[serde(flatten)]
    pub kind: EntityKind,
    pub links: PlatformLinks,
}

impl MusicalEntity {
    /// Build a track entity with its first link.
    pub fn track(track: Track, platform: &str, link: impl Into<String>) -> Self {
        Self::with_link(EntityKind::Track(track), platform, link.into())
    }

    /// Build an album entity with its first link.
    pub fn album(album: Album, platform: &str, link: impl Into<String>) -> Self {
        Self::with_link(EntityKind::Album(album), platform, link.into())
    }

    fn with_link(kind: EntityKind, platform: &str, link: String) -> Self {
        let mut links = PlatformLinks::new();
        links.insert(platform.to_string(), smallvec::smallvec![link]);
        Self { kind, links }
    }

    /// "track" or "album"
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EntityKind::Track(_) => "track",
            EntityKind::Album(_) => "album",
        }
    }

    pub fn is_track(&self) -> bool {
        matches!(self.kind, EntityKind::Track(_))
    }

    pub fn title(&self) -> &str {
        match &self.kind {
            EntityKind::Track(t) => &t.title,
            EntityKind::Album(a) => &a.title,
        }
    }

    pub fn safe_title(&self) -> &str {
        match &self.kind {
            EntityKind::Track(t) => &t.safe_title,
            EntityKind::Album(a) => &a.safe_title,
        }
    }

    /// Artist of the track's album, or of the album itself.
    pub fn artist(&self) -> &str {
        match &self.kind {
            EntityKind::Track(t) => &t.album.artist,
            EntityKind::Album(a) => &a.artist,
        }
    }

    pub fn picture(&self) -> &str {
        match &self.kind {
            EntityKind::Track(t) => &t.album.picture,
            EntityKind::Album(a) => &a.picture,
        }
    }

    /// Add a link for a platform, ignoring exact duplicates.
    pub fn add_link(&mut self, platform: &str, link: impl Into<String>) {
        let link = link.into();
        let list = self.links.entry(platform.to_string()).or_default();
        if !list.contains(&link) {
            list.push(link);
        }
    }

    /// Links for one platform, empty if the entity is not available there.
    pub fn links_for(&self, platform: &str) -> &[String] {
        self.links.get(platform).map(|l| l.as_slice()).unwrap_or(&[])
    }

    /// Tags of every platform this entity has a link on.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// Merge another entity into this one: union of links (ours first),
    /// blank artist/picture filled from the other side.
    pub fn merge(&mut self, other: &MusicalEntity) {
        for (platform, links) in &other.links {
            for link in links {
                self.add_link(platform, link.clone());
            }
        }

        let album = match &mut self.kind {
            EntityKind::Track(t) => Arc::make_mut(&mut t.album),
            EntityKind::Album(a) => a,
        };
        if album.artist.is_empty() {
            album.artist = other.artist().to_string();
        }
        if album.picture.is_empty() {
            album.picture = other.picture().to_string();
        }
    }

    /// Words to feed a free-text search for this entity.
    pub fn query_words(&self) -> Vec<String> {
        vec![self.artist().to_string(), self.safe_title().to_string()]
    }
}

/// Outcome of a permalink expansion or a single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformResult {
    pub entity: Option<MusicalEntity>,
    /// Relevance in 0.0..=1.0, only set for search hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Words to drive a free-text search when no entity was resolved
    pub query_words: Vec<String>,
    /// Display name of the platform that produced the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl PlatformResult {
    /// No entity, only query words (unrecognised link, artist page, ...).
    pub fn query_only(query_words: Vec<String>) -> Self {
        Self {
            entity: None,
            score: None,
            query_words,
            platform: None,
        }
    }

    /// A resolved entity; query words are derived from it.
    pub fn resolved(entity: MusicalEntity, platform_name: &str) -> Self {
        Self {
            query_words: entity.query_words(),
            entity: Some(entity),
            score: None,
            platform: Some(platform_name.to_string()),
        }
    }

    /// A search hit with its score.
    pub fn hit(entity: MusicalEntity, score: f64) -> Self {
        Self {
            query_words: entity.query_words(),
            entity: Some(entity),
            score: Some(score),
            platform: None,
        }
    }

    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }
}
