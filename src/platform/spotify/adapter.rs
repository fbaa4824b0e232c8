//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where Spotify DTO types are converted to domain
//! types. Conversions return `None` when a required field (name, link) is
//! missing, so no entity is ever built without a link.

use super::{TAG, dto};
use crate::model::{Album, MusicalEntity, PlatformResult, Track};
use crate::search::scorer::{index_score, popularity_scores};

/// Medium-size cover (300px), falling back to whatever is there.
fn picture(images: &[dto::Image]) -> String {
    images
        .get(1)
        .or_else(|| images.first())
        .map(|i| i.url.clone())
        .unwrap_or_default()
}

fn first_artist(artists: &[dto::Artist]) -> String {
    artists.first().map(|a| a.name.clone()).unwrap_or_default()
}

fn link(urls: &dto::ExternalUrls) -> Option<&str> {
    urls.spotify.as_deref().filter(|l| !l.is_empty())
}

pub fn to_album(album: &dto::Album) -> Option<MusicalEntity> {
    if album.name.is_empty() {
        return None;
    }
    let link = link(&album.external_urls)?;
    Some(MusicalEntity::album(
        Album::new(&album.name, first_artist(&album.artists), picture(&album.images)),
        TAG,
        link,
    ))
}

pub fn to_track(track: &dto::Track) -> Option<MusicalEntity> {
    if track.name.is_empty() {
        return None;
    }
    let link = link(&track.external_urls)?;
    let album = track.album.as_ref();

    let album = Album::new(
        album.map(|a| a.name.as_str()).unwrap_or_default(),
        first_artist(&track.artists),
        album.map(|a| picture(&a.images)).unwrap_or_default(),
    );
    Some(MusicalEntity::track(Track::new(&track.name, album), TAG, link))
}

/// Track hits scored by popularity relative to the best hit on the page.
pub fn track_results(tracks: &[dto::Track]) -> Vec<PlatformResult> {
    let popularity: Vec<f64> = tracks
        .iter()
        .map(|t| f64::from(t.popularity.unwrap_or(0)))
        .collect();

    tracks
        .iter()
        .zip(popularity_scores(&popularity))
        .filter_map(|(track, score)| to_track(track).map(|e| PlatformResult::hit(e, score)))
        .collect()
}

/// Album hits scored by position.
pub fn album_results(albums: &[dto::Album]) -> Vec<PlatformResult> {
    albums
        .iter()
        .enumerate()
        .filter_map(|(i, album)| to_album(album).map(|e| PlatformResult::hit(e, index_score(i))))
        .collect()
}
