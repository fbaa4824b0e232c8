//! Adapter layer: Convert Qobuz DTOs to domain models
//!
//! Qobuz API objects carry no public URL; player links are built from ids.

use super::{TAG, dto};
use crate::model::{Album, MusicalEntity, PlatformResult, Track};
use crate::search::scorer::index_score;

pub fn track_link(id: &str) -> String {
    format!("http://open.qobuz.com/track/{}", id)
}

pub fn album_link(id: &str) -> String {
    format!("http://open.qobuz.com/album/{}", id)
}

fn picture(image: Option<&dto::Image>) -> String {
    image.and_then(|i| i.small.clone()).unwrap_or_default()
}

fn artist_name(artist: Option<&dto::Artist>) -> Option<String> {
    artist.and_then(|a| a.name.clone()).filter(|n| !n.is_empty())
}

fn album_of(album: &dto::Album, artist: String) -> Album {
    Album::new(&album.title, artist, picture(album.image.as_ref()))
}

/// Track entity. `require_artist` drops tracks whose album has no artist
/// name, which search pages contain.
pub fn to_track(track: &dto::Track, require_artist: bool) -> Option<MusicalEntity> {
    if track.title.is_empty() || track.id.is_empty() {
        return None;
    }
    let album = track.album.as_ref()?;
    let artist = artist_name(album.artist.as_ref())
        .or_else(|| artist_name(track.performer.as_ref()));
    if require_artist && artist.is_none() {
        return None;
    }

    Some(MusicalEntity::track(
        Track::new(&track.title, album_of(album, artist.unwrap_or_default())),
        TAG,
        track_link(&track.id),
    ))
}

pub fn to_album(album: &dto::Album) -> Option<MusicalEntity> {
    if album.title.is_empty() || album.id.is_empty() {
        return None;
    }
    let artist = artist_name(album.artist.as_ref()).unwrap_or_default();
    Some(MusicalEntity::album(album_of(album, artist), TAG, album_link(&album.id)))
}

/// Track hits; skipped tracks still consume their rank.
pub fn track_results(tracks: &[dto::Track]) -> Vec<PlatformResult> {
    tracks
        .iter()
        .enumerate()
        .filter_map(|(i, t)| to_track(t, true).map(|e| PlatformResult::hit(e, index_score(i))))
        .collect()
}

pub fn album_results(albums: &[dto::Album]) -> Vec<PlatformResult> {
    albums
        .iter()
        .enumerate()
        .filter_map(|(i, a)| to_album(a).map(|e| PlatformResult::hit(e, index_score(i))))
        .collect()
}
