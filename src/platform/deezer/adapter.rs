//! Adapter layer: Convert Deezer DTOs to domain models

use super::{TAG, dto};
use crate::model::{Album, MusicalEntity, PlatformResult, Track};
use crate::search::scorer::index_score;

fn artist_name(artist: Option<&dto::Artist>) -> String {
    artist.map(|a| a.name.clone()).unwrap_or_default()
}

/// Album cover, or the artist picture when the album has none.
fn picture(cover: Option<&String>, artist: Option<&dto::Artist>) -> String {
    cover
        .filter(|c| !c.is_empty())
        .cloned()
        .or_else(|| artist.and_then(|a| a.picture.clone()))
        .unwrap_or_default()
}

pub fn to_track(track: &dto::Track) -> Option<MusicalEntity> {
    if track.title.is_empty() || track.link.is_empty() {
        return None;
    }
    let artist = track.artist.as_ref();
    let album = track.album.as_ref();

    let album = Album::new(
        album.map(|a| a.title.as_str()).unwrap_or_default(),
        artist_name(artist),
        picture(album.and_then(|a| a.cover.as_ref()), artist),
    );
    Some(MusicalEntity::track(Track::new(&track.title, album), TAG, &track.link))
}

pub fn to_album(album: &dto::Album) -> Option<MusicalEntity> {
    if album.title.is_empty() || album.link.is_empty() {
        return None;
    }
    let artist = album.artist.as_ref();

    Some(MusicalEntity::album(
        Album::new(&album.title, artist_name(artist), picture(album.cover.as_ref(), artist)),
        TAG,
        &album.link,
    ))
}

/// Position-scored hits; unusable items keep their slot in the ranking.
pub fn results<T>(items: &[T], convert: fn(&T) -> Option<MusicalEntity>) -> Vec<PlatformResult> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| convert(item).map(|e| PlatformResult::hit(e, index_score(i))))
        .collect()
}
