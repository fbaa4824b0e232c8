//! Adapter layer: Convert Tidal DTOs to domain models

use super::{TAG, dto};
use crate::model::{Album, MusicalEntity, PlatformResult, Track};
use crate::search::scorer::index_score;

/// Cover URL from an image hash: dashes become path separators.
pub fn cover_url(hash: Option<&str>) -> String {
    match hash.filter(|h| !h.is_empty()) {
        Some(hash) => format!(
            "https://resources.tidal.com/images/{}/320x320.jpg",
            hash.replace('-', "/")
        ),
        None => String::new(),
    }
}

fn artist_name(artist: Option<&dto::Artist>) -> String {
    artist.map(|a| a.name.clone()).unwrap_or_default()
}

pub fn to_track(track: &dto::Track) -> Option<MusicalEntity> {
    if track.title.is_empty() || track.url.is_empty() {
        return None;
    }
    let album = track.album.as_ref();

    let album = Album::new(
        album.map(|a| a.title.as_str()).unwrap_or_default(),
        artist_name(track.artist.as_ref()),
        cover_url(album.and_then(|a| a.cover.as_deref())),
    );
    Some(MusicalEntity::track(Track::new(&track.title, album), TAG, &track.url))
}

pub fn to_album(album: &dto::Album) -> Option<MusicalEntity> {
    if album.title.is_empty() || album.url.is_empty() {
        return None;
    }
    Some(MusicalEntity::album(
        Album::new(
            &album.title,
            artist_name(album.artist.as_ref()),
            cover_url(album.cover.as_deref()),
        ),
        TAG,
        &album.url,
    ))
}

pub fn results<T>(items: &[T], convert: fn(&T) -> Option<MusicalEntity>) -> Vec<PlatformResult> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| convert(item).map(|e| PlatformResult::hit(e, index_score(i))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_url_from_hash() {
        assert_eq!(
            cover_url(Some("9a2a4a2b-f5ce-4dbd")),
            "https://resources.tidal.com/images/9a2a4a2b/f5ce/4dbd/320x320.jpg"
        );
        assert_eq!(cover_url(None), "");
        assert_eq!(cover_url(Some("")), "");
    }

    #[test]
    fn test_to_album() {
        let album = dto::Album {
            title: "Random Access Memories".into(),
            url: "http://www.tidal.com/album/77646168".into(),
            artist: Some(dto::Artist { id: "8847".into(), name: "Daft Punk".into() }),
            ..Default::default()
        };

        let entity = to_album(&album).unwrap();

        assert_eq!(entity.artist(), "Daft Punk");
        assert_eq!(entity.picture(), "");
        assert_eq!(entity.links_for("tidal"), ["http://www.tidal.com/album/77646168"]);
    }
}
