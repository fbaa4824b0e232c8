//! Adapter layer: Convert 7digital DTOs to domain models

use super::{TAG, dto};
use crate::model::{Album, MusicalEntity, PlatformResult, Track};
use crate::search::scorer::popularity_scores;

fn artist_name(artist: Option<&dto::Artist>) -> String {
    artist
        .map(|a| {
            if a.appears_as.is_empty() {
                a.name.clone()
            } else {
                a.appears_as.clone()
            }
        })
        .unwrap_or_default()
}

/// `title (version)` when the release/track has a version label.
fn full_title(title: &str, version: &str) -> String {
    if version.is_empty() {
        title.to_string()
    } else {
        format!("{} ({})", title, version)
    }
}

pub fn to_track(track: &dto::Track) -> Option<MusicalEntity> {
    if track.title.is_empty() || track.url.is_empty() {
        return None;
    }
    let release = track.release.as_ref();
    let artist = track
        .artist
        .as_ref()
        .or_else(|| release.and_then(|r| r.artist.as_ref()));

    let album = Album::new(
        release.map(|r| r.title.as_str()).unwrap_or_default(),
        artist_name(artist),
        release.map(|r| r.image.as_str()).unwrap_or_default(),
    );
    Some(MusicalEntity::track(
        Track::new(full_title(&track.title, &track.version), album),
        TAG,
        &track.url,
    ))
}

pub fn to_album(release: &dto::Release) -> Option<MusicalEntity> {
    if release.title.is_empty() || release.url.is_empty() {
        return None;
    }
    Some(MusicalEntity::album(
        Album::new(
            full_title(&release.title, &release.version),
            artist_name(release.artist.as_ref()),
            &release.image,
        ),
        TAG,
        &release.url,
    ))
}

/// Hits scored by 7digital's relevance figure relative to the page best.
pub fn results(items: &[dto::SearchResult]) -> Vec<PlatformResult> {
    let raw: Vec<f64> = items
        .iter()
        .map(|r| r.score.trim().parse::<f64>().unwrap_or(0.0))
        .collect();

    items
        .iter()
        .zip(popularity_scores(&raw))
        .filter_map(|(item, score)| {
            let entity = match (&item.track, &item.release) {
                (Some(track), _) => to_track(track),
                (None, Some(release)) => to_album(release),
                (None, None) => None,
            }?;
            Some(PlatformResult::hit(entity, score))
        })
        .collect()
}
