use std::cmp::Ordering;

use crate::{
    emotion::{Emotion, EmotionProfile},
    store::EmotionEntry,
    types::{EmotionTableRow, HistoryTableRow, SpotifyTrack, TrackSummary, TrackTableRow},
};

pub fn join_artist_names(track: &SpotifyTrack) -> String {
    track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First album image, or an empty string when the album has none.
pub fn first_image_url(track: &SpotifyTrack) -> String {
    track
        .album
        .images
        .first()
        .map(|image| image.url.clone())
        .unwrap_or_default()
}

/// Flattens a Spotify track into a [`TrackSummary`] stamped with `emotion`.
///
/// `emotion` is the label exactly as the caller supplied it, not the
/// normalized form.
pub fn summarize_track(track: &SpotifyTrack, emotion: &str) -> TrackSummary {
    TrackSummary {
        name: track.name.clone(),
        artist: join_artist_names(track),
        album: track.album.name.clone(),
        image_url: first_image_url(track),
        spotify_url: track.external_urls.spotify.clone(),
        preview_url: track.preview_url.clone().unwrap_or_default(),
        emotion: emotion.to_string(),
    }
}

pub fn summarize_tracks(tracks: &[SpotifyTrack], emotion: &str) -> Vec<TrackSummary> {
    tracks
        .iter()
        .map(|track| summarize_track(track, emotion))
        .collect()
}

pub fn track_table_rows(tracks: &[TrackSummary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artist: t.artist.clone(),
            album: t.album.clone(),
            url: t.spotify_url.clone(),
        })
        .collect()
}

pub fn emotion_table_rows() -> Vec<EmotionTableRow> {
    Emotion::ALL
        .iter()
        .map(|emotion| profile_row(emotion.profile()))
        .collect()
}

fn profile_row(profile: &EmotionProfile) -> EmotionTableRow {
    EmotionTableRow {
        emotion: profile.emotion.to_string(),
        valence: profile.target_valence,
        energy: profile.target_energy,
        danceability: profile.target_danceability,
        genres: profile.seed_genres.join(", "),
        limit: profile.limit,
    }
}

pub fn history_table_rows(entries: &[EmotionEntry]) -> Vec<HistoryTableRow> {
    let mut rows: Vec<HistoryTableRow> = entries
        .iter()
        .map(|e| HistoryTableRow {
            date: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            emotion: e.emotion.clone(),
        })
        .collect();
    sort_history_rows(&mut rows);
    rows
}

/// Newest first; entries logged in the same second keep emotion order.
pub fn sort_history_rows(rows: &mut [HistoryTableRow]) {
    rows.sort_by(|a, b| match b.date.cmp(&a.date) {
        Ordering::Equal => a.emotion.cmp(&b.emotion),
        other => other,
    });
}
