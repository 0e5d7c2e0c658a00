//! Extract stage: fetch the recently-played history for the trailing window

use chrono::{DateTime, Utc};
use log::info;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::config::EtlConfig;
use crate::constants::RECENTLY_PLAYED_PATH;
use crate::error::EtlError;
use crate::model::{PlayEvent, PlayEventBatch};
use crate::window::{after_param_millis, window_start};

#[derive(Debug, Deserialize)]
struct RecentlyPlayedResponse {
    #[serde(default)]
    items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Deserialize)]
struct PlayHistoryItem {
    track: Option<Track>,
    played_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Track {
    name: Option<String>,
    album: Option<Album>,
}

#[derive(Debug, Deserialize)]
struct Album {
    name: Option<String>,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: Option<String>,
}

impl From<PlayHistoryItem> for PlayEvent {
    /// Missing or null values become empty strings and are rejected during validation.
    fn from(item: PlayHistoryItem) -> Self {
        let (song_name, album) = match item.track {
            Some(track) => (track.name, track.album),
            None => (None, None),
        };
        let (album_name, artist) = match album {
            Some(album) => (
                album.name,
                album.artists.into_iter().next().and_then(|a| a.name),
            ),
            None => (None, None),
        };
        PlayEvent {
            artist: artist.unwrap_or_default(),
            album: album_name.unwrap_or_default(),
            song_name: song_name.unwrap_or_default(),
            played_at: item.played_at.unwrap_or_default(),
        }
    }
}

fn into_batch(response: RecentlyPlayedResponse) -> PlayEventBatch {
    response.items.into_iter().map(PlayEvent::from).collect()
}

/// Map a recently-played JSON body into a batch, preserving item order
pub fn parse_recently_played(body: &str) -> Result<PlayEventBatch, serde_json::Error> {
    let response: RecentlyPlayedResponse = serde_json::from_str(body)?;
    Ok(into_batch(response))
}

fn request_headers(token: &str) -> Result<HeaderMap, EtlError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| EtlError::Config("token contains invalid header characters".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

/// Fetch every play since midnight seven days before `now`
pub fn fetch_recently_played(
    config: &EtlConfig,
    now: DateTime<Utc>,
) -> Result<PlayEventBatch, EtlError> {
    let start = window_start(now);
    let after = after_param_millis(start);
    let url = format!(
        "{}{}",
        config.api_base_url.trim_end_matches('/'),
        RECENTLY_PLAYED_PATH
    );

    info!(
        "Requesting plays after {} ({}) for user {}",
        start.format("%Y-%m-%d %H:%M:%S UTC"),
        after,
        config.username.as_deref().unwrap_or("<unspecified>")
    );

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let response = client
        .get(&url)
        .headers(request_headers(config.token())?)
        .query(&[("after", after)])
        .send()?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().unwrap_or_default();
        return Err(EtlError::Api { status, body });
    }

    let batch = into_batch(response.json::<RecentlyPlayedResponse>()?);
    info!("Extracted {} plays", batch.len());
    Ok(batch)
}
