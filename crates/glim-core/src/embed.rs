//! Third-party media links: Spotify track previews and YouTube videos.

use super::model::SpotifyInfo;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static SPOTIFY_TRACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"track/([a-zA-Z0-9]+)").expect("valid spotify track regex"));

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("valid youtube id regex")
});

pub const SPOTIFY_OEMBED: &str = "https://open.spotify.com/oembed";
pub const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

pub fn spotify_track_id(url: &str) -> Option<&str> {
    SPOTIFY_TRACK
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// oEmbed lookup URL for a track link. `None` when the link has no track id.
pub fn spotify_oembed_url(url: &str) -> Option<String> {
    spotify_track_id(url).map(|id| format!("{SPOTIFY_OEMBED}?url=spotify:track:{id}"))
}

/// Fields of the Spotify oEmbed answer that are shown.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SpotifyOEmbed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl SpotifyOEmbed {
    pub fn into_info(self, url: &str) -> SpotifyInfo {
        SpotifyInfo {
            url: url.to_string(),
            preview_url: None,
            track_name: self.title,
            artist_name: self.author_name,
            album_art: self.thumbnail_url,
        }
    }
}

pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn youtube_embed_url(url: &str) -> Option<String> {
    youtube_video_id(url).map(|id| format!("{YOUTUBE_EMBED}{id}"))
}
