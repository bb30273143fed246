use crate::http;
use glim_core::embed::{spotify_oembed_url, SpotifyOEmbed};
use glim_core::model::SpotifyInfo;

/// Track metadata for a pasted Spotify link. Links without a track id and
/// failed lookups both yield `None`; the caller shows a fixed message.
pub async fn lookup(url: &str) -> Option<SpotifyInfo> {
    let oembed_url = spotify_oembed_url(url)?;
    match http::get_json::<SpotifyOEmbed>(&oembed_url).await {
        Ok(meta) => {
            let info = meta.into_info(url);
            log::info!(
                "[spotify] {} by {}",
                info.track_name.as_deref().unwrap_or("?"),
                info.artist_name.as_deref().unwrap_or("?")
            );
            Some(info)
        }
        Err(e) => {
            log::warn!("[spotify] oEmbed lookup failed: {e}");
            None
        }
    }
}
