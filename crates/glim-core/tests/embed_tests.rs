use glim_core::embed::{
    spotify_oembed_url, spotify_track_id, youtube_embed_url, youtube_video_id, SpotifyOEmbed,
};

#[test]
fn spotify_track_ids() {
    assert_eq!(
        spotify_track_id("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=x"),
        Some("4uLU6hMCjMI75M1A2tKUQC")
    );
    assert_eq!(spotify_track_id("https://open.spotify.com/album/abc"), None);
    assert_eq!(
        spotify_oembed_url("https://open.spotify.com/track/abc123").as_deref(),
        Some("https://open.spotify.com/oembed?url=spotify:track:abc123")
    );
    assert!(spotify_oembed_url("not a link").is_none());
}

#[test]
fn oembed_answer_maps_to_info() {
    let json = r#"{"title":"Song","author_name":"Band","thumbnail_url":"http://img","html":"<iframe>"}"#;
    let o: SpotifyOEmbed = serde_json::from_str(json).unwrap();
    let info = o.into_info("https://open.spotify.com/track/abc");
    assert_eq!(info.track_name.as_deref(), Some("Song"));
    assert_eq!(info.artist_name.as_deref(), Some("Band"));
    assert_eq!(info.album_art.as_deref(), Some("http://img"));
    assert!(info.preview_url.is_none());
}

#[test]
fn youtube_link_forms() {
    let id = "dQw4w9WgXcQ";
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ?t=10",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "https://youtube.com/shorts/dQw4w9WgXcQ",
    ] {
        assert_eq!(youtube_video_id(url), Some(id), "{url}");
    }
    assert_eq!(
        youtube_embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
    );
    assert!(youtube_video_id("https://vimeo.com/12345").is_none());
}
