// Host-side tests for page markup.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod markup {
    include!("../src/markup.rs");
}

use glim_core::emotion::Emotion;
use glim_core::glow::GlowKind;
use glim_core::model::{Cell, SpotifyInfo};
use glim_core::user::{UserProfile, Visibility};
use markup::*;

fn profile(display_name: &str, username: &str) -> UserProfile {
    UserProfile {
        user_id: "u1".into(),
        username: username.into(),
        display_name: display_name.into(),
        bio: None,
        avatar_url: None,
        visibility: Visibility::default(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        escape(r#"<a href="x">'&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
    assert_eq!(escape("Célula"), "Célula");
}

#[test]
fn cell_card_links_into_vista() {
    let mut cell = Cell::new("c-42", "u1", Emotion::Calm);
    cell.intensity = 0.5;
    let html = cell_card(&cell);
    assert!(html.contains("#/vista?cellId=c-42"));
    assert!(html.contains("#98FB98"));
    assert!(html.contains("<h3>calm</h3>"));
    assert!(html.contains("Intensidade: 0.5"));
}

#[test]
fn cell_card_escapes_ids() {
    let cell = Cell::new("<script>", "u1", Emotion::Happy);
    let html = cell_card(&cell);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn cell_cards_render_each_cell() {
    let cells = vec![
        Cell::new("a", "u1", Emotion::Happy),
        Cell::new("b", "u1", Emotion::Sad),
    ];
    assert_eq!(cell_cards(&cells).matches(r#"class="card""#).count(), 2);
    assert!(cell_cards(&[]).is_empty());
}

#[test]
fn select_options_mark_only_the_selected_value() {
    let html = select_options(&[("light", "Claro"), ("dark", "Escuro")], "dark");
    assert!(html.contains(r#"<option value="dark" selected>Escuro</option>"#));
    assert!(html.contains(r#"<option value="light">Claro</option>"#));
}

#[test]
fn emotion_and_glow_buttons_use_stable_ids() {
    let emotions = emotion_buttons();
    for e in Emotion::SELECTABLE {
        assert!(emotions.contains(&format!(r#"id="{}""#, emotion_button_id(e))));
    }
    assert_eq!(emotion_button_id(Emotion::Excited), "emotion-excited");

    let glows = glow_buttons();
    for k in GlowKind::ALL {
        assert!(glows.contains(&format!(r#"id="{}""#, glow_button_id(k))));
        assert!(glows.contains(k.emoji()));
    }
    assert_eq!(glow_button_id(GlowKind::Empathy), "glow-empathy");
}

#[test]
fn user_row_keys_buttons_by_index() {
    let html = user_row(3, &profile("Ana <3", "ana"));
    assert!(html.contains(r#"id="follow-3""#));
    assert!(html.contains(r#"id="unfollow-3""#));
    assert!(html.contains("Ana &lt;3"));
    assert!(html.contains("@ana"));
}

#[test]
fn feed_item_escapes_names() {
    let html = feed_item(&profile("<b>Bia</b>", "bia"));
    assert_eq!(html, "<li>&lt;b&gt;Bia&lt;/b&gt; <small>@bia</small></li>");
}

#[test]
fn spotify_card_tolerates_missing_fields() {
    let bare = spotify_card(&SpotifyInfo {
        url: "https://open.spotify.com/track/x".into(),
        ..Default::default()
    });
    assert!(!bare.contains("<img"));

    let full = spotify_card(&SpotifyInfo {
        url: "https://open.spotify.com/track/x".into(),
        track_name: Some("Song & Dance".into()),
        artist_name: Some("Band".into()),
        album_art: Some("https://i.scdn.co/a.jpg".into()),
        preview_url: None,
    });
    assert!(full.contains("Song &amp; Dance"));
    assert!(full.contains(r#"<img src="https://i.scdn.co/a.jpg""#));
}

#[test]
fn video_frame_embeds_url() {
    let html = video_frame("https://www.youtube.com/embed/abc");
    assert!(html.starts_with("<iframe"));
    assert!(html.contains(r#"src="https://www.youtube.com/embed/abc""#));
}
