// HTML fragments shared by the pages. Everything that ends up inside a
// template from data goes through `escape`.

use glim_core::emotion::{emotion_color, Emotion};
use glim_core::glow::GlowKind;
use glim_core::model::{Cell, SpotifyInfo};
use glim_core::user::UserProfile;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Id of the button for one emotion, e.g. `emotion-happy`.
#[inline]
pub fn emotion_button_id(emotion: Emotion) -> String {
    format!("emotion-{}", emotion.key())
}

#[inline]
pub fn glow_button_id(kind: GlowKind) -> String {
    format!("glow-{}", kind.key())
}

pub fn emotion_buttons() -> String {
    Emotion::SELECTABLE
        .iter()
        .map(|e| {
            format!(
                r#"<button id="{}" type="button" class="emotion" style="border-color:{}">{}</button>"#,
                emotion_button_id(*e),
                e.color_hex(),
                e.label()
            )
        })
        .collect()
}

pub fn glow_buttons() -> String {
    GlowKind::ALL
        .iter()
        .map(|k| {
            format!(
                r#"<button id="{}" type="button" class="glow" title="{}">{}</button>"#,
                glow_button_id(*k),
                k.key(),
                k.emoji()
            )
        })
        .collect()
}

/// Card on the home page linking into the vista.
pub fn cell_card(cell: &Cell) -> String {
    let key = cell.emotion.key();
    format!(
        r##"<div class="card">
  <div class="swatch" style="background-color:{color}"></div>
  <div>
    <h3>{emotion}</h3>
    <p>Intensidade: {intensity}</p>
  </div>
  <a class="button" href="#/vista?cellId={id}">Visualizar</a>
</div>"##,
        color = emotion_color(key),
        emotion = escape(key),
        intensity = cell.intensity,
        id = escape(&cell.id),
    )
}

pub fn cell_cards(cells: &[Cell]) -> String {
    cells.iter().map(cell_card).collect()
}

/// `<option>`s with `selected` marked.
pub fn select_options(options: &[(&str, &str)], selected: &str) -> String {
    options
        .iter()
        .map(|(value, label)| {
            let mark = if *value == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                mark,
                escape(label)
            )
        })
        .collect()
}

/// Track card for a resolved Spotify link.
pub fn spotify_card(info: &SpotifyInfo) -> String {
    let art = info
        .album_art
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="" width="48" height="48">"#, escape(src)))
        .unwrap_or_default();
    format!(
        r#"<div class="spotify">{art}<div><strong>{track}</strong><br><span>{artist}</span></div></div>"#,
        track = escape(info.track_name.as_deref().unwrap_or("")),
        artist = escape(info.artist_name.as_deref().unwrap_or("")),
    )
}

/// Embedded player for a TV object's video.
pub fn video_frame(embed_url: &str) -> String {
    format!(
        r#"<iframe src="{}" width="320" height="180" frameborder="0" allow="autoplay; encrypted-media" allowfullscreen></iframe>"#,
        escape(embed_url)
    )
}

/// Search result row with follow controls; `index` keys the button ids.
pub fn user_row(index: usize, profile: &UserProfile) -> String {
    format!(
        r#"<li><span>{name}</span> <small>@{username}</small>
  <button id="follow-{index}" type="button">Seguir</button>
  <button id="unfollow-{index}" type="button">Deixar de seguir</button></li>"#,
        name = escape(&profile.display_name),
        username = escape(&profile.username),
    )
}

pub fn feed_item(profile: &UserProfile) -> String {
    format!(
        "<li>{} <small>@{}</small></li>",
        escape(&profile.display_name),
        escape(&profile.username)
    )
}
