//! Single cell up close: orbiting fragments, glow particles and its sound.
//! Changes here stay local to the store.

use super::wire_spotify_input;
use crate::app::AppHandle;
use crate::audio::CellAudio;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::markup;
use crate::services;
use glim_core::emotion::Emotion;
use glim_core::glow::{Glow, GlowKind};
use glim_core::model::sample_cell;
use web_sys as web;

/// Sender recorded on glows added from this page.
const LOCAL_SENDER: &str = "visitor";

fn page_html(audio_on: bool) -> String {
    format!(
        r#"<section class="page cell">
  <aside class="menu">
    <div class="emotions">{emotions}</div>
    <div class="glows">{glows}</div>
    <button id="cell-audio" type="button">{audio}</button>
    <input id="cell-spotify" type="url" placeholder="Cole o link do Spotify aqui...">
    <div id="cell-spotify-preview"></div>
  </aside>
</section>"#,
        emotions = markup::emotion_buttons(),
        glows = markup::glow_buttons(),
        audio = audio_icon(audio_on),
    )
}

#[inline]
fn audio_icon(on: bool) -> &'static str {
    if on {
        "🔊"
    } else {
        "🔇"
    }
}

pub fn mount(app: &AppHandle, document: &web::Document) {
    let audio_on = {
        let mut a = app.borrow_mut();
        if a.store.current_cell().is_none() {
            log::info!("[cell] no cell loaded, showing sample");
            a.store.set_current_cell(sample_cell(services::now()));
        }
        match CellAudio::new() {
            Ok(audio) => a.audio = Some(audio),
            Err(e) => log::warn!("[audio] unavailable: {e}"),
        }
        a.audio_active = a.store.current_cell().is_some_and(|c| c.audio_enabled());
        a.audio_active
    };

    dom::set_html(document, UI_ROOT_ID, &page_html(audio_on));
    for emotion in Emotion::SELECTABLE {
        let app = app.clone();
        dom::add_click_listener(document, &markup::emotion_button_id(emotion), move || {
            app.borrow_mut()
                .store
                .update_emotion(emotion, services::now());
        });
    }
    for kind in GlowKind::ALL {
        let app = app.clone();
        dom::add_click_listener(document, &markup::glow_button_id(kind), move || {
            let now = services::now();
            app.borrow_mut()
                .store
                .add_glow(Glow::new(kind, LOCAL_SENDER, now), now);
        });
    }
    {
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, "cell-audio", move || {
            let mut a = app.borrow_mut();
            a.audio_active = if a.store.current_cell().is_some() {
                a.store.toggle_audio()
            } else {
                !a.audio_active
            };
            if let Some(audio) = &a.audio {
                audio.resume();
            }
            dom::set_text(&doc, "cell-audio", audio_icon(a.audio_active));
        });
    }
    wire_spotify_input(app, document, "cell-spotify", "cell-spotify-preview");
}
