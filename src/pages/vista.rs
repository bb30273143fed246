//! Shared space: the user's cell among its neighbours, fly controls and a
//! small menu for focusing, glows and emotions.

use super::wire_spotify_input;
use crate::app::AppHandle;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::markup;
use crate::overlay;
use crate::services::{self, cells};
use glam::Vec3;
use glim_core::api::CellUpdate;
use glim_core::emotion::Emotion;
use glim_core::error::{messages, ApiError};
use glim_core::glow::GlowKind;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const FOCUS_LABEL: &str = "🎯 Focar na minha célula";
const UNFOCUS_LABEL: &str = "Desfocar da célula";

/// Glow sent when another cell is clicked.
const CLICK_GLOW: &str = "happy";

fn page_html() -> String {
    format!(
        r#"<section class="page vista">
  <header>
    <h1>Vista</h1>
    <p>Explore o universo de células e conecte-se com outros usuários</p>
  </header>
  <aside class="menu">
    <h3>MENU</h3>
    <button id="vista-focus" type="button">{FOCUS_LABEL}</button>
    <button id="vista-controls" type="button">🎮 Controles</button>
    <div id="vista-help" class="help hidden" style="display:none">
      <strong>Controles:</strong>
      <ul>
        <li>WASD / Setas - Movimento</li>
        <li>Espaço - Subir</li>
        <li>Shift - Descer</li>
        <li>Mouse - Olhar ao redor</li>
      </ul>
    </div>
    <input id="vista-spotify" type="url" placeholder="Cole o link do Spotify aqui...">
    <div id="vista-spotify-preview"></div>
    <button id="vista-audio" type="button">🔊</button>
    <div class="emotions">{emotions}</div>
    <div class="glows">{glows}</div>
  </aside>
</section>"#,
        emotions = markup::emotion_buttons(),
        glows = markup::glow_buttons(),
    )
}

pub fn mount(app: &AppHandle, document: &web::Document, generation: u64, cell_id: Option<String>) {
    if !app.borrow().session.is_authenticated() {
        overlay::show_error(document, messages::LOGIN_REQUIRED_VISTA);
        return;
    }
    dom::set_html(document, UI_ROOT_ID, &page_html());
    wire_menu(app, document);
    wire_spotify_input(app, document, "vista-spotify", "vista-spotify-preview");
    for emotion in Emotion::SELECTABLE {
        let app = app.clone();
        dom::add_click_listener(document, &markup::emotion_button_id(emotion), move || {
            set_emotion(&app, emotion);
        });
    }
    for kind in GlowKind::ALL {
        let app = app.clone();
        dom::add_click_listener(document, &markup::glow_button_id(kind), move || {
            send_own_glow(&app, kind);
        });
    }
    load(app, document, generation, cell_id);
}

fn wire_menu(app: &AppHandle, document: &web::Document) {
    {
        let app = app.clone();
        dom::add_click_listener(document, "vista-focus", move || {
            let mut a = app.borrow_mut();
            let a = &mut *a;
            let own = a.store.current_cell().map(|c| Vec3::from_array(c.position));
            let focused = a.focus.toggle(own, &mut a.rig);
            log::info!("[vista] focus {}", focused);
        });
    }
    {
        let doc = document.clone();
        let mut shown = false;
        dom::add_click_listener(document, "vista-controls", move || {
            shown = !shown;
            dom::set_visible(&doc, "vista-help", shown);
        });
    }
    {
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, "vista-audio", move || {
            let mut a = app.borrow_mut();
            a.audio_active = !a.audio_active;
            dom::set_text(&doc, "vista-audio", if a.audio_active { "🔊" } else { "🔇" });
        });
    }
}

/// Own cell, then its neighbourhood, then the camera flight. The session is
/// best effort; the vista works without one.
fn load(app: &AppHandle, document: &web::Document, generation: u64, cell_id: Option<String>) {
    overlay::set_loading(document, true);
    let app = app.clone();
    let document = document.clone();
    spawn_local(async move {
        let client = app.borrow().client.clone();
        let loaded = async {
            let own = cells::create_initial_cell(&client).await?;
            let nearby = cells::nearby_cells(&client, own.position, None).await?;
            Ok::<_, ApiError>((own, nearby))
        }
        .await;
        if !app.borrow().is_current(generation) {
            return;
        }
        overlay::set_loading(&document, false);
        let (own, nearby) = match loaded {
            Ok(v) => v,
            Err(e) => {
                log::error!("[vista] load failed: {e}");
                overlay::show_error(&document, messages::LOAD_VISTA);
                return;
            }
        };

        {
            let mut a = app.borrow_mut();
            let a = &mut *a;
            a.store.set_current_cell(own);
            a.store.set_nearby_cells(nearby);
            let target = {
                let cells = a.vista_cells();
                let requested = cell_id
                    .as_deref()
                    .and_then(|id| cells.iter().find(|c| c.id == id));
                requested.or(cells.first()).map(|c| Vec3::from_array(c.position))
            };
            if let Some(pos) = target {
                a.focus.on_user_cell(pos, &mut a.rig, services::now_sec());
            }
        }

        let own_id = app
            .borrow()
            .store
            .current_cell()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        match cells::start_vista_session(&client, &own_id).await {
            Ok((session, session_cells)) => {
                let mut a = app.borrow_mut();
                if a.is_current(generation) {
                    log::info!(
                        "[vista] session {} with {} cells",
                        session.id,
                        session_cells.len()
                    );
                    a.store.adopt_vista_session(session);
                    a.store.merge_nearby_cells(session_cells);
                }
            }
            Err(e) => log::warn!("[vista] session not started: {e}"),
        }
    });
}

/// Optimistic emotion change mirrored to the backend, then announced to the
/// neighbourhood with a glow of the same key.
fn set_emotion(app: &AppHandle, emotion: Emotion) {
    let (client, cell_id, generation) = {
        let mut a = app.borrow_mut();
        let Some(id) = a.store.current_cell().map(|c| c.id.clone()) else {
            return;
        };
        a.store.update_emotion(emotion, services::now());
        (a.client.clone(), id, a.generation())
    };
    let app = app.clone();
    spawn_local(async move {
        let update = CellUpdate::emotion(emotion, services::now());
        match cells::update_cell(&client, &cell_id, &update).await {
            Ok(cell) => {
                let mut a = app.borrow_mut();
                if a.is_current(generation) {
                    a.store.set_current_cell(cell);
                }
            }
            Err(e) => {
                log::error!("[vista] emotion update failed: {e}");
                return;
            }
        }
        if let Err(e) = cells::send_glow(&client, &cell_id, emotion.key(), 1.0).await {
            log::warn!("[vista] glow failed: {e}");
        }
    });
}

fn send_own_glow(app: &AppHandle, kind: GlowKind) {
    let (client, cell_id) = {
        let a = app.borrow();
        let Some(id) = a.store.current_cell().map(|c| c.id.clone()) else {
            return;
        };
        (a.client.clone(), id)
    };
    spawn_local(async move {
        if let Err(e) = cells::send_glow_kind(&client, &cell_id, kind).await {
            log::warn!("[vista] glow failed: {e}");
        }
    });
}

/// Click on a composed cell. Other users' cells get a glow; the own cell is
/// ignored.
pub fn on_cell_clicked(app: &AppHandle, hit: Option<usize>) {
    let (client, target) = {
        let a = app.borrow();
        let own_id = a.store.current_cell().map(|c| c.id.clone());
        let Some(cell) = hit.and_then(|i| a.vista_cells().get(i).copied()) else {
            return;
        };
        if own_id.as_deref() == Some(cell.id.as_str()) {
            return;
        }
        (a.client.clone(), cell.id.clone())
    };
    log::info!("[vista] glow to {target}");
    spawn_local(async move {
        if let Err(e) = cells::send_glow(&client, &target, CLICK_GLOW, 1.0).await {
            log::warn!("[vista] glow failed: {e}");
        }
    });
}

pub fn show_focus_state(focused: bool) {
    if let Some(doc) = dom::window_document() {
        dom::set_text(&doc, "vista-focus", if focused { UNFOCUS_LABEL } else { FOCUS_LABEL });
    }
}
