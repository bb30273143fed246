//! Screens. Each page writes its markup into the UI root, wires its controls
//! and kicks off the requests it needs. Dynamic text goes through `set_text`
//! or `markup::escape` so server data is never parsed as markup.

pub mod auth;
pub mod cell_view;
pub mod environment;
pub mod home;
pub mod profile;
pub mod vista;

use crate::app::{AppHandle, SceneMode};
use crate::constants::{NAV_ID, UI_ROOT_ID};
use crate::dom;
use crate::markup;
use crate::overlay;
use crate::router;
use crate::services::spotify;
use glim_core::error::messages;
use glim_core::route::Route;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

fn scene_mode(route: &Route) -> SceneMode {
    match route {
        Route::Vista { .. } => SceneMode::Vista,
        Route::Cell => SceneMode::Cell,
        Route::Environment { .. } => SceneMode::Environment,
        Route::Home | Route::Login | Route::Register | Route::Profile | Route::NotFound(_) => {
            SceneMode::Idle
        }
    }
}

pub fn mount(app: &AppHandle, route: Route) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let generation = app.borrow_mut().mount(route.clone(), scene_mode(&route));
    overlay::clear_status(&document);
    overlay::set_loading(&document, false);
    render_nav(app, &document, &route);
    dom::set_html(&document, UI_ROOT_ID, "");

    match route {
        Route::Home | Route::NotFound(_) => home::mount(app, &document, generation),
        Route::Login => auth::mount_login(app, &document),
        Route::Register => auth::mount_register(app, &document),
        Route::Profile => profile::mount(app, &document, generation),
        Route::Vista { cell_id } => vista::mount(app, &document, generation, cell_id),
        Route::Cell => cell_view::mount(app, &document),
        Route::Environment { cell_id } => {
            environment::mount(app, &document, generation, cell_id)
        }
    }
}

const NAV_GUEST: &str = r##"<a class="brand" href="#/">GLIM</a>
<span class="spacer"></span>
<a href="#/login">Entrar</a>
<a class="button" href="#/register">Cadastrar</a>"##;

const NAV_USER: &str = r##"<a class="brand" href="#/">GLIM</a>
<span class="spacer"></span>
<a href="#/vista">Vista</a>
<a href="#/profile">Perfil</a>
<button id="nav-logout" type="button">Sair</button>"##;

/// Top bar. Login and register are full-screen forms without it.
fn render_nav(app: &AppHandle, document: &web::Document, route: &Route) {
    let show = !matches!(route, Route::Login | Route::Register);
    dom::set_visible(document, NAV_ID, show);
    if !show {
        return;
    }
    if app.borrow().session.is_authenticated() {
        dom::set_html(document, NAV_ID, NAV_USER);
        let app = app.clone();
        dom::add_click_listener(document, "nav-logout", move || {
            app.borrow_mut().sign_out();
            router::navigate(&app);
        });
    } else {
        dom::set_html(document, NAV_ID, NAV_GUEST);
    }
}

/// Resolve a pasted Spotify link when the input is committed, show the track
/// in `preview_id` and hand any preview stream to the current cell.
pub fn wire_spotify_input(
    app: &AppHandle,
    document: &web::Document,
    input_id: &str,
    preview_id: &'static str,
) {
    let app = app.clone();
    let doc = document.clone();
    let input_id = input_id.to_string();
    dom::add_listener(document, &input_id.clone(), "change", move || {
        let url = dom::input_value(&doc, &input_id).trim().to_string();
        if url.is_empty() {
            dom::set_html(&doc, preview_id, "");
            return;
        }
        let generation = app.borrow().generation();
        let app = app.clone();
        let doc = doc.clone();
        spawn_local(async move {
            let info = spotify::lookup(&url).await;
            let mut a = app.borrow_mut();
            if !a.is_current(generation) {
                return;
            }
            match info {
                Some(info) => {
                    dom::set_html(&doc, preview_id, &markup::spotify_card(&info));
                    a.store.set_spotify_preview(&url, info.preview_url);
                }
                None => dom::set_text(&doc, preview_id, messages::SPOTIFY_UNAVAILABLE),
            }
        });
    });
}
