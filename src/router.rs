//! Hash routing. Every `hashchange` resolves the requested route against the
//! session and mounts the page that should actually be shown.

use crate::app::AppHandle;
use crate::dom;
use crate::pages;
use glim_core::route::Route;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_hashchange(app: &AppHandle) {
    if let Some(window) = web::window() {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move || {
            navigate(&app);
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Mount whatever the current hash points at. A redirect rewrites the hash
/// and lets the resulting `hashchange` do the mounting.
pub fn navigate(app: &AppHandle) {
    let hash = dom::current_hash();
    let requested = Route::parse(&hash);
    let authenticated = app.borrow().session.is_authenticated();
    let route = requested.clone().resolve(authenticated);
    if route != requested {
        let target = route.to_hash();
        log::info!("[router] {hash:?} -> {target:?}");
        if target != hash {
            dom::set_hash(&target);
            return;
        }
    }
    pages::mount(app, route);
}

/// Change page from code, e.g. after a successful login.
pub fn go(app: &AppHandle, route: &Route) {
    let target = route.to_hash();
    if dom::current_hash() == target {
        navigate(app);
    } else {
        dom::set_hash(&target);
    }
}
