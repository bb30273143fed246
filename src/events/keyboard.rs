use crate::app::{AppHandle, SceneMode};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys typed into a form field never steer the camera.
fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .map(|t| {
            t.dyn_ref::<web::HtmlInputElement>().is_some()
                || t.dyn_ref::<web::HtmlTextAreaElement>().is_some()
                || t.dyn_ref::<web::HtmlSelectElement>().is_some()
        })
        .unwrap_or(false)
}

fn handle_keydown(ev: &web::KeyboardEvent, app: &AppHandle) {
    if typing_in_field(ev) {
        return;
    }
    let mut app = app.borrow_mut();
    if app.mode != SceneMode::Vista || !app.focus.controls_enabled() {
        return;
    }
    let key = ev.key();
    if app.fly.set_key(&key, true) {
        // Space and arrows would otherwise scroll the page
        ev.prevent_default();
        log::debug!("[keys] fly {key:?} down");
    }
}

fn handle_keyup(ev: &web::KeyboardEvent, app: &AppHandle) {
    // Releases always land, even if controls locked while the key was held.
    app.borrow_mut().fly.set_key(&ev.key(), false);
}

pub fn wire_fly_keys(app: &AppHandle) {
    if let Some(window) = web::window() {
        let app_down = app.clone();
        let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_keydown(&ev, &app_down);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
        down.forget();

        let app_up = app.clone();
        let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_keyup(&ev, &app_up);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
        up.forget();

        // Held keys are lost when the tab goes to the background.
        let app_blur = app.clone();
        let blur = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            app_blur.borrow_mut().fly.clear();
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
        blur.forget();
    }
}
