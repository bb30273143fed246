use crate::app::{AppHandle, SceneMode};
use crate::constants::CLICK_MAX_TRAVEL_PX;
use crate::input;
use crate::pages;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    wire_pointerdown(app, canvas);
    wire_pointermove(app, canvas);
    wire_pointerup(app, canvas);
    wire_pointercancel(app, canvas);
    wire_wheel(app, canvas);
}

fn canvas_ndc(canvas: &web::HtmlCanvasElement, px: Vec2) -> Vec2 {
    input::px_to_ndc(px, canvas.width() as f32, canvas.height() as f32)
}

fn set_cursor(canvas: &web::HtmlCanvasElement, cursor: &str) {
    _ = canvas.style().set_property("cursor", cursor);
}

fn wire_pointerdown(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &c);
        _ = c.set_pointer_capture(ev.pointer_id());
        let mut a = app.borrow_mut();
        a.mouse.x = pos.x;
        a.mouse.y = pos.y;
        a.mouse.down = true;
        a.drag.begin(pos);
        // First gesture on the page unlocks audio output.
        if let Some(audio) = &a.audio {
            audio.resume();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &c);
        let mut a = app.borrow_mut();
        a.mouse.x = pos.x;
        a.mouse.y = pos.y;

        let delta = a.drag.move_to(pos);
        if a.drag.active {
            if delta != Vec2::ZERO {
                a.rig.rotate(delta.x, delta.y);
            }
            return;
        }

        if a.mode == SceneMode::Vista {
            let hovered = a.pick(canvas_ndc(&c, pos));
            if hovered != a.hovered {
                a.hovered = hovered;
                set_cursor(&c, if hovered.is_some() { "pointer" } else { "auto" });
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &c);
        _ = c.release_pointer_capture(ev.pointer_id());
        let (mode, hit) = {
            let mut a = app.borrow_mut();
            a.mouse.down = false;
            if !a.drag.end(CLICK_MAX_TRAVEL_PX) {
                return;
            }
            (a.mode, a.pick(canvas_ndc(&c, pos)))
        };
        log::debug!("[click] {:?} hit={:?}", mode, hit);
        // Page handlers borrow the app themselves.
        match mode {
            SceneMode::Vista => pages::vista::on_cell_clicked(&app, hit),
            SceneMode::Environment => pages::environment::on_object_clicked(&app, hit),
            SceneMode::Cell | SceneMode::Idle => {}
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointercancel(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        let mut a = app.borrow_mut();
        a.mouse.down = false;
        a.drag.end(0.0);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        app.borrow_mut().rig.zoom(delta);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
