use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Attach a listener for `event` on the element with `element_id`. Missing
/// elements are skipped silently; pages may omit optional controls.
pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    add_listener(document, element_id, "click", handler);
}

/// Wire a form's submit event, suppressing the browser navigation.
pub fn add_submit_listener(
    document: &web::Document,
    form_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(form_id) {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            ev.prevent_default();
            handler();
        }) as Box<dyn FnMut(_)>);
        _ = el.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn set_html(document: &web::Document, id: &str, html: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_inner_html(html);
    }
}

/// Plain text; never interpreted as markup.
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1("hidden");
            _ = el.remove_attribute("style");
        } else {
            _ = cl.add_1("hidden");
            // fallback
            _ = el.set_attribute("style", "display:none");
        }
    }
}

pub fn input_value(document: &web::Document, id: &str) -> String {
    if let Some(input) = by_id::<web::HtmlInputElement>(document, id) {
        return input.value();
    }
    if let Some(area) = by_id::<web::HtmlTextAreaElement>(document, id) {
        return area.value();
    }
    by_id::<web::HtmlSelectElement>(document, id)
        .map(|s| s.value())
        .unwrap_or_default()
}

pub fn set_input_value(document: &web::Document, id: &str, value: &str) {
    if let Some(input) = by_id::<web::HtmlInputElement>(document, id) {
        input.set_value(value);
    } else if let Some(area) = by_id::<web::HtmlTextAreaElement>(document, id) {
        area.set_value(value);
    } else if let Some(select) = by_id::<web::HtmlSelectElement>(document, id) {
        select.set_value(value);
    }
}

pub fn input_checked(document: &web::Document, id: &str) -> bool {
    by_id::<web::HtmlInputElement>(document, id)
        .map(|i| i.checked())
        .unwrap_or(false)
}

pub fn set_input_checked(document: &web::Document, id: &str, checked: bool) {
    if let Some(input) = by_id::<web::HtmlInputElement>(document, id) {
        input.set_checked(checked);
    }
}

pub fn set_disabled(document: &web::Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        if disabled {
            _ = el.set_attribute("disabled", "");
        } else {
            _ = el.remove_attribute("disabled");
        }
    }
}

/// Content of `<meta name="...">`, if present.
pub fn meta_content(document: &web::Document, name: &str) -> Option<String> {
    document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlMetaElement>().ok())
        .map(|m| m.content())
}

pub fn current_hash() -> String {
    web::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub fn set_hash(hash: &str) {
    if let Some(w) = web::window() {
        _ = w.location().set_hash(hash);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
