//! Page-wide status line and loading spinner drawn over the canvas.

use crate::constants::{LOADING_ID, STATUS_ID};
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Error,
    Success,
    Info,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Error => "status-error",
            Tone::Success => "status-success",
            Tone::Info => "status-info",
        }
    }
}

pub fn show_status(document: &web::Document, tone: Tone, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
        el.set_class_name(tone.class());
        _ = el.remove_attribute("style");
    }
}

#[inline]
pub fn show_error(document: &web::Document, text: &str) {
    log::warn!("[ui] {text}");
    show_status(document, Tone::Error, text);
}

#[inline]
pub fn show_success(document: &web::Document, text: &str) {
    show_status(document, Tone::Success, text);
}

pub fn clear_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(None);
        el.set_class_name("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_loading(document: &web::Document, loading: bool) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        let cl = el.class_list();
        if loading {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        } else {
            _ = cl.add_1("hidden");
            _ = el.set_attribute("style", "display:none");
        }
    }
}

#[inline]
pub fn is_loading(document: &web::Document) -> bool {
    document
        .get_element_by_id(LOADING_ID)
        .map(|el| !el.class_list().contains("hidden"))
        .unwrap_or(false)
}
