//! Typed calls to the backend. Each function sends one request described by
//! `glim_core::api::endpoints` and maps the answer into model types.

pub mod auth;
pub mod cells;
pub mod spotify;
pub mod users;

use glim_core::model::Timestamp;

/// Wall-clock time as a model timestamp.
#[inline]
pub fn now() -> Timestamp {
    Timestamp::from_millis(js_sys::Date::now())
}

/// Wall-clock seconds, the unit the camera focus timer counts in.
#[inline]
pub fn now_sec() -> f64 {
    js_sys::Date::now() / 1000.0
}
