// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, NAV_ID, UI_ROOT_ID, STATUS_ID, LOADING_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn environment_camera_starts_inside_limits() {
    let d = ENVIRONMENT_CAMERA_START.length();
    assert!(ENVIRONMENT_MIN_DISTANCE > 0.0);
    assert!(d >= ENVIRONMENT_MIN_DISTANCE && d <= ENVIRONMENT_MAX_DISTANCE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_and_input_limits_are_sane() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(CLICK_MAX_TRAVEL_PX > 0.0);
    assert!(MAX_INSTANCES >= 64);
    assert!(STAR_DENSITY > 0.0 && STAR_DENSITY < 1.0);
    assert!(GAIN_RAMP_SEC > 0.0);
}
