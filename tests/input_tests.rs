// Host-side tests for pointer math.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn ndc_corners_and_center() {
    let tl = px_to_ndc(Vec2::new(0.0, 0.0), 800.0, 600.0);
    assert_eq!(tl, Vec2::new(-1.0, 1.0));
    let br = px_to_ndc(Vec2::new(800.0, 600.0), 800.0, 600.0);
    assert_eq!(br, Vec2::new(1.0, -1.0));
    let c = px_to_ndc(Vec2::new(400.0, 300.0), 800.0, 600.0);
    assert!(c.length() < 1e-6);
}

#[test]
fn ndc_survives_zero_sized_canvas() {
    let p = px_to_ndc(Vec2::new(0.0, 0.0), 0.0, 0.0);
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn short_press_is_a_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(10.0, 10.0));
    let d = drag.move_to(Vec2::new(11.0, 10.0));
    assert_eq!(d, Vec2::new(1.0, 0.0));
    assert!(drag.end(4.0));
    assert!(!drag.active);
}

#[test]
fn long_drag_is_not_a_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::ZERO);
    drag.move_to(Vec2::new(3.0, 0.0));
    drag.move_to(Vec2::new(3.0, 3.0));
    // travel accumulates along the path, not start to end
    assert!((drag.travel - 6.0).abs() < 1e-5);
    assert!(!drag.end(4.0));
}

#[test]
fn moves_without_press_are_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(Vec2::new(50.0, 50.0)), Vec2::ZERO);
    assert!(!drag.end(4.0));
}

#[test]
fn wheel_modes_normalize_to_pixels() {
    assert_eq!(wheel_delta_px(12.0, 0), 12.0);
    assert_eq!(wheel_delta_px(3.0, 1), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2), -800.0);
}
