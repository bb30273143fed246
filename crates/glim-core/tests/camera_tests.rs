use glam::Vec3;
use glim_core::camera::{FlyKeys, FocusController, OrbitControls, FLY_MOVE_SPEED};

fn vista_rig() -> OrbitControls {
    OrbitControls::vista(Vec3::new(0.0, 0.0, 8.0))
}

#[test]
fn toggling_focus_twice_restores_state() {
    let mut rig = vista_rig();
    let mut focus = FocusController::default();
    let cell = Some(Vec3::new(4.0, 1.0, -2.0));
    let before = focus.is_focused;
    focus.toggle(cell, &mut rig);
    assert_ne!(focus.is_focused, before);
    focus.toggle(cell, &mut rig);
    assert_eq!(focus.is_focused, before);
}

#[test]
fn focus_places_eye_above_the_cell() {
    let mut rig = vista_rig();
    let mut focus = FocusController::default();
    let cell = Vec3::new(4.0, 1.0, -2.0);
    focus.focus(cell, &mut rig);
    assert_eq!(rig.eye, Vec3::new(4.0, 6.0, -2.0));
    assert_eq!(rig.target, cell);
}

#[test]
fn unfocus_moves_target_ahead_of_the_eye() {
    let mut rig = vista_rig();
    let mut focus = FocusController::default();
    focus.focus(Vec3::ZERO, &mut rig);
    focus.unfocus(&mut rig);
    // Looking straight down from (0,5,0): the new target is 10 units below.
    assert!((rig.target - Vec3::new(0.0, -5.0, 0.0)).length() < 1e-4);
    assert!(!focus.is_focused);
}

#[test]
fn toggle_without_user_cell_does_not_focus() {
    let mut rig = vista_rig();
    let mut focus = FocusController::default();
    assert!(!focus.toggle(None, &mut rig));
}

#[test]
fn initial_focus_unlocks_after_timeout() {
    let mut rig = vista_rig();
    let mut focus = FocusController::new(1.0);
    assert!(focus.camera_locked);

    focus.on_user_cell(Vec3::new(1.0, 0.0, 1.0), &mut rig, 10.0);
    assert!(focus.is_focused);
    assert!(focus.pending_unlock());

    focus.tick(10.5, &mut rig);
    assert!(focus.camera_locked);
    assert!(!rig.enabled);

    focus.tick(11.0, &mut rig);
    assert!(!focus.camera_locked);
    assert!(!focus.is_focused);
    assert!(focus.controls_enabled());
    assert!(rig.enabled);

    // A later user cell update must not refocus.
    focus.on_user_cell(Vec3::new(9.0, 9.0, 9.0), &mut rig, 20.0);
    assert!(!focus.is_focused);
}

#[test]
fn controls_disabled_while_focused() {
    let mut rig = vista_rig();
    let mut focus = FocusController::new(0.0);
    focus.on_user_cell(Vec3::ZERO, &mut rig, 0.0);
    focus.tick(0.0, &mut rig);
    assert!(focus.controls_enabled());
    focus.toggle(Some(Vec3::ZERO), &mut rig);
    focus.tick(1.0, &mut rig);
    assert!(!rig.enabled);
}

#[test]
fn orbit_distance_is_clamped() {
    let mut rig = OrbitControls::single_cell(Vec3::new(0.0, 0.0, 8.0));
    for _ in 0..200 {
        rig.zoom(10_000.0);
        rig.update();
    }
    assert!(rig.distance() <= 20.0 + 1e-3);
    for _ in 0..200 {
        rig.zoom(-10_000.0);
        rig.update();
    }
    assert!(rig.distance() >= 4.0 - 1e-3);
}

#[test]
fn disabled_rig_ignores_input() {
    let mut rig = vista_rig();
    rig.enabled = false;
    let eye = rig.eye;
    rig.rotate(100.0, 50.0);
    rig.update();
    assert_eq!(rig.eye, eye);
}

#[test]
fn fly_keys_map_wasd_arrows_space_shift() {
    let mut keys = FlyKeys::default();
    assert!(keys.set_key("W", true));
    assert!(keys.set_key("ArrowLeft", true));
    assert!(keys.set_key(" ", true));
    assert!(!keys.set_key("q", true));
    assert!(keys.forward && keys.left && keys.up);

    let d = keys.displacement(Vec3::NEG_Z, Vec3::Y, FLY_MOVE_SPEED);
    assert!((d - Vec3::new(-0.3, 0.3, -0.3)).length() < 1e-5);

    keys.clear();
    assert!(!keys.any());
}
