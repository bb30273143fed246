use glam::Vec3;
use glim_core::animation::{
    cell_spin_delta, orbit_phase, orbit_position, pulse_scale, Pulse, Spin,
};
use glim_core::emotion::Emotion;
use std::f32::consts::{FRAC_PI_2, TAU};

#[test]
fn orbit_at_angle_zero_is_on_the_x_axis() {
    let p = orbit_position(3.0, 0.5, 1.25, 0.0);
    assert_eq!(p, Vec3::new(3.0, 1.25, 0.0));
}

#[test]
fn orbit_quarter_turn_reaches_z() {
    // angle = elapsed * speed = pi / 2
    let p = orbit_position(2.0, 0.5, 0.0, FRAC_PI_2 / 0.5);
    assert!(p.x.abs() < 1e-5);
    assert!((p.z - 2.0).abs() < 1e-5);
}

#[test]
fn phases_spread_fragments_evenly() {
    assert_eq!(orbit_phase(0, 4), 0.0);
    assert!((orbit_phase(1, 4) - TAU / 4.0).abs() < 1e-6);
    assert_eq!(orbit_phase(3, 0), 0.0);
}

#[test]
fn pulse_depends_on_emotion() {
    assert_eq!(pulse_scale(Emotion::Calm, 0.0), 1.0);
    let p = Pulse::for_emotion(Emotion::Excited);
    assert!((p.speed - 3.0).abs() < 1e-6);
    assert!((p.amplitude - 0.15).abs() < 1e-6);
    let t = FRAC_PI_2 / p.speed;
    assert!((pulse_scale(Emotion::Excited, t) - 1.15).abs() < 1e-5);
}

#[test]
fn spin_uses_emotion_factor_and_wraps() {
    assert!((cell_spin_delta(Emotion::Angry, 0.1) - 0.07).abs() < 1e-6);
    let mut spin = Spin::default();
    spin.advance(TAU + 0.5);
    assert!((spin.angle - 0.5).abs() < 1e-5);
}
