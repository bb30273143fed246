//! Per-frame procedural motion. Everything here is a pure function of the
//! elapsed scene time so a frame can be recomputed from any point.

use super::emotion::Emotion;
use glam::Vec3;

pub const DEFAULT_ORBIT_RADIUS: f32 = 3.0;
pub const DEFAULT_ORBIT_SPEED: f32 = 0.5;

/// Self-rotation added to each fragment every frame (radians).
pub const FRAGMENT_SPIN_PER_FRAME: f32 = 0.01;
/// Self-rotation of the plain vista spheres every frame (radians).
pub const VISTA_SPIN_PER_FRAME: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub speed: f32,
    pub amplitude: f32,
}

impl Pulse {
    pub fn for_emotion(emotion: Emotion) -> Self {
        let factor = emotion.pulse_factor();
        Self {
            speed: factor * 2.0,
            amplitude: 0.1 * factor,
        }
    }

    /// Pulse used by the vista spheres, independent of emotion.
    pub const VISTA: Pulse = Pulse {
        speed: 2.0,
        amplitude: 0.1,
    };

    #[inline]
    pub fn scale_at(&self, elapsed_sec: f32) -> f32 {
        1.0 + (elapsed_sec * self.speed).sin() * self.amplitude
    }
}

#[inline]
pub fn pulse_scale(emotion: Emotion, elapsed_sec: f32) -> f32 {
    Pulse::for_emotion(emotion).scale_at(elapsed_sec)
}

/// Rotation about Y to add this frame for a cell sphere.
#[inline]
pub fn cell_spin_delta(emotion: Emotion, dt_sec: f32) -> f32 {
    dt_sec * 0.5 * emotion.pulse_factor()
}

#[inline]
pub fn orbit_position(radius: f32, orbit_speed: f32, y: f32, elapsed_sec: f32) -> Vec3 {
    orbit_position_with_phase(radius, orbit_speed, y, elapsed_sec, 0.0)
}

#[inline]
pub fn orbit_position_with_phase(
    radius: f32,
    orbit_speed: f32,
    y: f32,
    elapsed_sec: f32,
    phase: f32,
) -> Vec3 {
    let angle = elapsed_sec * orbit_speed + phase;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Phase offset that spreads `count` fragments evenly around the orbit.
#[inline]
pub fn orbit_phase(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 * std::f32::consts::TAU / count as f32
}

/// Accumulated spin, wrapped to keep floats small over long sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spin {
    pub angle: f32,
}

impl Spin {
    pub fn advance(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(std::f32::consts::TAU);
    }
}
