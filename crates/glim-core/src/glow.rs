//! Glow reactions: the record, its per-kind look, the short-lived list a cell
//! carries, and the particle that drifts toward the receiving cell.

use super::emotion::parse_hex_color;
use super::model::Timestamp;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

/// How long a glow stays on a cell before it is dropped.
pub const GLOW_DISPLAY_SECONDS: f64 = 3.0;
/// Radius of the sphere on which glow particles spawn.
pub const GLOW_SPAWN_RADIUS: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlowKind {
    Curiosity,
    Impact,
    Empathy,
    Connection,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowProperties {
    pub speed: f32,
    pub size: f32,
    pub trail: f32,
}

impl GlowKind {
    pub const ALL: [GlowKind; 4] = [
        GlowKind::Curiosity,
        GlowKind::Impact,
        GlowKind::Empathy,
        GlowKind::Connection,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "curiosity" => Some(GlowKind::Curiosity),
            "impact" => Some(GlowKind::Impact),
            "empathy" => Some(GlowKind::Empathy),
            "connection" => Some(GlowKind::Connection),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GlowKind::Curiosity => "curiosity",
            GlowKind::Impact => "impact",
            GlowKind::Empathy => "empathy",
            GlowKind::Connection => "connection",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            GlowKind::Curiosity => "#00ffff",
            GlowKind::Impact => "#ff4500",
            GlowKind::Empathy => "#ff69b4",
            GlowKind::Connection => "#7fff00",
        }
    }

    pub fn color_rgb(&self) -> [f32; 3] {
        parse_hex_color(self.color_hex()).unwrap_or([1.0, 1.0, 1.0])
    }

    pub fn properties(&self) -> GlowProperties {
        match self {
            GlowKind::Curiosity => GlowProperties { speed: 1.2, size: 0.3, trail: 15.0 },
            GlowKind::Impact => GlowProperties { speed: 2.0, size: 0.4, trail: 20.0 },
            GlowKind::Empathy => GlowProperties { speed: 0.8, size: 0.35, trail: 12.0 },
            GlowKind::Connection => GlowProperties { speed: 1.5, size: 0.25, trail: 18.0 },
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GlowKind::Curiosity => "💠",
            GlowKind::Impact => "🔥",
            GlowKind::Empathy => "🌫",
            GlowKind::Connection => "✨",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glow {
    #[serde(rename = "type")]
    pub kind: GlowKind,
    pub intensity: f32,
    pub timestamp: Timestamp,
    pub from_cell_id: String,
    /// Local arrival order. Tells apart glows from one sender within the
    /// same timestamp.
    #[serde(skip, default = "next_glow_seq")]
    pub seq: u64,
}

/// Sender, timestamp and arrival order.
pub type GlowKey = (String, Timestamp, u64);

fn next_glow_seq() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

// Equality covers the record only, not its arrival order.
impl PartialEq for Glow {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.intensity == other.intensity
            && self.timestamp == other.timestamp
            && self.from_cell_id == other.from_cell_id
    }
}

impl Glow {
    pub fn new(kind: GlowKind, from_cell_id: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind,
            intensity: 1.0,
            timestamp,
            from_cell_id: from_cell_id.into(),
            seq: next_glow_seq(),
        }
    }

    /// Identity of a glow inside one cell's list.
    pub fn key(&self) -> GlowKey {
        (self.from_cell_id.clone(), self.timestamp, self.seq)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.is_expired_after(now, GLOW_DISPLAY_SECONDS)
    }

    pub fn is_expired_after(&self, now: Timestamp, window_secs: f64) -> bool {
        now.as_secs_f64() - self.timestamp.as_secs_f64() >= window_secs
    }
}

pub type ExpiredGlows = SmallVec<[Glow; 4]>;

/// Glows currently shown on a cell. Nothing here is persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlowList {
    items: Vec<Glow>,
}

impl GlowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, glow: Glow) {
        self.items.push(glow);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glow> {
        self.items.iter()
    }

    pub fn total_intensity(&self) -> f32 {
        self.items.iter().map(|g| g.intensity).sum()
    }

    /// Drop every glow older than the display window and hand them back.
    /// A glow is returned by at most one call.
    pub fn expire(&mut self, now: Timestamp) -> ExpiredGlows {
        self.expire_after(now, GLOW_DISPLAY_SECONDS)
    }

    pub fn expire_after(&mut self, now: Timestamp, window_secs: f64) -> ExpiredGlows {
        let mut expired = ExpiredGlows::new();
        self.items.retain(|g| {
            if g.is_expired_after(now, window_secs) {
                expired.push(g.clone());
                false
            } else {
                true
            }
        });
        if !expired.is_empty() {
            log::debug!("[glow] expired {} (remaining {})", expired.len(), self.items.len());
        }
        expired
    }
}

impl<'a> IntoIterator for &'a GlowList {
    type Item = &'a Glow;
    type IntoIter = std::slice::Iter<'a, Glow>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Visual stand-in for a glow travelling toward its target.
#[derive(Clone, Debug)]
pub struct GlowParticle {
    pub key: GlowKey,
    pub kind: GlowKind,
    pub intensity: f32,
    pub position: Vec3,
}

impl GlowParticle {
    pub fn spawn<R: Rng + ?Sized>(glow: &Glow, center: Vec3, rng: &mut R) -> Self {
        Self {
            key: glow.key(),
            kind: glow.kind,
            intensity: glow.intensity,
            position: center + random_point_on_sphere(rng, GLOW_SPAWN_RADIUS),
        }
    }

    /// Linear approach toward `target`. Overshoot is allowed; a particle sitting
    /// exactly on the target does not move.
    pub fn step(&mut self, target: Vec3, dt_sec: f32) {
        let dir = (target - self.position).normalize_or_zero();
        let speed = self.kind.properties().speed * self.intensity * dt_sec;
        self.position += dir * speed;
    }

    pub fn pulse_scale(&self, elapsed_sec: f32) -> f32 {
        glow_pulse_scale(self.kind, elapsed_sec)
    }

    pub fn radius(&self) -> f32 {
        self.kind.properties().size
    }
}

pub fn glow_pulse_scale(kind: GlowKind, elapsed_sec: f32) -> f32 {
    1.0 + (elapsed_sec * kind.properties().speed * 2.0).sin() * 0.2
}

pub fn random_point_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}
