use super::animation::{DEFAULT_ORBIT_RADIUS, DEFAULT_ORBIT_SPEED};
use super::camera::FOCUS_UNLOCK_SECS;
use super::glow::GLOW_DISPLAY_SECONDS;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Runtime settings. Every field is optional in the JSON form and falls back
/// to the built-in default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub api_base_url: String,
    pub glow_display_secs: f64,
    pub focus_unlock_secs: f64,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            glow_display_secs: GLOW_DISPLAY_SECONDS,
            focus_unlock_secs: FOCUS_UNLOCK_SECS,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            orbit_speed: DEFAULT_ORBIT_SPEED,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Apply an optional JSON blob and an optional bare API URL on top of the
    /// defaults. A broken blob is logged and ignored.
    pub fn resolve(json: Option<&str>, api_url: Option<&str>) -> Self {
        let mut config = match json.map(str::trim).filter(|j| !j.is_empty()) {
            Some(j) => Self::from_json(j).unwrap_or_else(|e| {
                log::warn!("[config] ignoring invalid config: {e}");
                Self::default()
            }),
            None => Self::default(),
        };
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.glow_display_secs > 0.0) {
            self.glow_display_secs = defaults.glow_display_secs;
        }
        if !(self.focus_unlock_secs >= 0.0) {
            self.focus_unlock_secs = defaults.focus_unlock_secs;
        }
        if !(self.orbit_radius > 0.0) {
            self.orbit_radius = defaults.orbit_radius;
        }
        if !self.orbit_speed.is_finite() {
            self.orbit_speed = defaults.orbit_speed;
        }
        if self.api_base_url.trim().is_empty() {
            self.api_base_url = defaults.api_base_url;
        }
        self
    }
}
