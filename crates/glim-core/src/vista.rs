use super::model::{Cell, Timestamp};
use serde::{Deserialize, Serialize};

/// Session length used when the backend gives no end time.
pub const DEFAULT_VISTA_MINUTES: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VistaIntensity {
    Light,
    Complete,
    Guided,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsoredKind {
    Fragment,
    Glow,
    Environment,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsoredContent {
    pub id: String,
    pub brand_id: String,
    #[serde(rename = "type")]
    pub kind: SponsoredKind,
    pub content: String,
    pub position: [f32; 3],
    /// Seconds.
    pub duration: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VistaSession {
    pub id: String,
    pub host_cell_id: String,
    pub visitor_cell_id: String,
    pub intensity: VistaIntensity,
    pub start_time: Timestamp,
    /// Minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sponsored_content: Vec<SponsoredContent>,
}

impl VistaSession {
    pub fn ends_at(&self) -> Timestamp {
        Timestamp::from_millis(self.start_time.as_millis() + self.duration as f64 * 60_000.0)
    }

    pub fn is_over(&self, now: Timestamp) -> bool {
        now >= self.ends_at()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VistaState {
    pub is_active: bool,
    pub session: Option<VistaSession>,
    pub host_cell: Option<Cell>,
    pub original_cell: Option<Cell>,
    pub sponsored_content_queue: Vec<SponsoredContent>,
}
