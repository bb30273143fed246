//! In-memory client state: the active cell, nearby cells and the vista
//! session. Mutations apply immediately; persisting them is the caller's job.
//! Every cell mutation on an empty store is a no-op.

use super::emotion::Emotion;
use super::glow::{ExpiredGlows, Glow, GLOW_DISPLAY_SECONDS};
use super::model::{random_id, Cell, Fragment, SpotifyInfo, Timestamp};
use super::vista::{VistaIntensity, VistaSession, VistaState};
use fnv::FnvHashMap;
use rand::Rng;

#[derive(Clone, Debug, Default)]
pub struct GlimStore {
    pub current_cell: Option<Cell>,
    pub vista: VistaState,
    nearby: Vec<Cell>,
    nearby_index: FnvHashMap<String, usize>,
}

impl GlimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_cell(&self) -> Option<&Cell> {
        self.current_cell.as_ref()
    }

    pub fn set_current_cell(&mut self, cell: Cell) {
        self.current_cell = Some(cell);
    }

    pub fn clear_current_cell(&mut self) {
        self.current_cell = None;
    }

    pub fn update_emotion(&mut self, emotion: Emotion, now: Timestamp) {
        if let Some(cell) = self.current_cell.as_mut() {
            cell.emotion = emotion;
            cell.last_update = now;
        }
    }

    pub fn add_fragment(&mut self, fragment: Fragment, now: Timestamp) {
        if let Some(cell) = self.current_cell.as_mut() {
            cell.fragments.push(fragment);
            cell.last_update = now;
        }
    }

    pub fn add_glow(&mut self, glow: Glow, now: Timestamp) {
        if let Some(cell) = self.current_cell.as_mut() {
            log::info!("[glow] +{} from {}", glow.kind.key(), glow.from_cell_id);
            cell.glows.push(glow);
            cell.last_update = now;
        }
    }

    /// Drop glows whose display window has passed.
    pub fn expire_glows(&mut self, now: Timestamp) -> ExpiredGlows {
        self.expire_glows_after(now, GLOW_DISPLAY_SECONDS)
    }

    pub fn expire_glows_after(&mut self, now: Timestamp, window_secs: f64) -> ExpiredGlows {
        match self.current_cell.as_mut() {
            Some(cell) => cell.glows.expire_after(now, window_secs),
            None => ExpiredGlows::new(),
        }
    }

    /// Flip the cell's audio flag and return the new value.
    pub fn toggle_audio(&mut self) -> bool {
        match self.current_cell.as_mut() {
            Some(cell) => {
                let audio = cell.audio.get_or_insert_with(Default::default);
                audio.is_enabled = !audio.is_enabled;
                audio.is_enabled
            }
            None => false,
        }
    }

    /// Attach a Spotify preview to the cell's audio. A missing preview leaves
    /// the cell unchanged.
    pub fn set_spotify_preview(&mut self, url: &str, preview_url: Option<String>) {
        let Some(preview_url) = preview_url else {
            return;
        };
        if let Some(cell) = self.current_cell.as_mut() {
            let audio = cell.audio.get_or_insert_with(Default::default);
            audio.spotify = Some(SpotifyInfo {
                url: url.to_string(),
                preview_url: Some(preview_url),
                ..Default::default()
            });
        }
    }

    pub fn start_vista_session<R: Rng + ?Sized>(
        &mut self,
        host_cell_id: &str,
        intensity: VistaIntensity,
        duration_minutes: u32,
        now: Timestamp,
        rng: &mut R,
    ) -> &VistaSession {
        let visitor_cell_id = self
            .current_cell
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        self.vista.is_active = true;
        self.vista.original_cell = self.current_cell.clone();
        self.vista.session.insert(VistaSession {
            id: random_id(rng),
            host_cell_id: host_cell_id.to_string(),
            visitor_cell_id,
            intensity,
            start_time: now,
            duration: duration_minutes,
            sponsored_content: Vec::new(),
        })
    }

    /// Adopt a session created by the backend.
    pub fn adopt_vista_session(&mut self, session: VistaSession) {
        self.vista.is_active = true;
        self.vista.session = Some(session);
    }

    pub fn end_vista_session(&mut self) {
        self.vista.is_active = false;
        self.vista.session = None;
        self.vista.host_cell = None;
    }

    pub fn nearby_cells(&self) -> &[Cell] {
        &self.nearby
    }

    pub fn set_nearby_cells(&mut self, cells: Vec<Cell>) {
        self.nearby = cells;
        self.reindex_nearby();
    }

    /// Append cells whose ids are not nearby yet.
    pub fn merge_nearby_cells(&mut self, cells: Vec<Cell>) {
        for cell in cells {
            if !self.nearby_index.contains_key(&cell.id) {
                self.nearby_index.insert(cell.id.clone(), self.nearby.len());
                self.nearby.push(cell);
            }
        }
    }

    // Lookups resolve to the first cell with an id, like a linear search.
    fn reindex_nearby(&mut self) {
        self.nearby_index.clear();
        for (i, c) in self.nearby.iter().enumerate() {
            self.nearby_index.entry(c.id.clone()).or_insert(i);
        }
    }

    /// Replace every nearby cell with the same id. Unknown ids are ignored.
    pub fn update_nearby_cell(&mut self, cell: Cell) {
        let Some(&first) = self.nearby_index.get(&cell.id) else {
            return;
        };
        for slot in self.nearby[first + 1..]
            .iter_mut()
            .filter(|c| c.id == cell.id)
        {
            *slot = cell.clone();
        }
        self.nearby[first] = cell;
    }

    pub fn nearby_cell(&self, id: &str) -> Option<&Cell> {
        self.nearby_index.get(id).map(|&i| &self.nearby[i])
    }
}
