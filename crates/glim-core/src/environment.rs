//! Editing state for a cell's decorative objects.

use super::api::{endpoints, ApiRequest, CellUpdate};
use super::model::{random_id, Object3D, ObjectKind};
use rand::Rng;

/// Field-wise change to one object; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectPatch {
    pub position: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub scale: Option<[f32; 3]>,
    pub color: Option<String>,
    pub video_url: Option<Option<String>>,
}

impl ObjectPatch {
    fn apply(self, obj: &mut Object3D) {
        if let Some(p) = self.position {
            obj.position = p;
        }
        if let Some(r) = self.rotation {
            obj.rotation = r;
        }
        if let Some(s) = self.scale {
            obj.scale = s;
        }
        if let Some(c) = self.color {
            obj.color = c;
        }
        if let Some(v) = self.video_url {
            obj.video_url = v;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnvironmentEditor {
    cell_id: String,
    objects: Vec<Object3D>,
    selected: Option<String>,
    has_changes: bool,
}

impl EnvironmentEditor {
    pub fn new(cell_id: impl Into<String>, objects: Vec<Object3D>) -> Self {
        Self {
            cell_id: cell_id.into(),
            objects,
            selected: None,
            has_changes: false,
        }
    }

    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn object(&self, id: &str) -> Option<&Object3D> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn selected(&self) -> Option<&Object3D> {
        self.selected.as_deref().and_then(|id| self.object(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Append a default object of `kind` and return its id.
    pub fn add_object<R: Rng + ?Sized>(&mut self, kind: ObjectKind, rng: &mut R) -> String {
        let id = random_id(rng);
        self.objects.push(Object3D::new(id.clone(), kind));
        self.has_changes = true;
        id
    }

    /// Returns false when no object has that id.
    pub fn update_object(&mut self, id: &str, patch: ObjectPatch) -> bool {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(obj) => {
                patch.apply(obj);
                self.has_changes = true;
                true
            }
            None => false,
        }
    }

    pub fn delete_object(&mut self, id: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        let removed = self.objects.len() != before;
        if removed {
            self.has_changes = true;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        removed
    }

    /// Select an existing object, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.objects.iter().any(|o| o.id == *id))
            .map(str::to_string);
    }

    /// Video URL for a TV object. Empty input clears it. Non-TV objects are
    /// left alone.
    pub fn set_video_url(&mut self, id: &str, url: &str) -> bool {
        let is_tv = self
            .object(id)
            .map(|o| o.kind == ObjectKind::Tv)
            .unwrap_or(false);
        if !is_tv {
            return false;
        }
        let url = url.trim();
        let value = (!url.is_empty()).then(|| url.to_string());
        self.update_object(
            id,
            ObjectPatch {
                video_url: Some(value),
                ..Default::default()
            },
        )
    }

    pub fn save_request(&self) -> ApiRequest {
        endpoints::update_cell(&self.cell_id, &CellUpdate::objects(&self.objects))
    }

    pub fn mark_saved(&mut self) {
        self.has_changes = false;
    }
}
