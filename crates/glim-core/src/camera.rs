//! Camera description plus the three controllers that move it: pointer orbit,
//! keyboard fly, and the focus-on-my-cell toggle.
//!
//! These types avoid platform APIs; the web frontend feeds them pointer and
//! key input and reads back `eye`/`target` each frame.

use glam::{Mat4, Vec3};

/// Height above a cell at which the focused camera sits.
pub const FOCUS_HEIGHT: f32 = 5.0;
/// How far ahead the orbit target is placed when leaving focus.
pub const UNFOCUS_TARGET_DISTANCE: f32 = 10.0;
pub const FOCUS_UNLOCK_SECS: f64 = 1.0;
pub const FLY_MOVE_SPEED: f32 = 0.3;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.001;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: 75f32.to_radians(),
            znear: 0.1,
            zfar: 500.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    ///
    /// Looking straight up or down swaps in `-Z` as the up vector so the
    /// focused top-down view stays well defined.
    pub fn view_matrix(&self) -> Mat4 {
        let fwd = (self.target - self.eye).normalize_or_zero();
        let up = if fwd.cross(self.up).length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            self.up
        };
        Mat4::look_at_rh(self.eye, self.target, up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        (self.eye, (p_far - self.eye).normalize_or_zero())
    }
}

/// Damped orbit around `target`, with a clamped distance.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub eye: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub enabled: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            eye,
            target,
            min_distance,
            max_distance,
            damping: ORBIT_DAMPING,
            enabled: true,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    /// Limits used by the multi-cell vista.
    pub fn vista(eye: Vec3) -> Self {
        Self::new(eye, Vec3::ZERO, 2.0, 50.0)
    }

    /// Limits used by the single-cell view.
    pub fn single_cell(eye: Vec3) -> Self {
        Self::new(eye, Vec3::ZERO, 4.0, 20.0)
    }

    pub fn forward(&self) -> Vec3 {
        let f = (self.target - self.eye).normalize_or_zero();
        if f == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            f
        }
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Pointer drag in pixels.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        if !self.enabled {
            return;
        }
        self.yaw_velocity -= dx_px * ORBIT_ROTATE_SPEED;
        self.pitch_velocity -= dy_px * ORBIT_ROTATE_SPEED;
    }

    /// Wheel delta; positive zooms out.
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        self.zoom_velocity += delta * ORBIT_ZOOM_SPEED;
    }

    /// Move eye and target together.
    pub fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.target += offset;
    }

    /// Apply this frame's share of the accumulated motion.
    /// A disabled rig drops pending motion and leaves the eye where it is.
    pub fn update(&mut self) {
        if !self.enabled {
            self.stop();
            return;
        }
        let offset = self.eye - self.target;
        let mut radius = offset.length().max(1e-4);
        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += self.yaw_velocity * self.damping;
        pitch = (pitch + self.pitch_velocity * self.damping).clamp(-1.55, 1.55);
        radius *= 1.0 + self.zoom_velocity * self.damping;
        radius = radius.clamp(self.min_distance, self.max_distance);

        let keep = 1.0 - self.damping;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;

        let horizontal = radius * pitch.cos();
        self.eye = self.target
            + Vec3::new(horizontal * yaw.sin(), radius * pitch.sin(), horizontal * yaw.cos());
    }

    pub fn stop(&mut self) {
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.zoom_velocity = 0.0;
    }
}

/// Held movement keys for free flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlyKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl FlyKeys {
    /// Record a key transition. Returns whether the key is a movement key.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => &mut self.forward,
            "s" | "arrowdown" => &mut self.backward,
            "a" | "arrowleft" => &mut self.left,
            "d" | "arrowright" => &mut self.right,
            " " => &mut self.up,
            "shift" => &mut self.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    pub fn clear(&mut self) {
        *self = FlyKeys::default();
    }

    /// One frame of movement for a camera looking along `forward`.
    pub fn displacement(&self, forward: Vec3, up: Vec3, speed: f32) -> Vec3 {
        let mut d = Vec3::ZERO;
        let fwd = forward.normalize_or_zero();
        if self.forward {
            d += fwd * speed;
        }
        if self.backward {
            d -= fwd * speed;
        }
        if self.left || self.right {
            let sideways = fwd.cross(up).normalize_or_zero();
            d += sideways * if self.left { -speed } else { speed };
        }
        if self.up {
            d.y += speed;
        }
        if self.down {
            d.y -= speed;
        }
        d
    }
}

/// Focus-on-my-cell state. The first time a user cell is known the camera
/// jumps above it and stays locked until a fixed timeout releases it.
#[derive(Clone, Debug)]
pub struct FocusController {
    pub camera_locked: bool,
    pub is_focused: bool,
    initial_focus_done: bool,
    unlock_at: Option<f64>,
    unlock_after_secs: f64,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new(FOCUS_UNLOCK_SECS)
    }
}

impl FocusController {
    pub fn new(unlock_after_secs: f64) -> Self {
        Self {
            camera_locked: true,
            is_focused: false,
            initial_focus_done: false,
            unlock_at: None,
            unlock_after_secs,
        }
    }

    /// Whether pointer orbit and keyboard fly are allowed to move the camera.
    pub fn controls_enabled(&self) -> bool {
        !self.camera_locked && !self.is_focused
    }

    pub fn focus(&mut self, cell_position: Vec3, rig: &mut OrbitControls) {
        rig.stop();
        rig.eye = cell_position + Vec3::new(0.0, FOCUS_HEIGHT, 0.0);
        rig.target = cell_position;
        self.is_focused = true;
        log::info!(
            "[camera] focus ({:.2},{:.2},{:.2})",
            cell_position.x,
            cell_position.y,
            cell_position.z
        );
    }

    pub fn unfocus(&mut self, rig: &mut OrbitControls) {
        let forward = rig.forward();
        rig.target = rig.eye + forward * UNFOCUS_TARGET_DISTANCE;
        self.is_focused = false;
        log::info!("[camera] unfocus");
    }

    /// Flip focus. Without a user cell there is nothing to focus on, so only
    /// the unfocus direction does anything.
    pub fn toggle(&mut self, user_cell: Option<Vec3>, rig: &mut OrbitControls) -> bool {
        if self.is_focused {
            self.unfocus(rig);
        } else if let Some(pos) = user_cell {
            self.focus(pos, rig);
        }
        self.is_focused
    }

    /// Called whenever the user cell is (re)known. Only the first call acts.
    pub fn on_user_cell(&mut self, cell_position: Vec3, rig: &mut OrbitControls, now_sec: f64) {
        if self.initial_focus_done {
            return;
        }
        self.focus(cell_position, rig);
        self.initial_focus_done = true;
        self.unlock_at = Some(now_sec + self.unlock_after_secs);
    }

    /// Release the initial lock once its timeout has passed.
    pub fn tick(&mut self, now_sec: f64, rig: &mut OrbitControls) {
        if let Some(at) = self.unlock_at {
            if now_sec >= at {
                self.unlock_at = None;
                self.camera_locked = false;
                self.unfocus(rig);
            }
        }
        rig.enabled = self.controls_enabled();
    }

    pub fn pending_unlock(&self) -> bool {
        self.unlock_at.is_some()
    }
}
