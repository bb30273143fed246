use glam::Vec2;
use web_sys as web;

#[derive(Default, Clone, Copy, Debug)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

/// Tracks one pointer press from down to up so a release can be told apart
/// from an orbit drag.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    pub travel: f32,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.start = at;
        self.last = at;
        self.travel = 0.0;
    }

    /// Record a move and return the delta since the previous sample.
    pub fn move_to(&mut self, at: Vec2) -> Vec2 {
        if !self.active {
            return Vec2::ZERO;
        }
        let delta = at - self.last;
        self.travel += delta.length();
        self.last = at;
        delta
    }

    /// Finish the press. Returns true when it qualifies as a click.
    pub fn end(&mut self, max_travel_px: f32) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active && self.travel <= max_travel_px
    }
}

/// Canvas pixel (origin top-left) to normalized device coordinates.
#[inline]
pub fn px_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((px.x / w) * 2.0 - 1.0, 1.0 - (px.y / h) * 2.0)
}

/// Normalize a wheel delta reported in lines or pages to pixels.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        1 => (delta_y * 16.0) as f32,
        2 => (delta_y * 800.0) as f32,
        _ => delta_y as f32,
    }
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let rw = (rect.width() as f32).max(1.0);
    let rh = (rect.height() as f32).max(1.0);
    let sx = (x_css / rw) * canvas.width() as f32;
    let sy = (y_css / rh) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
