// Page layout and interaction tuning for the browser front-end.
//
// Orbit limits, the glow window and focus timing live in `glim_core`; what
// stays here only matters to the DOM and the renderer.

use glam::Vec3;

// Element ids expected in the host page
pub const CANVAS_ID: &str = "glim-canvas";
pub const NAV_ID: &str = "glim-nav";
pub const UI_ROOT_ID: &str = "glim-ui";
pub const STATUS_ID: &str = "glim-status";
pub const LOADING_ID: &str = "glim-loading";

// <meta name=...> tags read at startup
pub const META_CONFIG: &str = "glim-config";
pub const META_API_URL: &str = "glim-api-url";

// Camera start positions
pub const VISTA_CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 8.0);
pub const CELL_CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 8.0);
pub const ENVIRONMENT_CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);
pub const ENVIRONMENT_MIN_DISTANCE: f32 = 1.0;
pub const ENVIRONMENT_MAX_DISTANCE: f32 = 30.0;

// A press that travels less than this many canvas pixels is a click, not a drag
pub const CLICK_MAX_TRAVEL_PX: f32 = 4.0;

// Upper bound on per-frame delta so a backgrounded tab does not teleport particles
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Renderer
pub const MAX_INSTANCES: usize = 1024;
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
pub const STAR_DENSITY: f32 = 0.0025;

// Audio
pub const GAIN_RAMP_SEC: f64 = 0.1;
