//! Shared front-end state. One `App` sits behind an `Rc<RefCell<..>>` and is
//! read by the frame loop, the DOM listeners and finished requests alike.

use crate::audio::CellAudio;
use crate::constants::{
    CELL_CAMERA_START, ENVIRONMENT_CAMERA_START, ENVIRONMENT_MAX_DISTANCE,
    ENVIRONMENT_MIN_DISTANCE, VISTA_CAMERA_START,
};
use crate::http::ApiClient;
use crate::input::{DragState, MouseState};
use crate::storage::LocalStore;
use glam::{Vec2, Vec3};
use glim_core::animation::Spin;
use glim_core::camera::{Camera, FlyKeys, FocusController, OrbitControls};
use glim_core::config::AppConfig;
use glim_core::environment::EnvironmentEditor;
use glim_core::glow::GlowParticle;
use glim_core::model::Cell;
use glim_core::route::{MountGeneration, Route};
use glim_core::scene::{self, SceneInstance};
use glim_core::session::Session;
use glim_core::store::GlimStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

pub type AppHandle = Rc<RefCell<App>>;

/// What the frame loop draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    /// Stars only; form pages.
    Idle,
    Cell,
    Vista,
    Environment,
}

pub struct App {
    pub config: AppConfig,
    pub client: ApiClient,
    pub local: LocalStore,
    pub session: Session,
    pub store: GlimStore,
    pub route: Route,
    pub mode: SceneMode,
    /// Bumped on every page mount so late answers for an old page are dropped.
    pub mounts: MountGeneration,

    pub rig: OrbitControls,
    pub focus: FocusController,
    /// Focus state last written to the vista menu label.
    pub shown_focus: Option<bool>,
    pub fly: FlyKeys,
    pub mouse: MouseState,
    pub drag: DragState,
    pub aspect: f32,

    pub editor: Option<EnvironmentEditor>,
    pub hovered: Option<usize>,
    pub particles: Vec<GlowParticle>,
    pub audio: Option<CellAudio>,
    pub audio_active: bool,

    pub elapsed: f32,
    pub cell_spin: Spin,
    pub fragment_spin: Spin,
    pub vista_spin: Spin,
    /// Last composed frame. The first `pickable` entries are cells or
    /// objects in the order their page lists them.
    pub instances: Vec<SceneInstance>,
    pub pickable: usize,
    pub rng: StdRng,
}

impl App {
    pub fn new(config: AppConfig, mut local: LocalStore) -> Self {
        let session = Session::restore(&mut local);
        let client = ApiClient::new(config.api_base_url.clone(), local.clone());
        let focus = FocusController::new(config.focus_unlock_secs);
        Self {
            config,
            client,
            local,
            session,
            store: GlimStore::new(),
            route: Route::Home,
            mode: SceneMode::Idle,
            mounts: MountGeneration::default(),
            rig: OrbitControls::single_cell(CELL_CAMERA_START),
            focus,
            shown_focus: None,
            fly: FlyKeys::default(),
            mouse: MouseState::default(),
            drag: DragState::default(),
            aspect: 1.0,
            editor: None,
            hovered: None,
            particles: Vec::new(),
            audio: None,
            audio_active: true,
            elapsed: 0.0,
            cell_spin: Spin::default(),
            fragment_spin: Spin::default(),
            vista_spin: Spin::default(),
            instances: Vec::new(),
            pickable: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reset per-page state for `route` and return the generation that async
    /// work started by the page has to match when it finishes.
    pub fn mount(&mut self, route: Route, mode: SceneMode) -> u64 {
        let generation = self.mounts.advance();
        log::info!("[router] mount {:?} as {:?}", route, mode);
        self.route = route;
        self.mode = mode;
        self.rig = match mode {
            SceneMode::Vista => OrbitControls::vista(VISTA_CAMERA_START),
            SceneMode::Environment => OrbitControls::new(
                ENVIRONMENT_CAMERA_START,
                Vec3::ZERO,
                ENVIRONMENT_MIN_DISTANCE,
                ENVIRONMENT_MAX_DISTANCE,
            ),
            SceneMode::Cell | SceneMode::Idle => OrbitControls::single_cell(CELL_CAMERA_START),
        };
        self.focus = FocusController::new(self.config.focus_unlock_secs);
        self.shown_focus = None;
        self.fly.clear();
        self.drag = DragState::default();
        self.editor = None;
        self.hovered = None;
        self.particles.clear();
        // Dropping the graph closes its AudioContext.
        self.audio = None;
        self.audio_active = true;
        self.instances.clear();
        self.pickable = 0;
        if self.store.vista.is_active {
            self.store.end_vista_session();
        }
        generation
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.mounts.current()
    }

    #[inline]
    pub fn is_current(&self, generation: u64) -> bool {
        self.mounts.is_current(generation)
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out(&mut self.local);
        self.store = GlimStore::new();
    }

    /// Cells shown in the vista: the user's own cell first, then every nearby
    /// cell that is not it.
    pub fn vista_cells(&self) -> Vec<&Cell> {
        let own = self.store.current_cell();
        let own_id = own.map(|c| c.id.as_str());
        own.into_iter()
            .chain(
                self.store
                    .nearby_cells()
                    .iter()
                    .filter(|c| Some(c.id.as_str()) != own_id),
            )
            .collect()
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.rig.eye, self.rig.target, self.aspect)
    }

    /// Pickable instance under a point given in normalized device coordinates.
    pub fn pick(&self, ndc: Vec2) -> Option<usize> {
        let (origin, dir) = self.camera().ray_from_ndc(ndc.x, ndc.y);
        let n = self.pickable.min(self.instances.len());
        scene::pick(&self.instances[..n], origin, dir)
    }
}
