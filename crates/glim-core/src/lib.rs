//! Platform-free core of GLIM: records, lookup tables, per-frame motion, the
//! client store and the REST wire format. The browser front-end drives these
//! types; nothing here touches the DOM or the GPU.

pub mod animation;
pub mod api;
pub mod camera;
pub mod config;
pub mod embed;
pub mod emotion;
pub mod environment;
pub mod error;
pub mod glow;
pub mod model;
pub mod route;
pub mod scene;
pub mod session;
pub mod store;
pub mod user;
pub mod vista;

pub use api::{endpoints, map_api_cell, ApiCell, ApiRequest, AuthResponse, CellUpdate, Method};
pub use config::AppConfig;
pub use emotion::{emotion_color, Emotion};
pub use environment::{EnvironmentEditor, ObjectPatch};
pub use error::{ApiError, ApiResult};
pub use glow::{Glow, GlowKind, GlowList, GlowParticle};
pub use model::{Cell, Fragment, FragmentKind, Object3D, ObjectKind, Timestamp};
pub use route::Route;
pub use scene::{SceneInstance, Shape};
pub use session::{KeyValueStore, MemoryStore, Session};
pub use store::GlimStore;
