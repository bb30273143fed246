//! Backend wire format and request descriptions.
//!
//! The transport lives in the web crate; this module only decides what is sent
//! (method, path, query, JSON body) and how responses become model types, so it
//! can be exercised without a browser.

use super::emotion::Emotion;
use super::glow::GlowKind;
use super::model::{
    lenient_timestamp, AudioConfig, Cell, Object3D, ObjectKind, Timestamp, DEFAULT_CELL_COLOR,
};
use super::user::{PreferencesUpdate, ProfileUpdate, User};
use super::vista::{VistaIntensity, VistaSession, DEFAULT_VISTA_MINUTES};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_PAGE: u32 = 1;
pub const DEFAULT_FEED_LIMIT: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One HTTP call, ready for any transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn json<T: Serialize>(mut self, body: &T) -> Self {
        // Plain data types only; serialization cannot fail for them.
        self.body = serde_json::to_value(body).ok();
        self
    }

    /// Absolute URL against `base` (no trailing slash required).
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path);
        for (i, (k, v)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&encode_component(k));
            url.push('=');
            url.push_str(&encode_component(v));
        }
        url
    }

    pub fn body_string(&self) -> Option<String> {
        self.body.as_ref().map(|b| b.to_string())
    }
}

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

// ---------------- wire types ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ApiVec3 {
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl From<&Object3D> for ApiObject {
    fn from(o: &Object3D) -> Self {
        Self {
            id: o.id.clone(),
            kind: o.kind.key().to_string(),
            position: o.position,
            rotation: o.rotation,
            scale: o.scale,
            color: o.color.clone(),
            video_url: o.video_url.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCell {
    pub id: String,
    pub user_id: String,
    pub emotion: String,
    pub intensity: f32,
    #[serde(default)]
    pub color: Option<String>,
    pub position: ApiVec3,
    #[serde(default)]
    pub scale: Option<ApiVec3>,
    #[serde(default)]
    pub rotation: Option<ApiVec3>,
    #[serde(default)]
    pub objects: Option<Vec<ApiObject>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGlow {
    #[serde(rename = "type")]
    pub kind: String,
    pub intensity: f32,
    pub timestamp: Timestamp,
    pub from_cell_id: String,
}

/// Answer of `/cells/vista/start`. Cells that do not decode are skipped.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVistaSession {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub cells: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GlowBody<'a> {
    cell_id: &'a str,
    emotion: &'a str,
    intensity: f32,
}

/// Partial cell update; only the set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<ApiObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl CellUpdate {
    pub fn emotion(emotion: Emotion, now: Timestamp) -> Self {
        Self {
            emotion: Some(emotion),
            intensity: Some(1.0),
            updated_at: Some(now),
            ..Default::default()
        }
    }

    pub fn objects(objects: &[Object3D]) -> Self {
        Self {
            objects: Some(objects.iter().map(ApiObject::from).collect()),
            ..Default::default()
        }
    }
}

// ---------------- mapping ----------------

/// Backend cell to client cell. Missing optional fields get the client
/// defaults; a missing or nonsensical `updatedAt` becomes `now`.
pub fn map_api_cell(api: ApiCell, now: Timestamp) -> Cell {
    let last_update = match api.updated_at {
        Some(ts) if ts.seconds > 0 => ts,
        _ => now,
    };
    let objects = api
        .objects
        .unwrap_or_default()
        .into_iter()
        .filter_map(|o| {
            let kind = ObjectKind::parse(&o.kind).or_else(|| {
                log::warn!("[api] skipping object {} of unknown type {:?}", o.id, o.kind);
                None
            })?;
            Some(Object3D {
                id: o.id,
                kind,
                position: o.position,
                rotation: o.rotation,
                scale: o.scale,
                color: o.color,
                video_url: o.video_url,
            })
        })
        .collect();
    Cell {
        id: api.id,
        user_id: api.user_id,
        emotion: Emotion::from_key(&api.emotion),
        intensity: api.intensity,
        color: api
            .color
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CELL_COLOR.to_string()),
        fragments: Vec::new(),
        glows: Default::default(),
        objects,
        position: api.position.to_array(),
        scale: api
            .scale
            .map(|s| nonzero_or(s.to_array(), 1.0))
            .unwrap_or([1.0; 3]),
        rotation: api.rotation.map(|r| r.to_array()).unwrap_or([0.0; 3]),
        last_update,
        audio: Some(AudioConfig::default()),
    }
}

/// Backend vista session to the store's session. The backend does not say
/// who hosts or for how long, so the user's own cell hosts and the length
/// comes from `endTime` when it is later than the start.
pub fn map_api_vista_session(
    api: ApiVistaSession,
    own_cell_id: &str,
    now: Timestamp,
) -> (VistaSession, Vec<Cell>) {
    let start_time = api.start_time.unwrap_or(now);
    let duration = match api.end_time {
        Some(end) if end > start_time => {
            ((end.as_millis() - start_time.as_millis()) / 60_000.0).ceil() as u32
        }
        _ => DEFAULT_VISTA_MINUTES,
    };
    let cells = api
        .cells
        .into_iter()
        .filter_map(|v| serde_json::from_value::<ApiCell>(v).ok())
        .map(|c| map_api_cell(c, now))
        .collect();
    let session = VistaSession {
        id: api.id,
        host_cell_id: own_cell_id.to_string(),
        visitor_cell_id: own_cell_id.to_string(),
        intensity: VistaIntensity::Complete,
        start_time,
        duration,
        sponsored_content: Vec::new(),
    };
    (session, cells)
}

fn nonzero_or(v: [f32; 3], fallback: f32) -> [f32; 3] {
    v.map(|c| if c == 0.0 { fallback } else { c })
}

// ---------------- endpoints ----------------

pub mod endpoints {
    use super::*;

    pub fn login(email: &str, password: &str) -> ApiRequest {
        ApiRequest::new(Method::Post, "/auth/login").json(&LoginBody { email, password })
    }

    pub fn register(email: &str, password: &str, display_name: &str) -> ApiRequest {
        ApiRequest::new(Method::Post, "/auth/register").json(&RegisterBody {
            email,
            password,
            display_name,
        })
    }

    pub fn create_initial_cell() -> ApiRequest {
        ApiRequest::new(Method::Post, "/cells/initial")
    }

    pub fn user_cells() -> ApiRequest {
        ApiRequest::new(Method::Get, "/cells/user")
    }

    pub fn nearby_cells(position: [f32; 3], radius: Option<f32>) -> ApiRequest {
        let req = ApiRequest::new(Method::Get, "/cells/nearby")
            .query("x", position[0])
            .query("y", position[1])
            .query("z", position[2]);
        match radius {
            Some(r) => req.query("radius", r),
            None => req,
        }
    }

    pub fn update_cell(cell_id: &str, update: &CellUpdate) -> ApiRequest {
        ApiRequest::new(Method::Put, format!("/cells/{}", encode_component(cell_id))).json(update)
    }

    /// `emotion` carries either an emotion key or a glow kind key.
    pub fn send_glow(cell_id: &str, emotion: &str, intensity: f32) -> ApiRequest {
        ApiRequest::new(Method::Post, "/cells/glow").json(&GlowBody {
            cell_id,
            emotion,
            intensity,
        })
    }

    pub fn send_glow_kind(cell_id: &str, kind: GlowKind) -> ApiRequest {
        send_glow(cell_id, kind.key(), 1.0)
    }

    pub fn start_vista_session() -> ApiRequest {
        ApiRequest::new(Method::Post, "/cells/vista/start")
    }

    fn user_path(user_id: &str, tail: &str) -> String {
        format!("/users/{}/{}", encode_component(user_id), tail)
    }

    pub fn profile(user_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, user_path(user_id, "profile"))
    }

    pub fn update_profile(user_id: &str, update: &ProfileUpdate) -> ApiRequest {
        ApiRequest::new(Method::Put, user_path(user_id, "profile")).json(update)
    }

    pub fn preferences(user_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, user_path(user_id, "preferences"))
    }

    pub fn update_preferences(user_id: &str, update: &PreferencesUpdate) -> ApiRequest {
        ApiRequest::new(Method::Put, user_path(user_id, "preferences")).json(update)
    }

    pub fn stats(user_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, user_path(user_id, "stats"))
    }

    pub fn follow(target_user_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Post, user_path(target_user_id, "follow"))
    }

    pub fn unfollow(target_user_id: &str) -> ApiRequest {
        ApiRequest::new(Method::Delete, user_path(target_user_id, "follow"))
    }

    pub fn search_users(query: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, "/users/search").query("q", query)
    }

    pub fn feed(user_id: &str, page: Option<u32>, limit: Option<u32>) -> ApiRequest {
        ApiRequest::new(Method::Get, user_path(user_id, "feed"))
            .query("page", page.unwrap_or(DEFAULT_FEED_PAGE))
            .query("limit", limit.unwrap_or(DEFAULT_FEED_LIMIT))
    }
}
