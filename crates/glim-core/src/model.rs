//! Plain records for cells and the things attached to them.
//!
//! Field names serialize in camelCase so the same types can be sent to the
//! backend and stored in the browser without a second mapping layer.

use super::emotion::Emotion;
use super::glow::GlowList;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CELL_COLOR: &str = "#646cff";
pub const DEFAULT_AUDIO_VOLUME: f32 = 0.5;

/// Backend timestamp. Serialized as `{ seconds, nanoseconds }`; read from
/// that shape, epoch milliseconds or an RFC 3339 string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn from_millis(millis: f64) -> Self {
        let seconds = (millis / 1000.0).floor();
        let rem_ms = millis - seconds * 1000.0;
        Self {
            seconds: seconds as i64,
            nanoseconds: (rem_ms * 1_000_000.0).round().clamp(0.0, 999_999_999.0) as u32,
        }
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds as f64 * 1000.0 + self.nanoseconds as f64 / 1_000_000.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.as_millis() / 1000.0
    }

    pub fn parse_rfc3339(text: &str) -> Option<Self> {
        let dt = chrono::DateTime::parse_from_rfc3339(text.trim()).ok()?;
        Some(Self {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampWire {
    Parts {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Millis(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TimestampWire::deserialize(deserializer)? {
            TimestampWire::Parts {
                seconds,
                nanoseconds,
            } => Ok(Self {
                seconds,
                nanoseconds,
            }),
            TimestampWire::Millis(ms) => Ok(Self::from_millis(ms)),
            TimestampWire::Text(text) => Self::parse_rfc3339(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp {text:?}"))),
        }
    }
}

/// For optional date fields: anything that is not a readable timestamp,
/// `null` included, becomes `None` instead of failing the whole record.
pub fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Text,
    Image,
    Sound,
    Video,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    pub content: String,
    pub emotion: Emotion,
    pub timestamp: Timestamp,
    pub position: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Cube,
    Sphere,
    Cylinder,
    Tv,
}

impl ObjectKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cube" => Some(ObjectKind::Cube),
            "sphere" => Some(ObjectKind::Sphere),
            "cylinder" => Some(ObjectKind::Cylinder),
            "tv" => Some(ObjectKind::Tv),
            _ => None,
        }
    }

    /// Wire name, as serde writes it.
    pub fn key(&self) -> &'static str {
        match self {
            ObjectKind::Cube => "cube",
            ObjectKind::Sphere => "sphere",
            ObjectKind::Cylinder => "cylinder",
            ObjectKind::Tv => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Cube => "Cubo",
            ObjectKind::Sphere => "Esfera",
            ObjectKind::Cylinder => "Cilindro",
            ObjectKind::Tv => "TV",
        }
    }
}

/// A decorative primitive placed inside a cell's environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object3D {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Object3D {
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
            color: DEFAULT_CELL_COLOR.to_string(),
            video_url: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyInfo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<SpotifyInfo>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            url: None,
            volume: Some(DEFAULT_AUDIO_VOLUME),
            is_enabled: true,
            spotify: None,
        }
    }
}

impl AudioConfig {
    /// Source to stream instead of the synthesized emotion tone, if any.
    /// A Spotify preview wins over a plain URL.
    pub fn stream_url(&self) -> Option<&str> {
        self.spotify
            .as_ref()
            .and_then(|s| s.preview_url.as_deref())
            .or(self.url.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: String,
    pub user_id: String,
    pub emotion: Emotion,
    pub intensity: f32,
    pub color: String,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
    #[serde(default)]
    pub glows: GlowList,
    #[serde(default)]
    pub objects: Vec<Object3D>,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
    pub last_update: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfig>,
}

impl Cell {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            emotion,
            intensity: 1.0,
            color: DEFAULT_CELL_COLOR.to_string(),
            fragments: Vec::new(),
            glows: GlowList::new(),
            objects: Vec::new(),
            position: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
            rotation: [0.0, 0.0, 0.0],
            last_update: Timestamp::default(),
            audio: Some(AudioConfig::default()),
        }
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio.as_ref().map(|a| a.is_enabled).unwrap_or(true)
    }

    pub fn total_glow_intensity(&self) -> f32 {
        self.glows.total_intensity()
    }
}

/// Development cell shown by the single-cell view before anything is loaded.
pub fn sample_cell(now: Timestamp) -> Cell {
    let mut cell = Cell::new("1", "1", Emotion::Excited);
    cell.last_update = now;
    cell.fragments = vec![
        Fragment {
            id: "1".into(),
            kind: FragmentKind::Text,
            content: "✨ Primeira memória".into(),
            emotion: Emotion::Happy,
            timestamp: now,
            position: [2.0, 0.0, 2.0],
        },
        Fragment {
            id: "2".into(),
            kind: FragmentKind::Sound,
            content: "🎵".into(),
            emotion: Emotion::Calm,
            timestamp: now,
            position: [-2.0, 0.0, -2.0],
        },
    ];
    cell
}

/// Short random id in base 36, nine characters.
pub fn random_id<R: rand::Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
