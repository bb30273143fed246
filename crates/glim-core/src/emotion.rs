//! Canonical emotion set and the lookup tables keyed by it.
//!
//! The set is the six English keys. Any other key (including the legacy
//! Portuguese ones) resolves to `Neutral`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Calm,
    Excited,
    Neutral,
}

/// Sound of the emotion's base tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioProfile {
    pub gain: f32,
    pub frequency_hz: f32,
}

pub const NEUTRAL_COLOR: &str = "#808080";

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Calm,
        Emotion::Excited,
        Emotion::Neutral,
    ];

    /// Emotions offered by the mood buttons.
    pub const SELECTABLE: [Emotion; 3] = [Emotion::Happy, Emotion::Excited, Emotion::Calm];

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "calm" => Some(Emotion::Calm),
            "excited" => Some(Emotion::Excited),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    /// Lenient parse used for backend data.
    pub fn from_key(key: &str) -> Self {
        Self::parse(key).unwrap_or(Emotion::Neutral)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Calm => "calm",
            Emotion::Excited => "excited",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Emotion::Happy => "#FFD700",
            Emotion::Sad => "#4169E1",
            Emotion::Angry => "#FF4500",
            Emotion::Calm => "#98FB98",
            Emotion::Excited => "#FF69B4",
            Emotion::Neutral => NEUTRAL_COLOR,
        }
    }

    pub fn color_rgb(&self) -> [f32; 3] {
        parse_hex_color(self.color_hex()).unwrap_or([0.5, 0.5, 0.5])
    }

    /// Drives both pulse speed and amplitude of a cell sphere.
    pub fn pulse_factor(&self) -> f32 {
        match self {
            Emotion::Happy => 1.2,
            Emotion::Sad => 0.8,
            Emotion::Angry => 1.4,
            Emotion::Calm => 0.6,
            Emotion::Excited => 1.5,
            Emotion::Neutral => 1.0,
        }
    }

    pub fn audio_profile(&self) -> AudioProfile {
        let (gain, frequency_hz) = match self {
            Emotion::Happy => (0.8, 440.0),
            Emotion::Excited => (1.0, 523.25),
            Emotion::Calm => (0.5, 329.63),
            Emotion::Sad => (0.4, 293.66),
            Emotion::Angry => (0.9, 196.0),
            Emotion::Neutral => (0.6, 392.0),
        };
        AudioProfile { gain, frequency_hz }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊 Feliz",
            Emotion::Sad => "😢 Triste",
            Emotion::Angry => "😠 Irritado",
            Emotion::Calm => "😌 Calmo",
            Emotion::Excited => "✨ Empolgado",
            Emotion::Neutral => "😐 Neutro",
        }
    }
}

impl From<String> for Emotion {
    fn from(s: String) -> Self {
        Emotion::from_key(&s)
    }
}

impl From<Emotion> for &'static str {
    fn from(e: Emotion) -> Self {
        e.key()
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Color for an arbitrary emotion key, falling back to neutral gray.
pub fn emotion_color(key: &str) -> &'static str {
    Emotion::parse(key)
        .map(|e| e.color_hex())
        .unwrap_or(NEUTRAL_COLOR)
}

/// `#RRGGBB` (or `RRGGBB`) to linear-ish 0..1 floats. No gamma handling.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let s = hex.trim().trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Base gain scaled by the glows currently attached to the cell, then
/// attenuated for the oscillator.
pub fn target_gain(emotion: Emotion, total_glow_intensity: f32) -> f32 {
    emotion.audio_profile().gain * (1.0 + total_glow_intensity * 0.2) * 0.1
}
