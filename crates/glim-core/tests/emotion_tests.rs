use glim_core::emotion::{emotion_color, parse_hex_color, target_gain, Emotion, NEUTRAL_COLOR};

#[test]
fn every_emotion_key_has_its_color() {
    let expected = [
        ("happy", "#FFD700"),
        ("sad", "#4169E1"),
        ("angry", "#FF4500"),
        ("calm", "#98FB98"),
        ("excited", "#FF69B4"),
        ("neutral", "#808080"),
    ];
    for (key, hex) in expected {
        assert_eq!(emotion_color(key), hex, "color for {key}");
    }
}

#[test]
fn unknown_keys_fall_back_to_neutral() {
    for key in ["", "bored", "feliz", "calmo", "HAPPYISH"] {
        assert_eq!(emotion_color(key), NEUTRAL_COLOR, "fallback for {key:?}");
    }
    assert_eq!(Emotion::from_key("feliz"), Emotion::Neutral);
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(Emotion::parse("Happy"), Some(Emotion::Happy));
    assert_eq!(Emotion::parse(" CALM "), Some(Emotion::Calm));
    assert_eq!(Emotion::parse("nope"), None);
}

#[test]
fn emotion_serializes_as_lowercase_key() {
    let json = serde_json::to_string(&Emotion::Excited).unwrap();
    assert_eq!(json, "\"excited\"");
    let back: Emotion = serde_json::from_str("\"sad\"").unwrap();
    assert_eq!(back, Emotion::Sad);
    let unknown: Emotion = serde_json::from_str("\"triste\"").unwrap();
    assert_eq!(unknown, Emotion::Neutral);
}

#[test]
fn hex_colors_parse_to_unit_floats() {
    let rgb = parse_hex_color("#FF8000").unwrap();
    assert!((rgb[0] - 1.0).abs() < 1e-6);
    assert!((rgb[1] - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(rgb[2], 0.0);
    assert!(parse_hex_color("#fff").is_none());
    assert!(parse_hex_color("zzzzzz").is_none());
}

#[test]
fn glows_raise_the_target_gain() {
    let quiet = target_gain(Emotion::Happy, 0.0);
    assert!((quiet - 0.08).abs() < 1e-6);
    let loud = target_gain(Emotion::Happy, 2.0);
    assert!((loud - 0.8 * 1.4 * 0.1).abs() < 1e-6);
}

#[test]
fn selectable_emotions_are_the_mood_buttons() {
    assert_eq!(
        Emotion::SELECTABLE,
        [Emotion::Happy, Emotion::Excited, Emotion::Calm]
    );
    assert_eq!(Emotion::Excited.audio_profile().frequency_hz, 523.25);
}
