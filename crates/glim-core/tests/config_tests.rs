use glim_core::config::{AppConfig, DEFAULT_API_BASE_URL};

#[test]
fn defaults_match_the_built_in_constants() {
    let c = AppConfig::default();
    assert_eq!(c.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(c.glow_display_secs, 3.0);
    assert_eq!(c.focus_unlock_secs, 1.0);
    assert_eq!(c.orbit_radius, 3.0);
    assert_eq!(c.orbit_speed, 0.5);
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let c = AppConfig::resolve(Some(r#"{"orbitRadius": 4.5}"#), None);
    assert_eq!(c.orbit_radius, 4.5);
    assert_eq!(c.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn api_url_tag_wins_and_trailing_slash_is_trimmed() {
    let c = AppConfig::resolve(
        Some(r#"{"apiBaseUrl": "http://a/api"}"#),
        Some("https://glim.example/api/"),
    );
    assert_eq!(c.api_base_url, "https://glim.example/api");
}

#[test]
fn broken_or_nonsense_values_fall_back() {
    let c = AppConfig::resolve(Some("{oops"), None);
    assert_eq!(c, AppConfig::default());
    let c = AppConfig::resolve(Some(r#"{"glowDisplaySecs": -1, "orbitRadius": 0}"#), None);
    assert_eq!(c.glow_display_secs, 3.0);
    assert_eq!(c.orbit_radius, 3.0);
}
