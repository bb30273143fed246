use glim_core::model::Timestamp;
use glim_core::user::{UserProfile, UserStats, Visibility};

#[test]
fn profile_with_iso_dates_decodes() {
    let json = r#"{
        "userId": "u1",
        "username": "ana",
        "displayName": "Ana",
        "visibility": "public",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:01.250Z"
    }"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.visibility, Visibility::Public);
    assert_eq!(
        profile.created_at,
        Some(Timestamp {
            seconds: 1_714_557_600,
            nanoseconds: 0
        })
    );
    assert_eq!(profile.updated_at.unwrap().nanoseconds, 250_000_000);
}

#[test]
fn profile_with_unreadable_or_null_dates_still_decodes() {
    let json = r#"{"userId":"u1","username":"ana","displayName":"Ana",
        "createdAt":"soon","updatedAt":null}"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert!(profile.created_at.is_none());
    assert!(profile.updated_at.is_none());
}

#[test]
fn stats_last_active_accepts_string_and_firestore_parts() {
    let iso: UserStats =
        serde_json::from_str(r#"{"userId":"u1","followers":3,"lastActive":"2024-05-01T10:00:00Z"}"#)
            .unwrap();
    assert_eq!(iso.followers, 3);
    assert_eq!(iso.last_active.unwrap().seconds, 1_714_557_600);

    let parts: UserStats = serde_json::from_str(
        r#"{"userId":"u1","lastActive":{"_seconds":42,"_nanoseconds":7}}"#,
    )
    .unwrap();
    assert_eq!(
        parts.last_active,
        Some(Timestamp {
            seconds: 42,
            nanoseconds: 7
        })
    );
}
