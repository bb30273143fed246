use glim_core::api::{
    endpoints, map_api_cell, map_api_vista_session, ApiCell, ApiVistaSession, AuthResponse,
    CellUpdate, Method,
};
use glim_core::emotion::Emotion;
use glim_core::error::{ApiError, MSG_NO_RESPONSE, MSG_UNAUTHORIZED};
use glim_core::model::{Object3D, ObjectKind, Timestamp};
use glim_core::vista::{VistaIntensity, DEFAULT_VISTA_MINUTES};

const BASE: &str = "http://localhost:3000/api";

fn now() -> Timestamp {
    Timestamp {
        seconds: 1_700_000_000,
        nanoseconds: 0,
    }
}

#[test]
fn unauthorized_maps_to_fixed_message() {
    let err = ApiError::from_status(401, "");
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), MSG_UNAUTHORIZED);
    assert_eq!(err.to_string(), "Não autorizado");
}

#[test]
fn no_response_has_its_own_message() {
    assert_eq!(ApiError::NoResponse.to_string(), MSG_NO_RESPONSE);
    assert_eq!(
        ApiError::NoResponse.to_string(),
        "Erro ao conectar com o servidor"
    );
    assert_eq!(ApiError::NoResponse.status(), None);
}

#[test]
fn server_error_field_overrides_defaults() {
    let err = ApiError::from_status(400, r#"{"error":"Email já cadastrado"}"#);
    assert_eq!(err.to_string(), "Email já cadastrado");
    assert_eq!(ApiError::from_status(400, "not json").to_string(), "Dados inválidos");
    assert_eq!(
        ApiError::from_status(404, "{}").to_string(),
        "Recurso não encontrado"
    );
}

#[test]
fn other_statuses_keep_their_code() {
    let err = ApiError::from_status(503, "");
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("503"));
    let with_msg = ApiError::from_status(500, r#"{"error":"boom"}"#);
    assert_eq!(with_msg.to_string(), "boom");
}

#[test]
fn auth_failures_prefer_server_text() {
    let fallback = "Erro ao fazer login";
    assert_eq!(
        ApiError::from_status(401, r#"{"error":"Senha incorreta"}"#).auth_message(fallback),
        "Senha incorreta"
    );
    assert_eq!(ApiError::NoResponse.auth_message(fallback), MSG_NO_RESPONSE);
    assert_eq!(ApiError::from_status(502, "").auth_message(fallback), fallback);
}

#[test]
fn api_cell_defaults_are_filled_in() {
    let json = r#"{
        "id": "c1",
        "userId": "u1",
        "emotion": "excited",
        "intensity": 0.7,
        "position": {"x": 1, "y": 2, "z": 3}
    }"#;
    let api: ApiCell = serde_json::from_str(json).unwrap();
    let cell = map_api_cell(api, now());
    assert_eq!(cell.emotion, Emotion::Excited);
    assert_eq!(cell.color, "#646cff");
    assert_eq!(cell.position, [1.0, 2.0, 3.0]);
    assert_eq!(cell.scale, [1.0; 3]);
    assert_eq!(cell.rotation, [0.0; 3]);
    assert!(cell.fragments.is_empty());
    assert!(cell.glows.is_empty());
    assert_eq!(cell.last_update, now());
    let audio = cell.audio.unwrap();
    assert!(audio.is_enabled);
    assert_eq!(audio.volume, Some(0.5));
}

#[test]
fn api_cell_keeps_backend_values() {
    let json = r##"{
        "id": "c2",
        "userId": "u2",
        "emotion": "zangado",
        "intensity": 1,
        "color": "#123456",
        "position": {"x": 0, "y": 0, "z": 0},
        "scale": {"x": 2, "y": 2, "z": 2},
        "objects": [
            {"id": "o1", "type": "tv", "position": [0,1,0], "rotation": [0,0,0],
             "scale": [1,1,1], "color": "#000000", "videoUrl": "https://youtu.be/dQw4w9WgXcQ"},
            {"id": "o2", "type": "shelf", "position": [0,0,0], "rotation": [0,0,0],
             "scale": [1,1,1], "color": "#000000"}
        ],
        "updatedAt": {"seconds": 1600000000, "nanoseconds": 5}
    }"##;
    let api: ApiCell = serde_json::from_str(json).unwrap();
    let cell = map_api_cell(api, now());
    assert_eq!(cell.emotion, Emotion::Neutral);
    assert_eq!(cell.color, "#123456");
    assert_eq!(cell.scale, [2.0; 3]);
    assert_eq!(cell.objects.len(), 1);
    assert_eq!(cell.objects[0].kind, ObjectKind::Tv);
    assert_eq!(cell.last_update.seconds, 1_600_000_000);
}

#[test]
fn auth_response_reads_photo_url() {
    let json = r#"{"token":"t","user":{"id":"1","email":"a@b.c","displayName":"A","photoURL":"p"}}"#;
    let auth: AuthResponse = serde_json::from_str(json).unwrap();
    assert_eq!(auth.user.photo_url.as_deref(), Some("p"));
    assert_eq!(auth.user.display_name, "A");
}

#[test]
fn auth_endpoints() {
    let login = endpoints::login("a@b.c", "pw");
    assert_eq!(login.method, Method::Post);
    assert_eq!(login.url(BASE), "http://localhost:3000/api/auth/login");
    assert_eq!(
        login.body_string().unwrap(),
        r#"{"email":"a@b.c","password":"pw"}"#
    );

    let reg = endpoints::register("a@b.c", "pw", "Ana");
    assert_eq!(reg.path, "/auth/register");
    assert_eq!(reg.body.unwrap()["displayName"], "Ana");
}

#[test]
fn cell_endpoints() {
    assert_eq!(endpoints::create_initial_cell().path, "/cells/initial");
    assert_eq!(endpoints::user_cells().method, Method::Get);

    let nearby = endpoints::nearby_cells([1.0, -2.5, 0.0], None);
    assert_eq!(nearby.url(BASE), format!("{BASE}/cells/nearby?x=1&y=-2.5&z=0"));
    let with_radius = endpoints::nearby_cells([0.0, 0.0, 0.0], Some(10.0));
    assert!(with_radius.url(BASE).ends_with("&radius=10"));

    let update = endpoints::update_cell("c 1", &CellUpdate::emotion(Emotion::Calm, now()));
    assert_eq!(update.method, Method::Put);
    assert_eq!(update.path, "/cells/c%201");
    let body = update.body.unwrap();
    assert_eq!(body["emotion"], "calm");
    assert_eq!(body["intensity"], 1.0);
    assert!(body.get("objects").is_none());

    let glow = endpoints::send_glow("c1", "curiosity", 1.0);
    assert_eq!(glow.path, "/cells/glow");
    assert_eq!(glow.body.unwrap()["cellId"], "c1");

    assert_eq!(endpoints::start_vista_session().path, "/cells/vista/start");
}

#[test]
fn saving_objects_sends_only_objects() {
    let objects = vec![Object3D::new("o1", ObjectKind::Cylinder)];
    let req = endpoints::update_cell("c1", &CellUpdate::objects(&objects));
    let body = req.body.unwrap();
    assert_eq!(body["objects"][0]["type"], "cylinder");
    assert!(body.get("emotion").is_none());
}

#[test]
fn user_endpoints() {
    assert_eq!(endpoints::profile("u1").path, "/users/u1/profile");
    assert_eq!(endpoints::preferences("u1").path, "/users/u1/preferences");
    assert_eq!(endpoints::stats("u1").path, "/users/u1/stats");
    assert_eq!(endpoints::follow("u2").method, Method::Post);
    assert_eq!(endpoints::unfollow("u2").method, Method::Delete);
    assert_eq!(
        endpoints::search_users("ana maria").url(BASE),
        format!("{BASE}/users/search?q=ana%20maria")
    );
    assert_eq!(
        endpoints::feed("u1", None, None).url(BASE),
        format!("{BASE}/users/u1/feed?page=1&limit=20")
    );
    assert_eq!(
        endpoints::feed("u1", Some(3), Some(5)).url(BASE),
        format!("{BASE}/users/u1/feed?page=3&limit=5")
    );
}

#[test]
fn vista_start_answer_becomes_a_session_hosted_by_the_own_cell() {
    let json = r#"{"id":"s1","userId":"u1","startTime":"2024-05-01T10:00:00.000Z","cells":[]}"#;
    let api: ApiVistaSession = serde_json::from_str(json).unwrap();
    assert_eq!(api.user_id, "u1");
    let (session, cells) = map_api_vista_session(api, "c1", now());
    assert_eq!(session.id, "s1");
    assert_eq!(session.host_cell_id, "c1");
    assert_eq!(session.visitor_cell_id, "c1");
    assert_eq!(session.intensity, VistaIntensity::Complete);
    assert_eq!(session.duration, DEFAULT_VISTA_MINUTES);
    assert_eq!(session.start_time.seconds, 1_714_557_600);
    assert!(session.sponsored_content.is_empty());
    assert!(cells.is_empty());
}

#[test]
fn vista_length_follows_end_time_and_bad_cells_are_skipped() {
    let json = r#"{
        "id": "s2",
        "startTime": {"_seconds": 1000, "_nanoseconds": 0},
        "endTime": "1970-01-01T00:31:40Z",
        "cells": [
            {"id":"n1","userId":"u2","emotion":"happy","intensity":1,"position":{"x":1,"y":2,"z":3}},
            {"id":"broken"}
        ]
    }"#;
    let api: ApiVistaSession = serde_json::from_str(json).unwrap();
    let (session, cells) = map_api_vista_session(api, "c1", now());
    assert_eq!(session.start_time.seconds, 1000);
    assert_eq!(session.duration, 15);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].id, "n1");
    assert_eq!(cells[0].position, [1.0, 2.0, 3.0]);
}

#[test]
fn vista_without_start_time_starts_now() {
    let api: ApiVistaSession = serde_json::from_str(r#"{"id":"s3"}"#).unwrap();
    let (session, _) = map_api_vista_session(api, "own", now());
    assert_eq!(session.start_time, now());
    assert_eq!(session.duration, DEFAULT_VISTA_MINUTES);
}

#[test]
fn cell_dates_accept_strings_millis_and_parts() {
    let json = r#"{"id":"c1","userId":"u1","emotion":"calm","intensity":1,
        "position":{"x":0,"y":0,"z":0},
        "createdAt":"2024-05-01T10:00:00.000Z","updatedAt":1714557600500}"#;
    let api: ApiCell = serde_json::from_str(json).unwrap();
    assert_eq!(api.created_at.unwrap().seconds, 1_714_557_600);
    let updated = api.updated_at.unwrap();
    assert_eq!(updated.seconds, 1_714_557_600);
    assert_eq!(updated.nanoseconds, 500_000_000);

    let parts: Timestamp = serde_json::from_str(r#"{"seconds":7,"nanoseconds":9}"#).unwrap();
    assert_eq!(parts, Timestamp { seconds: 7, nanoseconds: 9 });
    assert!(serde_json::from_str::<Timestamp>(r#""yesterday""#).is_err());
}

#[test]
fn unreadable_cell_date_does_not_sink_the_cell() {
    let json = r#"{"id":"c1","userId":"u1","emotion":"calm","intensity":1,
        "position":{"x":0,"y":0,"z":0},"updatedAt":"not a date"}"#;
    let api: ApiCell = serde_json::from_str(json).unwrap();
    assert!(api.updated_at.is_none());
    assert_eq!(map_api_cell(api, now()).last_update, now());
}

#[test]
fn object_kinds_go_out_as_lowercase_wire_keys() {
    let objects = [
        Object3D::new("o1", ObjectKind::Tv),
        Object3D::new("o2", ObjectKind::Cylinder),
    ];
    let body = serde_json::to_value(CellUpdate::objects(&objects)).unwrap();
    assert_eq!(body["objects"][0]["type"], "tv");
    assert_eq!(body["objects"][1]["type"], "cylinder");
    for kind in [ObjectKind::Cube, ObjectKind::Sphere, ObjectKind::Cylinder, ObjectKind::Tv] {
        assert_eq!(ObjectKind::parse(kind.key()), Some(kind));
        assert_eq!(serde_json::to_value(kind).unwrap(), kind.key());
    }
}
