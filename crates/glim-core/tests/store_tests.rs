use glim_core::emotion::Emotion;
use glim_core::glow::{Glow, GlowKind};
use glim_core::model::{Cell, Fragment, FragmentKind, Timestamp};
use glim_core::store::GlimStore;
use glim_core::vista::VistaIntensity;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn ts(secs: i64) -> Timestamp {
    Timestamp {
        seconds: secs,
        nanoseconds: 0,
    }
}

#[test]
fn mutations_without_a_cell_are_no_ops() {
    let mut store = GlimStore::new();
    store.update_emotion(Emotion::Happy, ts(1));
    store.add_glow(Glow::new(GlowKind::Impact, "x", ts(1)), ts(1));
    assert!(!store.toggle_audio());
    assert!(store.expire_glows(ts(10)).is_empty());
    assert!(store.current_cell().is_none());
}

#[test]
fn update_emotion_stamps_last_update() {
    let mut store = GlimStore::new();
    store.set_current_cell(Cell::new("c1", "u1", Emotion::Calm));
    store.update_emotion(Emotion::Excited, ts(42));
    let cell = store.current_cell().unwrap();
    assert_eq!(cell.emotion, Emotion::Excited);
    assert_eq!(cell.last_update, ts(42));
}

#[test]
fn glows_come_and_go() {
    let mut store = GlimStore::new();
    store.set_current_cell(Cell::new("c1", "u1", Emotion::Happy));
    store.add_glow(Glow::new(GlowKind::Empathy, "visitor", ts(5)), ts(5));
    assert_eq!(store.current_cell().unwrap().glows.len(), 1);
    assert_eq!(store.expire_glows(ts(8)).len(), 1);
    assert!(store.current_cell().unwrap().glows.is_empty());
}

#[test]
fn fragments_append() {
    let mut store = GlimStore::new();
    store.set_current_cell(Cell::new("c1", "u1", Emotion::Happy));
    store.add_fragment(
        Fragment {
            id: "f".into(),
            kind: FragmentKind::Text,
            content: "oi".into(),
            emotion: Emotion::Happy,
            timestamp: ts(3),
            position: [1.0, 0.0, 1.0],
        },
        ts(3),
    );
    assert_eq!(store.current_cell().unwrap().fragments.len(), 1);
}

#[test]
fn audio_toggle_and_spotify_preview() {
    let mut store = GlimStore::new();
    store.set_current_cell(Cell::new("c1", "u1", Emotion::Happy));
    assert!(!store.toggle_audio());
    assert!(store.toggle_audio());

    store.set_spotify_preview("https://open.spotify.com/track/abc", None);
    assert!(store.current_cell().unwrap().audio.as_ref().unwrap().spotify.is_none());

    store.set_spotify_preview(
        "https://open.spotify.com/track/abc",
        Some("https://p.scdn.co/x.mp3".into()),
    );
    let audio = store.current_cell().unwrap().audio.clone().unwrap();
    assert_eq!(audio.stream_url(), Some("https://p.scdn.co/x.mp3"));
}

#[test]
fn vista_session_lifecycle() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut store = GlimStore::new();
    store.set_current_cell(Cell::new("mine", "u1", Emotion::Calm));
    let session = store
        .start_vista_session("host", VistaIntensity::Light, 15, ts(0), &mut rng)
        .clone();
    assert_eq!(session.visitor_cell_id, "mine");
    assert_eq!(session.id.len(), 9);
    assert!(store.vista.is_active);
    assert!(!session.is_over(ts(60 * 14)));
    assert!(session.is_over(ts(60 * 15)));

    store.end_vista_session();
    assert!(!store.vista.is_active);
    assert!(store.vista.session.is_none());
}

#[test]
fn nearby_cells_are_replaced_by_id() {
    let mut store = GlimStore::new();
    store.set_nearby_cells(vec![
        Cell::new("a", "u1", Emotion::Sad),
        Cell::new("b", "u2", Emotion::Sad),
    ]);
    store.update_nearby_cell(Cell::new("b", "u2", Emotion::Happy));
    store.update_nearby_cell(Cell::new("zzz", "u3", Emotion::Happy));
    assert_eq!(store.nearby_cells().len(), 2);
    assert_eq!(store.nearby_cell("b").unwrap().emotion, Emotion::Happy);
    assert_eq!(store.nearby_cell("a").unwrap().emotion, Emotion::Sad);
    assert!(store.nearby_cell("zzz").is_none());
}

#[test]
fn update_reaches_every_nearby_cell_sharing_an_id() {
    let mut store = GlimStore::new();
    store.set_nearby_cells(vec![
        Cell::new("a", "u1", Emotion::Sad),
        Cell::new("b", "u2", Emotion::Sad),
        Cell::new("a", "u1", Emotion::Sad),
    ]);
    store.update_nearby_cell(Cell::new("a", "u1", Emotion::Happy));
    let emotions: Vec<Emotion> = store.nearby_cells().iter().map(|c| c.emotion).collect();
    assert_eq!(emotions, vec![Emotion::Happy, Emotion::Sad, Emotion::Happy]);
    assert_eq!(store.nearby_cell("a").unwrap().emotion, Emotion::Happy);
}

#[test]
fn lookup_resolves_to_the_first_duplicate() {
    let mut store = GlimStore::new();
    store.set_nearby_cells(vec![
        Cell::new("a", "u1", Emotion::Sad),
        Cell::new("a", "u9", Emotion::Happy),
    ]);
    assert_eq!(store.nearby_cell("a").unwrap().user_id, "u1");
}

#[test]
fn merging_appends_only_unknown_cells() {
    let mut store = GlimStore::new();
    store.set_nearby_cells(vec![Cell::new("a", "u1", Emotion::Sad)]);
    store.merge_nearby_cells(vec![
        Cell::new("a", "u1", Emotion::Happy),
        Cell::new("c", "u3", Emotion::Happy),
    ]);
    assert_eq!(store.nearby_cells().len(), 2);
    assert_eq!(store.nearby_cell("a").unwrap().emotion, Emotion::Sad);
    assert_eq!(store.nearby_cell("c").unwrap().user_id, "u3");
}
