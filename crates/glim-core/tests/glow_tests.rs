use glam::Vec3;
use glim_core::glow::{Glow, GlowKind, GlowList, GlowParticle, GLOW_SPAWN_RADIUS};
use glim_core::model::Timestamp;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn at(secs: f64) -> Timestamp {
    Timestamp::from_millis(secs * 1000.0)
}

#[test]
fn pushing_a_glow_grows_the_list_by_one() {
    let mut list = GlowList::new();
    list.push(Glow::new(GlowKind::Impact, "visitor", at(10.0)));
    assert_eq!(list.len(), 1);
    list.push(Glow::new(GlowKind::Empathy, "visitor", at(10.5)));
    assert_eq!(list.len(), 2);
}

#[test]
fn glow_is_removed_exactly_once_after_three_seconds() {
    let mut list = GlowList::new();
    list.push(Glow::new(GlowKind::Curiosity, "visitor", at(100.0)));

    assert!(list.expire(at(102.9)).is_empty());
    assert_eq!(list.len(), 1);

    let expired = list.expire(at(103.0));
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].kind, GlowKind::Curiosity);
    assert!(list.is_empty());

    assert!(list.expire(at(200.0)).is_empty());
}

#[test]
fn expiry_keeps_younger_glows() {
    let mut list = GlowList::new();
    list.push(Glow::new(GlowKind::Impact, "a", at(0.0)));
    list.push(Glow::new(GlowKind::Connection, "b", at(2.0)));
    let expired = list.expire(at(3.5));
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].from_cell_id, "a");
    assert_eq!(list.len(), 1);
    assert!((list.total_intensity() - 1.0).abs() < 1e-6);
}

#[test]
fn custom_window_is_honoured() {
    let mut list = GlowList::new();
    list.push(Glow::new(GlowKind::Impact, "a", at(0.0)));
    assert!(list.expire_after(at(4.0), 5.0).is_empty());
    assert_eq!(list.expire_after(at(5.0), 5.0).len(), 1);
}

#[test]
fn particle_spawns_on_sphere_and_moves_toward_target() {
    let mut rng = StdRng::seed_from_u64(7);
    let glow = Glow::new(GlowKind::Impact, "visitor", at(0.0));
    let center = Vec3::new(1.0, 2.0, 3.0);
    let mut p = GlowParticle::spawn(&glow, center, &mut rng);
    let d0 = (p.position - center).length();
    assert!((d0 - GLOW_SPAWN_RADIUS).abs() < 1e-3);

    p.step(center, 0.5);
    let d1 = (p.position - center).length();
    // impact speed 2.0 * intensity 1.0 * dt 0.5
    assert!((d0 - d1 - 1.0).abs() < 1e-3);
}

#[test]
fn particle_at_target_stays_put() {
    let glow = Glow::new(GlowKind::Empathy, "x", at(0.0));
    let mut p = GlowParticle {
        key: glow.key(),
        kind: glow.kind,
        intensity: 1.0,
        position: Vec3::ZERO,
    };
    p.step(Vec3::ZERO, 1.0);
    assert_eq!(p.position, Vec3::ZERO);
}

#[test]
fn kind_table_matches_the_looks() {
    assert_eq!(GlowKind::Curiosity.color_hex(), "#00ffff");
    assert_eq!(GlowKind::Connection.properties().size, 0.25);
    assert_eq!(GlowKind::Impact.emoji(), "🔥");
    assert_eq!(GlowKind::parse("EMPATHY"), Some(GlowKind::Empathy));
    assert_eq!(GlowKind::parse("happy"), None);
}

#[test]
fn glows_from_one_sender_in_the_same_millisecond_get_their_own_particles() {
    let mut rng = StdRng::seed_from_u64(3);
    let first = Glow::new(GlowKind::Impact, "a", at(1.0));
    let second = Glow::new(GlowKind::Empathy, "a", at(1.0));
    assert_ne!(first.key(), second.key());

    let mut particles: Vec<GlowParticle> = Vec::new();
    for glow in [&first, &second, &first] {
        let key = glow.key();
        if !particles.iter().any(|p| p.key == key) {
            particles.push(GlowParticle::spawn(glow, Vec3::ZERO, &mut rng));
        }
    }
    assert_eq!(particles.len(), 2);
}

#[test]
fn decoded_glows_are_told_apart_but_compare_by_content() {
    let json = r#"{"type":"impact","intensity":1.0,"timestamp":{"seconds":5,"nanoseconds":0},"fromCellId":"a"}"#;
    let one: Glow = serde_json::from_str(json).unwrap();
    let two: Glow = serde_json::from_str(json).unwrap();
    assert_eq!(one, two);
    assert_ne!(one.key(), two.key());
    assert_eq!(one.clone().key(), one.key());
}
