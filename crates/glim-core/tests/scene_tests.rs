use glam::Vec3;
use glim_core::emotion::Emotion;
use glim_core::glow::{Glow, GlowKind, GlowParticle};
use glim_core::model::{sample_cell, Cell, Object3D, ObjectKind, Timestamp};
use glim_core::scene::{compose_cell, compose_objects, compose_vista, pick, CellFrame, Shape};

fn frame(elapsed: f32) -> CellFrame {
    CellFrame {
        elapsed,
        cell_spin: 0.0,
        fragment_spin: 0.0,
        orbit_radius: 3.0,
        orbit_speed: 0.5,
    }
}

#[test]
fn cell_view_has_sphere_fragments_and_particles() {
    let cell = sample_cell(Timestamp::default());
    let glow = Glow::new(GlowKind::Impact, "visitor", Timestamp::default());
    let particle = GlowParticle {
        key: glow.key(),
        kind: glow.kind,
        intensity: 1.0,
        position: Vec3::new(5.0, 0.0, 0.0),
    };
    let mut out = Vec::new();
    compose_cell(&cell, &frame(0.0), &[particle], &mut out);
    assert_eq!(out.len(), 1 + 2 + 1);
    assert_eq!(out[0].shape, Shape::Sphere);
    assert_eq!(out[0].half_size.x, 1.0);
    // First fragment at angle zero sits on +X at its own height.
    assert_eq!(out[1].position, Vec3::new(3.0, 0.0, 0.0));
    // Sound fragment is a red sphere.
    assert_eq!(out[2].shape, Shape::Sphere);
    assert_eq!(out[3].half_size.x, 0.4);
}

#[test]
fn vista_marks_hovered_cell() {
    let a = Cell::new("a", "u", Emotion::Happy);
    let mut b = Cell::new("b", "u", Emotion::Sad);
    b.position = [3.0, 0.0, 0.0];
    let mut out = Vec::new();
    compose_vista(&[&a, &b], 0.0, 0.0, Some(1), &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].emissive, 0.0);
    assert!(out[1].emissive > 0.0);
    assert_eq!(out[1].half_size.x, 0.5);
    assert_eq!(out[0].color[3], 0.8);
}

#[test]
fn objects_use_their_shape_and_color() {
    let mut cube = Object3D::new("c", ObjectKind::Cube);
    cube.color = "#ff0000".into();
    let cyl = Object3D::new("y", ObjectKind::Cylinder);
    let mut out = Vec::new();
    compose_objects(&[cube, cyl], Some("y"), &mut out);
    assert_eq!(out[0].shape, Shape::Box);
    assert_eq!(out[0].color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(out[1].shape, Shape::Cylinder);
    assert!(out[1].emissive > 0.0);
}

#[test]
fn pick_returns_nearest_hit() {
    let a = Cell::new("a", "u", Emotion::Happy);
    let mut b = Cell::new("b", "u", Emotion::Happy);
    b.position = [0.0, 0.0, -5.0];
    let mut out = Vec::new();
    compose_vista(&[&b, &a], 0.0, 0.0, None, &mut out);
    let hit = pick(&out, Vec3::new(0.0, 0.0, 8.0), Vec3::NEG_Z);
    assert_eq!(hit, Some(1));
    assert_eq!(pick(&out, Vec3::new(0.0, 0.0, 8.0), Vec3::X), None);
}
