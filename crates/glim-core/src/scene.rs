//! Turns records into drawable instances for one frame.
//!
//! The renderer draws camera-facing impostors, so an instance only needs a
//! center, a half-size, a color and the silhouette to shade.

use super::animation::{orbit_phase, orbit_position_with_phase, pulse_scale, Pulse};
use super::emotion::parse_hex_color;
use super::glow::GlowParticle;
use super::model::{Cell, Fragment, FragmentKind, Object3D, ObjectKind, DEFAULT_CELL_COLOR};
use glam::{Vec2, Vec3};

pub const CELL_RADIUS: f32 = 1.0;
pub const VISTA_CELL_RADIUS: f32 = 0.5;
const VISTA_CELL_ALPHA: f32 = 0.8;
const HOVER_EMISSIVE: f32 = 0.5;
const SELECTED_EMISSIVE: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Sphere,
    Box,
    Cylinder,
}

impl Shape {
    pub fn id(self) -> u32 {
        match self {
            Shape::Sphere => 0,
            Shape::Box => 1,
            Shape::Cylinder => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneInstance {
    pub position: Vec3,
    /// Half width and half height of the silhouette.
    pub half_size: Vec2,
    pub color: [f32; 4],
    pub shape: Shape,
    pub emissive: f32,
    /// Self-rotation about Y, used for shading only.
    pub spin: f32,
}

impl SceneInstance {
    pub fn sphere(position: Vec3, radius: f32, rgb: [f32; 3]) -> Self {
        Self {
            position,
            half_size: Vec2::splat(radius),
            color: [rgb[0], rgb[1], rgb[2], 1.0],
            shape: Shape::Sphere,
            emissive: 0.0,
            spin: 0.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color[3] = alpha;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Bounding radius used for picking.
    pub fn bounding_radius(&self) -> f32 {
        self.half_size.max_element()
    }
}

/// Per-frame inputs for the single-cell view.
#[derive(Clone, Copy, Debug)]
pub struct CellFrame {
    pub elapsed: f32,
    pub cell_spin: f32,
    pub fragment_spin: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
}

/// Main sphere, orbiting fragments and glow particles of one cell.
pub fn compose_cell(
    cell: &Cell,
    frame: &CellFrame,
    particles: &[GlowParticle],
    out: &mut Vec<SceneInstance>,
) {
    let center = Vec3::from_array(cell.position);
    let scale = pulse_scale(cell.emotion, frame.elapsed);
    out.push(
        SceneInstance::sphere(center, CELL_RADIUS * scale, cell.emotion.color_rgb())
            .with_emissive(0.2)
            .with_spin(frame.cell_spin),
    );

    let count = cell.fragments.len();
    for (i, fragment) in cell.fragments.iter().enumerate() {
        let offset = orbit_position_with_phase(
            frame.orbit_radius,
            frame.orbit_speed,
            fragment.position[1],
            frame.elapsed,
            orbit_phase(i, count),
        );
        out.push(fragment_instance(fragment, center + offset, frame.fragment_spin));
    }

    for p in particles {
        out.push(glow_instance(p, frame.elapsed));
    }
}

fn fragment_instance(fragment: &Fragment, position: Vec3, spin: f32) -> SceneInstance {
    let (shape, half, rgb, alpha, emissive) = match fragment.kind {
        FragmentKind::Text => (Shape::Box, Vec2::new(0.5, 0.25), [1.0, 1.0, 1.0], 1.0, 0.3),
        FragmentKind::Image => (Shape::Box, Vec2::new(0.5, 0.5), [1.0, 1.0, 1.0], 1.0, 0.0),
        FragmentKind::Sound => (Shape::Sphere, Vec2::splat(0.3), [1.0, 0.0, 0.0], 0.8, 0.5),
        FragmentKind::Video => (Shape::Box, Vec2::new(0.6, 0.35), [0.15, 0.15, 0.18], 1.0, 0.1),
        FragmentKind::Ai => (Shape::Box, Vec2::splat(0.25), [0.0, 1.0, 0.0], 0.9, 0.3),
    };
    SceneInstance {
        position,
        half_size: half,
        color: [rgb[0], rgb[1], rgb[2], alpha],
        shape,
        emissive,
        spin,
    }
}

pub fn glow_instance(particle: &GlowParticle, elapsed: f32) -> SceneInstance {
    SceneInstance::sphere(
        particle.position,
        particle.radius() * particle.pulse_scale(elapsed),
        particle.kind.color_rgb(),
    )
    .with_alpha(0.8)
    .with_emissive(2.0)
}

/// The vista shows every cell as a small translucent sphere with a shared
/// pulse. `hovered` indexes into `cells`.
pub fn compose_vista(
    cells: &[&Cell],
    elapsed: f32,
    spin: f32,
    hovered: Option<usize>,
    out: &mut Vec<SceneInstance>,
) {
    let scale = Pulse::VISTA.scale_at(elapsed);
    for (i, cell) in cells.iter().enumerate() {
        let emissive = if hovered == Some(i) { HOVER_EMISSIVE } else { 0.0 };
        out.push(
            SceneInstance::sphere(
                Vec3::from_array(cell.position),
                VISTA_CELL_RADIUS * scale,
                cell.emotion.color_rgb(),
            )
            .with_alpha(VISTA_CELL_ALPHA)
            .with_emissive(emissive)
            .with_spin(spin),
        );
    }
}

/// Environment objects around the origin. The selected object is lit up.
pub fn compose_objects(objects: &[Object3D], selected: Option<&str>, out: &mut Vec<SceneInstance>) {
    for obj in objects {
        let mut inst = object_instance(obj);
        if selected == Some(obj.id.as_str()) {
            inst.emissive = SELECTED_EMISSIVE;
        }
        out.push(inst);
    }
}

pub fn object_instance(obj: &Object3D) -> SceneInstance {
    let [sx, sy, _] = obj.scale;
    let rgb = parse_hex_color(&obj.color)
        .or_else(|| parse_hex_color(DEFAULT_CELL_COLOR))
        .unwrap_or([0.4, 0.42, 1.0]);
    let (shape, half) = match obj.kind {
        // Unit box and cylinder are one unit tall; the sphere has radius one.
        ObjectKind::Cube => (Shape::Box, Vec2::new(0.5 * sx, 0.5 * sy)),
        ObjectKind::Sphere => (Shape::Sphere, Vec2::new(sx, sy)),
        ObjectKind::Cylinder => (Shape::Cylinder, Vec2::new(sx, 0.5 * sy)),
        ObjectKind::Tv => (Shape::Box, Vec2::new(0.8 * sx, 0.5 * sy)),
    };
    SceneInstance {
        position: Vec3::from_array(obj.position),
        half_size: half.abs(),
        color: [rgb[0], rgb[1], rgb[2], 1.0],
        shape,
        emissive: if obj.kind == ObjectKind::Tv && obj.video_url.is_some() {
            0.3
        } else {
            0.0
        },
        spin: obj.rotation[1],
    }
}

/// Index of the nearest instance hit by a ray, using bounding spheres.
pub fn pick(instances: &[SceneInstance], origin: Vec3, dir: Vec3) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, inst) in instances.iter().enumerate() {
        if let Some(t) = ray_sphere_t(origin, dir, inst.position, inst.bounding_radius()) {
            if best.map_or(true, |(_, bt)| t < bt) {
                best = Some((i, t));
            }
        }
    }
    best.map(|(i, _)| i)
}

fn ray_sphere_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = -b - sq;
    let t1 = -b + sq;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}
