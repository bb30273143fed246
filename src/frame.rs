use crate::app::{App, AppHandle, SceneMode};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::pages;
use crate::render;
use crate::services;
use glam::Vec3;
use glim_core::animation::{cell_spin_delta, FRAGMENT_SPIN_PER_FRAME, VISTA_SPIN_PER_FRAME};
use glim_core::camera::FLY_MOVE_SPEED;
use glim_core::glow::GlowParticle;
use glim_core::scene::{compose_cell, compose_objects, compose_vista, CellFrame};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: AppHandle,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let mut app = self.app.borrow_mut();
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            app.aspect = g.aspect();
        }

        step(&mut app, dt_sec);

        if let Some(g) = &mut self.gpu {
            let camera = app.camera();
            if let Err(e) = g.render(dt_sec, &camera, &app.instances) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Advance the active scene by one frame and compose its instances.
pub fn step(app: &mut App, dt_sec: f32) {
    app.elapsed += dt_sec;
    app.instances.clear();
    app.pickable = 0;
    match app.mode {
        SceneMode::Idle => app.rig.update(),
        SceneMode::Cell => step_cell(app, dt_sec),
        SceneMode::Vista => step_vista(app),
        SceneMode::Environment => step_environment(app),
    }
}

fn step_cell(app: &mut App, dt_sec: f32) {
    app.rig.update();

    let expired = app
        .store
        .expire_glows_after(services::now(), app.config.glow_display_secs);
    if !expired.is_empty() {
        app.particles
            .retain(|p| !expired.iter().any(|g| g.key() == p.key));
    }

    let App {
        store,
        particles,
        rng,
        audio,
        audio_active,
        instances,
        cell_spin,
        fragment_spin,
        config,
        elapsed,
        ..
    } = app;
    let Some(cell) = store.current_cell() else {
        return;
    };
    let center = Vec3::from_array(cell.position);
    for glow in &cell.glows {
        let key = glow.key();
        if !particles.iter().any(|p| p.key == key) {
            particles.push(GlowParticle::spawn(glow, center, rng));
        }
    }
    for p in particles.iter_mut() {
        p.step(center, dt_sec);
    }

    cell_spin.advance(cell_spin_delta(cell.emotion, dt_sec));
    fragment_spin.advance(FRAGMENT_SPIN_PER_FRAME);
    let frame = CellFrame {
        elapsed: *elapsed,
        cell_spin: cell_spin.angle,
        fragment_spin: fragment_spin.angle,
        orbit_radius: config.orbit_radius,
        orbit_speed: config.orbit_speed,
    };
    compose_cell(cell, &frame, particles, instances);

    if let Some(audio) = audio.as_mut() {
        let active = *audio_active && cell.audio_enabled();
        let stream = cell.audio.as_ref().and_then(|a| a.stream_url());
        audio.sync(active, cell.emotion, stream);
        audio.follow_glows(cell.emotion, cell.total_glow_intensity());
    }
}

fn step_vista(app: &mut App) {
    app.focus.tick(services::now_sec(), &mut app.rig);
    if app.focus.controls_enabled() && app.fly.any() {
        let d = app
            .fly
            .displacement(app.rig.forward(), Vec3::Y, FLY_MOVE_SPEED);
        app.rig.translate(d);
    }
    app.rig.update();
    app.vista_spin.advance(VISTA_SPIN_PER_FRAME);
    if app.shown_focus != Some(app.focus.is_focused) {
        app.shown_focus = Some(app.focus.is_focused);
        pages::vista::show_focus_state(app.focus.is_focused);
    }

    let mut instances = std::mem::take(&mut app.instances);
    let cells = app.vista_cells();
    compose_vista(&cells, app.elapsed, app.vista_spin.angle, app.hovered, &mut instances);
    let n = instances.len();
    app.instances = instances;
    app.pickable = n;
}

fn step_environment(app: &mut App) {
    app.rig.update();
    if let Some(editor) = &app.editor {
        compose_objects(editor.objects(), editor.selected_id(), &mut app.instances);
    }
    app.pickable = app.instances.len();
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
