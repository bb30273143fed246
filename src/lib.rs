#![cfg(target_arch = "wasm32")]
use crate::app::App;
use crate::constants::{CANVAS_ID, META_API_URL, META_CONFIG};
use glim_core::config::AppConfig;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod http;
mod input;
mod markup;
mod overlay;
mod pages;
mod render;
mod router;
mod services;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glim-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = AppConfig::resolve(
        dom::meta_content(&document, META_CONFIG).as_deref(),
        dom::meta_content(&document, META_API_URL).as_deref(),
    );
    log::info!("[config] api {}", config.api_base_url);
    let app = Rc::new(RefCell::new(App::new(config, storage::LocalStore::open())));

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    // Keep the backing store at CSS size * devicePixelRatio.
    dom::wire_canvas_resize(&canvas);

    events::wire_pointer_handlers(&app, &canvas);
    events::wire_fly_keys(&app);
    router::wire_hashchange(&app);
    router::navigate(&app);

    // Pages work without a GPU; the loop still advances state.
    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
