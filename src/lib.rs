#![cfg(target_arch = "wasm32")]
use glam::Vec3;
use morph_core::{
    AnchorPose, Camera, EqualizerConfig, EventBus, MorphConfig, MorphController, UiState,
    EQUALIZER_SPHERE_RADIUS,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod tracking;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ar-morph-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Hand the anchor's model-view matrix (16 column-major floats) to the renderer.
#[wasm_bindgen]
pub fn set_anchor_matrix(model_view: &[f32]) -> bool {
    let Some(m) = AnchorPose::matrix_from_slice(model_view) else {
        log::warn!("[tracking] ignoring anchor matrix of {} values", model_view.len());
        return false;
    };
    tracking::shared().borrow_mut().set_model_view(m);
    true
}

/// Hand the tracking camera's projection matrix to the renderer.
#[wasm_bindgen]
pub fn set_projection_matrix(projection: &[f32]) -> bool {
    let Some(m) = AnchorPose::matrix_from_slice(projection) else {
        log::warn!("[tracking] ignoring projection of {} values", projection.len());
        return false;
    };
    tracking::shared().borrow_mut().pose.projection = Some(m);
    true
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

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::wire_canvas_resize(&canvas);

    let audio_el: web::HtmlAudioElement = document
        .get_element_by_id(AUDIO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", AUDIO_ID))?
        .dyn_into::<web::HtmlAudioElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut config = MorphConfig::default();
    if let Some(n) = dom::particle_count_override(&canvas, PARTICLE_COUNT_ATTR) {
        config = config.with_particle_count(n);
    }
    let particle_count = config.particle_count;
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let controller = MorphController::new(config, seed)?;

    let graph = match audio::build_audio_graph(&audio_el) {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("Audio analyser initialization error: {:?}", e);
            None
        }
    };
    let transport = audio::Transport::new(&audio_el, graph.as_ref());

    // Host page state and event wiring
    overlay::set_lyrics_visible(&document, false);
    let ui = Rc::new(RefCell::new(UiState::default()));
    let tracking = tracking::shared();
    let bus = Rc::new(RefCell::new(EventBus::default()));
    events::install_handlers(&bus, &document, &transport, ui, tracking.clone());
    events::wire_media(&bus, &document, &audio_el);
    events::wire_controls(&bus, &document);
    events::wire_scene(&bus, &document);

    let sphere = document.get_element_by_id(VISUAL_SPHERE_ID);
    let sphere_radius = sphere
        .as_ref()
        .and_then(dom::radius_attr)
        .unwrap_or(EQUALIZER_SPHERE_RADIUS);
    let eq_config = EqualizerConfig {
        fft_size: FFT_SIZE as usize,
        ..EqualizerConfig::default()
    };
    let bar_count = eq_config.bar_count;
    let equalizer = match &graph {
        Some(g) => {
            let mut eq = morph_core::Equalizer::new(eq_config, g.spectrum(&audio_el), sphere_radius)?;
            eq.set_anchor(Vec3::from_array(EQUALIZER_ANCHOR));
            Some(eq)
        }
        None => None,
    };

    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, CAMERA_Z),
        fovy_radians: CAMERA_FOVY_DEG.to_radians(),
        znear: CAMERA_NEAR,
        zfar: CAMERA_FAR,
        ..Camera::default()
    };

    let gpu = frame::init_gpu(&canvas, particle_count, bar_count).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        equalizer,
        clock: Default::default(),
        initialized: false,
        canvas,
        sphere,
        last_sphere_scale: 1.0,
        tracking,
        camera,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
