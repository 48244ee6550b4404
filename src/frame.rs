use crate::audio::AnalyserSpectrum;
use crate::dom;
use crate::render::{self, SceneFrame};
use crate::tracking::Tracking;
use glam::{EulerRot, Mat4, Quat, Vec3};
use morph_core::{
    cloud_offset_vec3, Camera, Equalizer, FrameClock, FrameComponent, MorphController, BAR_COLOR,
    CLOUD_SCALE, PARTICLE_OPACITY, POINT_SIZE_TO_WORLD,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub controller: MorphController,
    /// Absent when the audio graph could not be built.
    pub equalizer: Option<Equalizer<AnalyserSpectrum>>,
    pub clock: FrameClock,
    pub initialized: bool,

    pub canvas: web::HtmlCanvasElement,
    /// Host sphere pulsed by the equalizer.
    pub sphere: Option<web::Element>,
    pub last_sphere_scale: f32,

    pub tracking: Rc<RefCell<Tracking>>,
    pub camera: Camera,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let time = self.clock.advance(instant::now());
        if !self.initialized {
            self.controller.on_init(time);
            if let Some(eq) = &mut self.equalizer {
                eq.on_init(time);
            }
            self.initialized = true;
        }
        self.controller.on_tick(time);
        self.follow_sphere_radius();
        if let Some(eq) = &mut self.equalizer {
            eq.on_tick(time);
        }
        self.pulse_sphere();

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());

        let dirty = self.controller.take_dirty();
        if let Some(positions) = dirty.positions {
            g.upload_positions(positions);
        }
        if let Some(colors) = dirty.colors {
            g.upload_colors(colors);
        }
        if let Some(eq) = &self.equalizer {
            g.upload_bars(eq.bars());
        }

        self.camera.aspect = g.aspect();
        let tracking = *self.tracking.borrow();
        let pose = tracking.effective_pose();
        let (right, up) = pose.billboard_axes(&self.camera);
        let motion = self.controller.motion();
        let scene = SceneFrame {
            view_proj: pose.view_projection(&self.camera),
            model: cloud_model(motion.rotation),
            right,
            up,
            point_size: motion.point_size * POINT_SIZE_TO_WORLD,
            opacity: PARTICLE_OPACITY,
            bar_color: BAR_COLOR,
            visible: tracking.should_draw(),
        };
        if let Err(e) = g.render(&scene) {
            log::error!("render error: {:?}", e);
        }
    }

    fn follow_sphere_radius(&mut self) {
        let (Some(eq), Some(sphere)) = (&mut self.equalizer, &self.sphere) else {
            return;
        };
        if let Some(radius) = dom::radius_attr(sphere) {
            eq.set_sphere_radius(radius);
        }
    }

    fn pulse_sphere(&mut self) {
        let Some(eq) = &self.equalizer else {
            return;
        };
        let scale = eq.sphere_scale();
        if (scale - self.last_sphere_scale).abs() < 1e-4 {
            return;
        }
        self.last_sphere_scale = scale;
        if let Some(sphere) = &self.sphere {
            _ = sphere.set_attribute("scale", &format!("{scale} {scale} {scale}"));
        }
    }
}

/// Cloud placement in target space: offset, then rotation, then scale.
fn cloud_model(rotation: Vec3) -> Mat4 {
    let q = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    Mat4::from_scale_rotation_translation(Vec3::splat(CLOUD_SCALE), q, cloud_offset_vec3())
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    particle_count: usize,
    bar_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, particle_count, bar_capacity).await {
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
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    let Some(cb) = tick.as_ref() else {
        return;
    };
    if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}
