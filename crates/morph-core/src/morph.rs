//! The morph controller: a repeating rest/morph cycle over the seven shapes.
//!
//! Each cycle rests for `stable_ms` on the arrival shape and then spends
//! `morph_ms` cross-fading to the next one. The controller owns everything it
//! mutates (clouds, noise table, buffers, governor, phase counters); the host
//! only feeds it frame times and reads the buffers back.

use crate::color::{base_color, lerp_color, modulate, Color};
use crate::component::{FrameComponent, FrameTime};
use crate::config::{ConfigError, MorphConfig, NoiseConfig};
use crate::easing::ease_in_out_sine;
use crate::governor::{PerformanceGovernor, PerformanceProfile};
use crate::noise::NoiseField;
use crate::shapes::{ShapeArchetype, ShapeLibrary};
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    Stable,
    Morphing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphState {
    pub current_shape: ShapeArchetype,
    pub next_shape: ShapeArchetype,
    pub phase: CyclePhase,
    /// Linear progress through the morph, before easing.
    pub progress: f32,
}

impl Default for MorphState {
    fn default() -> Self {
        Self {
            current_shape: ShapeArchetype::Torus,
            next_shape: ShapeArchetype::Torus.next_in_sequence(),
            phase: CyclePhase::Stable,
            progress: 0.0,
        }
    }
}

/// Rotation and size pulse of the whole cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneMotion {
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub pulse_phase: f32,
    pub color_phase: f32,
    pub point_size: f32,
}

/// Live buffers drawn by the render surface.
#[derive(Clone, Debug)]
pub struct RenderBuffers {
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    positions_dirty: bool,
    colors_dirty: bool,
}

impl RenderBuffers {
    fn new(positions: &[Vec3], color: Color) -> Self {
        Self {
            positions: positions.to_vec(),
            colors: vec![color; positions.len()],
            positions_dirty: true,
            colors_dirty: true,
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    #[inline]
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Buffers changed since the last [`MorphController::take_dirty`] call.
#[derive(Debug, Default)]
pub struct DirtyBuffers<'a> {
    pub positions: Option<&'a [Vec3]>,
    pub colors: Option<&'a [Color]>,
}

impl DirtyBuffers<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_none() && self.colors.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Throttled by the frame-skip budget; nothing changed.
    Skipped,
    /// Resting on the arrival shape; buffers untouched.
    Resting,
    Morphed {
        progress: f32,
        eased: f32,
        position_batches: usize,
        color_batches: usize,
    },
}

pub struct MorphController {
    config: MorphConfig,
    shapes: ShapeLibrary,
    noise: NoiseField,
    buffers: RenderBuffers,
    governor: PerformanceGovernor,
    state: MorphState,
    motion: SceneMotion,
    start_ms: f64,
    last_update_ms: Option<f64>,
    skip_count: u32,
    // index of the cycle whose morph has already advanced the shapes
    morph_cycle: Option<u64>,
}

impl MorphController {
    /// Validate `config`, generate every cloud and seed the noise table.
    pub fn new(config: MorphConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let shapes = ShapeLibrary::generate(config.particle_count, &config.shapes, &mut rng);
        let noise = NoiseField::new(&mut rng);
        let state = MorphState::default();
        let buffers = RenderBuffers::new(
            shapes.cloud(state.current_shape).points(),
            base_color(state.current_shape),
        );
        let governor = PerformanceGovernor::new(config.governor.clone(), 0.0);
        let motion = SceneMotion {
            point_size: config.motion.base_point_size,
            ..SceneMotion::default()
        };
        log::info!(
            "[morph] generated {} shapes x {} particles",
            ShapeArchetype::SEQUENCE.len(),
            config.particle_count
        );
        Ok(Self {
            config,
            shapes,
            noise,
            buffers,
            governor,
            state,
            motion,
            start_ms: 0.0,
            last_update_ms: None,
            skip_count: 0,
            morph_cycle: None,
        })
    }

    /// Restart the cycle clock at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.governor = PerformanceGovernor::new(self.config.governor.clone(), now_ms);
        self.last_update_ms = None;
        self.skip_count = 0;
    }

    #[inline]
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> MorphState {
        self.state
    }

    #[inline]
    pub fn motion(&self) -> SceneMotion {
        self.motion
    }

    #[inline]
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }

    #[inline]
    pub fn governor(&self) -> &PerformanceGovernor {
        &self.governor
    }

    #[inline]
    pub fn profile(&self) -> PerformanceProfile {
        self.governor.profile()
    }

    #[inline]
    pub fn consecutive_skips(&self) -> u32 {
        self.skip_count
    }

    /// Hand out the buffers that changed and clear their dirty flags.
    pub fn take_dirty(&mut self) -> DirtyBuffers<'_> {
        let b = &mut self.buffers;
        let positions = std::mem::take(&mut b.positions_dirty).then_some(&b.positions[..]);
        let colors = std::mem::take(&mut b.colors_dirty).then_some(&b.colors[..]);
        DirtyBuffers { positions, colors }
    }

    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        // parameters chosen at the last window boundary stay in force this frame
        let profile = self.governor.profile();
        if let Some(sample) = self.governor.record_frame(now_ms) {
            if sample.changed {
                log::info!("[morph] fps {} -> level {}", sample.fps, sample.level);
            }
        }

        if let Some(last) = self.last_update_ms {
            if now_ms - last < profile.update_interval_ms
                && self.skip_count < self.config.max_frame_skip
            {
                self.skip_count += 1;
                return TickOutcome::Skipped;
            }
        }
        self.last_update_ms = Some(now_ms);
        self.skip_count = 0;

        self.advance_motion();

        let elapsed = (now_ms - self.start_ms).max(0.0);
        let cycle_ms = self.config.cycle_ms();
        let cycle_time = elapsed % cycle_ms;
        if cycle_time < self.config.stable_ms {
            self.state.phase = CyclePhase::Stable;
            self.state.progress = 0.0;
            return TickOutcome::Resting;
        }

        let cycle_index = (elapsed / cycle_ms).floor() as u64;
        if self.morph_cycle != Some(cycle_index) {
            self.morph_cycle = Some(cycle_index);
            self.state.current_shape = self.state.next_shape;
            self.state.next_shape = self.state.current_shape.next_in_sequence();
            log::info!(
                "Starting morphing from {} to {}",
                self.state.current_shape,
                self.state.next_shape
            );
        }
        self.state.phase = CyclePhase::Morphing;

        let morph_time = cycle_time - self.config.stable_ms;
        let progress = ((morph_time / self.config.morph_ms) as f32).min(1.0);
        self.state.progress = progress;
        let eased = ease_in_out_sine(progress);
        let time_s = (elapsed / 1000.0) as f32;

        let from = self.shapes.cloud(self.state.current_shape).points();
        let to = self.shapes.cloud(self.state.next_shape).points();
        let position_batches = write_positions(
            &mut self.buffers.positions,
            from,
            to,
            eased,
            &self.noise,
            &self.config.noise,
            profile.noise_amplitude,
            time_s,
            profile.position_batch_size,
        );

        let blended = lerp_color(
            base_color(self.state.current_shape),
            base_color(self.state.next_shape),
            eased,
        );
        let mut color_batches = 0;
        for (b, chunk) in self
            .buffers
            .colors
            .chunks_mut(profile.color_batch_size.max(1))
            .enumerate()
        {
            let base = b * profile.color_batch_size.max(1);
            for (j, out) in chunk.iter_mut().enumerate() {
                *out = modulate(
                    blended,
                    base + j,
                    self.motion.color_phase,
                    time_s,
                    &self.config.motion,
                    self.config.color_clamp,
                );
            }
            color_batches += 1;
        }

        // only flag after both passes are complete
        self.buffers.positions_dirty = true;
        self.buffers.colors_dirty = true;

        TickOutcome::Morphed {
            progress,
            eased,
            position_batches,
            color_batches,
        }
    }

    fn advance_motion(&mut self) {
        let m = &self.config.motion;
        let [ax, ay, az] = m.rotation_axes;
        self.motion.rotation += Vec3::new(ax, ay, az) * m.rotation_speed;
        self.motion.pulse_phase += m.pulse_step;
        self.motion.color_phase += m.color_wave_step;
        self.motion.point_size = m.base_point_size + self.motion.pulse_phase.sin() * m.point_size_swing;
    }
}

impl FrameComponent for MorphController {
    fn on_init(&mut self, time: FrameTime) {
        self.start(time.now_ms);
        log::info!("Particle animation component initialized.");
    }

    fn on_tick(&mut self, time: FrameTime) {
        self.tick(time.now_ms);
    }
}

/// Blend `from` towards `to` and add noise jitter, `batch` particles at a time.
/// Returns the number of batches processed.
#[allow(clippy::too_many_arguments)]
fn write_positions(
    out: &mut [Vec3],
    from: &[Vec3],
    to: &[Vec3],
    eased: f32,
    noise: &NoiseField,
    cfg: &NoiseConfig,
    amplitude: f32,
    time_s: f32,
    batch: usize,
) -> usize {
    let batch = batch.max(1);
    let mut batches = 0;
    for (b, chunk) in out.chunks_mut(batch).enumerate() {
        let base = b * batch;
        for (j, p) in chunk.iter_mut().enumerate() {
            let i = base + j;
            let lerped = from[i].lerp(to[i], eased);
            let sx = lerped.x * cfg.position_scale;
            let sy = lerped.y * cfg.position_scale;
            let jitter = Vec3::new(
                noise.sample(sx, sy, time_s),
                noise.sample(sx + cfg.y_channel_offset, sy + cfg.y_channel_offset, time_s),
                noise.sample(sx + cfg.z_channel_offset, sy + cfg.z_channel_offset, time_s),
            ) * amplitude;
            *p = lerped + jitter;
        }
        batches += 1;
    }
    batches
}
