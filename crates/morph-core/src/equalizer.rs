//! Radial bar equalizer laid out around the tracked sphere.
//!
//! Purely geometric: the host supplies spectrum bytes through a
//! [`SpectrumSource`] and reads back one [`BarLayout`] per bar.

use crate::component::{FrameComponent, FrameTime};
use crate::config::{ConfigError, EqualizerConfig};
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, PI};

/// Audio analysis collaborator.
pub trait SpectrumSource {
    /// Whether audio is currently playing; bars freeze while paused.
    fn is_playing(&self) -> bool;
    /// Fill `out` with byte magnitudes, one per frequency bin.
    fn read_spectrum(&mut self, out: &mut [u8]);
}

/// Placement of one bar in anchor space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarLayout {
    /// Center of the bar.
    pub position: Vec3,
    pub height: f32,
    pub width: f32,
    /// Rotation about +Y in degrees.
    pub yaw_deg: f32,
}

pub type Bars = SmallVec<[BarLayout; 32]>;

pub struct Equalizer<S: SpectrumSource> {
    config: EqualizerConfig,
    source: S,
    spectrum: Vec<u8>,
    heights: Vec<f32>,
    bars: Bars,
    anchor: Vec3,
    sphere_radius: f32,
    sphere_scale: f32,
}

impl<S: SpectrumSource> Equalizer<S> {
    pub fn new(config: EqualizerConfig, source: S, sphere_radius: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        let bins = config.bin_count();
        let bar_count = config.bar_count;
        Ok(Self {
            config,
            source,
            spectrum: vec![0; bins],
            heights: vec![0.0; bar_count],
            bars: SmallVec::new(),
            anchor: Vec3::ZERO,
            sphere_radius,
            sphere_scale: 1.0,
        })
    }

    /// Follow the tracked target; bars are laid out relative to this point.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }

    /// Track a resized host sphere; takes effect on the next [`Equalizer::update`].
    pub fn set_sphere_radius(&mut self, radius: f32) {
        self.sphere_radius = radius;
    }

    #[inline]
    pub fn bars(&self) -> &[BarLayout] {
        &self.bars
    }

    /// Scale for the host sphere, pulsing with the mean spectrum level.
    #[inline]
    pub fn sphere_scale(&self) -> f32 {
        self.sphere_scale
    }

    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Pull one spectrum frame and relayout the bars. No-op while paused.
    pub fn update(&mut self) {
        if !self.source.is_playing() {
            return;
        }
        self.source.read_spectrum(&mut self.spectrum);
        if self.spectrum.is_empty() {
            return;
        }

        let mean = self.spectrum.iter().map(|&v| v as f32).sum::<f32>() / self.spectrum.len() as f32;
        self.sphere_scale = 1.0 + (mean / 255.0) * self.config.sphere_pulse;

        let n = self.config.bar_count;
        let bins = self.config.bin_count();
        let ring = self.sphere_radius * self.config.radius_factor;
        let bottom = self.anchor.y - self.sphere_radius;

        self.bars.clear();
        for i in 0..n {
            // high bins carry little energy for music; spread bars over the full range anyway
            let bin = ((i as f32 / n as f32) * bins as f32).floor() as usize;
            let magnitude = self.spectrum.get(bin).copied().unwrap_or(0) as f32;
            let target = ((magnitude / 255.0) * self.config.max_bar_height)
                .max(self.config.min_bar_height);
            let h = &mut self.heights[i];
            *h += (target - *h) * self.config.smoothing;

            let angle = bar_angle(i, n);
            let x = (angle - FRAC_PI_2).cos() * ring;
            let z = (angle - FRAC_PI_2).sin() * ring;
            self.bars.push(BarLayout {
                position: Vec3::new(self.anchor.x + x, bottom + *h / 2.0, self.anchor.z + z),
                height: *h,
                width: self.config.bar_width,
                yaw_deg: -angle.to_degrees() - 90.0,
            });
        }
    }
}

/// Bars fan across a half circle, from -pi/2 to +pi/2.
#[inline]
pub fn bar_angle(i: usize, n: usize) -> f32 {
    if n > 1 {
        (i as f32 / (n - 1) as f32) * PI - FRAC_PI_2
    } else {
        0.0
    }
}

impl<S: SpectrumSource> FrameComponent for Equalizer<S> {
    fn on_init(&mut self, _time: FrameTime) {
        log::info!("Audio visualizer component initialized.");
    }

    fn on_tick(&mut self, _time: FrameTime) {
        self.update();
    }
}
