//! Structured configuration for the morph engine and the equalizer.
//!
//! `Default` reproduces the reference tuning of the AR page (50k particles,
//! 4 s rest + 2 s morph, three performance tiers, the reference shape
//! geometry). Hosts may override any
//! field and must call [`MorphConfig::validate`] before building a controller.

use thiserror::Error;

/// Reference particle count.
pub const DEFAULT_PARTICLE_COUNT: usize = 50_000;
/// Time spent resting on the arrival shape in each cycle.
pub const SHAPE_STABLE_MS: f64 = 4000.0;
/// Time spent morphing towards the next shape in each cycle.
pub const MORPHING_MS: f64 = 2000.0;
/// Consecutive ticks that may be skipped before an update is forced.
pub const MAX_FRAME_SKIP: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    EmptyCloud,
    #[error("{name} must be a positive finite duration, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("{name} batch size must be greater than zero")]
    ZeroBatch { name: &'static str },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("performance thresholds must satisfy low < medium (got {low} / {medium})")]
    ThresholdOrder { low: u32, medium: u32 },
    #[error("equalizer needs at least one bar and a non-zero FFT size")]
    EmptyEqualizer,
    #[error("{name} must be at least one")]
    ZeroCount { name: &'static str },
}

/// Policy applied to each color channel after wave modulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorClamp {
    /// Clamp to [0, 1].
    #[default]
    Symmetric,
    /// Clamp only the upper bound; channels may go negative.
    UpperOnly,
}

/// Parameter set for one performance tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProfile {
    pub update_interval_ms: f64,
    pub position_batch_size: usize,
    pub color_batch_size: usize,
    pub noise_amplitude: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GovernorConfig {
    /// Length of the frame counting window.
    pub sample_window_ms: f64,
    /// Below this fps the governor drops to the low tier.
    pub low_fps: u32,
    /// Below this fps (and at or above `low_fps`) the governor uses the medium tier.
    pub medium_fps: u32,
    pub high: TierProfile,
    pub medium: TierProfile,
    pub low: TierProfile,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            sample_window_ms: 1000.0,
            low_fps: 30,
            medium_fps: 45,
            high: TierProfile {
                update_interval_ms: 16.0,
                position_batch_size: 500,
                color_batch_size: 2500,
                noise_amplitude: 0.05,
            },
            medium: TierProfile {
                update_interval_ms: 22.0,
                position_batch_size: 750,
                color_batch_size: 3750,
                noise_amplitude: 0.04,
            },
            low: TierProfile {
                update_interval_ms: 33.0,
                position_batch_size: 1000,
                color_batch_size: 5000,
                noise_amplitude: 0.03,
            },
        }
    }
}

/// How interpolated positions are fed into the noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Scale applied to x/y before sampling.
    pub position_scale: f32,
    /// Added to the sample coordinates of the y jitter channel.
    pub y_channel_offset: f32,
    /// Added to the sample coordinates of the z jitter channel.
    pub z_channel_offset: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            position_scale: 0.1,
            y_channel_offset: 100.0,
            z_channel_offset: 200.0,
        }
    }
}

/// Whole-cloud motion advanced on every non-skipped update.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub rotation_speed: f32,
    /// Per-axis multipliers of `rotation_speed`.
    pub rotation_axes: [f32; 3],
    pub pulse_step: f32,
    pub color_wave_step: f32,
    pub base_point_size: f32,
    pub point_size_swing: f32,
    pub color_wave_amplitude: f32,
    pub color_wave_index_freq: f32,
    pub color_gradient_amplitude: f32,
    pub color_gradient_index_freq: f32,
    /// Per-channel weights applied to the wave offset.
    pub color_wave_weights: [f32; 3],
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.008,
            rotation_axes: [0.7, 1.0, 0.3],
            pulse_step: 0.08,
            color_wave_step: 0.05,
            base_point_size: 20.0,
            point_size_swing: 5.0,
            color_wave_amplitude: 0.2,
            color_wave_index_freq: 0.01,
            color_gradient_amplitude: 0.3,
            color_gradient_index_freq: 0.005,
            color_wave_weights: [1.0, 0.7, 0.5],
        }
    }
}

/// Geometry of the seven archetype clouds.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeConfig {
    pub torus_major_radius: f32,
    pub torus_minor_radius: f32,
    pub sphere_radius: f32,
    /// x/y/z angular frequencies of the Lissajous curve.
    pub lissajous_freq: [f32; 3],
    pub lissajous_phase: [f32; 3],
    pub lissajous_amplitude: f32,
    /// Max radial scatter applied to x/y around the curve.
    pub lissajous_thickness: f32,
    pub helix_radius: f32,
    pub helix_height: f32,
    pub helix_turns: f32,
    pub helix_thickness: f32,
    pub fractal_size: f32,
    pub fractal_levels: u32,
    pub galaxy_arms: usize,
    pub galaxy_max_radius: f32,
    pub galaxy_pitch: f32,
    /// Vertical spread, scaled by distance from the core.
    pub galaxy_thickness: f32,
    pub wave_width: f32,
    pub wave_amplitude: f32,
    /// Full periods across `wave_width`.
    pub wave_count: f32,
    pub wave_depth_freq: f32,
    pub wave_depth: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
        Self {
            torus_major_radius: 2.0,
            torus_minor_radius: 0.8,
            sphere_radius: 2.2,
            lissajous_freq: [3.0, 5.0, 7.0],
            lissajous_phase: [FRAC_PI_2, 0.0, FRAC_PI_4],
            lissajous_amplitude: 2.0,
            lissajous_thickness: 0.08,
            helix_radius: 1.5,
            helix_height: 4.0,
            helix_turns: 3.0,
            helix_thickness: 0.05,
            fractal_size: 2.0,
            fractal_levels: 3,
            galaxy_arms: 3,
            galaxy_max_radius: 3.0,
            galaxy_pitch: 0.3,
            galaxy_thickness: 0.2,
            wave_width: 4.0,
            wave_amplitude: 1.5,
            wave_count: 5.0,
            wave_depth_freq: 2.0,
            wave_depth: 0.3,
        }
    }
}

impl ShapeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fractal_levels == 0 {
            return Err(ConfigError::ZeroCount {
                name: "shapes.fractal_levels",
            });
        }
        if self.galaxy_arms == 0 {
            return Err(ConfigError::ZeroCount {
                name: "shapes.galaxy_arms",
            });
        }
        let scalars = [
            ("shapes.torus_major_radius", self.torus_major_radius),
            ("shapes.torus_minor_radius", self.torus_minor_radius),
            ("shapes.sphere_radius", self.sphere_radius),
            ("shapes.lissajous_amplitude", self.lissajous_amplitude),
            ("shapes.lissajous_thickness", self.lissajous_thickness),
            ("shapes.helix_radius", self.helix_radius),
            ("shapes.helix_height", self.helix_height),
            ("shapes.helix_turns", self.helix_turns),
            ("shapes.helix_thickness", self.helix_thickness),
            ("shapes.fractal_size", self.fractal_size),
            ("shapes.galaxy_max_radius", self.galaxy_max_radius),
            ("shapes.galaxy_pitch", self.galaxy_pitch),
            ("shapes.galaxy_thickness", self.galaxy_thickness),
            ("shapes.wave_width", self.wave_width),
            ("shapes.wave_amplitude", self.wave_amplitude),
            ("shapes.wave_count", self.wave_count),
            ("shapes.wave_depth_freq", self.wave_depth_freq),
            ("shapes.wave_depth", self.wave_depth),
        ];
        for (name, value) in scalars {
            finite(name, value)?;
        }
        for value in self.lissajous_freq {
            finite("shapes.lissajous_freq", value)?;
        }
        for value in self.lissajous_phase {
            finite("shapes.lissajous_phase", value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MorphConfig {
    pub particle_count: usize,
    pub stable_ms: f64,
    pub morph_ms: f64,
    pub max_frame_skip: u32,
    pub color_clamp: ColorClamp,
    pub governor: GovernorConfig,
    pub noise: NoiseConfig,
    pub motion: MotionConfig,
    pub shapes: ShapeConfig,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            stable_ms: SHAPE_STABLE_MS,
            morph_ms: MORPHING_MS,
            max_frame_skip: MAX_FRAME_SKIP,
            color_clamp: ColorClamp::default(),
            governor: GovernorConfig::default(),
            noise: NoiseConfig::default(),
            motion: MotionConfig::default(),
            shapes: ShapeConfig::default(),
        }
    }
}

impl MorphConfig {
    /// Full stable + morph period.
    #[inline]
    pub fn cycle_ms(&self) -> f64 {
        self.stable_ms + self.morph_ms
    }

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyCloud);
        }
        positive_duration("stable_ms", self.stable_ms)?;
        positive_duration("morph_ms", self.morph_ms)?;
        positive_duration("sample_window_ms", self.governor.sample_window_ms)?;

        let g = &self.governor;
        if g.low_fps >= g.medium_fps {
            return Err(ConfigError::ThresholdOrder {
                low: g.low_fps,
                medium: g.medium_fps,
            });
        }
        for (name, tier) in [("high", &g.high), ("medium", &g.medium), ("low", &g.low)] {
            if tier.position_batch_size == 0 || tier.color_batch_size == 0 {
                return Err(ConfigError::ZeroBatch { name });
            }
            if !tier.update_interval_ms.is_finite() || tier.update_interval_ms < 0.0 {
                return Err(ConfigError::InvalidDuration {
                    name: "update_interval_ms",
                    value: tier.update_interval_ms,
                });
            }
            finite("noise_amplitude", tier.noise_amplitude)?;
        }

        finite("noise.position_scale", self.noise.position_scale)?;
        finite("noise.y_channel_offset", self.noise.y_channel_offset)?;
        finite("noise.z_channel_offset", self.noise.z_channel_offset)?;
        finite("motion.rotation_speed", self.motion.rotation_speed)?;
        finite("motion.base_point_size", self.motion.base_point_size)?;
        self.shapes.validate()
    }
}

fn positive_duration(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Tuning for the radial bar equalizer.
#[derive(Clone, Debug, PartialEq)]
pub struct EqualizerConfig {
    pub bar_count: usize,
    pub fft_size: usize,
    pub smoothing: f32,
    /// Bars sit on a ring of `sphere_radius * radius_factor`.
    pub radius_factor: f32,
    pub max_bar_height: f32,
    pub min_bar_height: f32,
    pub bar_width: f32,
    /// Extra scale a fully saturated spectrum adds to the host sphere.
    pub sphere_pulse: f32,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            bar_count: 32,
            fft_size: 256,
            smoothing: 0.3,
            radius_factor: 1.1,
            max_bar_height: 1.5,
            min_bar_height: 0.1,
            bar_width: 0.02,
            sphere_pulse: 0.5,
        }
    }
}

impl EqualizerConfig {
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bar_count == 0 || self.fft_size < 2 {
            return Err(ConfigError::EmptyEqualizer);
        }
        finite("equalizer.smoothing", self.smoothing)?;
        finite("equalizer.radius_factor", self.radius_factor)?;
        Ok(())
    }
}
