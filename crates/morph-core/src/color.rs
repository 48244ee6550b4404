use crate::config::{ColorClamp, MotionConfig};
use crate::shapes::ShapeArchetype;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Per-channel linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp_color(c1: Color, c2: Color, t: f32) -> Color {
    Color {
        r: c1.r + (c2.r - c1.r) * t,
        g: c1.g + (c2.g - c1.g) * t,
        b: c1.b + (c2.b - c1.b) * t,
    }
}

/// Base color of each archetype, tuned to stand out against a bright camera feed.
pub fn base_color(shape: ShapeArchetype) -> Color {
    match shape {
        ShapeArchetype::Torus => Color::new(1.0, 1.0, 0.0),        // yellow
        ShapeArchetype::Sphere => Color::new(1.0, 0.5, 0.0),       // orange
        ShapeArchetype::Lissajous => Color::new(1.0, 0.0, 0.5),    // pink
        ShapeArchetype::DnaHelix => Color::new(0.0, 1.0, 0.2),     // green
        ShapeArchetype::FractalCube => Color::new(0.8, 0.0, 1.0),  // purple
        ShapeArchetype::GalaxySpiral => Color::new(0.0, 0.8, 1.0), // cyan
        ShapeArchetype::WaveForm => Color::new(1.0, 0.2, 0.0),     // red
    }
}

impl ColorClamp {
    #[inline]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            ColorClamp::Symmetric => v.clamp(0.0, 1.0),
            ColorClamp::UpperOnly => v.min(1.0),
        }
    }
}

/// Shimmer applied on top of the blended base color for particle `index`.
///
/// `wave_phase` is the controller's running color phase and `time_s` the
/// session time; together they make bands of brightness travel along the
/// particle index.
#[inline]
pub fn modulate(
    base: Color,
    index: usize,
    wave_phase: f32,
    time_s: f32,
    motion: &MotionConfig,
    clamp: ColorClamp,
) -> Color {
    let i = index as f32;
    let wave = (wave_phase + i * motion.color_wave_index_freq).sin() * motion.color_wave_amplitude;
    let gradient =
        (i * motion.color_gradient_index_freq + time_s).sin() * motion.color_gradient_amplitude;
    let [wr, wg, wb] = motion.color_wave_weights;
    Color {
        r: clamp.apply(base.r + wave * wr + gradient),
        g: clamp.apply(base.g + wave * wg + gradient),
        b: clamp.apply(base.b + wave * wb + gradient),
    }
}
