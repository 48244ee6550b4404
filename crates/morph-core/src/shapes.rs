use crate::config::ShapeConfig;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6, PI, TAU};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeArchetype {
    Torus,
    Sphere,
    Lissajous,
    DnaHelix,
    FractalCube,
    GalaxySpiral,
    WaveForm,
}

impl ShapeArchetype {
    /// Fixed morph order; wraps from the last entry back to the first.
    pub const SEQUENCE: [ShapeArchetype; 7] = [
        ShapeArchetype::Torus,
        ShapeArchetype::Sphere,
        ShapeArchetype::Lissajous,
        ShapeArchetype::DnaHelix,
        ShapeArchetype::FractalCube,
        ShapeArchetype::GalaxySpiral,
        ShapeArchetype::WaveForm,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next_in_sequence(self) -> ShapeArchetype {
        Self::SEQUENCE[(self.index() + 1) % Self::SEQUENCE.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeArchetype::Torus => "TORUS",
            ShapeArchetype::Sphere => "SPHERE",
            ShapeArchetype::Lissajous => "LISSAJOUS",
            ShapeArchetype::DnaHelix => "DNA_HELIX",
            ShapeArchetype::FractalCube => "FRACTAL_CUBE",
            ShapeArchetype::GalaxySpiral => "GALAXY_SPIRAL",
            ShapeArchetype::WaveForm => "WAVE_FORM",
        }
    }

    /// Build this archetype's cloud of `count` points.
    pub fn generate<R: Rng + ?Sized>(
        self,
        count: usize,
        geometry: &ShapeConfig,
        rng: &mut R,
    ) -> ParticleCloud {
        let g = geometry;
        let points = match self {
            ShapeArchetype::Torus => torus(count, g, rng),
            ShapeArchetype::Sphere => sphere(count, g, rng),
            ShapeArchetype::Lissajous => lissajous(count, g, rng),
            ShapeArchetype::DnaHelix => dna_helix(count, g, rng),
            ShapeArchetype::FractalCube => fractal_cube(count, g, rng),
            ShapeArchetype::GalaxySpiral => galaxy_spiral(count, g, rng),
            ShapeArchetype::WaveForm => wave_form(count, g),
        };
        ParticleCloud { points }
    }
}

impl fmt::Display for ShapeArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable point cloud for one archetype.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    points: Vec<Vec3>,
}

impl ParticleCloud {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Flat `x, y, z` view for GPU upload.
    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}

#[inline]
fn unit_index(i: usize, count: usize) -> f32 {
    i as f32 / count as f32
}

#[inline]
fn ring_offset<R: Rng + ?Sized>(rng: &mut R, max_radius: f32) -> (f32, f32) {
    let angle = rng.gen::<f32>() * TAU;
    let radius = rng.gen::<f32>() * max_radius;
    (angle.cos() * radius, angle.sin() * radius)
}

fn torus<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let u = rng.gen::<f32>() * TAU;
            let v = rng.gen::<f32>() * TAU;
            let ring = g.torus_major_radius + g.torus_minor_radius * v.cos();
            Vec3::new(ring * u.cos(), ring * u.sin(), g.torus_minor_radius * v.sin())
        })
        .collect()
}

fn sphere<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let lat = rng.gen::<f32>() * PI;
            let lon = rng.gen::<f32>() * TAU;
            Vec3::new(
                lat.sin() * lon.cos(),
                lat.sin() * lon.sin(),
                lat.cos(),
            ) * g.sphere_radius
        })
        .collect()
}

fn lissajous<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    let [a, b, c] = g.lissajous_freq;
    let [pa, pb, pc] = g.lissajous_phase;
    (0..count)
        .map(|i| {
            let t = unit_index(i, count) * PI * 4.0;
            let (dx, dy) = ring_offset(rng, g.lissajous_thickness);
            Vec3::new(
                g.lissajous_amplitude * (a * t + pa).sin() + dx,
                g.lissajous_amplitude * (b * t + pb).sin() + dy,
                g.lissajous_amplitude * (c * t + pc).sin(),
            )
        })
        .collect()
}

fn dna_helix<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    let half = count as f32 / 2.0;
    (0..count)
        .map(|i| {
            let s = unit_index(i, count);
            let t = s * g.helix_turns * TAU;
            let y = s * g.helix_height - g.helix_height / 2.0;
            // second strand starts at the midpoint, half a turn out of phase
            let strand = (i as f32 / half).floor();
            let phase = t + strand * PI;
            let (dx, dz) = ring_offset(rng, g.helix_thickness);
            Vec3::new(
                g.helix_radius * phase.cos() + dx,
                y,
                g.helix_radius * phase.sin() + dz,
            )
        })
        .collect()
}

fn fractal_cube<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let mut p = Vec3::ZERO;
            let mut size = g.fractal_size;
            for level in 0..g.fractal_levels {
                let local = size / 2f32.powi(level as i32);
                p += Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * local;
                size *= 0.5;
            }
            p
        })
        .collect()
}

fn galaxy_spiral<R: Rng + ?Sized>(count: usize, g: &ShapeConfig, rng: &mut R) -> Vec<Vec3> {
    let arms = g.galaxy_arms.max(1);
    let arm_step = TAU / arms as f32;
    (0..count)
        .map(|i| {
            let s = unit_index(i, count);
            let arm = (i % arms) as f32;
            let t = s * PI * 4.0;
            let radius = s * g.galaxy_max_radius;
            let angle = t + arm * arm_step + radius * g.galaxy_pitch;
            let y = (rng.gen::<f32>() - 0.5) * g.galaxy_thickness * radius;
            Vec3::new(radius * angle.cos(), y, radius * angle.sin())
        })
        .collect()
}

fn wave_form(count: usize, g: &ShapeConfig) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let s = unit_index(i, count);
            let t = s * TAU * g.wave_count;
            let x = s * g.wave_width - g.wave_width / 2.0;
            let y = t.sin() * g.wave_amplitude
                + (t * 2.0 + FRAC_PI_3).sin() * g.wave_amplitude * 0.5
                + (t * 3.0 + FRAC_PI_6).sin() * g.wave_amplitude * 0.25;
            let z = (t * g.wave_depth_freq).sin() * g.wave_depth;
            Vec3::new(x, y, z)
        })
        .collect()
}

/// All seven clouds, indexed by [`ShapeArchetype::index`].
#[derive(Clone, Debug)]
pub struct ShapeLibrary {
    clouds: Vec<ParticleCloud>,
}

impl ShapeLibrary {
    pub fn generate<R: Rng + ?Sized>(count: usize, geometry: &ShapeConfig, rng: &mut R) -> Self {
        let clouds = ShapeArchetype::SEQUENCE
            .iter()
            .map(|shape| shape.generate(count, geometry, rng))
            .collect();
        Self { clouds }
    }

    #[inline]
    pub fn cloud(&self, shape: ShapeArchetype) -> &ParticleCloud {
        &self.clouds[shape.index()]
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.clouds.first().map_or(0, ParticleCloud::len)
    }
}
