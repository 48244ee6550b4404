//! Improved gradient noise over a seeded permutation table.

use rand::prelude::*;

const TABLE_SIZE: usize = 256;

/// 3D gradient noise field. The permutation is shuffled once at construction
/// and never changes, so sampling is a pure function of the input.
#[derive(Clone)]
pub struct NoiseField {
    // permutation repeated twice so `perm[i + 1]` never needs wrapping
    perm: [u8; TABLE_SIZE * 2],
}

impl NoiseField {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base: [u8; TABLE_SIZE] = [0; TABLE_SIZE];
        for (i, slot) in base.iter_mut().enumerate() {
            *slot = i as u8;
        }
        base.shuffle(rng);
        let mut perm = [0u8; TABLE_SIZE * 2];
        perm[..TABLE_SIZE].copy_from_slice(&base);
        perm[TABLE_SIZE..].copy_from_slice(&base);
        Self { perm }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    /// Sample the field; the result lies in `[-1, 1]`.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let (xi, fx) = lattice(x);
        let (yi, fy) = lattice(y);
        let (zi, fz) = lattice(z);

        let u = fade(fx);
        let v = fade(fy);
        let w = fade(fz);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        let front = lerp(
            v,
            lerp(u, grad(p[aa], fx, fy, fz), grad(p[ba], fx - 1.0, fy, fz)),
            lerp(
                u,
                grad(p[ab], fx, fy - 1.0, fz),
                grad(p[bb], fx - 1.0, fy - 1.0, fz),
            ),
        );
        let back = lerp(
            v,
            lerp(
                u,
                grad(p[aa + 1], fx, fy, fz - 1.0),
                grad(p[ba + 1], fx - 1.0, fy, fz - 1.0),
            ),
            lerp(
                u,
                grad(p[ab + 1], fx, fy - 1.0, fz - 1.0),
                grad(p[bb + 1], fx - 1.0, fy - 1.0, fz - 1.0),
            ),
        );
        lerp(w, front, back).clamp(-1.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("table_size", &TABLE_SIZE)
            .finish()
    }
}

/// Split a coordinate into its wrapped lattice cell and the fractional part.
#[inline]
fn lattice(x: f32) -> (usize, f32) {
    let floor = x.floor();
    let cell = (floor as i64).rem_euclid(TABLE_SIZE as i64) as usize;
    (cell, x - floor)
}

/// Quintic fade 6t^5 - 15t^4 + 10t^3.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
