use std::f32::consts::PI;

/// Half-cosine ease-in-out: `(1 - cos(pi * p)) / 2`.
///
/// Maps `[0, 1]` onto `[0, 1]` with `ease(0.5) == 0.5`; input is not clamped.
#[inline]
pub fn ease_in_out_sine(progress: f32) -> f32 {
    (1.0 - (PI * progress).cos()) / 2.0
}
