use glam::Vec3;

// Scene layout shared by the renderer and the equalizer, in image-target units.

// The generated clouds span roughly +-3 units; shrink them onto the target.
pub const CLOUD_SCALE: f32 = 0.25;
pub const CLOUD_OFFSET: [f32; 3] = [0.0, 0.0, 0.0];

// Radius of the invisible sphere the equalizer ring wraps around
pub const EQUALIZER_SPHERE_RADIUS: f32 = 0.5;

// Particle material
pub const PARTICLE_OPACITY: f32 = 0.95;
// Converts the material's point size into billboard size in target units
pub const POINT_SIZE_TO_WORLD: f32 = 0.0015;

// Equalizer bar tint
pub const BAR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // yellow

#[inline]
pub fn cloud_offset_vec3() -> Vec3 {
    Vec3::new(CLOUD_OFFSET[0], CLOUD_OFFSET[1], CLOUD_OFFSET[2])
}
