pub mod color;
pub mod component;
pub mod config;
pub mod constants;
pub mod easing;
pub mod equalizer;
pub mod events;
pub mod governor;
pub mod morph;
pub mod noise;
pub mod shapes;
pub mod state;
pub mod ui;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static BARS_WGSL: &str = include_str!("../shaders/bars.wgsl");

pub use color::*;
pub use component::*;
pub use config::*;
pub use constants::*;
pub use easing::*;
pub use equalizer::*;
pub use events::*;
pub use governor::*;
pub use morph::*;
pub use noise::NoiseField;
pub use shapes::{ParticleCloud, ShapeArchetype, ShapeLibrary};
pub use state::*;
pub use ui::*;
