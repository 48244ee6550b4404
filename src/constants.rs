/// Page wiring and tuning constants for the web front-end.
///
/// Pure values only; the host-side tests include this file directly.
// Element ids of the AR page
pub const CANVAS_ID: &str = "morph-canvas";
pub const AUDIO_ID: &str = "audio";
pub const AUDIO_CONTROL_ID: &str = "audio-control";
pub const SCANNING_OVERLAY_ID: &str = "scanning-overlay";
pub const LYRICS_OVERLAY_ID: &str = "lyrics-overlay";
pub const TOGGLE_LYRICS_ID: &str = "toggle-lyrics";
pub const WEBSITE_BUTTON_ID: &str = "website-button";
pub const SEEK_BAR_ID: &str = "seek-bar";
pub const CURRENT_TIME_ID: &str = "current-time";
pub const DURATION_ID: &str = "duration";
pub const VISUAL_SPHERE_ID: &str = "visualSphere";

// The tracking host dispatches targetFound / targetLost on this element
pub const SCENE_SELECTOR: &str = "a-scene";

// Canvas attribute that overrides the particle count
pub const PARTICLE_COUNT_ATTR: &str = "data-particle-count";

// Overlay classes and icons
pub const FADE_OUT_CLASS: &str = "fade-out";
pub const ICON_PLAY: &str = "fas fa-play";
pub const ICON_PAUSE: &str = "fas fa-pause";
pub const ICON_LYRICS_SHOW: &str = "fas fa-align-justify";
pub const ICON_LYRICS_CLOSE: &str = "fas fa-times";

pub const WEBSITE_URL: &str = "https://www.instagram.com/techconnect.em/";
pub const WEBSITE_TARGET: &str = "_blank";

// Analyser
pub const FFT_SIZE: u32 = 256;
pub const ANALYSER_SMOOTHING: f64 = 0.85;

// Fallback camera used until the tracking host reports a pose (target units)
pub const CAMERA_Z: f32 = 3.0;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 100.0;

// Equalizer ring center in target space
pub const EQUALIZER_ANCHOR: [f32; 3] = [0.0, 0.0, 0.0];
