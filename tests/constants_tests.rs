// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_matches_equalizer_layout() {
    // AnalyserNode only accepts powers of two in [32, 32768]
    assert!(FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&FFT_SIZE));
    assert!(ANALYSER_SMOOTHING >= 0.0 && ANALYSER_SMOOTHING <= 1.0);

    let eq = morph_core::EqualizerConfig::default();
    assert_eq!(eq.fft_size, FFT_SIZE as usize);
    // every bar maps to its own bin
    assert!(eq.bin_count() >= eq.bar_count);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        AUDIO_ID,
        AUDIO_CONTROL_ID,
        SCANNING_OVERLAY_ID,
        LYRICS_OVERLAY_ID,
        TOGGLE_LYRICS_ID,
        WEBSITE_BUTTON_ID,
        SEEK_BAR_ID,
        CURRENT_TIME_ID,
        DURATION_ID,
        VISUAL_SPHERE_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "{a} is an id, not a selector");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(PARTICLE_COUNT_ATTR.starts_with("data-"));
}

#[test]
fn icons_are_font_awesome_classes() {
    for icon in [ICON_PLAY, ICON_PAUSE, ICON_LYRICS_SHOW, ICON_LYRICS_CLOSE] {
        assert!(icon.starts_with("fas fa-"), "{icon}");
    }
    assert_ne!(ICON_PLAY, ICON_PAUSE);
    assert_ne!(ICON_LYRICS_SHOW, ICON_LYRICS_CLOSE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fallback_camera_sees_the_cloud() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_Z > CAMERA_NEAR && CAMERA_Z < CAMERA_FAR);
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
    // the scaled cloud (about +-3 units) fits in front of the camera
    assert!(CAMERA_Z > 3.0 * morph_core::CLOUD_SCALE);
    assert!(WEBSITE_URL.starts_with("https://"));
}
