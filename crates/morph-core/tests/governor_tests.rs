// Host-side tests for the performance governor.

use morph_core::config::GovernorConfig;
use morph_core::governor::{PerformanceGovernor, PerformanceLevel};

/// Feed `fps` evenly spaced frames covering one second after `start_ms`.
fn feed_second(gov: &mut PerformanceGovernor, start_ms: f64, fps: u32) -> Vec<Option<PerformanceLevel>> {
    let step = 1000.0 / fps as f64;
    (1..=fps)
        .map(|k| gov.record_frame(start_ms + step * k as f64).map(|s| s.level))
        .collect()
}

#[test]
fn starts_high_until_first_sample() {
    let gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    assert_eq!(gov.level(), PerformanceLevel::High);
    assert_eq!(gov.last_fps(), None);
    let p = gov.profile();
    assert_eq!(p.update_interval_ms, 16.0);
    assert_eq!(p.position_batch_size, 500);
    assert_eq!(p.color_batch_size, 2500);
    assert!((p.noise_amplitude - 0.05).abs() < 1e-7);
}

#[test]
fn twenty_fps_drops_to_low() {
    let mut gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    let levels = feed_second(&mut gov, 0.0, 20);
    assert!(levels[..19].iter().all(Option::is_none));
    assert_eq!(levels[19], Some(PerformanceLevel::Low));
    assert_eq!(gov.last_fps(), Some(20));
    let p = gov.profile();
    assert_eq!(p.level, PerformanceLevel::Low);
    assert_eq!(p.update_interval_ms, 33.0);
    assert_eq!(p.position_batch_size, 1000);
    assert_eq!(p.color_batch_size, 5000);
    assert!((p.noise_amplitude - 0.03).abs() < 1e-7);
}

#[test]
fn forty_fps_is_medium_and_fifty_recovers_high() {
    let mut gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    feed_second(&mut gov, 0.0, 40);
    assert_eq!(gov.level(), PerformanceLevel::Medium);
    assert_eq!(gov.profile().position_batch_size, 750);

    feed_second(&mut gov, 1000.0, 50);
    assert_eq!(gov.level(), PerformanceLevel::High);
    assert_eq!(gov.last_fps(), Some(50));
}

#[test]
fn level_holds_until_the_window_closes() {
    let mut gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    feed_second(&mut gov, 0.0, 20);
    assert_eq!(gov.level(), PerformanceLevel::Low);

    // a burst of fast frames inside the next window changes nothing yet
    for k in 1..=900 {
        assert!(gov.record_frame(1000.0 + k as f64).is_none());
        assert_eq!(gov.level(), PerformanceLevel::Low);
    }
    let sample = gov.record_frame(2000.0).expect("window should close");
    assert!(sample.changed);
    assert_eq!(sample.level, PerformanceLevel::High);
}

#[test]
fn window_starts_at_creation_time() {
    let mut gov = PerformanceGovernor::new(GovernorConfig::default(), 50_000.0);
    assert!(gov.record_frame(50_500.0).is_none());
    assert_eq!(gov.level(), PerformanceLevel::High);
}

#[test]
fn stalled_window_is_normalised_to_per_second() {
    let mut gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    // one frame after a five second stall
    let sample = gov.record_frame(5000.0).expect("window closed");
    assert_eq!(sample.fps, 0);
    assert_eq!(sample.level, PerformanceLevel::Low);
}

#[test]
fn classification_boundaries() {
    let gov = PerformanceGovernor::new(GovernorConfig::default(), 0.0);
    assert_eq!(gov.classify(0), PerformanceLevel::Low);
    assert_eq!(gov.classify(29), PerformanceLevel::Low);
    assert_eq!(gov.classify(30), PerformanceLevel::Medium);
    assert_eq!(gov.classify(44), PerformanceLevel::Medium);
    assert_eq!(gov.classify(45), PerformanceLevel::High);
    assert_eq!(gov.classify(120), PerformanceLevel::High);
}
