// Host-side tests for the morph controller state machine.

use morph_core::config::{ColorClamp, ConfigError, MorphConfig};
use morph_core::{
    base_color, CyclePhase, FrameComponent, FrameTime, MorphController, PerformanceLevel,
    ShapeArchetype, TickOutcome,
};

const SEED: u64 = 42;

fn make_controller(particles: usize) -> MorphController {
    let config = MorphConfig::default().with_particle_count(particles);
    let mut c = MorphController::new(config, SEED).expect("valid config");
    c.start(0.0);
    c
}

/// Tick every `step_ms` from `from_ms` (exclusive) while below `to_ms`.
fn run(c: &mut MorphController, from_ms: f64, to_ms: f64, step_ms: f64) -> Vec<TickOutcome> {
    let mut out = Vec::new();
    let mut t = from_ms + step_ms;
    while t < to_ms {
        out.push(c.tick(t));
        t += step_ms;
    }
    out
}

#[test]
fn rejects_empty_cloud() {
    let config = MorphConfig::default().with_particle_count(0);
    assert!(matches!(
        MorphController::new(config, SEED),
        Err(ConfigError::EmptyCloud)
    ));
}

#[test]
fn starts_on_torus_with_dirty_buffers() {
    let mut c = make_controller(500);
    let state = c.state();
    assert_eq!(state.current_shape, ShapeArchetype::Torus);
    assert_eq!(state.next_shape, ShapeArchetype::Sphere);
    assert_eq!(state.phase, CyclePhase::Stable);
    assert_eq!(state.progress, 0.0);

    let torus = c.shapes().cloud(ShapeArchetype::Torus).points().to_vec();
    assert_eq!(c.buffers().positions(), &torus[..]);
    assert!(c
        .buffers()
        .colors()
        .iter()
        .all(|col| *col == base_color(ShapeArchetype::Torus)));

    let dirty = c.take_dirty();
    assert!(dirty.positions.is_some() && dirty.colors.is_some());
    assert!(c.take_dirty().is_empty());
}

#[test]
fn stable_just_before_the_morph_threshold() {
    let mut c = make_controller(1000);
    run(&mut c, 0.0, 3999.0, 40.0);
    assert_eq!(c.tick(3999.0), TickOutcome::Resting);
    let s = c.state();
    assert_eq!(s.phase, CyclePhase::Stable);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.current_shape, ShapeArchetype::Torus);
}

#[test]
fn cycle_morphs_then_wraps_back_to_stable() {
    let mut c = make_controller(1000);
    run(&mut c, 0.0, 4000.0, 40.0);

    let outcome = c.tick(4001.0);
    assert!(matches!(outcome, TickOutcome::Morphed { .. }), "{outcome:?}");
    let s = c.state();
    assert_eq!(s.phase, CyclePhase::Morphing);
    assert!(s.progress > 0.0);
    assert!((s.progress - 0.0005).abs() < 1e-6);
    assert_eq!(s.current_shape, ShapeArchetype::Sphere);
    assert_eq!(s.next_shape, ShapeArchetype::Lissajous);

    // progress only grows inside the morph
    let mut last = s.progress;
    for outcome in run(&mut c, 4001.0, 5999.0, 40.0) {
        if let TickOutcome::Morphed { progress, .. } = outcome {
            assert!(progress >= last);
            last = progress;
        }
    }
    assert!(last > 0.95);

    assert_eq!(c.tick(6000.0), TickOutcome::Resting);
    let s = c.state();
    assert_eq!(s.phase, CyclePhase::Stable);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.current_shape, ShapeArchetype::Torus.next_in_sequence());
}

#[test]
fn seven_cycles_visit_every_shape_in_order() {
    let mut c = make_controller(200);
    let mut seen = Vec::new();
    for cycle in 0..7 {
        let base = cycle as f64 * 6000.0;
        run(&mut c, base, base + 4000.0, 50.0);
        c.tick(base + 4050.0);
        seen.push(c.state().current_shape);
        run(&mut c, base + 4050.0, base + 6000.0, 50.0);
    }
    assert_eq!(
        seen,
        vec![
            ShapeArchetype::Sphere,
            ShapeArchetype::Lissajous,
            ShapeArchetype::DnaHelix,
            ShapeArchetype::FractalCube,
            ShapeArchetype::GalaxySpiral,
            ShapeArchetype::WaveForm,
            ShapeArchetype::Torus,
        ]
    );
}

#[test]
fn positions_arrive_at_next_shape_within_jitter() {
    let mut c = make_controller(1000);
    run(&mut c, 0.0, 5999.0, 20.0);
    c.tick(5999.0);
    let s = c.state();
    assert_eq!(s.phase, CyclePhase::Morphing);
    let target = c.shapes().cloud(s.next_shape).points().to_vec();
    let amp = c.profile().noise_amplitude;
    for (p, t) in c.buffers().positions().iter().zip(&target) {
        let d = (*p - *t).abs();
        assert!(d.max_element() <= amp + 1e-3, "drift {d:?}");
    }
}

#[test]
fn degraded_tiers_shrink_the_jitter() {
    // 40 fps lands in the medium tier, 25 fps in the low tier
    for (step_ms, level, amp) in [
        (25.0, PerformanceLevel::Medium, 0.04),
        (40.0, PerformanceLevel::Low, 0.03),
    ] {
        let mut c = make_controller(1000);
        run(&mut c, 0.0, 5999.0, step_ms);
        assert!(matches!(c.tick(5999.0), TickOutcome::Morphed { .. }));
        let profile = c.profile();
        assert_eq!(profile.level, level);
        assert_eq!(profile.noise_amplitude, amp);

        let target = c.shapes().cloud(c.state().next_shape).points().to_vec();
        for (p, t) in c.buffers().positions().iter().zip(&target) {
            let d = (*p - *t).abs().max_element();
            assert!(d <= amp + 1e-3, "{level} drift {d}");
        }
    }
}

#[test]
fn stable_phase_leaves_buffers_untouched() {
    let mut c = make_controller(500);
    run(&mut c, 0.0, 5000.0, 40.0);
    assert_eq!(c.state().phase, CyclePhase::Morphing);
    let _ = c.take_dirty();

    run(&mut c, 5000.0, 6000.0, 40.0);
    let frozen = c.buffers().positions().to_vec();
    let frozen_colors = c.buffers().colors().to_vec();
    let _ = c.take_dirty();

    for outcome in run(&mut c, 6000.0, 9900.0, 40.0) {
        assert!(matches!(outcome, TickOutcome::Resting | TickOutcome::Skipped));
    }
    assert_eq!(c.state().phase, CyclePhase::Stable);
    assert_eq!(c.buffers().positions(), &frozen[..]);
    assert_eq!(c.buffers().colors(), &frozen_colors[..]);
    assert!(c.take_dirty().is_empty());
}

#[test]
fn morph_marks_both_buffers_dirty() {
    let mut c = make_controller(300);
    let _ = c.take_dirty();
    run(&mut c, 0.0, 4500.0, 40.0);
    let dirty = c.take_dirty();
    assert_eq!(dirty.positions.map(<[_]>::len), Some(300));
    assert_eq!(dirty.colors.map(<[_]>::len), Some(300));
}

#[test]
fn at_most_two_consecutive_skips() {
    let mut c = make_controller(100);
    assert_eq!(c.tick(100.0), TickOutcome::Resting);
    assert_eq!(c.tick(101.0), TickOutcome::Skipped);
    assert_eq!(c.consecutive_skips(), 1);
    assert_eq!(c.tick(102.0), TickOutcome::Skipped);
    assert_eq!(c.consecutive_skips(), 2);
    // forced update after the budget is spent
    assert_eq!(c.tick(103.0), TickOutcome::Resting);
    assert_eq!(c.consecutive_skips(), 0);
    assert_eq!(c.tick(104.0), TickOutcome::Skipped);
}

#[test]
fn a_flood_of_fast_ticks_never_starves_updates() {
    let mut c = make_controller(100);
    let outcomes = run(&mut c, 0.0, 900.0, 1.0);
    let mut streak = 0;
    for o in outcomes {
        if o == TickOutcome::Skipped {
            streak += 1;
            assert!(streak <= 2);
        } else {
            streak = 0;
        }
    }
}

#[test]
fn slow_ticks_are_never_skipped() {
    let mut c = make_controller(100);
    assert!(run(&mut c, 0.0, 3000.0, 40.0)
        .iter()
        .all(|o| *o != TickOutcome::Skipped));
}

#[test]
fn batch_counts_follow_the_performance_tier() {
    let mut fast = make_controller(2000);
    run(&mut fast, 0.0, 4020.0, 20.0);
    assert_eq!(fast.governor().level(), PerformanceLevel::High);
    match fast.tick(4020.0) {
        TickOutcome::Morphed {
            position_batches,
            color_batches,
            ..
        } => {
            assert_eq!(position_batches, 4);
            assert_eq!(color_batches, 1);
        }
        other => panic!("expected a morph update, got {other:?}"),
    }

    let mut slow = make_controller(2000);
    run(&mut slow, 0.0, 4040.0, 40.0);
    assert_eq!(slow.governor().level(), PerformanceLevel::Low);
    match slow.tick(4040.0) {
        TickOutcome::Morphed {
            position_batches, ..
        } => assert_eq!(position_batches, 2),
        other => panic!("expected a morph update, got {other:?}"),
    }
}

#[test]
fn stalled_host_still_advances_one_shape_per_morph() {
    let mut c = make_controller(100);
    c.tick(4500.0);
    assert_eq!(c.state().current_shape, ShapeArchetype::Sphere);
    // next tick lands in the following cycle's morph without seeing a rest
    c.tick(10_500.0);
    assert_eq!(c.state().phase, CyclePhase::Morphing);
    assert_eq!(c.state().current_shape, ShapeArchetype::Lissajous);
}

#[test]
fn scene_motion_advances_per_update() {
    let mut c = make_controller(100);
    let before = c.motion();
    assert_eq!(before.point_size, 20.0);
    c.tick(100.0);
    c.tick(101.0); // skipped
    c.tick(200.0);
    let m = c.motion();
    assert!((m.rotation.y - 0.016).abs() < 1e-6);
    assert!((m.rotation.x - 0.016 * 0.7).abs() < 1e-6);
    assert!((m.pulse_phase - 0.16).abs() < 1e-6);
    assert!((m.point_size - (20.0 + 0.16f32.sin() * 5.0)).abs() < 1e-4);
}

#[test]
fn frame_component_init_restarts_the_cycle() {
    let config = MorphConfig::default().with_particle_count(100);
    let mut c = MorphController::new(config, SEED).expect("valid config");
    c.on_init(FrameTime::new(10_000.0, 0.0));
    c.on_tick(FrameTime::new(13_999.0, 16.0));
    assert_eq!(c.state().phase, CyclePhase::Stable);
    c.on_tick(FrameTime::new(14_100.0, 16.0));
    assert_eq!(c.state().phase, CyclePhase::Morphing);
}

#[test]
fn legacy_clamp_can_produce_negative_colors() {
    let mut config = MorphConfig::default().with_particle_count(2000);
    config.color_clamp = ColorClamp::UpperOnly;
    let mut c = MorphController::new(config, SEED).expect("valid config");
    c.start(0.0);
    // morph from Lissajous (r=1,g=0) to DnaHelix (r=0,g=1) in the second cycle
    run(&mut c, 0.0, 10_100.0, 40.0);
    assert_eq!(c.state().current_shape, ShapeArchetype::Lissajous);
    let any_negative = c
        .buffers()
        .colors()
        .iter()
        .any(|col| col.r < 0.0 || col.g < 0.0 || col.b < 0.0);
    assert!(any_negative);
}
