// Host-side tests for the radial equalizer layout.

use glam::Vec3;
use morph_core::config::EqualizerConfig;
use morph_core::{bar_angle, Equalizer, FrameComponent, FrameTime, SpectrumSource};

struct FixedSpectrum {
    playing: bool,
    data: Vec<u8>,
}

impl SpectrumSource for FixedSpectrum {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn read_spectrum(&mut self, out: &mut [u8]) {
        for (o, v) in out.iter_mut().zip(self.data.iter().chain(std::iter::repeat(&0))) {
            *o = *v;
        }
    }
}

fn make(playing: bool, data: Vec<u8>) -> Equalizer<FixedSpectrum> {
    Equalizer::new(EqualizerConfig::default(), FixedSpectrum { playing, data }, 1.0)
        .expect("valid config")
}

#[test]
fn paused_audio_leaves_bars_alone() {
    let mut eq = make(false, vec![255; 128]);
    eq.on_tick(FrameTime::new(16.0, 16.0));
    assert!(eq.bars().is_empty());
    assert_eq!(eq.sphere_scale(), 1.0);
}

#[test]
fn heights_are_smoothed_towards_the_target() {
    let mut eq = make(true, vec![255; 128]);
    eq.update();
    assert_eq!(eq.bars().len(), 32);
    for h in eq.heights() {
        assert!((h - 0.45).abs() < 1e-6);
    }
    for _ in 0..200 {
        eq.update();
    }
    for h in eq.heights() {
        assert!((h - 1.5).abs() < 1e-4);
    }
}

#[test]
fn silence_settles_on_the_minimum_height() {
    let mut eq = make(true, vec![0; 128]);
    for _ in 0..200 {
        eq.update();
    }
    for bar in eq.bars() {
        assert!((bar.height - 0.1).abs() < 1e-4);
        assert_eq!(bar.width, 0.02);
    }
    assert_eq!(eq.sphere_scale(), 1.0);
}

#[test]
fn each_bar_reads_its_own_bin() {
    // 32 bars over 128 bins: bar i samples bin 4 * i
    let mut data = vec![0u8; 128];
    data[8] = 255;
    let mut eq = make(true, data);
    eq.update();
    let heights = eq.heights();
    assert!((heights[2] - 0.45).abs() < 1e-6);
    for (i, h) in heights.iter().enumerate() {
        if i != 2 {
            assert!((h - 0.03).abs() < 1e-6, "bar {i} height {h}");
        }
    }
}

#[test]
fn bars_fan_around_the_front_half_circle() {
    let mut eq = make(true, vec![0; 128]);
    eq.set_anchor(Vec3::new(0.5, 2.0, -1.0));
    eq.update();
    let bars = eq.bars();
    let ring = 1.1;

    let first = bars[0];
    assert!((first.position.x - (0.5 - ring)).abs() < 1e-5);
    assert!((first.position.z - (-1.0)).abs() < 1e-5);
    assert!(first.yaw_deg.abs() < 1e-4);

    let last = bars[31];
    assert!((last.position.x - (0.5 + ring)).abs() < 1e-5);
    assert!((last.yaw_deg + 180.0).abs() < 1e-4);

    // bars stand on the bottom of the sphere
    for bar in bars {
        let bottom = 2.0 - 1.0;
        assert!((bar.position.y - (bottom + bar.height / 2.0)).abs() < 1e-6);
        let planar = Vec3::new(bar.position.x - 0.5, 0.0, bar.position.z + 1.0).length();
        assert!((planar - ring).abs() < 1e-4);
    }
}

#[test]
fn sphere_scale_tracks_mean_level() {
    let mut eq = make(true, vec![255; 128]);
    eq.update();
    assert!((eq.sphere_scale() - 1.5).abs() < 1e-6);

    let half: Vec<u8> = (0..128).map(|i| if i % 2 == 0 { 255 } else { 0 }).collect();
    let mut eq = make(true, half);
    eq.update();
    assert!((eq.sphere_scale() - 1.25).abs() < 1e-6);
}

#[test]
fn single_bar_faces_forward() {
    assert_eq!(bar_angle(0, 1), 0.0);
    assert!((bar_angle(0, 32) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert!((bar_angle(31, 32) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn rejects_empty_layout() {
    let config = EqualizerConfig {
        bar_count: 0,
        ..EqualizerConfig::default()
    };
    let source = FixedSpectrum {
        playing: true,
        data: vec![],
    };
    assert!(Equalizer::new(config, source, 1.0).is_err());
}

#[test]
fn resized_sphere_moves_the_ring_on_next_update() {
    let mut eq = make(true, vec![0; 128]);
    eq.update();
    eq.set_sphere_radius(2.0);
    // layout is stale until the next spectrum frame
    assert!((eq.bars()[0].position.x + 1.1).abs() < 1e-5);
    eq.update();
    let first = eq.bars()[0];
    assert!((first.position.x + 2.2).abs() < 1e-5);
    assert!((first.position.y - (-2.0 + first.height / 2.0)).abs() < 1e-6);
}
