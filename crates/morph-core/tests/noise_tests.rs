// Host-side tests for the gradient noise field.

use morph_core::noise::{fade, NoiseField};

#[test]
fn sampling_is_deterministic() {
    let field = NoiseField::from_seed(99);
    let twin = NoiseField::from_seed(99);
    for i in 0..200 {
        let x = i as f32 * 0.173 - 11.0;
        let y = i as f32 * 0.311 + 3.5;
        let z = i as f32 * 0.057;
        let a = field.sample(x, y, z);
        assert_eq!(a, field.sample(x, y, z));
        assert_eq!(a, twin.sample(x, y, z));
    }
}

#[test]
fn output_stays_in_unit_range() {
    let field = NoiseField::from_seed(5);
    let mut seen_pos = false;
    let mut seen_neg = false;
    for i in 0..4000 {
        let f = i as f32;
        // mix of small jitter inputs and far-away coordinates
        let x = (f * 0.731).sin() * 300.0 + f * 0.013;
        let y = (f * 0.377).cos() * 250.0 + 100.0;
        let z = f * 0.021;
        let n = field.sample(x, y, z);
        assert!((-1.0..=1.0).contains(&n), "noise {n} out of range at {i}");
        seen_pos |= n > 0.1;
        seen_neg |= n < -0.1;
    }
    assert!(seen_pos && seen_neg, "field should swing both ways");
}

#[test]
fn lattice_points_are_zero() {
    let field = NoiseField::from_seed(7);
    for (x, y, z) in [(0.0, 0.0, 0.0), (3.0, -2.0, 17.0), (255.0, 256.0, -1.0)] {
        assert_eq!(field.sample(x, y, z), 0.0);
    }
}

#[test]
fn field_is_continuous() {
    let field = NoiseField::from_seed(11);
    let step = 1e-3;
    for i in 0..500 {
        let x = i as f32 * 0.0917;
        let y = 0.5 + i as f32 * 0.0131;
        let z = 2.25;
        let a = field.sample(x, y, z);
        let b = field.sample(x + step, y, z);
        assert!((a - b).abs() < 0.02, "jump {a} -> {b} at {x}");
    }
}

#[test]
fn different_seeds_give_different_fields() {
    let a = NoiseField::from_seed(1);
    let b = NoiseField::from_seed(2);
    let differs = (0..64).any(|i| {
        let f = i as f32 * 0.37 + 0.5;
        a.sample(f, f * 0.5, 0.25) != b.sample(f, f * 0.5, 0.25)
    });
    assert!(differs);
}

#[test]
fn fade_curve_endpoints() {
    assert_eq!(fade(0.0), 0.0);
    assert_eq!(fade(1.0), 1.0);
    assert!((fade(0.5) - 0.5).abs() < 1e-6);
}
