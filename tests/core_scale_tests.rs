use approx::assert_abs_diff_eq;
use density_strip::core::{Extent, LinearScale, extent};

#[test]
fn linear_scale_maps_and_inverts_inside_range() {
    let scale = LinearScale::new((1.0, 5.0), (0.0, 380.0)).expect("valid scale");

    assert_abs_diff_eq!(scale.map(1.0), 0.0);
    assert_abs_diff_eq!(scale.map(3.0), 190.0);
    assert_abs_diff_eq!(scale.map(5.0), 380.0);
    assert_abs_diff_eq!(scale.invert(95.0), 2.0, epsilon = 1e-12);
}

#[test]
fn inverted_range_maps_zero_to_bottom() {
    let scale = LinearScale::new((0.0, 3.0), (45.0, 0.0)).expect("valid scale");

    assert_abs_diff_eq!(scale.map(0.0), 45.0);
    assert_abs_diff_eq!(scale.map(3.0), 0.0);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((7.0, 7.0), (0.0, 100.0)).expect("valid scale");

    assert!(scale.is_degenerate());
    assert_abs_diff_eq!(scale.map(7.0), 50.0);
    assert_abs_diff_eq!(scale.map(-1000.0), 50.0);
    assert_eq!(scale.ticks(100), vec![7.0]);
}

#[test]
fn non_finite_domain_is_rejected() {
    assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)).is_err());
}

#[test]
fn ticks_are_evenly_spaced_and_stay_inside_domain() {
    let scale = LinearScale::new((40_528.0, 76_067.0), (0.0, 1.0)).expect("valid scale");
    let ticks = scale.ticks(100);

    assert!(ticks.len() >= 50 && ticks.len() <= 200, "got {} ticks", ticks.len());
    assert!(ticks.iter().all(|t| (40_528.0..=76_067.0).contains(t)));
    let step = ticks[1] - ticks[0];
    for pair in ticks.windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], step, epsilon = 1e-9);
    }
}

#[test]
fn extent_skips_non_finite_samples() {
    assert_eq!(
        extent(&[3.0, f64::NAN, -2.0, 9.5, f64::INFINITY]),
        Some(Extent::new(-2.0, 9.5))
    );
    assert_eq!(extent(&[]), None);
    assert_eq!(extent(&[f64::NAN]), None);
}
