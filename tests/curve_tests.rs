use density_strip::core::{CurvePoint, curve_basis, curve_monotone_x, symbol_triangle};

fn points(raw: &[(f64, f64)]) -> Vec<CurvePoint> {
    raw.iter().map(|&(x, y)| CurvePoint::new(x, y)).collect()
}

#[test]
fn basis_curve_starts_and_ends_on_outer_points() {
    let path = curve_basis(&points(&[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)]));

    assert_eq!(path, "M0,0L1,1C2,2,4,4,6,4C8,4,10,2,11,1L12,0");
}

#[test]
fn basis_curve_degenerates_to_line_and_dot() {
    assert_eq!(curve_basis(&points(&[(0.0, 0.0), (10.0, 10.0)])), "M0,0L10,10");
    assert_eq!(curve_basis(&points(&[(3.0, 4.0)])), "M3,4Z");
    assert_eq!(curve_basis(&[]), "");
}

#[test]
fn monotone_curve_handles_vertical_band_edges() {
    let band = points(&[(10.0, 45.0), (10.0, 20.0), (14.0, 30.0), (14.0, 45.0)]);
    let path = curve_monotone_x(&band);

    assert!(path.starts_with("M10,45C"), "{path}");
    assert!(path.ends_with(",14,45"), "{path}");
    assert!(!path.contains("NaN") && !path.contains("inf"), "{path}");
    assert_eq!(path.matches('C').count(), 3);
}

#[test]
fn monotone_curve_skips_coincident_points() {
    assert_eq!(
        curve_monotone_x(&points(&[(0.0, 0.0), (0.0, 0.0), (5.0, 5.0)])),
        "M0,0L5,5"
    );
    assert_eq!(curve_monotone_x(&points(&[(1.0, 2.0)])), "M1,2Z");
    assert_eq!(curve_monotone_x(&[]), "");
}

#[test]
fn monotone_curve_never_overshoots_monotone_data() {
    let data = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 10.0), (3.0, 10.0)]);
    let path = curve_monotone_x(&data);
    let values: Vec<f64> = path
        .split(|c: char| c.is_ascii_alphabetic() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().expect("numeric path value"))
        .collect();

    for y in values.iter().skip(1).step_by(2) {
        assert!((0.0..=10.0).contains(y), "control point y={y} overshoots");
    }
}

#[test]
fn triangle_symbol_has_requested_area_scale() {
    let path = symbol_triangle(3.0 * 3f64.sqrt());

    assert!(path.starts_with("M0,-2L"), "{path}");
    assert!(path.ends_with('Z'));
    assert_eq!(symbol_triangle(0.0), "M0,0L0,0L0,0Z");
    assert_eq!(symbol_triangle(-12.0), symbol_triangle(0.0));
}
