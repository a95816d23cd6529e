use approx::assert_abs_diff_eq;
use density_strip::core::{Kernel, KernelDensity};

fn integrate(kernel: Kernel, bound: f64) -> f64 {
    let steps = 200_000;
    let dx = 2.0 * bound / steps as f64;
    (0..steps)
        .map(|i| kernel.evaluate(-bound + (i as f64 + 0.5) * dx) * dx)
        .sum()
}

#[test]
fn every_kernel_integrates_to_one() {
    for kernel in Kernel::ALL {
        let bound = if kernel.is_compact() { 1.0 } else { 60.0 };
        assert_abs_diff_eq!(integrate(kernel, bound), 1.0, epsilon = 1e-3);
    }
}

#[test]
fn compact_kernels_vanish_outside_unit_interval() {
    for kernel in Kernel::ALL.into_iter().filter(|k| k.is_compact()) {
        assert_eq!(kernel.evaluate(1.5), 0.0, "{kernel}");
        assert_eq!(kernel.evaluate(-1.01), 0.0, "{kernel}");
    }
}

#[test]
fn kernel_names_round_trip_and_accept_aliases() {
    for kernel in Kernel::ALL {
        assert_eq!(kernel.name().parse::<Kernel>().expect("known name"), kernel);
    }
    assert_eq!("Boxcar".parse::<Kernel>().expect("alias"), Kernel::Uniform);
    assert_eq!("quartic".parse::<Kernel>().expect("alias"), Kernel::Biweight);
    assert!("parabolic".parse::<Kernel>().is_err());
}

#[test]
fn density_at_isolated_sample_is_peak_over_n_times_bandwidth() {
    let density = KernelDensity::new(&[1.0, 2.0, 3.0, 4.0, 5.0], Kernel::Epanechnikov, 0.05)
        .expect("valid estimator");

    assert_abs_diff_eq!(density.evaluate(3.0), 3.0, epsilon = 1e-12);
    // u = -0.8: 0.75 * (1 - 0.64) / 0.25
    assert_abs_diff_eq!(density.evaluate(2.96), 1.08, epsilon = 1e-9);
    assert_eq!(density.evaluate(3.5), 0.0);
}

#[test]
fn density_far_outside_follows_kernel_tail() {
    let density = KernelDensity::new(&[0.0], Kernel::Gaussian, 1.0).expect("valid estimator");

    assert_abs_diff_eq!(density.evaluate(3.0), Kernel::Gaussian.evaluate(3.0));
    assert!(density.evaluate(30.0) >= 0.0);
}

#[test]
fn estimator_drops_non_finite_samples_and_handles_empty_sets() {
    let density = KernelDensity::new(&[f64::NAN, 2.0], Kernel::Uniform, 1.0).expect("valid");
    assert_eq!(density.sample_count(), 1);
    assert_abs_diff_eq!(density.evaluate(2.0), 0.5);

    let empty = KernelDensity::new(&[], Kernel::Uniform, 1.0).expect("valid");
    assert_eq!(empty.evaluate(0.0), 0.0);
}

#[test]
fn estimator_rejects_non_positive_bandwidth() {
    assert!(KernelDensity::new(&[1.0], Kernel::Epanechnikov, 0.0).is_err());
    assert!(KernelDensity::new(&[1.0], Kernel::Epanechnikov, -1.0).is_err());
    assert!(KernelDensity::new(&[1.0], Kernel::Epanechnikov, f64::NAN).is_err());
}

#[test]
fn batch_sampling_matches_pointwise_evaluation() {
    let samples: Vec<f64> = (0..500).map(|i| f64::from(i % 37) * 0.5).collect();
    let density = KernelDensity::new(&samples, Kernel::Triweight, 1.2).expect("valid");
    let xs: Vec<f64> = (0..300).map(|i| f64::from(i) * 0.07).collect();

    let batch = density.sample(&xs);
    assert_eq!(batch.len(), xs.len());
    for (x, y) in xs.iter().zip(batch) {
        assert_eq!(y, density.evaluate(*x));
    }
}
