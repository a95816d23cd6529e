use criterion::{Criterion, criterion_group, criterion_main};
use density_strip::api::{DEFAULT_SAMPLES, DensityChart};
use density_strip::core::{Kernel, KernelDensity, LinearScale};
use density_strip::render::Document;
use std::hint::black_box;

fn bench_kde_sampling_10k(c: &mut Criterion) {
    let samples: Vec<f64> = (0..10_000)
        .map(|i| {
            let t = f64::from(i);
            (t * 0.618).sin() * 50.0 + t * 0.01
        })
        .collect();
    let density =
        KernelDensity::new(&samples, Kernel::Epanechnikov, 2.5).expect("valid estimator");
    let ticks = LinearScale::new((-50.0, 150.0), (0.0, 1.0))
        .expect("valid scale")
        .ticks(100);

    c.bench_function("kde_sampling_10k", |b| {
        b.iter(|| {
            let _ = density.sample(black_box(&ticks));
        })
    });
}

fn bench_full_render_default_samples(c: &mut Criterion) {
    let mut doc = Document::new();
    let target = doc.create_element("div");
    doc.append_child(doc.root(), target).expect("append");
    doc.set_layout_width(target, 960.0).expect("width");
    let mut chart = DensityChart::new();
    chart.set_point(55_000.0);

    c.bench_function("full_render_default_samples", |b| {
        b.iter(|| {
            chart
                .render(&mut doc, target, black_box(&DEFAULT_SAMPLES))
                .expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_kde_sampling_10k,
    bench_full_render_default_samples
);
criterion_main!(benches);
