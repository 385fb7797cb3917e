//! Criterion benchmarks for profile assembly.
//!
//! The profile is rebuilt on every render pass, so assembly and diagonal
//! formatting sit on the render path.
//!
//! Run with:
//! ```bash
//! cargo bench --package screen-core --bench profile_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use screen_core::{assemble_profile, compute_aspect_reduction, format_half_up, RawDisplaySignals};

fn phone_signals() -> RawDisplaySignals {
    RawDisplaySignals {
        manufacturer: "samsung".to_string(),
        model: "SM-S911B".to_string(),
        brand: "samsung".to_string(),
        board: "kalama".to_string(),
        os_release: "14".to_string(),
        os_api_level: 34,
        width_dp: 360,
        height_dp: 780,
        density_dpi: 480,
        density: 3.0,
        width_px: 1080,
        height_px: 2340,
        xdpi: 425.0,
        ydpi: 425.0,
        smallest_width_bucket: 360,
    }
}

fn bench_assemble_profile(c: &mut Criterion) {
    let signals = phone_signals();
    c.bench_function("assemble_profile", |b| {
        b.iter(|| assemble_profile(black_box(&signals)))
    });
}

fn bench_format_half_up(c: &mut Criterion) {
    c.bench_function("format_half_up", |b| {
        b.iter(|| format_half_up(black_box(6.1362090271), black_box(2)))
    });
}

/// Aspect reduction across common resolutions; GCD depth varies per pair.
fn bench_aspect_reduction(c: &mut Criterion) {
    let resolutions = [(1920u32, 1080u32), (1080, 2400), (1440, 3120), (2560, 1600)];
    let mut group = c.benchmark_group("compute_aspect_reduction");

    for (w, h) in resolutions {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}")),
            &(w, h),
            |b, &(w, h)| b.iter(|| compute_aspect_reduction(black_box(w), black_box(h))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_assemble_profile,
    bench_format_half_up,
    bench_aspect_reduction,
);
criterion_main!(benches);
