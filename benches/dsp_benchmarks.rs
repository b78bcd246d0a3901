//! DSP Benchmarks
//!
//! Performance benchmarks for parameter derivation and offline rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use patina::audio::AudioBuffer;
use patina::params::{distortion_curve, DerivedParams};
use patina::{Era, EraProcessor};

fn benchmark_distortion_curve(c: &mut Criterion) {
    c.bench_function("distortion_curve_full_drive", |b| {
        b.iter(|| distortion_curve(black_box(50.0)))
    });
}

fn benchmark_derive_params(c: &mut Criterion) {
    c.bench_function("derive_all_eras", |b| {
        b.iter(|| {
            for era in Era::ALL {
                black_box(DerivedParams::derive(era, black_box(0.8)));
            }
        })
    });
}

fn benchmark_era_render(c: &mut Criterion) {
    let input = AudioBuffer::sine_wave(440.0, 1.0, 44100);

    c.bench_function("render_1930s_1s_mono", |b| {
        b.iter(|| {
            let mut processor = EraProcessor::with_seed(Era::Era1930s, 44100, 7).unwrap();
            let mut buffer = input.clone();
            processor.process(black_box(&mut buffer)).unwrap();
        })
    });

    let stereo = AudioBuffer::stereo_sine_wave(440.0, 550.0, 1.0, 44100);

    c.bench_function("render_1970s_1s_stereo", |b| {
        b.iter(|| {
            let mut processor = EraProcessor::with_seed(Era::Era1970s, 44100, 7).unwrap();
            let mut buffer = stereo.clone();
            processor.process(black_box(&mut buffer)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_distortion_curve,
    benchmark_derive_params,
    benchmark_era_render
);
criterion_main!(benches);
