//! Criterion benchmarks for the flanger engine
//!
//! Run with: cargo bench -p flange-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flange_core::{Effect, Interpolation, Sample, SignalInfo};
use flange_effects::{FlangerEngine, ParameterSet};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(frames: usize, channels: usize) -> Vec<Sample> {
    (0..frames * channels)
        .map(|i| {
            let t = (i / channels) as f64 / SAMPLE_RATE;
            ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 1.0e9) as Sample
        })
        .collect()
}

fn bench_flanger(c: &mut Criterion) {
    for interp in Interpolation::ALL {
        let mut group = c.benchmark_group(format!("Flanger/{interp}"));

        for &block_size in BLOCK_SIZES {
            let params = ParameterSet::builder()
                .depth_ms(5.0)
                .feedback_pct(50.0)
                .interpolation(interp)
                .build()
                .unwrap();
            let mut flanger = FlangerEngine::new(params);
            flanger.start(SignalInfo::new(SAMPLE_RATE, 2)).unwrap();
            let input = generate_test_signal(block_size, 2);

            group.bench_with_input(
                BenchmarkId::from_parameter(block_size),
                &block_size,
                |b, _| {
                    let mut output = vec![0; input.len()];
                    b.iter(|| {
                        flanger.flow(black_box(&input), &mut output).unwrap();
                        black_box(output[0])
                    })
                },
            );
        }

        group.finish();
    }
}

fn bench_start(c: &mut Criterion) {
    c.bench_function("Flanger/start", |b| {
        b.iter(|| {
            let mut flanger = FlangerEngine::default();
            flanger
                .start(black_box(SignalInfo::new(SAMPLE_RATE, 2)))
                .unwrap();
            black_box(flanger.lfo_len())
        })
    });
}

criterion_group!(benches, bench_flanger, bench_start);
criterion_main!(benches);
