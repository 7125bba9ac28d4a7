// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for model building and sequential execution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use runtime::{InferenceEngine, ModelManifest, RuntimeConfig};

/// Pool → dense → bias → softmax head over a `size × size × channels` input.
fn head_manifest(size: usize, channels: usize, units: usize) -> ModelManifest {
    let dense: Vec<Vec<f64>> = (0..channels)
        .map(|c| (0..units).map(|u| ((c + u) % 7) as f64 * 0.1).collect())
        .collect();
    let bias = vec![0.0; units];
    let json = serde_json::json!({
        "model_type": "Sequential",
        "descriptors": [
            {"layer": "Input2D", "height": size, "width": size, "channel": channels},
            {"layer": "GlobalAveragePooling2D"},
            {"layer": "Dense2D", "units": units},
            {"layer": "Bias2D", "units": units},
            {"layer": "Softmax"}
        ],
        "weights": [[[dense]], [[[bias]]]]
    });
    ModelManifest::from_json(&json.to_string()).expect("valid manifest")
}

fn bench_model_build(c: &mut Criterion) {
    let manifest = head_manifest(7, 512, 1000);
    c.bench_function("build_head_512x1000", |b| {
        b.iter(|| {
            InferenceEngine::from_manifest(RuntimeConfig::default(), black_box(&manifest))
                .expect("engine")
        })
    });
}

fn bench_head_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("head_execution");
    for &size in &[7usize, 14, 28] {
        let manifest = head_manifest(size, 64, 10);
        let mut engine =
            InferenceEngine::from_manifest(RuntimeConfig::default(), &manifest).expect("engine");
        let input = engine.default_input().expect("input");
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| engine.run(black_box(input.clone())).expect("run"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_model_build, bench_head_execution);
criterion_main!(benches);
