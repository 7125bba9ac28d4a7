// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: Run a small classifier head with average and max pooling.
//!
//! Builds the same pool → flatten → dense → bias → softmax chain twice,
//! once per pooling mode, and prints the layer shapes and class
//! probabilities for a synthetic feature map.
//!
//! ```bash
//! cargo run -p runtime --example classifier_head
//! ```

use runtime::{InferenceEngine, ModelManifest, RuntimeConfig};
use tensor_core::Data2D;

const HEIGHT: usize = 4;
const WIDTH: usize = 4;
const CHANNELS: usize = 3;

fn manifest(pooling: &str) -> Result<ModelManifest, runtime::ModelError> {
    let json = format!(
        r#"{{
            "model_type": "Sequential",
            "descriptors": [
                {{"layer": "Input2D", "height": {HEIGHT}, "width": {WIDTH}, "channel": {CHANNELS}}},
                {{"layer": "{pooling}"}},
                {{"layer": "Flatten"}},
                {{"layer": "Dense2D", "units": 2}},
                {{"layer": "Bias2D", "units": 2}},
                {{"layer": "Softmax"}}
            ],
            "weights": [
                [[[[1.0, -1.0], [0.5, 0.5], [-1.0, 1.0]]]],
                [[[[0.1, -0.1]]]]
            ]
        }}"#
    );
    ModelManifest::from_json(&json)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt().with_env_filter("info").init();

    // A feature map whose channel 0 grows along the diagonal.
    let mut input = Data2D::new(HEIGHT, WIDTH, CHANNELS, 1)?;
    for h in 0..HEIGHT {
        for w in 0..WIDTH {
            input.set(h, w, 0, 0, (h + w) as f64 / 4.0)?;
            input.set(h, w, 1, 0, 0.5)?;
            input.set(h, w, 2, 0, if h == w { 1.0 } else { 0.0 })?;
        }
    }

    for pooling in ["GlobalAveragePooling2D", "GlobalMaxPooling2D"] {
        let mut engine = InferenceEngine::from_manifest(RuntimeConfig::default(), &manifest(pooling)?)?;
        let out = engine.run(input.clone())?;

        println!("── {pooling} ──");
        for summary in &out.summaries {
            println!("  {summary}");
        }
        println!("  probabilities: {:?}", out.output.as_slice());
        println!("  {}\n", out.metrics.summary());
    }

    Ok(())
}
