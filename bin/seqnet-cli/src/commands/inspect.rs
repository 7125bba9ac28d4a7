// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `seqnet inspect` command: display the layer chain and inferred shapes.
//!
//! Shape inference runs every layer once on a zero-filled input of the
//! declared shape.

use anyhow::Context;
use runtime::{InferenceEngine, ModelManifest, RuntimeConfig};

pub fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    let manifest = ModelManifest::from_file(&config.model_path).with_context(|| {
        format!("failed to load model from '{}'", config.model_path.display())
    })?;
    let mut engine = InferenceEngine::from_manifest(config, &manifest)?;

    let input = engine.default_input()?;
    let output = engine
        .run(input)
        .context("shape inference failed on a zero input")?;

    println!("  Model:   {}", engine.config().model_path.display());
    println!("  Type:    {}", manifest.model_type);
    println!("  Input:   {}", engine.input_dimension());
    println!("  Layers:  {}", engine.model().num_layers());
    println!("  Weights: {} tensors", manifest.weights.len());
    println!();

    println!("  {:<4} {:<24} {:>14} {:>14}", "Idx", "Layer", "Input", "Output");
    println!("  {}", "-".repeat(60));
    for (index, summary) in output.summaries.iter().enumerate() {
        println!(
            "  {:<4} {:<24} {:>14} {:>14}",
            index,
            summary.name,
            summary.input.to_string(),
            summary.output.to_string(),
        );
    }
    println!();
    println!("  Output:  {}", output.output.dimension());
    Ok(())
}
