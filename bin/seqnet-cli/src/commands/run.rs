// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `seqnet run` command: execute inference on a file or constant input.

use anyhow::{bail, Context};
use runtime::{InferenceEngine, InferenceOutput, Ready, RuntimeConfig};
use std::path::{Path, PathBuf};
use tensor_core::{Data2D, DataArray, Dimension};

pub fn execute(
    config: RuntimeConfig,
    input: Option<PathBuf>,
    fill: f64,
    json: bool,
) -> anyhow::Result<()> {
    let model_path = config.model_path.clone();
    let mut engine = InferenceEngine::new(config)
        .load_model()
        .with_context(|| format!("failed to load model from '{}'", model_path.display()))?;

    let tensor = match input {
        Some(path) => read_input(&engine, &path)?,
        None => {
            let mut tensor = engine.default_input()?;
            tensor.fill(fill);
            tensor
        }
    };
    tracing::info!("running on input {}", tensor.dimension());

    let output = engine.run(tensor)?;
    if json {
        print_json(&output)?;
    } else {
        print_results(&output);
    }
    Ok(())
}

/// Reads a flat JSON array and shapes it to the model input.
///
/// The batch size is inferred from the number of values.
fn read_input(engine: &InferenceEngine<Ready>, path: &Path) -> anyhow::Result<Data2D> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read input '{}'", path.display()))?;
    let values: Vec<f64> = serde_json::from_str(&content)
        .with_context(|| format!("input '{}' is not a JSON array of numbers", path.display()))?;
    let array = DataArray::from(values);

    let declared = engine.input_dimension();
    let per_sample = declared.spatial_area().saturating_mul(declared.c);
    if per_sample == 0 || array.is_empty() || array.len() % per_sample != 0 {
        bail!(
            "{} input values cannot be shaped to {} (multiples of {per_sample} expected)",
            array.len(),
            declared
        );
    }
    let dim = Dimension::new(declared.h, declared.w, declared.c, array.len() / per_sample);
    Ok(Data2D::from_array(dim, &array)?)
}

fn print_results(output: &InferenceOutput) {
    println!("  Layers:");
    for summary in &output.summaries {
        println!("   {summary}");
    }
    println!();

    let tensor = &output.output;
    let dim = tensor.dimension();
    let per_sample = dim.h * dim.w * dim.c;
    println!("  Output {dim}:");
    if per_sample > 0 {
        for (b, sample) in tensor.as_slice().chunks(per_sample).enumerate() {
            println!("   [{b}] {sample:?}");
        }
    }
    println!();

    if !output.metrics.layer_metrics.is_empty() {
        println!("  Metrics:");
        println!("   {}", output.metrics.summary());
        for layer in &output.metrics.layer_metrics {
            println!(
                "   {:<24} {:>10.3} ms",
                layer.layer_name,
                layer.compute_duration.as_secs_f64() * 1000.0,
            );
        }
        println!();
    }
}

fn print_json(output: &InferenceOutput) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "dimension": output.output.dimension(),
        "values": output.output.as_slice(),
        "summaries": output.summaries,
        "metrics": output.metrics,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
