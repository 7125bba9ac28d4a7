// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! Loads sequential models from JSON descriptors and runs them layer by layer.
//!
//! The runtime takes:
//! - A [`ModelManifest`]: the layer descriptors and weights written by the
//!   model exporter.
//! - A [`RuntimeConfig`]: where the model lives, the batch size for generated
//!   inputs, and whether to profile.
//!
//! It builds one [`layers::Layer`] per descriptor, feeds each layer's output
//! to the next, and reports per-layer shapes and timings.
//!
//! # Type-State Pipeline
//! ```text
//! InferenceEngine<Idle> → InferenceEngine<Ready>
//! ```
//! Transitions are compile-time checked.

mod config;
mod engine;
mod error;
mod manifest;
mod metrics;
mod model;

pub use config::RuntimeConfig;
pub use engine::{EngineState, Idle, InferenceEngine, InferenceOutput, Ready};
pub use error::{ModelError, RuntimeError};
pub use manifest::{weight_to_tensor, LayerDescriptor, ModelManifest, WeightArray};
pub use metrics::{InferenceMetrics, LayerMetrics};
pub use model::SequentialModel;
