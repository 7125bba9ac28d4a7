// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and sequential execution.

use tensor_core::{Dimension, TensorError};

/// Errors that can occur when reading or building a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model descriptor file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestRead(#[from] std::io::Error),

    /// The descriptor JSON is malformed or names an unknown layer.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Only sequential models are supported.
    #[error("unsupported model type '{0}', expected 'Sequential'")]
    UnsupportedModelType(String),

    /// The descriptor list is structurally invalid.
    #[error("invalid descriptor at position {position}: {detail}")]
    InvalidDescriptor { position: usize, detail: String },

    /// A weight entry is not a rectangular 4-D array.
    #[error("invalid weight tensor {index}: {detail}")]
    InvalidWeights { index: usize, detail: String },

    /// The number of weight tensors differs from what the layers consume.
    #[error("model expects {expected} weight tensors, manifest provides {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    /// A layer rejected its weights while the model was being built.
    #[error("layer {index} ({name}) rejected its weights: {source}")]
    Weights {
        index: usize,
        name: &'static str,
        #[source]
        source: layers::LayerError,
    },

    /// A tensor could not be constructed.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}

/// Errors that can occur during inference execution.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Model loading failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// A layer failed while processing its input.
    #[error("execution error in layer {index} ({name}): {source}")]
    Layer {
        index: usize,
        name: &'static str,
        #[source]
        source: layers::LayerError,
    },

    /// The input tensor does not match the model's declared input.
    #[error("input shape {actual} does not match model input {expected}")]
    InputShape {
        expected: Dimension,
        actual: Dimension,
    },

    /// A tensor operation outside any layer failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
