// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model descriptor parsing.
//!
//! The descriptor is the format written by the Keras model exporter: an
//! ordered list of layer descriptors followed by the flattened list of
//! weight tensors they consume.
//!
//! # Format
//! ```json
//! {
//!   "model_type": "Sequential",
//!   "descriptors": [
//!     {"layer": "Input2D", "height": 4, "width": 4, "channel": 3, "batch": 1},
//!     {"layer": "GlobalAveragePooling2D"},
//!     {"layer": "Dense2D", "units": 2},
//!     {"layer": "Bias2D", "units": 2},
//!     {"layer": "Softmax"}
//!   ],
//!   "weights": [
//!     [[[[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]]]],
//!     [[[[0.0, 0.0]]]]
//!   ]
//! }
//! ```
//!
//! Weight entry `[d0][d1][d2][d3]` becomes a tensor of shape
//! `(h = d0, w = d1, c = d2, b = d3)`.

use crate::ModelError;
use std::path::Path;
use tensor_core::ops::Activation;
use tensor_core::{Data2D, Dimension};

/// A weight tensor as nested JSON arrays, outermost axis first.
pub type WeightArray = Vec<Vec<Vec<Vec<f64>>>>;

/// Top-level model descriptor, deserialized from JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Model family. Only `"Sequential"` is supported.
    pub model_type: String,
    /// Layer descriptors in execution order, starting with `Input2D`.
    pub descriptors: Vec<LayerDescriptor>,
    /// Weight tensors, consumed in order by the parameterised layers.
    #[serde(default)]
    pub weights: Vec<WeightArray>,
}

fn default_batch() -> i64 {
    1
}

/// A single entry of the descriptor list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "layer")]
pub enum LayerDescriptor {
    /// Declares the model input shape. Must come first.
    Input2D {
        height: i64,
        width: i64,
        channel: i64,
        #[serde(default = "default_batch")]
        batch: i64,
    },
    Flatten,
    GlobalAveragePooling1D,
    GlobalAveragePooling2D,
    GlobalMaxPooling1D,
    GlobalMaxPooling2D,
    /// Per-sample target shape; the element count must match the input.
    Reshape {
        height: usize,
        width: usize,
        channel: usize,
    },
    /// 1-based axis order: 1 = height, 2 = width, 3 = channel.
    Permute {
        dim1: usize,
        dim2: usize,
        dim3: usize,
    },
    RepeatVector {
        num: usize,
    },
    Cropping1D {
        #[serde(rename = "trimBegin")]
        trim_begin: usize,
        #[serde(rename = "trimEnd")]
        trim_end: usize,
    },
    Cropping2D {
        #[serde(rename = "topTrim")]
        top_trim: usize,
        #[serde(rename = "bottomTrim")]
        bottom_trim: usize,
        #[serde(rename = "leftTrim")]
        left_trim: usize,
        #[serde(rename = "rightTrim")]
        right_trim: usize,
    },
    Dense2D {
        units: usize,
    },
    Bias2D {
        units: usize,
    },
    ReLu,
    ELu,
    HardSigmoid,
    Sigmoid,
    SoftPlus,
    SoftSign,
    TanH,
    Softmax,
}

impl LayerDescriptor {
    /// Returns the activation this descriptor names, if it is one.
    pub fn activation(&self) -> Option<Activation> {
        match self {
            Self::ReLu => Some(Activation::ReLu),
            Self::ELu => Some(Activation::ELu),
            Self::HardSigmoid => Some(Activation::HardSigmoid),
            Self::Sigmoid => Some(Activation::Sigmoid),
            Self::SoftPlus => Some(Activation::SoftPlus),
            Self::SoftSign => Some(Activation::SoftSign),
            Self::TanH => Some(Activation::TanH),
            Self::Softmax => Some(Activation::Softmax),
            _ => None,
        }
    }

    /// Number of weight tensors this layer consumes.
    pub fn weight_count(&self) -> usize {
        match self {
            Self::Dense2D { .. } | Self::Bias2D { .. } => 1,
            _ => 0,
        }
    }
}

impl ModelManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Validates the manifest and returns the declared input dimension.
    ///
    /// Checks:
    /// - `model_type` is `"Sequential"`.
    /// - The first descriptor, and only the first, is `Input2D`, with
    ///   non-negative sizes.
    /// - The weight list has exactly as many entries as the layers consume.
    pub fn validate(&self) -> Result<Dimension, ModelError> {
        if self.model_type != "Sequential" {
            return Err(ModelError::UnsupportedModelType(self.model_type.clone()));
        }

        let input_dim = match self.descriptors.first() {
            Some(LayerDescriptor::Input2D {
                height,
                width,
                channel,
                batch,
            }) => Dimension::from_signed(*height, *width, *channel, *batch)?,
            Some(_) => {
                return Err(ModelError::InvalidDescriptor {
                    position: 0,
                    detail: "first descriptor must be Input2D".into(),
                })
            }
            None => {
                return Err(ModelError::InvalidDescriptor {
                    position: 0,
                    detail: "manifest contains no descriptors".into(),
                })
            }
        };

        if let Some(position) = self
            .descriptors
            .iter()
            .skip(1)
            .position(|d| matches!(d, LayerDescriptor::Input2D { .. }))
        {
            return Err(ModelError::InvalidDescriptor {
                position: position + 1,
                detail: "Input2D may only appear once, as the first descriptor".into(),
            });
        }

        let expected = self.expected_weight_count();
        if expected != self.weights.len() {
            return Err(ModelError::WeightCountMismatch {
                expected,
                actual: self.weights.len(),
            });
        }

        Ok(input_dim)
    }

    /// Total number of weight tensors the layer descriptors consume.
    pub fn expected_weight_count(&self) -> usize {
        self.descriptors.iter().map(LayerDescriptor::weight_count).sum()
    }

    /// Converts weight entry `index` into a tensor.
    pub fn weight_tensor(&self, index: usize) -> Result<Data2D, ModelError> {
        let array = self.weights.get(index).ok_or(ModelError::WeightCountMismatch {
            expected: index + 1,
            actual: self.weights.len(),
        })?;
        weight_to_tensor(index, array)
    }
}

/// Converts nested `[d0][d1][d2][d3]` arrays into a `(d0, d1, d2, d3)` tensor.
///
/// # Errors
/// Returns [`ModelError::InvalidWeights`] if the arrays are ragged.
pub fn weight_to_tensor(index: usize, array: &WeightArray) -> Result<Data2D, ModelError> {
    let ragged = |axis: usize| ModelError::InvalidWeights {
        index,
        detail: format!("ragged array along axis {axis}"),
    };

    let d0 = array.len();
    let d1 = array.first().map_or(0, Vec::len);
    let d2 = array.first().and_then(|a| a.first()).map_or(0, Vec::len);
    let d3 = array
        .first()
        .and_then(|a| a.first())
        .and_then(|a| a.first())
        .map_or(0, Vec::len);

    let mut tensor = Data2D::new(d0, d1, d2, d3)?;
    for (h, plane) in array.iter().enumerate() {
        if plane.len() != d1 {
            return Err(ragged(1));
        }
        for (w, row) in plane.iter().enumerate() {
            if row.len() != d2 {
                return Err(ragged(2));
            }
            for (c, values) in row.iter().enumerate() {
                if values.len() != d3 {
                    return Err(ragged(3));
                }
                for (b, &v) in values.iter().enumerate() {
                    tensor[[h, w, c, b]] = v;
                }
            }
        }
    }
    Ok(tensor)
}
