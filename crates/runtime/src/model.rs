// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Builds the layer chain described by a [`ModelManifest`].

use crate::manifest::{LayerDescriptor, ModelManifest};
use crate::ModelError;
use layers::{
    ActivationLayer, Bias2DLayer, CroppingLayer, Dense2DLayer, FlattenLayer,
    GlobalAvgPool1DLayer, GlobalAvgPool2DLayer, GlobalMaxPool1DLayer, GlobalMaxPool2DLayer,
    Layer, PermuteLayer, RepeatVectorLayer, ReshapeLayer,
};
use std::sync::Arc;
use tensor_core::{Data, Dimension};

/// A validated sequential model: the declared input plus its layers.
#[derive(Debug)]
pub struct SequentialModel {
    input_dim: Dimension,
    layers: Vec<Box<dyn Layer>>,
}

impl SequentialModel {
    /// Validates `manifest` and instantiates one layer per descriptor after
    /// `Input2D`, handing out weight tensors in order.
    pub fn build(manifest: &ModelManifest) -> Result<Self, ModelError> {
        let input_dim = manifest.validate()?;
        let mut layers = Vec::with_capacity(manifest.descriptors.len().saturating_sub(1));
        let mut next_weight = 0;

        for (position, descriptor) in manifest.descriptors.iter().enumerate().skip(1) {
            let mut layer = instantiate(position, descriptor)?;
            for _ in 0..descriptor.weight_count() {
                let tensor = manifest.weight_tensor(next_weight)?;
                layer
                    .set_weights(Some(Arc::new(tensor) as Arc<dyn Data>))
                    .map_err(|source| ModelError::Weights {
                        index: position,
                        name: layer.name(),
                        source,
                    })?;
                next_weight += 1;
            }
            layers.push(layer);
        }

        Ok(Self { input_dim, layers })
    }

    /// The shape declared by the `Input2D` descriptor.
    pub fn input_dimension(&self) -> Dimension {
        self.input_dim
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Box<dyn Layer>] {
        &mut self.layers
    }
}

fn instantiate(position: usize, descriptor: &LayerDescriptor) -> Result<Box<dyn Layer>, ModelError> {
    if let Some(activation) = descriptor.activation() {
        return Ok(Box::new(ActivationLayer::new(activation)));
    }
    let layer: Box<dyn Layer> = match descriptor {
        LayerDescriptor::Flatten => Box::new(FlattenLayer::new()),
        LayerDescriptor::GlobalAveragePooling1D => Box::new(GlobalAvgPool1DLayer::new()),
        LayerDescriptor::GlobalAveragePooling2D => Box::new(GlobalAvgPool2DLayer::new()),
        LayerDescriptor::GlobalMaxPooling1D => Box::new(GlobalMaxPool1DLayer::new()),
        LayerDescriptor::GlobalMaxPooling2D => Box::new(GlobalMaxPool2DLayer::new()),
        LayerDescriptor::Reshape {
            height,
            width,
            channel,
        } => Box::new(ReshapeLayer::new(*height, *width, *channel)),
        LayerDescriptor::Permute { dim1, dim2, dim3 } => Box::new(
            PermuteLayer::new([*dim1, *dim2, *dim3]).map_err(|e| {
                ModelError::InvalidDescriptor {
                    position,
                    detail: e.to_string(),
                }
            })?,
        ),
        LayerDescriptor::RepeatVector { num } => Box::new(RepeatVectorLayer::new(*num)),
        LayerDescriptor::Cropping1D {
            trim_begin,
            trim_end,
        } => Box::new(CroppingLayer::new_1d(*trim_begin, *trim_end)),
        LayerDescriptor::Cropping2D {
            top_trim,
            bottom_trim,
            left_trim,
            right_trim,
        } => Box::new(CroppingLayer::new_2d(
            *top_trim,
            *bottom_trim,
            *left_trim,
            *right_trim,
        )),
        LayerDescriptor::Dense2D { units } => Box::new(Dense2DLayer::new(*units)),
        LayerDescriptor::Bias2D { units } => Box::new(Bias2DLayer::new(*units)),
        other => {
            return Err(ModelError::InvalidDescriptor {
                position,
                detail: format!("{other:?} cannot be instantiated as a layer"),
            })
        }
    };
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> ModelManifest {
        ModelManifest::from_json(json).unwrap()
    }

    #[test]
    fn test_build_chain() {
        let m = manifest(
            r#"{"model_type": "Sequential",
                "descriptors": [
                    {"layer": "Input2D", "height": 3, "width": 3, "channel": 2},
                    {"layer": "GlobalMaxPooling2D"},
                    {"layer": "Dense2D", "units": 1},
                    {"layer": "Sigmoid"}
                ],
                "weights": [[[[[0.5], [-0.5]]]]]}"#,
        );
        let model = SequentialModel::build(&m).unwrap();
        assert_eq!(model.input_dimension(), Dimension::new(3, 3, 2, 1));
        let names: Vec<_> = model.layers().iter().map(|l| l.name()).collect();
        assert_eq!(names, ["GlobalMaxPool2DLayer", "Dense2DLayer", "SigmoidLayer"]);
    }

    #[test]
    fn test_input_only_model() {
        let m = manifest(
            r#"{"model_type": "Sequential",
                "descriptors": [{"layer": "Input2D", "height": 1, "width": 1, "channel": 1}]}"#,
        );
        assert_eq!(SequentialModel::build(&m).unwrap().num_layers(), 0);
    }

    #[test]
    fn test_build_relayout_chain() {
        let m = manifest(
            r#"{"model_type": "Sequential",
                "descriptors": [
                    {"layer": "Input2D", "height": 4, "width": 6, "channel": 2},
                    {"layer": "Cropping2D", "topTrim": 1, "bottomTrim": 1, "leftTrim": 0, "rightTrim": 2},
                    {"layer": "Permute", "dim1": 2, "dim2": 1, "dim3": 3},
                    {"layer": "Reshape", "height": 1, "width": 8, "channel": 2},
                    {"layer": "Cropping1D", "trimBegin": 1, "trimEnd": 0},
                    {"layer": "GlobalAveragePooling1D"},
                    {"layer": "RepeatVector", "num": 3},
                    {"layer": "GlobalMaxPooling1D"}
                ]}"#,
        );
        let model = SequentialModel::build(&m).unwrap();
        let names: Vec<_> = model.layers().iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            [
                "Cropping2DLayer",
                "PermuteLayer",
                "ReshapeLayer",
                "Cropping1DLayer",
                "GlobalAvgPool1DLayer",
                "RepeatVectorLayer",
                "GlobalMaxPool1DLayer"
            ]
        );
    }

    #[test]
    fn test_invalid_permutation() {
        let m = manifest(
            r#"{"model_type": "Sequential",
                "descriptors": [
                    {"layer": "Input2D", "height": 2, "width": 2, "channel": 1},
                    {"layer": "Permute", "dim1": 1, "dim2": 1, "dim3": 3}
                ]}"#,
        );
        assert!(matches!(
            SequentialModel::build(&m),
            Err(ModelError::InvalidDescriptor { position: 1, .. })
        ));
    }

    #[test]
    fn test_weights_with_wrong_units() {
        let m = manifest(
            r#"{"model_type": "Sequential",
                "descriptors": [
                    {"layer": "Input2D", "height": 1, "width": 1, "channel": 2},
                    {"layer": "Bias2D", "units": 3}
                ],
                "weights": [[[[[1.0, 2.0]]]]]}"#,
        );
        let err = SequentialModel::build(&m).unwrap_err();
        assert!(matches!(
            err,
            ModelError::Weights { index: 1, name: "Bias2DLayer", .. }
        ));
    }
}
