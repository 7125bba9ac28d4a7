// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layers that move values without changing them: reshape, permute,
//! repeat-vector and cropping.

use crate::layer::{forward_buffers, Buffers};
use crate::{Layer, LayerError};
use std::sync::Arc;
use tensor_core::ops::{Cropping2D, Permute, RepeatVector, Reshape};
use tensor_core::{Data, TensorError};

/// Reinterprets each batch entry as a new `(h, w, c)` shape of equal size.
#[derive(Debug)]
pub struct ReshapeLayer {
    kernel: Reshape,
    buffers: Buffers,
}

impl ReshapeLayer {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            kernel: Reshape::new(height, width, channels),
            buffers: Buffers::default(),
        }
    }
}

impl Layer for ReshapeLayer {
    fn name(&self) -> &'static str {
        "ReshapeLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Reorders the `(h, w, c)` axes; see [`Permute`] for the axis numbering.
#[derive(Debug)]
pub struct PermuteLayer {
    kernel: Permute,
    buffers: Buffers,
}

impl PermuteLayer {
    /// # Errors
    /// [`TensorError::InvalidShape`] unless `dims` orders `[1, 2, 3]`.
    pub fn new(dims: [usize; 3]) -> Result<Self, TensorError> {
        Ok(Self {
            kernel: Permute::new(dims)?,
            buffers: Buffers::default(),
        })
    }
}

impl Layer for PermuteLayer {
    fn name(&self) -> &'static str {
        "PermuteLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Turns a `(1, 1, c, b)` vector into a `(1, n, c, b)` sequence.
#[derive(Debug)]
pub struct RepeatVectorLayer {
    kernel: RepeatVector,
    buffers: Buffers,
}

impl RepeatVectorLayer {
    pub fn new(n: usize) -> Self {
        Self {
            kernel: RepeatVector::new(n),
            buffers: Buffers::default(),
        }
    }
}

impl Layer for RepeatVectorLayer {
    fn name(&self) -> &'static str {
        "RepeatVectorLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Trims the spatial border of a 2-D input, or the ends of a sequence.
#[derive(Debug)]
pub struct CroppingLayer {
    kernel: Cropping2D,
    sequence: bool,
    buffers: Buffers,
}

impl CroppingLayer {
    /// Crops `top`/`bottom` rows and `left`/`right` columns.
    pub fn new_2d(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            kernel: Cropping2D::new(top, bottom, left, right),
            sequence: false,
            buffers: Buffers::default(),
        }
    }

    /// Crops `begin` steps from the start and `end` from the end of a sequence.
    pub fn new_1d(begin: usize, end: usize) -> Self {
        Self {
            kernel: Cropping2D::sequence(begin, end),
            sequence: true,
            buffers: Buffers::default(),
        }
    }

    pub fn cropping(&self) -> Cropping2D {
        self.kernel
    }
}

impl Layer for CroppingLayer {
    fn name(&self) -> &'static str {
        if self.sequence {
            "Cropping1DLayer"
        } else {
            "Cropping2DLayer"
        }
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{Data2D, Dimension};

    fn zeros(dim: Dimension) -> Option<Arc<dyn Data>> {
        Some(Arc::new(Data2D::zeros(dim).unwrap()))
    }

    fn output_dim(layer: &dyn Layer) -> Dimension {
        layer.output().unwrap().as_data2d().unwrap().dimension()
    }

    #[test]
    fn test_reshape_shape_law() {
        let mut layer = ReshapeLayer::new(1, 6, 4);
        for b in [1, 3] {
            layer.set_input(zeros(Dimension::new(2, 3, 4, b))).unwrap();
            assert_eq!(output_dim(&layer), Dimension::new(1, 6, 4, b));
        }
        assert_eq!(layer.summary().unwrap().to_string(), "ReshapeLayer: 2x3x1x4x3 -> 1x6x1x4x3");
    }

    #[test]
    fn test_reshape_size_mismatch_keeps_state() {
        let mut layer = ReshapeLayer::new(2, 2, 1);
        layer.set_input(zeros(Dimension::new(1, 1, 4, 1))).unwrap();
        let err = layer.set_input(zeros(Dimension::new(1, 1, 5, 1))).unwrap_err();
        assert!(matches!(
            err,
            LayerError::Tensor {
                layer: "ReshapeLayer",
                source: TensorError::InvalidShape { .. },
            }
        ));
        assert_eq!(output_dim(&layer), Dimension::new(2, 2, 1, 1));
    }

    #[test]
    fn test_permute_shape_law() {
        let mut layer = PermuteLayer::new([2, 3, 1]).unwrap();
        layer.set_input(zeros(Dimension::new(2, 3, 4, 2))).unwrap();
        assert_eq!(output_dim(&layer), Dimension::new(3, 4, 2, 2));
        assert!(PermuteLayer::new([1, 2, 2]).is_err());
    }

    #[test]
    fn test_repeat_vector_shape_law() {
        let mut layer = RepeatVectorLayer::new(5);
        layer.set_input(zeros(Dimension::new(1, 1, 3, 2))).unwrap();
        assert_eq!(output_dim(&layer), Dimension::new(1, 5, 3, 2));

        let err = layer.set_input(zeros(Dimension::new(2, 1, 3, 1))).unwrap_err();
        assert!(matches!(err, LayerError::Tensor { layer: "RepeatVectorLayer", .. }));
    }

    #[test]
    fn test_cropping_shape_law() {
        let mut layer = CroppingLayer::new_2d(1, 2, 0, 1);
        layer.set_input(zeros(Dimension::new(5, 4, 3, 1))).unwrap();
        assert_eq!(output_dim(&layer), Dimension::new(2, 3, 3, 1));
        assert_eq!(layer.name(), "Cropping2DLayer");

        let mut seq = CroppingLayer::new_1d(2, 1);
        seq.set_input(zeros(Dimension::new(1, 6, 2, 1))).unwrap();
        assert_eq!(output_dim(&seq), Dimension::new(1, 3, 2, 1));
        assert_eq!(seq.summary().unwrap().name, "Cropping1DLayer");
    }

    #[test]
    fn test_cropping_too_large() {
        let mut layer = CroppingLayer::new_2d(2, 2, 0, 0);
        let err = layer.set_input(zeros(Dimension::new(3, 3, 1, 1))).unwrap_err();
        assert!(matches!(err, LayerError::Tensor { source: TensorError::InvalidShape { .. }, .. }));
        assert!(layer.output().is_none());
    }
}
