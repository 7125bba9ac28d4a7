// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Flatten layer: `(h, w, c, b)` → `(1, 1, h * w * c, b)`.
//!
//! For each batch entry, `(h, w, c)` maps to channel
//! `(h * w_in + w) * c_in + c`: channels vary fastest, then width, then
//! height. See [`tensor_core::ops::flatten_index`].

use crate::layer::{forward_buffers, Buffers};
use crate::{Layer, LayerError};
use std::sync::Arc;
use tensor_core::ops::Flatten;
use tensor_core::Data;

/// Reshapes spatial and channel axes into one channel axis per batch entry.
#[derive(Debug, Default)]
pub struct FlattenLayer {
    kernel: Flatten,
    buffers: Buffers,
}

impl FlattenLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for FlattenLayer {
    fn name(&self) -> &'static str {
        "FlattenLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    // No weights.
    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{Data2D, DataArray, Dimension};

    fn output_of(layer: &FlattenLayer) -> Data2D {
        layer.output().unwrap().as_data2d().unwrap().clone()
    }

    #[test]
    fn test_flatten_concrete() {
        let mut layer = FlattenLayer::new();
        let input = Data2D::from_vec(Dimension::new(2, 2, 1, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        layer.set_input(Some(Arc::new(input))).unwrap();

        let out = output_of(&layer);
        assert_eq!(out.dimension(), Dimension::new(1, 1, 4, 1));
        let values: Vec<f64> = (0..4).map(|k| out.get(0, 0, k, 0).unwrap()).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_flatten_shape_law() {
        let mut layer = FlattenLayer::new();
        let dim = Dimension::new(3, 4, 5, 2);
        layer
            .set_input(Some(Arc::new(Data2D::zeros(dim).unwrap())))
            .unwrap();
        assert_eq!(output_of(&layer).dimension(), Dimension::new(1, 1, 60, 2));
    }

    #[test]
    fn test_flatten_content_preserved() {
        let mut layer = FlattenLayer::new();
        let dim = Dimension::new(2, 3, 2, 2);
        let values: Vec<f64> = (0..24).map(|i| ((i * 5) % 24) as f64 * 0.5).collect();
        layer
            .set_input(Some(Arc::new(Data2D::from_vec(dim, values.clone()).unwrap())))
            .unwrap();

        let mut expected = values;
        let mut actual: Vec<f64> = output_of(&layer).iter().copied().collect();
        expected.sort_by(f64::total_cmp);
        actual.sort_by(f64::total_cmp);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_idempotent_shape_inference() {
        let mut layer = FlattenLayer::new();
        let dim = Dimension::new(2, 2, 3, 1);

        let mut first = Data2D::zeros(dim).unwrap();
        first.fill(1.0);
        layer.set_input(Some(Arc::new(first))).unwrap();
        let out1 = output_of(&layer);

        let mut second = Data2D::zeros(dim).unwrap();
        second.fill(2.0);
        layer.set_input(Some(Arc::new(second))).unwrap();
        let out2 = output_of(&layer);

        assert_eq!(out1.dimension(), out2.dimension());
        assert_ne!(out1, out2);
    }

    #[test]
    fn test_null_input_keeps_previous_output() {
        let mut layer = FlattenLayer::new();
        assert!(layer.output().is_none());

        let input = Data2D::from_vec(Dimension::new(1, 2, 1, 1), vec![7.0, 8.0]).unwrap();
        layer.set_input(Some(Arc::new(input))).unwrap();
        let before = output_of(&layer);

        let err = layer.set_input(None).unwrap_err();
        assert_eq!(err, LayerError::NullInput { layer: "FlattenLayer" });
        assert_eq!(output_of(&layer), before);

        let err = layer
            .set_input(Some(Arc::new(DataArray::new(vec![1.0]))))
            .unwrap_err();
        assert!(matches!(err, LayerError::TypeMismatch { .. }));
        assert_eq!(output_of(&layer), before);
        assert_eq!(layer.summary().unwrap().input.width, 2);
    }

    #[test]
    fn test_set_weights_is_noop() {
        let mut layer = FlattenLayer::new();
        layer.set_weights(None).unwrap();
        layer
            .set_weights(Some(Arc::new(Data2D::new(1, 1, 1, 1).unwrap())))
            .unwrap();
        assert!(layer.output().is_none());
        assert!(layer.input().is_none());
    }

    #[test]
    fn test_summary() {
        let mut layer = FlattenLayer::new();
        assert!(layer.summary().is_err());
        layer
            .set_input(Some(Arc::new(Data2D::new(2, 3, 4, 1).unwrap())))
            .unwrap();
        let s = layer.summary().unwrap();
        assert_eq!(s.to_string(), "FlattenLayer: 2x3x1x4x1 -> 1x1x1x24x1");
    }
}
