// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Parameterised layers: dense projection and bias.
//!
//! Both must receive weights through [`Layer::set_weights`] before their
//! first `set_input`. Weight tensors use the exporter layout:
//! dense `(1, 1, in_channels, units)`, bias `(1, 1, 1, units)`.

use crate::layer::{forward_buffers, weight_tensor, Buffers};
use crate::{Layer, LayerError};
use std::sync::Arc;
use tensor_core::ops::{Bias2D, Dense2D};
use tensor_core::{Data, Dimension, TensorError};

/// Fails unless the weight tensor produces `units` outputs.
fn check_units(
    layer: &'static str,
    op: &'static str,
    units: usize,
    expected: Dimension,
    actual: Dimension,
) -> Result<(), LayerError> {
    if actual.b != units {
        return Err(LayerError::Tensor {
            layer,
            source: TensorError::ShapeMismatch {
                op,
                expected,
                actual,
            },
        });
    }
    Ok(())
}

/// Projects the channel axis onto `units` outputs at every spatial position.
#[derive(Debug)]
pub struct Dense2DLayer {
    units: usize,
    kernel: Option<Dense2D>,
    buffers: Buffers,
}

impl Dense2DLayer {
    pub fn new(units: usize) -> Self {
        Self {
            units,
            kernel: None,
            buffers: Buffers::default(),
        }
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl Layer for Dense2DLayer {
    fn name(&self) -> &'static str {
        "Dense2DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        let layer = self.name();
        let kernel = self
            .kernel
            .as_ref()
            .ok_or(LayerError::MissingWeights { layer })?;
        self.buffers.forward(layer, kernel, input)
    }

    fn set_weights(&mut self, weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        let layer = self.name();
        let weights = weight_tensor(layer, weights)?;
        let dim = weights.dimension();
        check_units(
            layer,
            "dense",
            self.units,
            Dimension::new(1, 1, dim.c, self.units),
            dim,
        )?;
        self.kernel = Some(Dense2D::new(weights).map_err(LayerError::tensor(layer))?);
        Ok(())
    }

    forward_buffers!();
}

/// Adds a per-channel bias.
#[derive(Debug)]
pub struct Bias2DLayer {
    units: usize,
    kernel: Option<Bias2D>,
    buffers: Buffers,
}

impl Bias2DLayer {
    pub fn new(units: usize) -> Self {
        Self {
            units,
            kernel: None,
            buffers: Buffers::default(),
        }
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl Layer for Bias2DLayer {
    fn name(&self) -> &'static str {
        "Bias2DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        let layer = self.name();
        let kernel = self
            .kernel
            .as_ref()
            .ok_or(LayerError::MissingWeights { layer })?;
        self.buffers.forward(layer, kernel, input)
    }

    fn set_weights(&mut self, weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        let layer = self.name();
        let bias = weight_tensor(layer, weights)?;
        check_units(
            layer,
            "bias",
            self.units,
            Dimension::new(1, 1, 1, self.units),
            bias.dimension(),
        )?;
        self.kernel = Some(Bias2D::new(bias).map_err(LayerError::tensor(layer))?);
        Ok(())
    }

    forward_buffers!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{Data2D, DataArray};

    fn arc(t: Data2D) -> Option<Arc<dyn Data>> {
        Some(Arc::new(t))
    }

    #[test]
    fn test_dense_requires_weights() {
        let mut layer = Dense2DLayer::new(2);
        let err = layer.set_input(arc(Data2D::new(1, 1, 3, 1).unwrap())).unwrap_err();
        assert_eq!(err, LayerError::MissingWeights { layer: "Dense2DLayer" });
    }

    #[test]
    fn test_dense_forward() {
        let mut layer = Dense2DLayer::new(2);
        // weights[0,0,c,u]: u=0 -> [1, 1, 1], u=1 -> [0, 1, 2]
        let w = Data2D::from_vec(
            Dimension::new(1, 1, 3, 2),
            vec![1.0, 1.0, 1.0, 0.0, 1.0, 2.0],
        )
        .unwrap();
        layer.set_weights(arc(w)).unwrap();

        let x = Data2D::from_vec(Dimension::new(1, 1, 3, 2), vec![1.0, 2.0, 3.0, -1.0, 0.0, 1.0])
            .unwrap();
        layer.set_input(arc(x)).unwrap();

        let out = layer.output().unwrap();
        let out = out.as_data2d().unwrap();
        assert_eq!(out.dimension(), Dimension::new(1, 1, 2, 2));
        assert_eq!(out.get(0, 0, 0, 0).unwrap(), 6.0);
        assert_eq!(out.get(0, 0, 1, 0).unwrap(), 8.0);
        assert_eq!(out.get(0, 0, 0, 1).unwrap(), 0.0);
        assert_eq!(out.get(0, 0, 1, 1).unwrap(), 2.0);

        let s = layer.summary().unwrap();
        assert_eq!(s.output.channels, 2);
        assert_eq!(s.input.channels, 3);
    }

    #[test]
    fn test_dense_weight_errors() {
        let mut layer = Dense2DLayer::new(4);
        assert_eq!(
            layer.set_weights(None).unwrap_err(),
            LayerError::NullInput { layer: "Dense2DLayer" }
        );
        assert!(matches!(
            layer.set_weights(Some(Arc::new(DataArray::new(vec![1.0])))),
            Err(LayerError::TypeMismatch { .. })
        ));
        // Wrong number of units.
        assert!(matches!(
            layer.set_weights(arc(Data2D::new(1, 1, 3, 2).unwrap())),
            Err(LayerError::Tensor { .. })
        ));
        assert!(matches!(
            layer.set_input(arc(Data2D::new(1, 1, 3, 1).unwrap())),
            Err(LayerError::MissingWeights { .. })
        ));
    }

    #[test]
    fn test_dense_input_channel_mismatch() {
        let mut layer = Dense2DLayer::new(2);
        layer.set_weights(arc(Data2D::new(1, 1, 3, 2).unwrap())).unwrap();
        let err = layer.set_input(arc(Data2D::new(1, 1, 4, 1).unwrap())).unwrap_err();
        assert!(matches!(
            err,
            LayerError::Tensor {
                source: TensorError::ShapeMismatch { op: "dense", .. },
                ..
            }
        ));
        assert!(layer.output().is_none());
    }

    #[test]
    fn test_bias_forward() {
        let mut layer = Bias2DLayer::new(2);
        layer
            .set_weights(arc(
                Data2D::from_vec(Dimension::new(1, 1, 1, 2), vec![0.5, -0.5]).unwrap(),
            ))
            .unwrap();
        layer
            .set_input(arc(
                Data2D::from_vec(Dimension::new(1, 1, 2, 1), vec![1.0, 1.0]).unwrap(),
            ))
            .unwrap();
        let out = layer.output().unwrap();
        assert_eq!(out.as_data2d().unwrap().as_slice(), &[1.5, 0.5]);
    }

    #[test]
    fn test_bias_units_mismatch() {
        let mut layer = Bias2DLayer::new(3);
        assert!(layer
            .set_weights(arc(Data2D::new(1, 1, 1, 2).unwrap()))
            .is_err());

        let mut layer = Bias2DLayer::new(2);
        layer.set_weights(arc(Data2D::new(1, 1, 1, 2).unwrap())).unwrap();
        assert!(layer.set_input(arc(Data2D::new(1, 1, 3, 1).unwrap())).is_err());
    }
}
