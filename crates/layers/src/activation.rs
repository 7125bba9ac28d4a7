// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Activation layer. Output shape equals input shape.

use crate::layer::{forward_buffers, Buffers};
use crate::{Layer, LayerError};
use std::sync::Arc;
use tensor_core::ops::Activation;
use tensor_core::Data;

#[derive(Debug)]
pub struct ActivationLayer {
    kernel: Activation,
    buffers: Buffers,
}

impl ActivationLayer {
    pub fn new(activation: Activation) -> Self {
        Self {
            kernel: activation,
            buffers: Buffers::default(),
        }
    }

    /// The activation this layer applies.
    pub fn activation(&self) -> Activation {
        self.kernel
    }
}

impl Layer for ActivationLayer {
    fn name(&self) -> &'static str {
        match self.kernel {
            Activation::ReLu => "ReLuLayer",
            Activation::ELu => "ELuLayer",
            Activation::HardSigmoid => "HardSigmoidLayer",
            Activation::Sigmoid => "SigmoidLayer",
            Activation::SoftPlus => "SoftPlusLayer",
            Activation::SoftSign => "SoftSignLayer",
            Activation::TanH => "TanHLayer",
            Activation::Softmax => "SoftmaxLayer",
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

    #[test]
    fn test_relu_layer() {
        let mut layer = ActivationLayer::new(Activation::ReLu);
        assert_eq!(layer.name(), "ReLuLayer");
        let input = Data2D::from_vec(Dimension::new(1, 2, 2, 1), vec![-1.0, 2.0, 0.0, -4.0]).unwrap();
        layer.set_input(Some(Arc::new(input))).unwrap();

        let out = layer.output().unwrap();
        let out = out.as_data2d().unwrap();
        assert_eq!(out.dimension(), Dimension::new(1, 2, 2, 1));
        assert_eq!(out.as_slice(), &[0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_softmax_layer_summary() {
        let mut layer = ActivationLayer::new(Activation::Softmax);
        layer
            .set_input(Some(Arc::new(Data2D::new(1, 1, 10, 3).unwrap())))
            .unwrap();
        let s = layer.summary().unwrap();
        assert_eq!(s.name, "SoftmaxLayer");
        assert_eq!(s.input, s.output);

        // Softmax of zeros is uniform.
        let out = layer.output().unwrap();
        assert!(out
            .as_data2d()
            .unwrap()
            .iter()
            .all(|&x| (x - 0.1).abs() < 1e-12));
    }

    #[test]
    fn test_every_activation_has_distinct_name() {
        let mut names: Vec<&str> = Activation::ALL
            .into_iter()
            .map(|a| ActivationLayer::new(a).name())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Activation::ALL.len());
    }
}
