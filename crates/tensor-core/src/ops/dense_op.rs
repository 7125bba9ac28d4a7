// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fully connected projection over the channel axis.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Computes `output[h, w, u, b] = Σ_c input[h, w, c, b] * weights[0, 0, c, u]`.
///
/// `weights` has shape `(1, 1, in_channels, units)`; the projection is
/// applied independently at every spatial position.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the weights do not match the
/// input channels or the output is not `(h, w, units, b)`.
pub fn dense(input: &Data2D, weights: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    let dim = input.dimension();
    let out_dim = projected_dimension(dim, weights.dimension())?;
    check_output("dense", out_dim, output)?;

    for b in 0..dim.b {
        for h in 0..dim.h {
            for w in 0..dim.w {
                for u in 0..out_dim.c {
                    let mut sum = 0.0f64;
                    for c in 0..dim.c {
                        sum += input[[h, w, c, b]] * weights[[0, 0, c, u]];
                    }
                    output[[h, w, u, b]] = sum;
                }
            }
        }
    }
    Ok(())
}

fn projected_dimension(input: Dimension, weights: Dimension) -> Result<Dimension, TensorError> {
    if weights.h != 1 || weights.w != 1 || weights.c != input.c {
        return Err(TensorError::ShapeMismatch {
            op: "dense",
            expected: Dimension::new(1, 1, input.c, weights.b),
            actual: weights,
        });
    }
    Ok(Dimension::new(input.h, input.w, weights.b, input.b))
}

/// Dense kernel owning its weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense2D {
    weights: Data2D,
}

impl Dense2D {
    /// Wraps a `(1, 1, in_channels, units)` weight tensor.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the weights are not of that form.
    pub fn new(weights: Data2D) -> Result<Self, TensorError> {
        let dim = weights.dimension();
        if dim.h != 1 || dim.w != 1 {
            return Err(TensorError::InvalidShape {
                detail: format!("dense weights must be (1, 1, in, units), got {dim}"),
            });
        }
        Ok(Self { weights })
    }

    /// Number of input channels expected.
    pub fn in_channels(&self) -> usize {
        self.weights.dimension().c
    }

    /// Number of output channels produced.
    pub fn units(&self) -> usize {
        self.weights.dimension().b
    }

    /// The weight tensor.
    pub fn weights(&self) -> &Data2D {
        &self.weights
    }
}

impl Kernel for Dense2D {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        projected_dimension(input, self.weights.dimension())
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        dense(input, &self.weights, output)
    }
}
