// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-channel bias addition.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Computes `output[h, w, c, b] = input[h, w, c, b] + bias[0, 0, 0, c]`.
///
/// `bias` has shape `(1, 1, 1, units)` with `units == input.c`, which is
/// the layout the model exporter writes bias vectors in.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the bias length differs from the
/// input channel count or the output shape differs from the input shape.
pub fn bias_add(input: &Data2D, bias: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    let dim = input.dimension();
    check_bias(dim, bias.dimension())?;
    check_output("bias", dim, output)?;

    for b in 0..dim.b {
        for h in 0..dim.h {
            for w in 0..dim.w {
                for c in 0..dim.c {
                    output[[h, w, c, b]] = input[[h, w, c, b]] + bias[[0, 0, 0, c]];
                }
            }
        }
    }
    Ok(())
}

fn check_bias(input: Dimension, bias: Dimension) -> Result<(), TensorError> {
    if bias != Dimension::new(1, 1, 1, input.c) {
        return Err(TensorError::ShapeMismatch {
            op: "bias",
            expected: Dimension::new(1, 1, 1, input.c),
            actual: bias,
        });
    }
    Ok(())
}

/// Bias kernel owning its bias vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Bias2D {
    bias: Data2D,
}

impl Bias2D {
    /// Wraps a `(1, 1, 1, units)` bias tensor.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the bias is not of that form.
    pub fn new(bias: Data2D) -> Result<Self, TensorError> {
        let dim = bias.dimension();
        if dim.h != 1 || dim.w != 1 || dim.c != 1 {
            return Err(TensorError::InvalidShape {
                detail: format!("bias must be (1, 1, 1, units), got {dim}"),
            });
        }
        Ok(Self { bias })
    }

    /// Number of channels this bias applies to.
    pub fn units(&self) -> usize {
        self.bias.dimension().b
    }
}

impl Kernel for Bias2D {
    fn name(&self) -> &'static str {
        "bias"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        check_bias(input, self.bias.dimension())?;
        Ok(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        bias_add(input, &self.bias, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_add() {
        let bias = Data2D::from_vec(Dimension::new(1, 1, 1, 2), vec![10.0, -1.0]).unwrap();
        let kernel = Bias2D::new(bias).unwrap();
        assert_eq!(kernel.units(), 2);

        let input =
            Data2D::from_vec(Dimension::new(1, 2, 2, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut output = Data2D::zeros(kernel.output_dimension(input.dimension()).unwrap()).unwrap();
        kernel.execute(&input, &mut output).unwrap();
        assert_eq!(output.as_slice(), &[11.0, 1.0, 13.0, 3.0]);
    }

    #[test]
    fn test_bias_length_mismatch() {
        let kernel = Bias2D::new(Data2D::new(1, 1, 1, 3).unwrap()).unwrap();
        let err = kernel.output_dimension(Dimension::new(1, 1, 2, 1)).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { op: "bias", .. }));
    }

    #[test]
    fn test_bias_rejects_wrong_layout() {
        assert!(Bias2D::new(Data2D::new(1, 1, 2, 1).unwrap()).is_err());
    }
}
