// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Global pooling: collapse each (channel, batch) slice to one value.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Output shape of a global pool over `input`: `(1, 1, c, b)`.
fn pooled_dimension(input: Dimension) -> Dimension {
    Dimension::new(1, 1, input.c, input.b)
}

/// Zero-area slices only matter when there is at least one slice to reduce.
fn has_empty_slices(dim: Dimension) -> bool {
    dim.spatial_area() == 0 && dim.c > 0 && dim.b > 0
}

/// Computes `output[0, 0, c, b] = mean over (h, w) of input[h, w, c, b]`.
///
/// Sums are accumulated in `f64` per slice.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if `output` is not `(1, 1, c, b)`.
/// Returns [`TensorError::DivisionByZero`] if the input has zero height or
/// width but a non-empty channel/batch extent.
pub fn global_avg_pool(input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    let dim = input.dimension();
    check_output("global_avg_pool", pooled_dimension(dim), output)?;
    if has_empty_slices(dim) {
        return Err(TensorError::DivisionByZero {
            op: "global_avg_pool",
            dim,
        });
    }

    let area = dim.spatial_area() as f64;
    for b in 0..dim.b {
        for c in 0..dim.c {
            let mut sum = 0.0f64;
            for h in 0..dim.h {
                for w in 0..dim.w {
                    sum += input[[h, w, c, b]];
                }
            }
            output[[0, 0, c, b]] = sum / area;
        }
    }
    Ok(())
}

/// Computes `output[0, 0, c, b] = max over (h, w) of input[h, w, c, b]`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if `output` is not `(1, 1, c, b)`.
/// Returns [`TensorError::EmptySpatialExtent`] if the input has zero height
/// or width but a non-empty channel/batch extent.
pub fn global_max_pool(input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    let dim = input.dimension();
    check_output("global_max_pool", pooled_dimension(dim), output)?;
    if has_empty_slices(dim) {
        return Err(TensorError::EmptySpatialExtent {
            op: "global_max_pool",
            dim,
        });
    }

    for b in 0..dim.b {
        for c in 0..dim.c {
            let mut max = f64::NEG_INFINITY;
            for h in 0..dim.h {
                for w in 0..dim.w {
                    max = max.max(input[[h, w, c, b]]);
                }
            }
            output[[0, 0, c, b]] = max;
        }
    }
    Ok(())
}

/// Global average pooling kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAvgPool2D;

impl Kernel for GlobalAvgPool2D {
    fn name(&self) -> &'static str {
        "global_avg_pool"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        if has_empty_slices(input) {
            return Err(TensorError::DivisionByZero {
                op: self.name(),
                dim: input,
            });
        }
        Ok(pooled_dimension(input))
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        global_avg_pool(input, output)
    }
}

/// Global max pooling kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalMaxPool2D;

impl Kernel for GlobalMaxPool2D {
    fn name(&self) -> &'static str {
        "global_max_pool"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        if has_empty_slices(input) {
            return Err(TensorError::EmptySpatialExtent {
                op: self.name(),
                dim: input,
            });
        }
        Ok(pooled_dimension(input))
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        global_max_pool(input, output)
    }
}

/// Fails unless `input` is a sequence, i.e. has height 1.
fn check_sequence(op: &'static str, input: Dimension) -> Result<(), TensorError> {
    if input.h != 1 {
        return Err(TensorError::ShapeMismatch {
            op,
            expected: Dimension::new(1, input.w, input.c, input.b),
            actual: input,
        });
    }
    Ok(())
}

/// Global average pooling over the steps of a `(1, steps, c, b)` sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAvgPool1D;

impl Kernel for GlobalAvgPool1D {
    fn name(&self) -> &'static str {
        "global_avg_pool_1d"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        check_sequence(self.name(), input)?;
        GlobalAvgPool2D.output_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        check_sequence(self.name(), input.dimension())?;
        global_avg_pool(input, output)
    }
}

/// Global max pooling over the steps of a `(1, steps, c, b)` sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalMaxPool1D;

impl Kernel for GlobalMaxPool1D {
    fn name(&self) -> &'static str {
        "global_max_pool_1d"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        check_sequence(self.name(), input)?;
        GlobalMaxPool2D.output_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        check_sequence(self.name(), input.dimension())?;
        global_max_pool(input, output)
    }
}
