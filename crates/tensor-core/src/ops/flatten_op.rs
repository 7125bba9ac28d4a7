// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Flatten: fold the height, width and channel axes into one channel axis.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Position of `(h, w, c)` on the flattened channel axis of `dim`.
///
/// Channels vary fastest, then width, then height:
/// `k = (h * dim.w + w) * dim.c + c`.
#[inline]
pub fn flatten_index(dim: Dimension, h: usize, w: usize, c: usize) -> usize {
    (h * dim.w + w) * dim.c + c
}

/// Copies `input[h, w, c, b]` to `output[0, 0, flatten_index(h, w, c), b]`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if `output` is not
/// `(1, 1, h * w * c, b)`.
pub fn flatten(input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
    let dim = input.dimension();
    check_output("flatten", flattened_dimension(dim)?, output)?;

    for b in 0..dim.b {
        for h in 0..dim.h {
            for w in 0..dim.w {
                for c in 0..dim.c {
                    output[[0, 0, flatten_index(dim, h, w, c), b]] = input[[h, w, c, b]];
                }
            }
        }
    }
    Ok(())
}

fn flattened_dimension(input: Dimension) -> Result<Dimension, TensorError> {
    let channels = input
        .h
        .checked_mul(input.w)
        .and_then(|hw| hw.checked_mul(input.c))
        .ok_or_else(|| TensorError::InvalidShape {
            detail: format!("flattened channel count of {input} overflows"),
        })?;
    Ok(Dimension::new(1, 1, channels, input.b))
}

/// Flatten kernel. Pure relayout; values are never altered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl Kernel for Flatten {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        flattened_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        flatten(input, output)
    }
}
