// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Relayout kernels: reshape, axis permutation and vector repetition.
//!
//! None of these alter values; they only move them. The batch axis is
//! never touched.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Reinterprets each batch entry as `(height, width, channels)`.
///
/// Values keep their layout order, so element `k` of a sample stays
/// element `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reshape {
    target: [usize; 3],
}

impl Reshape {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            target: [height, width, channels],
        }
    }

    /// The per-sample target shape `[h, w, c]`.
    pub fn target(&self) -> [usize; 3] {
        self.target
    }

    fn reshaped_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        let [h, w, c] = self.target;
        let out = Dimension::new(h, w, c, input.b);
        let per_sample = |d: Dimension| d.h.checked_mul(d.w).and_then(|hw| hw.checked_mul(d.c));
        match (per_sample(input), per_sample(out)) {
            (Some(a), Some(b)) if a == b => Ok(out),
            _ => Err(TensorError::InvalidShape {
                detail: format!("cannot reshape {input} to {out}"),
            }),
        }
    }
}

impl Kernel for Reshape {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        self.reshaped_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        let out_dim = self.reshaped_dimension(input.dimension())?;
        check_output(self.name(), out_dim, output)?;
        output.as_mut_slice().copy_from_slice(input.as_slice());
        Ok(())
    }
}

/// Reorders the `(h, w, c)` axes of each batch entry.
///
/// `dims` uses the exporter's 1-based axis numbers: output axis `k` is
/// input axis `dims[k] - 1`, with 1 = height, 2 = width, 3 = channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permute {
    axes: [usize; 3],
}

impl Permute {
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] unless `dims` is a permutation
    /// of `[1, 2, 3]`.
    pub fn new(dims: [usize; 3]) -> Result<Self, TensorError> {
        let mut sorted = dims;
        sorted.sort_unstable();
        if sorted != [1, 2, 3] {
            return Err(TensorError::InvalidShape {
                detail: format!("permutation {dims:?} is not an ordering of [1, 2, 3]"),
            });
        }
        Ok(Self {
            axes: dims.map(|d| d - 1),
        })
    }

    /// Zero-based source axis of each output axis.
    pub fn axes(&self) -> [usize; 3] {
        self.axes
    }

    fn permuted_dimension(&self, input: Dimension) -> Dimension {
        let extents = [input.h, input.w, input.c];
        let [h, w, c] = self.axes.map(|a| extents[a]);
        Dimension::new(h, w, c, input.b)
    }
}

impl Kernel for Permute {
    fn name(&self) -> &'static str {
        "permute"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        Ok(self.permuted_dimension(input))
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        let dim = input.dimension();
        check_output(self.name(), self.permuted_dimension(dim), output)?;

        for b in 0..dim.b {
            for h in 0..dim.h {
                for w in 0..dim.w {
                    for c in 0..dim.c {
                        let src = [h, w, c];
                        let [oh, ow, oc] = self.axes.map(|a| src[a]);
                        output[[oh, ow, oc, b]] = input[[h, w, c, b]];
                    }
                }
            }
        }
        Ok(())
    }
}

/// Repeats a `(1, 1, c, b)` vector `n` times along the width axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatVector {
    n: usize,
}

impl RepeatVector {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn repeats(&self) -> usize {
        self.n
    }

    fn repeated_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        if input.h != 1 || input.w != 1 {
            return Err(TensorError::ShapeMismatch {
                op: "repeat_vector",
                expected: Dimension::new(1, 1, input.c, input.b),
                actual: input,
            });
        }
        Ok(Dimension::new(1, self.n, input.c, input.b))
    }
}

impl Kernel for RepeatVector {
    fn name(&self) -> &'static str {
        "repeat_vector"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        self.repeated_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        let dim = input.dimension();
        check_output(self.name(), self.repeated_dimension(dim)?, output)?;

        for b in 0..dim.b {
            for w in 0..self.n {
                for c in 0..dim.c {
                    output[[0, w, c, b]] = input[[0, 0, c, b]];
                }
            }
        }
        Ok(())
    }
}
