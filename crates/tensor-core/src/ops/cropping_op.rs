// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cropping: trim rows and columns from the spatial border.

use super::{check_output, Kernel};
use crate::{Data2D, Dimension, TensorError};

/// Removes `top`/`bottom` rows and `left`/`right` columns from every
/// `(c, b)` slice.
///
/// A 1-D crop of a `(1, steps, c, b)` sequence is a crop with only
/// `left`/`right` trims; see [`Cropping2D::sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cropping2D {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Cropping2D {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Trims `begin` steps from the start and `end` from the end of a sequence.
    pub fn sequence(begin: usize, end: usize) -> Self {
        Self::new(0, 0, begin, end)
    }

    fn cropped_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        let trim = |extent: usize, a: usize, b: usize| a.checked_add(b).and_then(|t| extent.checked_sub(t));
        match (
            trim(input.h, self.top, self.bottom),
            trim(input.w, self.left, self.right),
        ) {
            (Some(h), Some(w)) => Ok(Dimension::new(h, w, input.c, input.b)),
            _ => Err(TensorError::InvalidShape {
                detail: format!("cropping {self:?} exceeds input {input}"),
            }),
        }
    }
}

impl Kernel for Cropping2D {
    fn name(&self) -> &'static str {
        "cropping"
    }

    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError> {
        self.cropped_dimension(input)
    }

    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError> {
        let out_dim = self.cropped_dimension(input.dimension())?;
        check_output(self.name(), out_dim, output)?;

        for b in 0..out_dim.b {
            for h in 0..out_dim.h {
                for w in 0..out_dim.w {
                    for c in 0..out_dim.c {
                        output[[h, w, c, b]] = input[[h + self.top, w + self.left, c, b]];
                    }
                }
            }
        }
        Ok(())
    }
}
