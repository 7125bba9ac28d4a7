// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fixed 4-D shape descriptor shared by every tensor in the pipeline.

use crate::TensorError;
use std::fmt;

/// Logical shape of a [`crate::Data2D`]: height, width, channels, batch.
///
/// A dimension with any zero field describes an empty tensor. Such tensors
/// are legal to construct; whether a kernel accepts them is up to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Dimension {
    pub h: usize,
    pub w: usize,
    pub c: usize,
    pub b: usize,
}

impl Dimension {
    /// Creates a dimension from its four extents.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Dimension;
    /// let d = Dimension::new(2, 3, 4, 1);
    /// assert_eq!(d.num_elements(), 24);
    /// assert_eq!(d.spatial_area(), 6);
    /// ```
    pub const fn new(h: usize, w: usize, c: usize, b: usize) -> Self {
        Self { h, w, c, b }
    }

    /// Creates a dimension from signed extents, as found in external model
    /// descriptors.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if any extent is negative.
    pub fn from_signed(h: i64, w: i64, c: i64, b: i64) -> Result<Self, TensorError> {
        let convert = |axis: char, v: i64| {
            usize::try_from(v).map_err(|_| TensorError::InvalidShape {
                detail: format!("axis '{axis}' has negative extent {v}"),
            })
        };
        Ok(Self {
            h: convert('h', h)?,
            w: convert('w', w)?,
            c: convert('c', c)?,
            b: convert('b', b)?,
        })
    }

    /// Total number of elements (`h * w * c * b`).
    ///
    /// Saturates instead of overflowing; use
    /// [`checked_num_elements`](Self::checked_num_elements) when the shape
    /// comes from untrusted input.
    pub fn num_elements(&self) -> usize {
        self.checked_num_elements().unwrap_or(usize::MAX)
    }

    /// Total number of elements, or `None` on overflow.
    pub fn checked_num_elements(&self) -> Option<usize> {
        self.h
            .checked_mul(self.w)?
            .checked_mul(self.c)?
            .checked_mul(self.b)
    }

    /// Number of elements in one (channel, batch) slice: `h * w`.
    ///
    /// Saturates at `usize::MAX`. The result is zero exactly when `h` or `w` is.
    pub fn spatial_area(&self) -> usize {
        self.h.saturating_mul(self.w)
    }

    /// Returns `true` if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.h == 0 || self.w == 0 || self.c == 0 || self.b == 0
    }

    /// The extents as `[h, w, c, b]`.
    pub fn to_array(self) -> [usize; 4] {
        [self.h, self.w, self.c, self.b]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.h, self.w, self.c, self.b)
    }
}

/// Convenience: `Dimension::from([h, w, c, b])`.
impl From<[usize; 4]> for Dimension {
    fn from([h, w, c, b]: [usize; 4]) -> Self {
        Self::new(h, w, c, b)
    }
}
