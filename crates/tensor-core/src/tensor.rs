// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor buffers and the data capability they share.

use crate::{Dimension, TensorError};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Capability implemented by every data representation a layer may receive.
///
/// Layers only compute on [`Data2D`]; anything else is rejected after a
/// failed [`as_data2d`](Data::as_data2d) downcast.
pub trait Data: fmt::Debug + Send + Sync {
    /// Short name of the representation, used in error messages.
    fn kind(&self) -> &'static str;

    /// Returns the 4-D tensor view of this data, if it has one.
    fn as_data2d(&self) -> Option<&Data2D> {
        None
    }
}

/// A dense, owned 4-D tensor of `f64` values indexed by `(h, w, c, b)`.
///
/// # Memory Layout
/// Values are stored contiguously with the channel axis varying fastest,
/// then width, then height, then batch. Callers should not rely on this
/// except through [`from_vec`](Data2D::from_vec) and
/// [`as_slice`](Data2D::as_slice), which use the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Data2D {
    dim: Dimension,
    data: Vec<f64>,
}

impl Data2D {
    /// Creates a zero-filled tensor of shape `(h, w, c, b)`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Data2D;
    /// let t = Data2D::new(2, 2, 3, 1).unwrap();
    /// assert_eq!(t.len(), 12);
    /// assert_eq!(t.get(1, 1, 2, 0).unwrap(), 0.0);
    /// ```
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the element count overflows.
    pub fn new(h: usize, w: usize, c: usize, b: usize) -> Result<Self, TensorError> {
        Self::zeros(Dimension::new(h, w, c, b))
    }

    /// Creates a zero-filled tensor of the given dimension.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the buffer for `dim` cannot be
    /// allocated.
    pub fn zeros(dim: Dimension) -> Result<Self, TensorError> {
        let len = checked_len(dim)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| TensorError::InvalidShape {
                detail: format!("cannot allocate {len} values for {dim}: {e}"),
            })?;
        data.resize(len, 0.0);
        Ok(Self { dim, data })
    }

    /// Creates a tensor from values given in layout order.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if `values.len()` differs from
    /// the element count of `dim`.
    pub fn from_vec(dim: Dimension, values: Vec<f64>) -> Result<Self, TensorError> {
        let len = checked_len(dim)?;
        if len != values.len() {
            return Err(TensorError::InvalidShape {
                detail: format!("{dim} needs {len} values, got {}", values.len()),
            });
        }
        Ok(Self { dim, data: values })
    }

    /// Shapes a flat [`DataArray`] into a tensor.
    pub fn from_array(dim: Dimension, array: &DataArray) -> Result<Self, TensorError> {
        Self::from_vec(dim, array.as_slice().to_vec())
    }

    /// Returns the shape fixed at construction.
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the element at `(h, w, c, b)`.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfRange`] naming the first offending axis.
    pub fn get(&self, h: usize, w: usize, c: usize, b: usize) -> Result<f64, TensorError> {
        self.check_bounds([h, w, c, b])?;
        Ok(self.data[self.offset([h, w, c, b])])
    }

    /// Writes the element at `(h, w, c, b)`.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfRange`] naming the first offending axis.
    pub fn set(
        &mut self,
        h: usize,
        w: usize,
        c: usize,
        b: usize,
        value: f64,
    ) -> Result<(), TensorError> {
        self.check_bounds([h, w, c, b])?;
        let offset = self.offset([h, w, c, b]);
        self.data[offset] = value;
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// The elements in layout order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The elements in layout order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Iterates over the elements in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    fn check_bounds(&self, index: [usize; 4]) -> Result<(), TensorError> {
        const AXES: [char; 4] = ['h', 'w', 'c', 'b'];
        for ((axis, idx), bound) in AXES.into_iter().zip(index).zip(self.dim.to_array()) {
            if idx >= bound {
                return Err(TensorError::IndexOutOfRange {
                    axis,
                    index: idx,
                    bound,
                });
            }
        }
        Ok(())
    }

    #[inline]
    fn offset(&self, [h, w, c, b]: [usize; 4]) -> usize {
        debug_assert!(
            h < self.dim.h && w < self.dim.w && c < self.dim.c && b < self.dim.b,
            "index ({h}, {w}, {c}, {b}) out of range for {}",
            self.dim
        );
        ((b * self.dim.h + h) * self.dim.w + w) * self.dim.c + c
    }
}

/// Element count of `dim`, rejecting shapes whose byte size exceeds `isize::MAX`.
fn checked_len(dim: Dimension) -> Result<usize, TensorError> {
    dim.checked_num_elements()
        .filter(|&n| {
            n.checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| TensorError::InvalidShape {
            detail: format!("element count of {dim} overflows"),
        })
}

/// Unchecked-by-`Result` access for kernels: `tensor[[h, w, c, b]]`.
///
/// # Panics
/// In debug builds, panics if any coordinate exceeds its axis. In all
/// builds, panics if the computed offset falls outside the buffer.
impl Index<[usize; 4]> for Data2D {
    type Output = f64;

    #[inline]
    fn index(&self, index: [usize; 4]) -> &f64 {
        &self.data[self.offset(index)]
    }
}

impl IndexMut<[usize; 4]> for Data2D {
    #[inline]
    fn index_mut(&mut self, index: [usize; 4]) -> &mut f64 {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}

impl Data for Data2D {
    fn kind(&self) -> &'static str {
        "Data2D"
    }

    fn as_data2d(&self) -> Option<&Data2D> {
        Some(self)
    }
}

/// A flat vector of values with no 4-D shape.
///
/// Implements [`Data`] but not the tensor view, so layers reject it. Raw
/// input vectors travel as `DataArray` until they are shaped with
/// [`Data2D::from_array`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataArray {
    data: Vec<f64>,
}

impl DataArray {
    /// Wraps a vector of values.
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl From<Vec<f64>> for DataArray {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl Data for DataArray {
    fn kind(&self) -> &'static str {
        "DataArray"
    }
}
