// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor buffers and kernels.

use crate::Dimension;

/// Errors that can occur while building tensors or running kernels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// A buffer was asked to materialise with a negative or inconsistent dimension.
    #[error("invalid shape: {detail}")]
    InvalidShape { detail: String },

    /// An accessor was used outside the buffer's declared dimension.
    #[error("index {index} out of range for axis '{axis}' (bound {bound})")]
    IndexOutOfRange {
        axis: char,
        index: usize,
        bound: usize,
    },

    /// A kernel was handed an output buffer of the wrong shape.
    #[error("shape mismatch in {op}: expected {expected}, got {actual}")]
    ShapeMismatch {
        op: &'static str,
        expected: Dimension,
        actual: Dimension,
    },

    /// Averaging over a spatial extent of zero elements.
    #[error("division by zero in {op}: input {dim} has zero spatial area")]
    DivisionByZero { op: &'static str, dim: Dimension },

    /// A reduction with no identity over a spatial extent of zero elements.
    #[error("empty spatial extent in {op}: input {dim} has zero spatial area")]
    EmptySpatialExtent { op: &'static str, dim: Dimension },
}
