// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Numeric kernels.
//!
//! Every kernel is available both as a free function working on borrowed
//! buffers and as a [`Kernel`] value that a layer can own. Kernels never
//! allocate: the caller sizes the output with
//! [`Kernel::output_dimension`] and hands both buffers to
//! [`Kernel::execute`].

mod activation_op;
mod bias_op;
mod cropping_op;
mod dense_op;
mod flatten_op;
mod global_pool_op;
mod reshape_op;

pub use activation_op::{activation, Activation};
pub use bias_op::{bias_add, Bias2D};
pub use cropping_op::Cropping2D;
pub use dense_op::{dense, Dense2D};
pub use flatten_op::{flatten, flatten_index, Flatten};
pub use global_pool_op::{
    global_avg_pool, global_max_pool, GlobalAvgPool1D, GlobalAvgPool2D, GlobalMaxPool1D,
    GlobalMaxPool2D,
};
pub use reshape_op::{Permute, RepeatVector, Reshape};

use crate::{Data2D, Dimension, TensorError};
use std::fmt;

/// A numeric transform from one [`Data2D`] into another.
///
/// Buffers are passed in at execution time; a kernel holds no reference to
/// them between calls. Parameterised kernels (dense, bias) own their
/// parameters.
pub trait Kernel: fmt::Debug + Send + Sync {
    /// Short operation name used in errors and summaries.
    fn name(&self) -> &'static str;

    /// Infers the output shape for an input of shape `input`.
    ///
    /// # Errors
    /// Returns an error if the kernel cannot run on this input shape.
    fn output_dimension(&self, input: Dimension) -> Result<Dimension, TensorError>;

    /// Fills `output` from `input`. `output` must already have the shape
    /// returned by [`output_dimension`](Kernel::output_dimension).
    fn execute(&self, input: &Data2D, output: &mut Data2D) -> Result<(), TensorError>;
}

/// Fails with [`TensorError::ShapeMismatch`] unless `output` has `expected` shape.
pub(crate) fn check_output(
    op: &'static str,
    expected: Dimension,
    output: &Data2D,
) -> Result<(), TensorError> {
    if output.dimension() != expected {
        return Err(TensorError::ShapeMismatch {
            op,
            expected,
            actual: output.dimension(),
        });
    }
    Ok(())
}
