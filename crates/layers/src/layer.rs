// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The uniform layer contract and the buffer bookkeeping every layer shares.
//!
//! ```text
//! set_input(data)
//!     │  downcast to Data2D      → NullInput / TypeMismatch
//!     │  kernel.output_dimension → shape inference
//!     │  Data2D::zeros(out_dim)  → fresh output buffer
//!     │  kernel.execute          → fill output
//!     ▼
//! commit input + output (only after every step succeeded)
//! ```

use crate::{LayerError, LayerSummary};
use std::fmt;
use std::sync::Arc;
use tensor_core::{Data, Data2D, Dimension, Kernel};

/// A pipeline stage: one kernel plus shape inference and introspection.
///
/// A driver feeds each layer's [`output`](Layer::output) to the next
/// layer's [`set_input`](Layer::set_input) without knowing the concrete
/// kernel.
pub trait Layer: fmt::Debug + Send {
    /// Layer type name, reported in summaries and errors.
    fn name(&self) -> &'static str;

    /// Accepts a new input, infers the output shape, allocates a new output
    /// buffer and runs the kernel into it.
    ///
    /// # Errors
    /// [`LayerError::NullInput`] for `None`, [`LayerError::TypeMismatch`] for
    /// data without a tensor view, [`LayerError::MissingWeights`] for a
    /// parameterised layer with no weights, [`LayerError::Tensor`] when the
    /// kernel rejects the shape. State is unchanged on error.
    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError>;

    /// Sets the layer parameters. Layers without parameters ignore the call.
    fn set_weights(&mut self, weights: Option<Arc<dyn Data>>) -> Result<(), LayerError>;

    /// The output of the last successful `set_input`, if any.
    fn output(&self) -> Option<Arc<dyn Data>>;

    /// The input accepted by the last successful `set_input`, if any.
    fn input(&self) -> Option<Arc<dyn Data>>;

    /// Describes the current input and output shapes.
    ///
    /// # Errors
    /// [`LayerError::NotInitialized`] before the first successful `set_input`.
    fn summary(&self) -> Result<LayerSummary, LayerError>;
}

/// Current input/output of a layer.
#[derive(Debug, Default)]
pub(crate) struct Buffers {
    input: Option<Arc<dyn Data>>,
    input_dim: Dimension,
    output: Option<Arc<Data2D>>,
}

impl Buffers {
    /// Runs the full `set_input` sequence for `kernel` and commits on success.
    pub(crate) fn forward(
        &mut self,
        layer: &'static str,
        kernel: &dyn Kernel,
        input: Option<Arc<dyn Data>>,
    ) -> Result<(), LayerError> {
        let data = input.ok_or(LayerError::NullInput { layer })?;
        let tensor = data.as_data2d().ok_or_else(|| LayerError::TypeMismatch {
            layer,
            found: data.kind(),
        })?;

        let input_dim = tensor.dimension();
        let out_dim = kernel
            .output_dimension(input_dim)
            .map_err(LayerError::tensor(layer))?;
        let mut output = Data2D::zeros(out_dim).map_err(LayerError::tensor(layer))?;
        kernel
            .execute(tensor, &mut output)
            .map_err(LayerError::tensor(layer))?;

        self.input = Some(data);
        self.input_dim = input_dim;
        self.output = Some(Arc::new(output));
        Ok(())
    }

    pub(crate) fn output(&self) -> Option<Arc<dyn Data>> {
        self.output.clone().map(|o| o as Arc<dyn Data>)
    }

    pub(crate) fn input(&self) -> Option<Arc<dyn Data>> {
        self.input.clone()
    }

    pub(crate) fn summary(&self, layer: &'static str) -> Result<LayerSummary, LayerError> {
        match &self.output {
            Some(output) => Ok(LayerSummary::new(layer, self.input_dim, output.dimension())),
            None => Err(LayerError::NotInitialized { layer }),
        }
    }
}

/// Downcasts a weight handle, reporting errors against `layer`.
pub(crate) fn weight_tensor(
    layer: &'static str,
    weights: Option<Arc<dyn Data>>,
) -> Result<Data2D, LayerError> {
    let data = weights.ok_or(LayerError::NullInput { layer })?;
    data.as_data2d()
        .cloned()
        .ok_or_else(|| LayerError::TypeMismatch {
            layer,
            found: data.kind(),
        })
}

/// Implements the [`Layer`] methods that only touch [`Buffers`].
macro_rules! forward_buffers {
    () => {
        fn output(&self) -> Option<std::sync::Arc<dyn tensor_core::Data>> {
            self.buffers.output()
        }

        fn input(&self) -> Option<std::sync::Arc<dyn tensor_core::Data>> {
            self.buffers.input()
        }

        fn summary(&self) -> Result<crate::LayerSummary, crate::LayerError> {
            self.buffers.summary(self.name())
        }
    };
}

pub(crate) use forward_buffers;
