// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the layer contract.

use tensor_core::TensorError;

/// Errors returned by [`crate::Layer`] operations.
///
/// A failed call leaves the layer's previous input and output untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayerError {
    /// `set_input` or `set_weights` received no data.
    #[error("{layer}: input is null")]
    NullInput { layer: &'static str },

    /// The data does not expose a 4-D tensor view.
    #[error("{layer}: expected Data2D, got {found}")]
    TypeMismatch {
        layer: &'static str,
        found: &'static str,
    },

    /// A summary was requested before any input was set.
    #[error("{layer}: no input has been set")]
    NotInitialized { layer: &'static str },

    /// A parameterised layer received input before its weights.
    #[error("{layer}: weights have not been set")]
    MissingWeights { layer: &'static str },

    /// Shape inference or the kernel itself failed.
    #[error("{layer}: {source}")]
    Tensor {
        layer: &'static str,
        #[source]
        source: TensorError,
    },
}

impl LayerError {
    /// Attaches a layer name to a tensor error.
    pub(crate) fn tensor(layer: &'static str) -> impl FnOnce(TensorError) -> Self {
        move |source| Self::Tensor { layer, source }
    }
}
