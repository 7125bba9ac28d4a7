// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Global pooling layers: `(h, w, c, b)` → `(1, 1, c, b)`.
//!
//! The 1-D variants pool the steps of a `(1, steps, c, b)` sequence and
//! reject inputs with height other than 1.
//!
//! An input with zero height or width is rejected at `set_input` with
//! [`tensor_core::TensorError::DivisionByZero`] (average) or
//! [`tensor_core::TensorError::EmptySpatialExtent`] (max).

use crate::layer::{forward_buffers, Buffers};
use crate::{Layer, LayerError};
use std::sync::Arc;
use tensor_core::ops::{GlobalAvgPool1D, GlobalAvgPool2D, GlobalMaxPool1D, GlobalMaxPool2D};
use tensor_core::Data;

/// Averages each channel over its spatial extent.
#[derive(Debug, Default)]
pub struct GlobalAvgPool2DLayer {
    kernel: GlobalAvgPool2D,
    buffers: Buffers,
}

impl GlobalAvgPool2DLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for GlobalAvgPool2DLayer {
    fn name(&self) -> &'static str {
        "GlobalAvgPool2DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Takes the maximum of each channel over its spatial extent.
#[derive(Debug, Default)]
pub struct GlobalMaxPool2DLayer {
    kernel: GlobalMaxPool2D,
    buffers: Buffers,
}

impl GlobalMaxPool2DLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for GlobalMaxPool2DLayer {
    fn name(&self) -> &'static str {
        "GlobalMaxPool2DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Averages each channel over the steps of a sequence.
#[derive(Debug, Default)]
pub struct GlobalAvgPool1DLayer {
    kernel: GlobalAvgPool1D,
    buffers: Buffers,
}

impl GlobalAvgPool1DLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for GlobalAvgPool1DLayer {
    fn name(&self) -> &'static str {
        "GlobalAvgPool1DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}

/// Takes the maximum of each channel over the steps of a sequence.
#[derive(Debug, Default)]
pub struct GlobalMaxPool1DLayer {
    kernel: GlobalMaxPool1D,
    buffers: Buffers,
}

impl GlobalMaxPool1DLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for GlobalMaxPool1DLayer {
    fn name(&self) -> &'static str {
        "GlobalMaxPool1DLayer"
    }

    fn set_input(&mut self, input: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        self.buffers.forward(self.name(), &self.kernel, input)
    }

    fn set_weights(&mut self, _weights: Option<Arc<dyn Data>>) -> Result<(), LayerError> {
        Ok(())
    }

    forward_buffers!();
}
