// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Fixed-rank tensor buffers and numeric kernels for sequential inference.
//!
//! This crate provides:
//! - [`Dimension`]: the `(height, width, channels, batch)` shape of every tensor.
//! - [`Data2D`]: a dense `f64` buffer addressed by `(h, w, c, b)`.
//! - [`DataArray`]: a flat, unshaped value vector.
//! - [`Data`]: the capability trait layers accept, with a downcast to [`Data2D`].
//! - [`Kernel`]: the execution contract, and the kernels in [`ops`]:
//!   global average/max pooling, flatten, activations, dense, bias.
//!
//! # Design Goals
//! - Kernels never allocate; callers size outputs with
//!   [`Kernel::output_dimension`].
//! - Reductions accumulate in `f64`.
//! - Clean error types via `thiserror`.

mod dimension;
mod error;
pub mod ops;
mod tensor;

pub use dimension::Dimension;
pub use error::TensorError;
pub use ops::Kernel;
pub use tensor::{Data, Data2D, DataArray};
