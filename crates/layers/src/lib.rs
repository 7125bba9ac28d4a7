// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # layers
//!
//! The uniform layer contract for sequential inference.
//!
//! Every layer pairs one [`tensor_core::Kernel`] with shape inference and
//! introspection:
//!
//! - [`Layer`]: `set_input`, `set_weights`, `output`, `summary`.
//! - [`LayerSummary`]: the input/output shape record a driver can report.
//! - [`LayerError`]: `NullInput`, `TypeMismatch`, `NotInitialized`,
//!   `MissingWeights`, and wrapped kernel errors.
//!
//! # Example
//! ```
//! use layers::{FlattenLayer, GlobalAvgPool2DLayer, Layer};
//! use std::sync::Arc;
//! use tensor_core::{Data2D, Dimension};
//!
//! let input = Data2D::from_vec(Dimension::new(2, 2, 1, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//!
//! let mut chain: Vec<Box<dyn Layer>> = vec![
//!     Box::new(FlattenLayer::new()),
//!     Box::new(GlobalAvgPool2DLayer::new()),
//! ];
//! let mut data: Arc<dyn tensor_core::Data> = Arc::new(input);
//! for layer in &mut chain {
//!     layer.set_input(Some(data)).unwrap();
//!     data = layer.output().unwrap();
//! }
//! let out = data.as_data2d().unwrap();
//! assert_eq!(out.get(0, 0, 0, 0).unwrap(), 1.0);
//! ```

mod activation;
mod dense;
mod error;
mod flatten;
mod layer;
mod pooling;
mod relayout;
mod summary;

pub use activation::ActivationLayer;
pub use dense::{Bias2DLayer, Dense2DLayer};
pub use error::LayerError;
pub use flatten::FlattenLayer;
pub use layer::Layer;
pub use pooling::{
    GlobalAvgPool1DLayer, GlobalAvgPool2DLayer, GlobalMaxPool1DLayer, GlobalMaxPool2DLayer,
};
pub use relayout::{CroppingLayer, PermuteLayer, RepeatVectorLayer, ReshapeLayer};
pub use summary::{LayerSummary, SummaryShape};
