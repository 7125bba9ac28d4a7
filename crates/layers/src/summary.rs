// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer introspection records.

use std::fmt;
use tensor_core::Dimension;

/// One side (input or output) of a [`LayerSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SummaryShape {
    pub height: usize,
    pub width: usize,
    /// Depth multiplier. Always 1 for the layers in this crate.
    pub depth: usize,
    pub channels: usize,
    pub batch: usize,
}

impl From<Dimension> for SummaryShape {
    fn from(dim: Dimension) -> Self {
        Self {
            height: dim.h,
            width: dim.w,
            depth: 1,
            channels: dim.c,
            batch: dim.b,
        }
    }
}

impl fmt::Display for SummaryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}x{}x{}",
            self.height, self.width, self.depth, self.channels, self.batch
        )
    }
}

/// Describes a layer's current input and output shapes.
///
/// Built fresh on every [`crate::Layer::summary`] call; carries no identity
/// beyond its values.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerSummary {
    /// Layer type name (e.g., `"FlattenLayer"`).
    pub name: String,
    pub input: SummaryShape,
    pub output: SummaryShape,
}

impl LayerSummary {
    /// Creates a summary from the input and output dimensions.
    pub fn new(name: impl Into<String>, input: Dimension, output: Dimension) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

impl fmt::Display for LayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dimension() {
        let s = SummaryShape::from(Dimension::new(4, 3, 2, 1));
        assert_eq!((s.height, s.width, s.depth, s.channels, s.batch), (4, 3, 1, 2, 1));
    }

    #[test]
    fn test_display() {
        let s = LayerSummary::new(
            "FlattenLayer",
            Dimension::new(2, 2, 3, 1),
            Dimension::new(1, 1, 12, 1),
        );
        assert_eq!(s.to_string(), "FlattenLayer: 2x2x1x3x1 -> 1x1x1x12x1");
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = LayerSummary::new("Dense2DLayer", Dimension::new(1, 1, 8, 2), Dimension::new(1, 1, 4, 2));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"channels\":8"));
        let back: LayerSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
