// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Inference profiling metrics.
//!
//! [`InferenceMetrics`] collects per-layer and aggregate timing for one
//! pass through the layer chain.

use std::time::Duration;

/// Metrics for a single layer's execution.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LayerMetrics {
    /// Layer type name.
    pub layer_name: String,
    /// Time spent in `set_input`, shape inference included.
    pub compute_duration: Duration,
    /// Number of values in the layer output.
    pub output_elements: usize,
}

/// Aggregate metrics for a complete inference run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InferenceMetrics {
    /// Total wall-clock time for the run.
    pub total_duration: Duration,
    /// Sum of the per-layer compute times.
    pub total_compute_duration: Duration,
    /// Per-layer metrics, in execution order.
    pub layer_metrics: Vec<LayerMetrics>,
    /// Number of layers in the model.
    pub num_layers: usize,
    /// Batch size of the input.
    pub batch: usize,
}

impl InferenceMetrics {
    /// Creates an empty metrics container.
    pub fn new(num_layers: usize, batch: usize) -> Self {
        Self {
            total_duration: Duration::ZERO,
            total_compute_duration: Duration::ZERO,
            layer_metrics: Vec::with_capacity(num_layers),
            num_layers,
            batch,
        }
    }

    /// Records metrics for a single layer.
    pub fn record_layer(&mut self, name: impl Into<String>, compute: Duration, output_elements: usize) {
        self.total_compute_duration += compute;
        self.layer_metrics.push(LayerMetrics {
            layer_name: name.into(),
            compute_duration: compute,
            output_elements,
        });
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Returns samples per second throughput.
    pub fn samples_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs <= 0.0 || self.batch == 0 {
            return 0.0;
        }
        self.batch as f64 / secs
    }

    /// Returns the layer with the longest compute time.
    pub fn slowest_layer(&self) -> Option<&LayerMetrics> {
        self.layer_metrics.iter().max_by_key(|m| m.compute_duration)
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Inference: {:.3}ms total, {} layers ({} profiled), \
             {:.3}ms compute, batch {} ({:.1} samples/s)",
            self.total_duration.as_secs_f64() * 1000.0,
            self.num_layers,
            self.layer_metrics.len(),
            self.total_compute_duration.as_secs_f64() * 1000.0,
            self.batch,
            self.samples_per_second(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let m = InferenceMetrics::new(3, 1);
        assert_eq!(m.samples_per_second(), 0.0);
        assert_eq!(m.num_layers, 3);
        assert!(m.slowest_layer().is_none());
    }

    #[test]
    fn test_record_and_finalise() {
        let mut m = InferenceMetrics::new(2, 4);
        m.record_layer("FlattenLayer", Duration::from_millis(10), 24);
        m.record_layer("SoftmaxLayer", Duration::from_millis(8), 24);
        m.finalise(Duration::from_millis(30));

        assert_eq!(m.layer_metrics.len(), 2);
        assert_eq!(m.total_compute_duration, Duration::from_millis(18));
        assert_eq!(m.slowest_layer().unwrap().layer_name, "FlattenLayer");
        assert!(m.samples_per_second() > 0.0);
    }

    #[test]
    fn test_summary_format() {
        let mut m = InferenceMetrics::new(2, 5);
        m.record_layer("FlattenLayer", Duration::from_millis(5), 12);
        m.finalise(Duration::from_millis(10));

        let s = m.summary();
        assert!(s.contains("Inference:"));
        assert!(s.contains("2 layers (1 profiled)"));
        assert!(s.contains("batch 5"));
    }

    #[test]
    fn test_samples_per_second() {
        let mut m = InferenceMetrics::new(1, 100);
        m.finalise(Duration::from_secs(2));
        assert!((m.samples_per_second() - 50.0).abs() < 0.01);
    }
}
