// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The inference engine with a type-state–enforced pipeline.
//!
//! ```text
//! InferenceEngine<Idle>
//!     │  .load_model()
//!     ▼
//! InferenceEngine<Ready>
//!     │  .run(input)
//!     ▼
//!   InferenceOutput
//! ```
//!
//! Each state transition consumes the old value and returns a new one,
//! so running an engine without a model is a compile error.

use crate::{
    InferenceMetrics, ModelManifest, RuntimeConfig, RuntimeError, SequentialModel,
};
use layers::{LayerError, LayerSummary};
use std::sync::Arc;
use std::time::Instant;
use tensor_core::{Data, Data2D, Dimension};

// ── Type-state markers ─────────────────────────────────────────

/// Engine is created but no model is loaded.
#[derive(Debug)]
pub struct Idle;

/// Model is built and the engine can run inference.
#[derive(Debug)]
pub struct Ready;

/// Sealed trait for engine states.
pub trait EngineState: std::fmt::Debug {}
impl EngineState for Idle {}
impl EngineState for Ready {}

// ── Inference output ───────────────────────────────────────────

/// The result of a single inference run.
#[derive(Debug)]
pub struct InferenceOutput {
    /// Output of the last layer, or the input for a model with no layers.
    pub output: Arc<Data2D>,
    /// Input/output shapes of every layer, in execution order.
    pub summaries: Vec<LayerSummary>,
    /// Per-layer and overall timing.
    pub metrics: InferenceMetrics,
}

// ── Engine ─────────────────────────────────────────────────────

/// The primary inference engine.
///
/// # Example
/// ```no_run
/// use runtime::{InferenceEngine, RuntimeConfig};
///
/// # fn example() -> Result<(), runtime::RuntimeError> {
/// let mut engine = InferenceEngine::new(RuntimeConfig::for_model("model.json")).load_model()?;
/// let input = engine.default_input()?;
/// let output = engine.run(input)?;
/// println!("{}", output.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct InferenceEngine<S: EngineState = Idle> {
    config: RuntimeConfig,
    _state: std::marker::PhantomData<S>,
    model: Option<SequentialModel>,
}

// ── Idle → Ready ───────────────────────────────────────────────

impl InferenceEngine<Idle> {
    /// Creates a new engine from the given configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        tracing::info!("engine created for '{}'", config.model_path.display());
        Self {
            config,
            _state: std::marker::PhantomData,
            model: None,
        }
    }

    /// Reads the descriptor at `config.model_path` and builds the layers.
    /// Transitions to the `Ready` state.
    pub fn load_model(self) -> Result<InferenceEngine<Ready>, RuntimeError> {
        let manifest = ModelManifest::from_file(&self.config.model_path)?;
        Self::from_manifest(self.config, &manifest)
    }

    /// Builds directly from an in-memory manifest.
    pub fn from_manifest(
        config: RuntimeConfig,
        manifest: &ModelManifest,
    ) -> Result<InferenceEngine<Ready>, RuntimeError> {
        let model = SequentialModel::build(manifest)?;
        tracing::info!(
            "loaded sequential model: input {}, {} layers, {} weight tensors",
            model.input_dimension(),
            model.num_layers(),
            manifest.weights.len(),
        );

        Ok(InferenceEngine {
            config,
            _state: std::marker::PhantomData,
            model: Some(model),
        })
    }
}

// ── Ready: run inference ───────────────────────────────────────

impl InferenceEngine<Ready> {
    /// The shape declared by the model's `Input2D` descriptor.
    pub fn input_dimension(&self) -> Dimension {
        self.model().input_dimension()
    }

    /// The built model.
    pub fn model(&self) -> &SequentialModel {
        self.model.as_ref().expect("model exists in Ready state")
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Shape of inputs generated by [`default_input`](Self::default_input):
    /// the declared input with the configured batch, if any.
    pub fn default_dimension(&self) -> Dimension {
        let mut dim = self.input_dimension();
        if let Some(batch) = self.config.batch {
            dim.b = batch;
        }
        dim
    }

    /// A zero-filled input of [`default_dimension`](Self::default_dimension).
    pub fn default_input(&self) -> Result<Data2D, RuntimeError> {
        Ok(Data2D::zeros(self.default_dimension())?)
    }

    /// Runs `input` through every layer in order.
    ///
    /// The input's `(h, w, c)` must equal the declared input; the batch
    /// size may differ.
    ///
    /// # Errors
    /// [`RuntimeError::InputShape`] on a shape mismatch,
    /// [`RuntimeError::Layer`] naming the first layer that failed.
    pub fn run(&mut self, input: Data2D) -> Result<InferenceOutput, RuntimeError> {
        let run_start = Instant::now();
        let expected = self.input_dimension();
        let actual = input.dimension();
        if (actual.h, actual.w, actual.c) != (expected.h, expected.w, expected.c) {
            return Err(RuntimeError::InputShape { expected, actual });
        }

        let profiling = self.config.enable_profiling;
        let model = self.model_mut();
        let mut metrics = InferenceMetrics::new(model.num_layers(), actual.b);
        let mut summaries = Vec::with_capacity(model.num_layers());

        tracing::debug!(
            "starting inference: input {actual}, {} layers",
            model.num_layers()
        );

        let input = Arc::new(input);
        let mut current: Arc<dyn Data> = input.clone();
        for (index, layer) in model.layers_mut().iter_mut().enumerate() {
            let layer_start = Instant::now();
            let name = layer.name();
            let step_error = |source| RuntimeError::Layer { index, name, source };

            layer.set_input(Some(current)).map_err(step_error)?;
            current = layer
                .output()
                .ok_or(LayerError::NotInitialized { layer: name })
                .map_err(step_error)?;
            let compute = layer_start.elapsed();

            let summary = layer.summary().map_err(step_error)?;
            tracing::debug!("layer {index}: {summary} in {compute:?}");

            if profiling {
                let elements = current.as_data2d().map_or(0, Data2D::len);
                metrics.record_layer(name, compute, elements);
            }
            summaries.push(summary);
        }

        let output = if summaries.is_empty() {
            input
        } else {
            let tensor = current.as_data2d().ok_or_else(|| RuntimeError::Layer {
                index: summaries.len() - 1,
                name: "output",
                source: LayerError::TypeMismatch {
                    layer: "output",
                    found: current.kind(),
                },
            })?;
            Arc::new(tensor.clone())
        };

        metrics.finalise(run_start.elapsed());
        tracing::info!("{}", metrics.summary());

        Ok(InferenceOutput {
            output,
            summaries,
            metrics,
        })
    }

    fn model_mut(&mut self) -> &mut SequentialModel {
        self.model.as_mut().expect("model exists in Ready state")
    }
}

impl<S: EngineState> std::fmt::Debug for InferenceEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("state", &std::any::type_name::<S>())
            .field("model_path", &self.config.model_path)
            .field(
                "num_layers",
                &self.model.as_ref().map(SequentialModel::num_layers),
            )
            .finish()
    }
}
