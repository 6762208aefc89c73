//! ONNX policy loading and inference
//!
//! Expects a network taking a `[1, 8, 8, 12]` float tensor and producing one
//! logit per action. Requires the `onnx` feature to be enabled.

use chess_core::EncodedState;
use std::path::Path;
use tract_onnx::prelude::*;

use crate::env::NUM_ACTIONS;
use crate::error::RlError;
use crate::policy::Policy;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Wrapper around an ONNX policy network.
pub struct OnnxPolicy {
    model: Plan,
    name: String,
}

impl OnnxPolicy {
    /// Load an ONNX model from the given path.
    pub fn load(path: &Path) -> Result<Self, RlError> {
        if !path.exists() {
            return Err(RlError::ModelNotFound(path.to_path_buf()));
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| RlError::Onnx(format!("failed to load model: {e}")))?
            .into_optimized()
            .map_err(|e| RlError::Onnx(format!("failed to optimize model: {e}")))?
            .into_runnable()
            .map_err(|e| RlError::Onnx(format!("failed to make model runnable: {e}")))?;

        Ok(Self {
            model,
            name: format!("onnx:{}", path.display()),
        })
    }

    fn run_inference(&self, state: &EncodedState) -> Result<usize, RlError> {
        let [r, f, p] = EncodedState::SHAPE;
        let input: Tensor = tract_ndarray::Array4::from_shape_vec((1, r, f, p), state.flat())
            .map_err(|e| RlError::Onnx(format!("bad input shape: {e}")))?
            .into();

        let result = self
            .model
            .run(tvec!(input.into()))
            .map_err(|e| RlError::Onnx(format!("inference failed: {e}")))?;
        let logits = result[0]
            .to_array_view::<f32>()
            .map_err(|e| RlError::Onnx(format!("unexpected output type: {e}")))?;

        Ok(logits
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(NUM_ACTIONS))
    }
}

impl Policy for OnnxPolicy {
    fn predict(&self, state: &EncodedState) -> usize {
        match self.run_inference(state) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("{e}");
                NUM_ACTIONS
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
