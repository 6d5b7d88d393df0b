use std::path::Path;

use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use tracing::debug;

use crate::error::ClassifierError;
use crate::Array4F;

/// A pretrained ONNX classification model wrapped in a ready-to-run session.
///
/// Input and output tensor names are taken from the graph itself, so exported
/// models keep working when their tensor names differ.
pub struct ImageClassifier {
    session: Session,
    input_name: String,
    output_name: String,
}

impl ImageClassifier {
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(|e| ClassifierError::SessionInit {
                path: model_path.to_path_buf(),
                source: e,
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| ClassifierError::ModelMetadata {
                message: "model declares no inputs".to_owned(),
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| ClassifierError::ModelMetadata {
                message: "model declares no outputs".to_owned(),
            })?;
        debug!(input = %input_name, output = %output_name, "session ready");

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Class count declared by the output tensor, when the graph is static.
    pub fn output_classes(&self) -> Option<usize> {
        let output = self.session.outputs.first()?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => {
                let dims: Vec<i64> = shape.iter().copied().collect();
                usize::try_from(*dims.last()?).ok()
            }
            _ => None,
        }
    }

    /// One forward pass; returns the flattened per-class scores.
    pub fn run(&mut self, input: Array4F) -> Result<Vec<f32>, ClassifierError> {
        let shape: Vec<i64> = input.shape().iter().map(|&dim| dim as i64).collect();
        let tensor = Tensor::from_array((shape, input.into_raw_vec()))
            .map_err(|e| ClassifierError::Inference { source: e })?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| ClassifierError::Inference { source: e })?;
        let (_, scores) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference { source: e })?;

        if scores.is_empty() {
            return Err(ClassifierError::EmptyOutput);
        }
        Ok(scores.to_vec())
    }
}
