use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between a saved upload and a ranked answer.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("failed to read label file {path:?}: {source}")]
    LabelsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse label file {path:?}: {source}")]
    LabelsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("label file {path:?} contains no class names")]
    EmptyLabels { path: PathBuf },

    #[error("failed to decode image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path:?}: {source}")]
    SessionInit {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    #[error("unusable model metadata: {message}")]
    ModelMetadata { message: String },

    #[error("inference failed: {source}")]
    Inference {
        #[source]
        source: ort::Error,
    },

    #[error("model produced an empty output")]
    EmptyOutput,

    #[error("top-k must be greater than zero")]
    InvalidTopK,

    #[error("class index {index} has no label (only {count} known)")]
    MissingLabel { index: usize, count: usize },
}
