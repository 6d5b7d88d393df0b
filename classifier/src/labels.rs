use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ClassifierError;

#[derive(Deserialize)]
struct LabelFile {
    class_names: Vec<String>,
}

/// Ordered class names for the served model; the position in the list is the
/// class index the model predicts.
pub struct Labels {
    names: Vec<String>,
}

impl Labels {
    /// Read a `{"class_names": [...]}` file written alongside the model.
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = fs::read_to_string(path).map_err(|e| ClassifierError::LabelsIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let parsed: LabelFile =
            serde_json::from_str(&content).map_err(|e| ClassifierError::LabelsParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        if parsed.class_names.is_empty() {
            return Err(ClassifierError::EmptyLabels {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            names: parsed.class_names,
        })
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
