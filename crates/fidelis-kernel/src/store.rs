//! JSON persistence for trained models and labeled test sets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::debug;

use fidelis_embed::FeatureMapSpec;

use crate::classifier::ClassifierModel;
use crate::error::{FidelityError, KernelResult};

/// A persisted model: embedding choice, trained weights and the labeled
/// reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Embedding identifier and shape.
    #[serde(rename = "featmap")]
    pub feature_map: FeatureMapSpec,
    /// Trained weights.
    #[serde(rename = "pars")]
    pub weights: Vec<f64>,
    /// Wires per embedded input.
    #[serde(rename = "n_wires")]
    pub num_wires: usize,
    /// Reference inputs.
    #[serde(rename = "X")]
    pub inputs: Vec<Vec<f64>>,
    /// Reference labels in {+1, -1}.
    #[serde(rename = "Y")]
    pub labels: Vec<f64>,
}

impl ModelRecord {
    /// Read a record from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> KernelResult<Self> {
        read_json(path.as_ref())
    }

    /// Write the record as pretty-printed JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> KernelResult<()> {
        write_json(path.as_ref(), self)
    }

    /// Resolve the embedding and validate the record into a model.
    ///
    /// A hardware-efficient record without `data_dim` takes it from the
    /// width of the stored inputs.
    pub fn into_model(self) -> KernelResult<ClassifierModel> {
        let mut spec = self.feature_map;
        if spec.data_dim.is_none() {
            if let Some(first) = self.inputs.first() {
                spec.data_dim = Some(first.len());
            }
        }
        let feature_map = spec.resolve()?;
        ClassifierModel::new(feature_map, self.weights, self.num_wires, self.inputs, self.labels)
    }

    /// Snapshot a model. Class A samples are written before class B.
    pub fn from_model(model: &ClassifierModel) -> Self {
        let inputs: Vec<Vec<f64>> = model
            .class_a()
            .iter()
            .chain(model.class_b())
            .cloned()
            .collect();
        let labels = std::iter::repeat_n(1.0, model.class_a().len())
            .chain(std::iter::repeat_n(-1.0, model.class_b().len()))
            .collect();
        Self {
            feature_map: model.feature_map().spec(),
            weights: model.weights().to_vec(),
            num_wires: model.num_wires(),
            inputs,
            labels,
        }
    }
}

/// Labeled inputs for accuracy evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledDataset {
    /// Inputs.
    #[serde(rename = "X")]
    pub inputs: Vec<Vec<f64>>,
    /// Labels in {+1, -1}.
    #[serde(rename = "Y")]
    pub labels: Vec<f64>,
}

impl LabeledDataset {
    /// Read a dataset from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> KernelResult<Self> {
        read_json(path.as_ref())
    }

    /// Write the dataset as pretty-printed JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> KernelResult<()> {
        write_json(path.as_ref(), self)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> KernelResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| FidelityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&contents).map_err(|source| FidelityError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded JSON document");
    Ok(value)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> KernelResult<()> {
    let contents = serde_json::to_string_pretty(value).map_err(|source| FidelityError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| FidelityError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_names() {
        let json = r#"{
            "featmap": {"identifier": "qaoa"},
            "pars": [0.1],
            "n_wires": 1,
            "X": [[0.1], [1.2]],
            "Y": [1, -1]
        }"#;
        let record: ModelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.feature_map.layers, 1);
        assert_eq!(record.labels, vec![1.0, -1.0]);

        let model = record.into_model().unwrap();
        assert_eq!(model.class_a(), &[vec![0.1]]);
        assert_eq!(model.class_b(), &[vec![1.2]]);
    }

    #[test]
    fn test_hardware_efficient_data_dim_from_inputs() {
        let record = ModelRecord {
            feature_map: FeatureMapSpec::new("vqc", 1),
            weights: vec![0.0; 6],
            num_wires: 2,
            inputs: vec![vec![0.1, 0.2], vec![-0.1, 0.3]],
            labels: vec![1.0, -1.0],
        };
        let model = record.into_model().unwrap();
        assert_eq!(model.feature_map().spec().data_dim, Some(2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ModelRecord::from_file("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, FidelityError::Io { .. }));
    }
}
