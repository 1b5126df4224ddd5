//! JSON model artifact
//!
//! The artifact names its input columns and carries the fitted parameters of
//! one estimator. Columns are matched to the form schema by name, so the
//! artifact may list them in any order as long as each schema feature appears
//! exactly once.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Schema;
use crate::model::estimator::{LoadedModel, LogisticRegression, TreeEnsemble};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Model expects feature '{0}' which the form does not provide")]
    UnknownFeature(String),
    #[error("Model does not use form feature '{0}'")]
    MissingFeature(&'static str),
    #[error("Model lists feature '{0}' more than once")]
    DuplicateFeature(String),
    #[error("Model {what} has {found} entries, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Tree {tree} node {node} is invalid: {reason}")]
    BadNode {
        tree: usize,
        node: usize,
        reason: String,
    },
    #[error("Invalid model parameter: {0}")]
    InvalidParameter(String),
}

/// Serialized form of a trained classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Input columns in the order the estimator's parameters refer to them
    pub feature_names: Vec<String>,
    pub model: EstimatorSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        scaler: Option<Scaler>,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    TreeEnsemble { trees: Vec<TreeSpec> },
}

/// Standardization applied before a linear model: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// One decision tree as a flat node array rooted at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Goes to `left` when `x[feature] <= threshold`, else to `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class distribution `[p(no risk), p(at risk)]` at this leaf
    Leaf { value: [f64; 2] },
}

fn default_threshold() -> f64 {
    0.5
}

impl ModelArtifact {
    /// Reads and parses an artifact file
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the artifact against the form schema and builds the classifier
    pub fn build(&self, schema: Schema) -> Result<LoadedModel, ModelError> {
        let columns = resolve_columns(&self.feature_names, schema)?;
        let width = columns.len();

        let model = match &self.model {
            EstimatorSpec::LogisticRegression {
                coefficients,
                intercept,
                scaler,
                threshold,
            } => LoadedModel::logistic(
                schema,
                columns,
                LogisticRegression::new(
                    width,
                    coefficients.clone(),
                    *intercept,
                    scaler.clone(),
                    *threshold,
                )?,
            ),
            EstimatorSpec::TreeEnsemble { trees } => {
                LoadedModel::trees(schema, columns, TreeEnsemble::new(width, trees)?)
            }
        };

        tracing::info!(
            kind = self.kind(),
            features = width,
            "Model artifact validated"
        );
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self.model {
            EstimatorSpec::LogisticRegression { .. } => "logistic_regression",
            EstimatorSpec::TreeEnsemble { .. } => "tree_ensemble",
        }
    }
}

/// Maps each artifact column to its position in the form schema
fn resolve_columns(feature_names: &[String], schema: Schema) -> Result<Vec<usize>, ModelError> {
    let mut columns = Vec::with_capacity(feature_names.len());
    for name in feature_names {
        let position = schema
            .position(name)
            .ok_or_else(|| ModelError::UnknownFeature(name.clone()))?;
        if columns.contains(&position) {
            return Err(ModelError::DuplicateFeature(name.clone()));
        }
        columns.push(position);
    }

    for (position, name) in schema.feature_names().enumerate() {
        if !columns.contains(&position) {
            return Err(ModelError::MissingFeature(name));
        }
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn heart_names() -> Vec<String> {
        Schema::heart().feature_names().map(String::from).collect()
    }

    fn logistic_json(names: &[String]) -> String {
        serde_json::json!({
            "feature_names": names,
            "model": {
                "kind": "logistic_regression",
                "coefficients": vec![0.1; names.len()],
                "intercept": -1.0
            }
        })
        .to_string()
    }

    #[test]
    fn parses_logistic_artifact_with_defaults() {
        let artifact = ModelArtifact::from_json(&logistic_json(&heart_names())).unwrap();
        assert_eq!(artifact.kind(), "logistic_regression");
        match &artifact.model {
            EstimatorSpec::LogisticRegression {
                scaler, threshold, ..
            } => {
                assert_eq!(*scaler, None);
                assert_eq!(*threshold, 0.5);
            }
            other => panic!("unexpected estimator {other:?}"),
        }
        assert!(artifact.build(Schema::heart()).is_ok());
    }

    #[test]
    fn parses_tree_nodes() {
        let text = serde_json::json!({
            "feature_names": heart_names(),
            "model": {
                "kind": "tree_ensemble",
                "trees": [{
                    "nodes": [
                        {"feature": 0, "threshold": 50.0, "left": 1, "right": 2},
                        {"value": [0.9, 0.1]},
                        {"value": [0.2, 0.8]}
                    ]
                }]
            }
        })
        .to_string();

        let artifact = ModelArtifact::from_json(&text).unwrap();
        let EstimatorSpec::TreeEnsemble { trees } = &artifact.model else {
            panic!("expected tree ensemble");
        };
        assert_eq!(
            trees[0].nodes[0],
            TreeNode::Split {
                feature: 0,
                threshold: 50.0,
                left: 1,
                right: 2
            }
        );
        assert_eq!(trees[0].nodes[2], TreeNode::Leaf { value: [0.2, 0.8] });
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(logistic_json(&heart_names()).as_bytes()).unwrap();

        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.feature_names.len(), 13);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(&dir.path().join("heart_model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = ModelArtifact::from_json("not json").unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let mut names = heart_names();
        names[0] = "bmi".to_string();
        let artifact = ModelArtifact::from_json(&logistic_json(&names)).unwrap();
        let err = artifact.build(Schema::heart()).unwrap_err();
        assert!(matches!(err, ModelError::UnknownFeature(name) if name == "bmi"));
    }

    #[test]
    fn missing_feature_is_rejected() {
        let mut names = heart_names();
        names.pop();
        let artifact = ModelArtifact::from_json(&logistic_json(&names)).unwrap();
        let err = artifact.build(Schema::heart()).unwrap_err();
        assert!(matches!(err, ModelError::MissingFeature("thal")));
    }

    #[test]
    fn duplicate_feature_is_rejected() {
        let mut names = heart_names();
        names[1] = "age".to_string();
        let artifact = ModelArtifact::from_json(&logistic_json(&names)).unwrap();
        let err = artifact.build(Schema::heart()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateFeature(name) if name == "age"));
    }

    #[test]
    fn reordered_columns_are_accepted() {
        let mut names = heart_names();
        names.reverse();
        let artifact = ModelArtifact::from_json(&logistic_json(&names)).unwrap();
        assert!(artifact.build(Schema::heart()).is_ok());
    }

    #[test]
    fn json_round_trip_preserves_artifact() {
        let artifact = ModelArtifact::from_json(&logistic_json(&heart_names())).unwrap();
        let reparsed = ModelArtifact::from_json(&artifact.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, artifact);
    }
}
