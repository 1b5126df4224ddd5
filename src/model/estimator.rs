//! Concrete estimators reconstructed from a model artifact

use std::path::Path;

use crate::domain::{FeatureVector, RiskLabel, Schema};
use crate::model::Classifier;
use crate::model::artifact::{ModelArtifact, ModelError, Scaler, TreeNode, TreeSpec};

/// Linear model with an optional standard scaler in front
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
    scaler: Option<Scaler>,
    threshold: f64,
}

impl LogisticRegression {
    pub fn new(
        width: usize,
        coefficients: Vec<f64>,
        intercept: f64,
        scaler: Option<Scaler>,
        threshold: f64,
    ) -> Result<Self, ModelError> {
        check_len("coefficients", width, coefficients.len())?;
        if !coefficients.iter().all(|c| c.is_finite()) || !intercept.is_finite() {
            return Err(ModelError::InvalidParameter(
                "coefficients and intercept must be finite".to_string(),
            ));
        }
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "threshold {threshold} must lie strictly between 0 and 1"
            )));
        }
        if let Some(scaler) = &scaler {
            check_len("scaler mean", width, scaler.mean.len())?;
            check_len("scaler scale", width, scaler.scale.len())?;
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ModelError::InvalidParameter(
                    "scaler scale entries must be finite and non-zero".to_string(),
                ));
            }
        }

        Ok(Self {
            coefficients,
            intercept,
            scaler,
            threshold,
        })
    }

    /// Linear score for a row in artifact column order
    pub fn decision_value(&self, x: &[f64]) -> f64 {
        let mut z = self.intercept;
        for (index, (value, weight)) in x.iter().zip(&self.coefficients).enumerate() {
            let value = match &self.scaler {
                Some(scaler) => (value - scaler.mean[index]) / scaler.scale[index],
                None => *value,
            };
            z += value * weight;
        }
        z
    }

    /// Probability of the positive class
    pub fn probability(&self, x: &[f64]) -> f64 {
        1.0 / (1.0 + (-self.decision_value(x)).exp())
    }

    /// Compares the score against the threshold's log-odds; the sigmoid
    /// saturates to exactly 0.5 for scores near zero.
    pub fn is_positive(&self, x: &[f64]) -> bool {
        let cutoff = (self.threshold / (1.0 - self.threshold)).ln();
        self.decision_value(x) > cutoff
    }
}

/// Averaged ensemble of decision trees
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    trees: Vec<Vec<TreeNode>>,
}

impl TreeEnsemble {
    pub fn new(width: usize, trees: &[TreeSpec]) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::InvalidParameter(
                "tree ensemble has no trees".to_string(),
            ));
        }

        for (tree_index, tree) in trees.iter().enumerate() {
            validate_tree(tree_index, width, &tree.nodes)?;
        }

        Ok(Self {
            trees: trees.iter().map(|t| t.nodes.clone()).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Mean class distribution over all trees
    pub fn class_distribution(&self, x: &[f64]) -> [f64; 2] {
        let mut total = [0.0, 0.0];
        for nodes in &self.trees {
            let leaf = leaf_for(nodes, x);
            let sum = leaf[0] + leaf[1];
            total[0] += leaf[0] / sum;
            total[1] += leaf[1] / sum;
        }
        let count = self.trees.len() as f64;
        [total[0] / count, total[1] / count]
    }

    /// Majority by probability; ties go to the negative class
    pub fn is_positive(&self, x: &[f64]) -> bool {
        let [no_risk, at_risk] = self.class_distribution(x);
        at_risk > no_risk
    }
}

fn leaf_for(nodes: &[TreeNode], x: &[f64]) -> [f64; 2] {
    let mut index = 0;
    loop {
        match &nodes[index] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                index = if x[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}

// Children must point forward, which also rules out cycles.
fn validate_tree(tree: usize, width: usize, nodes: &[TreeNode]) -> Result<(), ModelError> {
    if nodes.is_empty() {
        return Err(ModelError::BadNode {
            tree,
            node: 0,
            reason: "tree has no nodes".to_string(),
        });
    }

    for (node, spec) in nodes.iter().enumerate() {
        let bad = |reason: String| ModelError::BadNode { tree, node, reason };
        match spec {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= width {
                    return Err(bad(format!(
                        "feature {feature} out of range for {width} columns"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(bad("threshold is not finite".to_string()));
                }
                for child in [*left, *right] {
                    if child <= node || child >= nodes.len() {
                        return Err(bad(format!("child {child} is not a later node")));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(bad("leaf value must be finite and non-negative".to_string()));
                }
                if value[0] + value[1] <= 0.0 {
                    return Err(bad("leaf value sums to zero".to_string()));
                }
            }
        }
    }

    Ok(())
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), ModelError> {
    if expected != found {
        return Err(ModelError::ShapeMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Estimator {
    Logistic(LogisticRegression),
    Trees(TreeEnsemble),
}

/// Validated classifier bound to a form schema
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    schema: Schema,
    /// Schema position feeding each artifact column
    columns: Vec<usize>,
    estimator: Estimator,
}

impl LoadedModel {
    pub(crate) fn logistic(schema: Schema, columns: Vec<usize>, model: LogisticRegression) -> Self {
        Self {
            schema,
            columns,
            estimator: Estimator::Logistic(model),
        }
    }

    pub(crate) fn trees(schema: Schema, columns: Vec<usize>, model: TreeEnsemble) -> Self {
        Self {
            schema,
            columns,
            estimator: Estimator::Trees(model),
        }
    }

    /// Reads, validates and binds the artifact at `path`
    ///
    /// # Arguments
    /// * `path` - JSON model artifact
    /// * `schema` - Form schema the artifact columns must cover exactly
    ///
    /// # Returns
    /// The ready classifier, or the I/O, parse or compatibility error
    pub fn load(path: &Path, schema: Schema) -> Result<Self, ModelError> {
        tracing::info!(path = %path.display(), "Loading model artifact");
        ModelArtifact::load(path)?.build(schema)
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    fn artifact_row(&self, row: &FeatureVector) -> Vec<f64> {
        debug_assert_eq!(row.schema(), self.schema);
        let values = row.values();
        self.columns.iter().map(|&p| values[p].as_f64()).collect()
    }
}

impl Classifier for LoadedModel {
    fn predict(&self, row: &FeatureVector) -> RiskLabel {
        let x = self.artifact_row(row);
        let positive = match &self.estimator {
            Estimator::Logistic(model) => {
                let score = model.decision_value(&x);
                let probability = model.probability(&x);
                tracing::debug!(score, probability, "Logistic regression score");
                model.is_positive(&x)
            }
            Estimator::Trees(model) => {
                let [_, at_risk] = model.class_distribution(&x);
                tracing::debug!(probability = at_risk, trees = model.len(), "Tree ensemble vote");
                model.is_positive(&x)
            }
        };

        if positive {
            RiskLabel::AtRisk
        } else {
            RiskLabel::NoRisk
        }
    }
}
