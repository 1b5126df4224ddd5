//! Classifier seam and the on-disk model artifact
//!
//! The trained model is loaded once at startup into a [`LoadedModel`] and is
//! read-only afterwards. Everything downstream only sees the [`Classifier`]
//! trait.

pub mod artifact;
pub mod estimator;

pub use artifact::{EstimatorSpec, ModelArtifact, ModelError, Scaler, TreeNode, TreeSpec};
pub use estimator::{LoadedModel, LogisticRegression, TreeEnsemble};

use crate::domain::{FeatureVector, RiskLabel};

/// A pre-trained binary classifier
///
/// Receives a single validated, schema-labeled row and returns exactly one
/// outcome label. Schema compatibility is checked when the model is loaded,
/// so prediction itself cannot fail.
pub trait Classifier {
    fn predict(&self, row: &FeatureVector) -> RiskLabel;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn predict(&self, row: &FeatureVector) -> RiskLabel {
        (**self).predict(row)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, row: &FeatureVector) -> RiskLabel {
        (**self).predict(row)
    }
}
