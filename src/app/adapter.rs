//! Inference adapter
//!
//! Two stages: the form is parsed into a [`FeatureVector`], and only a vector
//! that passed validation is handed to the classifier.

use crate::app::form::FormState;
use crate::domain::{DialogSeverity, FeatureVector, RiskLabel, ValidationError};
use crate::model::Classifier;

/// Result of one successful prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub label: RiskLabel,
    pub message: &'static str,
}

impl Prediction {
    fn from_label(label: RiskLabel) -> Self {
        Self {
            label,
            message: label.message(),
        }
    }

    pub fn severity(&self) -> DialogSeverity {
        self.label.severity()
    }
}

/// Owns the loaded classifier for the lifetime of the form
pub struct InferenceAdapter<C> {
    classifier: C,
}

impl<C: Classifier> InferenceAdapter<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Validates the current form values and classifies them
    ///
    /// # Arguments
    /// * `form` - Raw values currently entered in the form
    ///
    /// # Returns
    /// The label and its display message, or the first [`ValidationError`],
    /// in which case the classifier was not called
    pub fn predict(&self, form: &FormState) -> Result<Prediction, ValidationError> {
        let row = form.to_feature_vector().inspect_err(|err| {
            tracing::warn!(feature = err.feature, "Rejected form input: {err}");
        })?;
        Ok(self.classify(&row))
    }

    /// Inference stage; only ever receives validated rows
    pub fn classify(&self, row: &FeatureVector) -> Prediction {
        tracing::debug!(features = row.len(), "Running inference");
        let label = self.classifier.predict(row);
        tracing::info!(label = label.class(), "Prediction complete");
        Prediction::from_label(label)
    }
}
