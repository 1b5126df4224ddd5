use std::io::Write;

use heart_risk::app::{FormState, InferenceAdapter};
use heart_risk::domain::{DialogSeverity, FeatureVector, RiskLabel, Schema, ValidationReason};
use heart_risk::model::{Classifier, LoadedModel, ModelError};
use heart_risk::ui::{ControlKind, FormLayout};
use pretty_assertions::assert_eq;

const WORKED_EXAMPLE: [(&str, &str); 13] = [
    ("age", "63"),
    ("sex", "1"),
    ("cp", "3"),
    ("trestbps", "145"),
    ("chol", "233"),
    ("fbs", "1"),
    ("restecg", "0"),
    ("thalach", "150"),
    ("exang", "0"),
    ("oldpeak", "2.3"),
    ("slope", "0"),
    ("ca", "0"),
    ("thal", "1"),
];

fn worked_example_form() -> FormState {
    let mut form = FormState::new(Schema::heart());
    for (name, value) in WORKED_EXAMPLE {
        form.set(name, value).unwrap();
    }
    form
}

/// Logistic model whose score rises with chest pain type and ST depression
fn artifact_json() -> String {
    serde_json::json!({
        "feature_names": Schema::heart().feature_names().collect::<Vec<_>>(),
        "model": {
            "kind": "logistic_regression",
            "coefficients": [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            "intercept": -4.0,
            "scaler": {
                "mean": vec![0.0; 13],
                "scale": vec![1.0; 13]
            }
        }
    })
    .to_string()
}

fn load_model() -> LoadedModel {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(artifact_json().as_bytes()).unwrap();
    LoadedModel::load(file.path(), Schema::heart()).unwrap()
}

struct Always(u8);

impl Classifier for Always {
    fn predict(&self, _row: &FeatureVector) -> RiskLabel {
        RiskLabel::from_class(self.0).unwrap()
    }
}

#[test]
fn worked_example_with_positive_classifier_shows_high_risk() {
    let adapter = InferenceAdapter::new(Always(1));
    let prediction = adapter.predict(&worked_example_form()).unwrap();

    assert_eq!(prediction.label, RiskLabel::AtRisk);
    assert_eq!(prediction.message, "⚠️ High Risk of Heart Disease");
    assert_eq!(prediction.severity(), DialogSeverity::Warning);
}

#[test]
fn worked_example_with_negative_classifier_shows_no_risk() {
    let adapter = InferenceAdapter::new(Always(0));
    let prediction = adapter.predict(&worked_example_form()).unwrap();

    assert_eq!(prediction.message, "✅ No Risk Detected");
    assert_eq!(prediction.severity(), DialogSeverity::Info);
}

#[test]
fn loaded_artifact_classifies_form_input() {
    let adapter = InferenceAdapter::new(load_model());

    // cp 3 + oldpeak 2.3 - 4 > 0
    let prediction = adapter.predict(&worked_example_form()).unwrap();
    assert_eq!(prediction.label, RiskLabel::AtRisk);

    let mut form = worked_example_form();
    form.set("cp", "0").unwrap();
    form.set("oldpeak", "0.5").unwrap();
    let prediction = adapter.predict(&form).unwrap();
    assert_eq!(prediction.label, RiskLabel::NoRisk);
}

#[test]
fn boxed_model_drives_the_adapter() {
    let adapter: InferenceAdapter<Box<dyn Classifier>> =
        InferenceAdapter::new(Box::new(load_model()));
    assert!(adapter.predict(&worked_example_form()).is_ok());
}

#[test]
fn validation_failure_then_correction() {
    let adapter = InferenceAdapter::new(load_model());
    let mut form = worked_example_form();
    form.set("thalach", "").unwrap();

    let err = adapter.predict(&form).unwrap_err();
    assert_eq!(err.feature, "thalach");
    assert_eq!(err.reason, ValidationReason::Empty);
    assert_eq!(err.to_string(), "thalach cannot be empty.");
    assert_eq!(form.value("age"), Some("63"));

    form.set("thalach", "150").unwrap();
    assert!(adapter.predict(&form).is_ok());
}

#[test]
fn incompatible_artifact_fails_at_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let text = artifact_json().replace("\"thal\"", "\"thalium\"");
    file.write_all(text.as_bytes()).unwrap();

    let err = LoadedModel::load(file.path(), Schema::heart()).unwrap_err();
    assert!(matches!(err, ModelError::UnknownFeature(name) if name == "thalium"));
}

#[test]
fn layout_matches_form_state() {
    let form = FormState::new(Schema::heart());
    let layout = FormLayout::for_schema(Schema::heart(), 400);

    for (row, (descriptor, value)) in layout.rows().iter().zip(form.entries()) {
        assert_eq!(row.descriptor.name, descriptor.name);
        match row.control {
            ControlKind::Edit => assert_eq!(value, ""),
            ControlKind::ComboBox { options } => assert_eq!(value, options[0]),
        }
    }
}
