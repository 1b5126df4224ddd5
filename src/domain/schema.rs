//! Feature schema for the heart disease classifier
//!
//! The order of [`HEART_SCHEMA`] is the positional schema the classifier was
//! trained on. Every other module derives its ordering from this table.

/// How a feature is entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text, coerced to a floating point number
    Numeric,
    /// One value out of a closed set of digit strings, coerced to an integer
    Choice(&'static [&'static str]),
}

/// Describes one model input: its name and how the user enters it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub name: &'static str,
    pub kind: InputKind,
}

impl FeatureDescriptor {
    pub const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Numeric,
        }
    }

    pub const fn choice(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: InputKind::Choice(options),
        }
    }

    /// Label shown next to the input control
    pub fn label(&self) -> String {
        self.name.to_uppercase()
    }

    /// Legal values for a constrained-choice field, `None` for free text
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            InputKind::Numeric => None,
            InputKind::Choice(options) => Some(options),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, InputKind::Choice(_))
    }

    /// Initial form value: the first option for choices, empty for free text
    pub fn default_value(&self) -> &'static str {
        match self.kind {
            InputKind::Numeric => "",
            InputKind::Choice(options) => options.first().copied().unwrap_or(""),
        }
    }
}

const BINARY: &[&str] = &["0", "1"];
const ZERO_TO_TWO: &[&str] = &["0", "1", "2"];
const ZERO_TO_THREE: &[&str] = &["0", "1", "2", "3"];

/// The thirteen inputs in training order
pub const HEART_SCHEMA: [FeatureDescriptor; 13] = [
    FeatureDescriptor::numeric("age"),
    // 0 = female, 1 = male
    FeatureDescriptor::choice("sex", BINARY),
    // chest pain type
    FeatureDescriptor::choice("cp", ZERO_TO_THREE),
    // resting blood pressure
    FeatureDescriptor::numeric("trestbps"),
    // serum cholesterol
    FeatureDescriptor::numeric("chol"),
    // fasting blood sugar > 120 mg/dl
    FeatureDescriptor::choice("fbs", BINARY),
    FeatureDescriptor::choice("restecg", ZERO_TO_TWO),
    // max heart rate achieved
    FeatureDescriptor::numeric("thalach"),
    // exercise induced angina
    FeatureDescriptor::choice("exang", BINARY),
    // ST depression induced by exercise
    FeatureDescriptor::numeric("oldpeak"),
    FeatureDescriptor::choice("slope", ZERO_TO_TWO),
    // major vessels colored by fluoroscopy
    FeatureDescriptor::choice("ca", ZERO_TO_THREE),
    // 1 = normal, 2 = fixed defect, 3 = reversible defect
    FeatureDescriptor::choice("thal", &["1", "2", "3"]),
];

/// An ordered, immutable set of feature descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    descriptors: &'static [FeatureDescriptor],
}

impl Schema {
    pub const fn new(descriptors: &'static [FeatureDescriptor]) -> Self {
        Self { descriptors }
    }

    /// Schema of the heart disease model
    pub const fn heart() -> Self {
        Self::new(&HEART_SCHEMA)
    }

    pub fn descriptors(&self) -> &'static [FeatureDescriptor] {
        self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptor(&self, name: &str) -> Option<&'static FeatureDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Position of a feature in the model's input row
    pub fn position(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.name == name)
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> {
        self.descriptors.iter().map(|d| d.name)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::heart()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heart_schema_order_matches_training_order() {
        let names: Vec<_> = Schema::heart().feature_names().collect();
        assert_eq!(
            names,
            vec![
                "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang",
                "oldpeak", "slope", "ca", "thal",
            ]
        );
    }

    #[test]
    fn heart_schema_input_kinds() {
        let schema = Schema::heart();
        let numeric: Vec<_> = schema
            .descriptors()
            .iter()
            .filter(|d| !d.is_choice())
            .map(|d| d.name)
            .collect();
        assert_eq!(numeric, vec!["age", "trestbps", "chol", "thalach", "oldpeak"]);
        assert_eq!(schema.descriptors().iter().filter(|d| d.is_choice()).count(), 8);
    }

    #[test]
    fn choice_sets() {
        let schema = Schema::heart();
        let options = |name: &str| schema.descriptor(name).and_then(|d| d.options());

        assert_eq!(options("sex"), Some(&["0", "1"][..]));
        assert_eq!(options("cp"), Some(&["0", "1", "2", "3"][..]));
        assert_eq!(options("restecg"), Some(&["0", "1", "2"][..]));
        assert_eq!(options("thal"), Some(&["1", "2", "3"][..]));
        assert_eq!(options("age"), None);
    }

    #[test]
    fn default_values() {
        let schema = Schema::heart();
        assert_eq!(schema.descriptor("age").unwrap().default_value(), "");
        assert_eq!(schema.descriptor("sex").unwrap().default_value(), "0");
        assert_eq!(schema.descriptor("thal").unwrap().default_value(), "1");
    }

    #[test]
    fn labels_are_uppercase_names() {
        let schema = Schema::heart();
        assert_eq!(schema.descriptor("trestbps").unwrap().label(), "TRESTBPS");
    }

    #[test]
    fn lookup_by_name() {
        let schema = Schema::heart();
        assert_eq!(schema.position("age"), Some(0));
        assert_eq!(schema.position("thal"), Some(12));
        assert_eq!(schema.position("bmi"), None);
        assert!(schema.descriptor("bmi").is_none());
    }
}
