//! Prediction outcome and the messages shown for it

/// Title of the dialog reporting a prediction
pub const RESULT_TITLE: &str = "Result";
/// Title of the dialog reporting a validation failure
pub const INVALID_INPUT_TITLE: &str = "Invalid input";

/// Binary classifier outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    /// Label 1
    AtRisk,
    /// Label 0
    NoRisk,
}

/// Which dialog style presents a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSeverity {
    Info,
    Warning,
    Error,
}

impl RiskLabel {
    /// Maps a raw class label; anything other than 0 or 1 is not a binary outcome
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(RiskLabel::NoRisk),
            1 => Some(RiskLabel::AtRisk),
            _ => None,
        }
    }

    pub fn class(&self) -> u8 {
        match self {
            RiskLabel::NoRisk => 0,
            RiskLabel::AtRisk => 1,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::AtRisk => "⚠️ High Risk of Heart Disease",
            RiskLabel::NoRisk => "✅ No Risk Detected",
        }
    }

    pub fn severity(&self) -> DialogSeverity {
        match self {
            RiskLabel::AtRisk => DialogSeverity::Warning,
            RiskLabel::NoRisk => DialogSeverity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_labels_round_trip() {
        assert_eq!(RiskLabel::from_class(1), Some(RiskLabel::AtRisk));
        assert_eq!(RiskLabel::from_class(0), Some(RiskLabel::NoRisk));
        assert_eq!(RiskLabel::from_class(2), None);
        assert_eq!(RiskLabel::AtRisk.class(), 1);
    }

    #[test]
    fn messages_differ_by_label() {
        assert!(RiskLabel::AtRisk.message().contains("High Risk"));
        assert!(RiskLabel::NoRisk.message().contains("No Risk"));
        assert_eq!(RiskLabel::AtRisk.severity(), DialogSeverity::Warning);
        assert_eq!(RiskLabel::NoRisk.severity(), DialogSeverity::Info);
    }
}
