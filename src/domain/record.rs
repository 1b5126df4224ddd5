//! Typed, schema-ordered feature vector
//!
//! Form values arrive as strings. [`FeatureVector::parse`] is the only way to
//! build a vector, so a classifier never sees unvalidated input.

use crate::domain::schema::{FeatureDescriptor, InputKind, Schema};
use thiserror::Error;

/// A single coerced input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// Free-text field parsed as a float
    Numeric(f64),
    /// Constrained-choice field parsed as an integer
    Choice(i64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Numeric(value) => value,
            FeatureValue::Choice(value) => value as f64,
        }
    }
}

/// Why a form value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("cannot be empty.")]
    Empty,
    #[error("could not convert '{input}' to a number")]
    NotANumber { input: String },
    #[error("could not convert '{input}' to an integer")]
    NotAnInteger { input: String },
    #[error("'{input}' is not a finite number")]
    NonFinite { input: String },
}

/// The recoverable input error: names the offending feature and the reason
///
/// An empty field reads as a sentence (`age cannot be empty.`); conversion
/// failures keep the feature as a prefix (`age: could not convert ...`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{feature}{}{reason}", separator(.reason))]
pub struct ValidationError {
    pub feature: &'static str,
    pub reason: ValidationReason,
}

fn separator(reason: &ValidationReason) -> &'static str {
    match reason {
        ValidationReason::Empty => " ",
        _ => ": ",
    }
}

impl ValidationError {
    fn new(feature: &'static str, reason: ValidationReason) -> Self {
        Self { feature, reason }
    }
}

/// One prediction row: exactly one value per descriptor, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Schema,
    values: Vec<FeatureValue>,
}

impl FeatureVector {
    /// Coerces raw form values into a typed row
    ///
    /// A missing or blank value fails with [`ValidationReason::Empty`]. The
    /// first failing feature in schema order is reported.
    ///
    /// # Arguments
    /// * `schema` - Descriptors to read, in training order
    /// * `lookup` - Returns the raw text entered for a descriptor
    ///
    /// # Returns
    /// The typed row, or the first validation failure
    pub fn parse<'a, F>(schema: Schema, mut lookup: F) -> Result<Self, ValidationError>
    where
        F: FnMut(&FeatureDescriptor) -> Option<&'a str>,
    {
        let mut values = Vec::with_capacity(schema.len());
        for descriptor in schema.descriptors() {
            let raw = lookup(descriptor).unwrap_or("");
            values.push(coerce(descriptor, raw)?);
        }

        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.schema
            .position(name)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Schema-labeled view of the row
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.schema.feature_names().zip(self.values.iter().copied())
    }

    pub fn to_f64_row(&self) -> Vec<f64> {
        self.values.iter().map(FeatureValue::as_f64).collect()
    }
}

fn coerce(descriptor: &FeatureDescriptor, raw: &str) -> Result<FeatureValue, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::new(descriptor.name, ValidationReason::Empty));
    }

    match descriptor.kind {
        InputKind::Numeric => {
            let value: f64 = text.parse().map_err(|_| {
                ValidationError::new(
                    descriptor.name,
                    ValidationReason::NotANumber {
                        input: raw.to_string(),
                    },
                )
            })?;
            if !value.is_finite() {
                return Err(ValidationError::new(
                    descriptor.name,
                    ValidationReason::NonFinite {
                        input: raw.to_string(),
                    },
                ));
            }
            Ok(FeatureValue::Numeric(value))
        }
        InputKind::Choice(_) => text.parse::<i64>().map(FeatureValue::Choice).map_err(|_| {
            ValidationError::new(
                descriptor.name,
                ValidationReason::NotAnInteger {
                    input: raw.to_string(),
                },
            )
        }),
    }
}
