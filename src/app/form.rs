//! Form state
//!
//! Holds the current string value of every input, one entry per descriptor.
//! Purely presentational: values are only coerced when a prediction is
//! requested, and a failed prediction never touches them.

use crate::domain::{FeatureDescriptor, FeatureVector, Schema, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form has no field named '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not an option for {field}")]
    NotAnOption { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: Schema,
    values: Vec<String>,
}

impl FormState {
    /// Fresh form: choices on their first option, free text empty
    pub fn new(schema: Schema) -> Self {
        let values = schema
            .descriptors()
            .iter()
            .map(|d| d.default_value().to_string())
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Current value of a field
    pub fn value(&self, name: &str) -> Option<&str> {
        self.schema
            .position(name)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    /// Updates a field the way the user would
    ///
    /// Free-text fields accept any string. Constrained-choice fields only
    /// accept a member of their option set.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let descriptor = &self.schema.descriptors()[index];

        if let Some(options) = descriptor.options() {
            if !options.iter().any(|option| *option == value) {
                return Err(FormError::NotAnOption {
                    field: descriptor.name,
                    value: value.to_string(),
                });
            }
        }

        self.values[index] = value.to_string();
        Ok(())
    }

    /// `(descriptor, value)` pairs in schema order
    pub fn entries(&self) -> impl Iterator<Item = (&'static FeatureDescriptor, &str)> + '_ {
        self.schema
            .descriptors()
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Parse-and-validate stage of a prediction
    pub fn to_feature_vector(&self) -> Result<FeatureVector, ValidationError> {
        let mut values = self.values.iter();
        FeatureVector::parse(self.schema, |_| values.next().map(String::as_str))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Schema::heart())
    }
}
