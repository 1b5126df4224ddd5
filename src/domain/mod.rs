//! Domain logic and core data structures
//!
//! This module contains the pure clinical-form model: the fixed feature
//! schema, the validated feature vector and the prediction outcome. It is
//! independent of Win32 APIs and of any concrete classifier.

pub mod outcome;
pub mod record;
pub mod schema;

pub use outcome::{DialogSeverity, INVALID_INPUT_TITLE, RESULT_TITLE, RiskLabel};
pub use record::{FeatureValue, FeatureVector, ValidationError, ValidationReason};
pub use schema::{FeatureDescriptor, HEART_SCHEMA, InputKind, Schema};
