//! Application layer
//!
//! Connects the form's presentational state to the classifier. Nothing here
//! knows about Win32.

pub mod adapter;
pub mod form;

pub use adapter::{InferenceAdapter, Prediction};
pub use form::{FormError, FormState};
