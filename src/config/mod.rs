//! Configuration module for heart-risk
//!
//! Startup settings shared between the model loader and the form window.

pub mod settings;

pub use settings::{AppConfig, DEFAULT_MODEL_PATH, MODEL_PATH_ENV, WindowConfig};
