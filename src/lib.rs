//! Heart disease risk form
//!
//! Collects thirteen clinical inputs, validates them into a typed feature
//! vector and asks a pre-trained binary classifier for a risk label.

pub mod app;
pub mod config;
pub mod domain;
pub mod model;
#[cfg(windows)]
pub mod platform;
pub mod ui;
