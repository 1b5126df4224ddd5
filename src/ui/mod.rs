//! Form presentation
//!
//! `layout` is pure and builds on every platform; the Win32 window that
//! renders it only exists on Windows.

#[cfg(windows)]
pub mod form_window;
pub mod layout;

#[cfg(windows)]
pub use form_window::{FormWindow, FormWindowError};
pub use layout::{ControlKind, FormLayout, FormRow};
