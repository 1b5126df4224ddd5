//! Platform-specific Windows implementations
//!
//! This module encapsulates the Win32 calls that are not tied to a single
//! window and provides a clean interface to the UI layer.

pub mod windows;

pub use self::windows::{control_text, enable_dpi_awareness, set_control_text, show_message, to_wstring};
