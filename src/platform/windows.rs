//! General Windows platform utilities
//!
//! Win32 helpers shared by the form window: DPI setup, UTF-16 strings and
//! control text access.

use crate::domain::DialogSeverity;
use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowTextLengthW, GetWindowTextW, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK,
    MESSAGEBOX_STYLE, MessageBoxW, SetWindowTextW,
};

/// Opts the process into per-monitor DPI awareness
///
/// Must run before any window is created. Failure is logged and ignored:
/// the form still works, only blurrier on scaled displays.
pub fn enable_dpi_awareness() {
    unsafe {
        if let Err(err) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
            tracing::warn!("Could not enable per-monitor DPI awareness: {err:?}");
        }
    }
}

/// Null-terminated UTF-16 copy of `input`
pub fn to_wstring(input: &str) -> Vec<u16> {
    input.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Current text of an edit or combo box control
pub fn control_text(hwnd: HWND) -> String {
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u16; length as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

pub fn set_control_text(hwnd: HWND, text: &str) {
    let wide = to_wstring(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
    }
}

/// Modal message box styled after the message severity
pub fn show_message(owner: HWND, title: &str, message: &str, severity: DialogSeverity) {
    let icon: MESSAGEBOX_STYLE = match severity {
        DialogSeverity::Info => MB_ICONINFORMATION,
        DialogSeverity::Warning => MB_ICONWARNING,
        DialogSeverity::Error => MB_ICONERROR,
    };
    let text = to_wstring(message);
    let caption = to_wstring(title);
    unsafe {
        MessageBoxW(
            owner,
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            MB_OK | icon,
        );
    }
}
