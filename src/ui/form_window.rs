//! Prediction form implemented with raw Win32 controls.
//!
//! One top-level window holds a label and an input control per feature plus
//! a Predict button. Clicking the button reads every control into the form
//! state and runs the adapter synchronously on the UI thread; the outcome or
//! the validation failure is reported in a modal message box and the entered
//! values stay in place.

#![allow(unsafe_op_in_unsafe_fn)]

use crate::app::{FormError, FormState, InferenceAdapter};
use crate::config::WindowConfig;
use crate::domain::{DialogSeverity, INVALID_INPUT_TITLE, RESULT_TITLE, Schema};
use crate::model::Classifier;
use crate::platform::{control_text, set_control_text, show_message, to_wstring};
use crate::ui::layout::{ControlKind, FormLayout, ID_BTN_PREDICT};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{
    GetLastError, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WIN32_ERROR, WPARAM,
};
use windows::Win32::Graphics::Gdi::{GetStockObject, COLOR_BTNFACE, DEFAULT_GUI_FONT, HBRUSH, HFONT};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::{InitCommonControlsEx, ICC_STANDARD_CLASSES, INITCOMMONCONTROLSEX};
use windows::Win32::UI::WindowsAndMessaging::*;

const CLASS_NAME: PCWSTR = w!("HeartRiskPredictorForm");
// Matches the Win32 ERROR_CLASS_ALREADY_EXISTS (1410) code.
const CLASS_ALREADY_EXISTS_ERR: WIN32_ERROR = WIN32_ERROR(1410);

#[derive(Debug, thiserror::Error)]
pub enum FormWindowError {
    #[error("Failed to register form window class")]
    ClassRegistrationFailed,
    #[error("Failed to create form window")]
    WindowCreationFailed,
    #[error("Windows API error: {0}")]
    Win32Error(String),
}

/// Public entry point for showing the form
pub struct FormWindow;

impl FormWindow {
    /// Shows the form and pumps messages until the window is closed
    pub fn run(
        config: &WindowConfig,
        schema: Schema,
        adapter: InferenceAdapter<Box<dyn Classifier>>,
    ) -> Result<(), FormWindowError> {
        ensure_common_controls();

        let state = FormWindowState::new(config, schema, adapter);
        let state_ptr = Box::into_raw(Box::new(state));

        unsafe {
            if let Err(err) = create_form_window(state_ptr, config) {
                let _ = Box::from_raw(state_ptr);
                return Err(err);
            }
            ShowWindow((*state_ptr).hwnd, SW_SHOW);
            let _ = SetForegroundWindow((*state_ptr).hwnd);
        }

        tracing::info!("Form displayed");
        run_message_loop(state_ptr);

        let _ = unsafe { Box::from_raw(state_ptr) };
        tracing::info!("Form closed");
        Ok(())
    }
}

struct FormWindowState {
    hwnd: HWND,
    layout: FormLayout,
    /// Child control handle per layout row
    controls: Vec<HWND>,
    form: FormState,
    adapter: InferenceAdapter<Box<dyn Classifier>>,
    font: HFONT,
}

impl FormWindowState {
    fn new(
        config: &WindowConfig,
        schema: Schema,
        adapter: InferenceAdapter<Box<dyn Classifier>>,
    ) -> Self {
        let font = unsafe { HFONT(GetStockObject(DEFAULT_GUI_FONT).0) };
        Self {
            hwnd: HWND(0),
            layout: FormLayout::for_schema(schema, config.width),
            controls: Vec::new(),
            form: FormState::new(schema),
            adapter,
            font,
        }
    }
}

fn ensure_common_controls() {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_STANDARD_CLASSES,
    };
    unsafe {
        InitCommonControlsEx(&icc);
    }
}

fn create_form_window(
    state_ptr: *mut FormWindowState,
    config: &WindowConfig,
) -> Result<(), FormWindowError> {
    unsafe {
        let module = GetModuleHandleW(PCWSTR::null())
            .map_err(|e| FormWindowError::Win32Error(format!("{:?}", e)))?;
        let instance: HINSTANCE = module.into();

        register_form_class(instance)?;

        let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;
        let ex_style = WINDOW_EX_STYLE(WS_EX_CONTROLPARENT.0);
        let client_height = config.height.max((*state_ptr).layout.required_height());
        let (width, height) = outer_size(config.width, client_height, style, ex_style)?;

        let title = to_wstring(&config.title);
        let hwnd = CreateWindowExW(
            ex_style,
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            width,
            height,
            None,
            None,
            instance,
            Some(state_ptr as *const _ as *mut _),
        );

        if hwnd.0 == 0 {
            return Err(FormWindowError::WindowCreationFailed);
        }

        (*state_ptr).hwnd = hwnd;
        Ok(())
    }
}

/// Window size that yields the requested client area
fn outer_size(
    client_width: i32,
    client_height: i32,
    style: WINDOW_STYLE,
    ex_style: WINDOW_EX_STYLE,
) -> Result<(i32, i32), FormWindowError> {
    let mut rect = RECT {
        left: 0,
        top: 0,
        right: client_width,
        bottom: client_height,
    };
    unsafe {
        AdjustWindowRectEx(&mut rect, style, FALSE, ex_style)
            .map_err(|e| FormWindowError::Win32Error(format!("{:?}", e)))?;
    }
    Ok((rect.right - rect.left, rect.bottom - rect.top))
}

fn register_form_class(instance: HINSTANCE) -> Result<(), FormWindowError> {
    unsafe {
        let wnd_class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(form_wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH((COLOR_BTNFACE.0 + 1) as isize),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };

        if RegisterClassW(&wnd_class) == 0 {
            match GetLastError() {
                Err(err) if err.code() == CLASS_ALREADY_EXISTS_ERR.to_hresult() => {}
                _ => return Err(FormWindowError::ClassRegistrationFailed),
            }
        }
    }

    Ok(())
}

unsafe extern "system" fn form_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let createstruct = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, createstruct.lpCreateParams as isize);
            if let Some(state) = form_state_mut(hwnd) {
                state.hwnd = hwnd;
                state.build_controls();
            }
            LRESULT(0)
        }
        WM_COMMAND => {
            if let Some(state) = form_state_mut(hwnd) {
                state.handle_command(wparam, lparam);
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            if let Some(state) = form_state_mut(hwnd) {
                state.hwnd = HWND(0);
            }
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn run_message_loop(state_ptr: *mut FormWindowState) {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let hwnd = (*state_ptr).hwnd;
            if hwnd.0 != 0 && IsDialogMessageW(hwnd, &msg).as_bool() {
                continue;
            }
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe fn form_state_mut(hwnd: HWND) -> Option<&'static mut FormWindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut FormWindowState;
    if ptr.is_null() {
        None
    } else {
        Some(&mut *ptr)
    }
}

impl FormWindowState {
    fn build_controls(&mut self) {
        let mut controls = Vec::with_capacity(self.layout.rows().len());
        for row in self.layout.rows() {
            let label = &row.label_rect;
            create_static(self.hwnd, self.font, &row.label, label.x, label.y, label.w, label.h);

            let rect = &row.control_rect;
            let control = match row.control {
                ControlKind::Edit => create_edit(
                    self.hwnd,
                    self.font,
                    row.control_id,
                    rect.x,
                    rect.y,
                    rect.w,
                    row.creation_height(),
                ),
                ControlKind::ComboBox { options } => create_combo(
                    self.hwnd,
                    self.font,
                    row.control_id,
                    options,
                    rect.x,
                    rect.y,
                    rect.w,
                    row.creation_height(),
                ),
            };
            controls.push(control);
        }
        self.controls = controls;

        let button = self.layout.button_rect();
        unsafe {
            let style_bits =
                WS_CHILD.0 | WS_VISIBLE.0 | WS_TABSTOP.0 | (BS_DEFPUSHBUTTON as u32);
            let predict = CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("BUTTON"),
                w!("Predict"),
                WINDOW_STYLE(style_bits),
                button.x,
                button.y,
                button.w,
                button.h,
                self.hwnd,
                HMENU(ID_BTN_PREDICT as isize),
                None,
                None,
            );
            apply_font(predict, self.font);
        }

        tracing::debug!(rows = self.controls.len(), "Form controls created");
    }

    fn handle_command(&mut self, wparam: WPARAM, lparam: LPARAM) {
        let command_id = (wparam.0 & 0xFFFF) as i32;
        let notify_code = ((wparam.0 >> 16) & 0xFFFF) as u16;

        if command_id == ID_BTN_PREDICT && notify_code == BN_CLICKED as u16 {
            self.handle_predict();
            return;
        }

        if notify_code == EN_CHANGE as u16 || notify_code == CBN_SELCHANGE as u16 {
            // lparam carries the notifying control
            self.sync_field(command_id, HWND(lparam.0));
        }
    }

    /// Copies one control's text into the form state as the user edits it
    fn sync_field(&mut self, control_id: i32, control: HWND) {
        let Some(row) = self.layout.row_for_control(control_id) else {
            return;
        };
        if let Err(err) = self.form.set(row.descriptor.name, &control_text(control)) {
            tracing::warn!("Ignoring control update: {err}");
        }
    }

    /// Copies every control's text into the form state
    fn sync_form(&mut self) -> Result<(), FormError> {
        for (row, control) in self.layout.rows().iter().zip(&self.controls) {
            self.form.set(row.descriptor.name, &control_text(*control))?;
        }
        Ok(())
    }

    fn handle_predict(&mut self) {
        if let Err(err) = self.sync_form() {
            tracing::error!("Form controls out of sync with schema: {err}");
            show_message(self.hwnd, INVALID_INPUT_TITLE, &err.to_string(), DialogSeverity::Error);
            return;
        }

        match self.adapter.predict(&self.form) {
            Ok(prediction) => {
                show_message(self.hwnd, RESULT_TITLE, prediction.message, prediction.severity());
            }
            Err(err) => {
                show_message(self.hwnd, INVALID_INPUT_TITLE, &err.to_string(), DialogSeverity::Error);
            }
        }
    }
}

fn apply_font(hwnd: HWND, font: HFONT) {
    unsafe {
        SendMessageW(hwnd, WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
    }
}

fn create_static(parent: HWND, font: HFONT, text: &str, x: i32, y: i32, width: i32, height: i32) -> HWND {
    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("STATIC"),
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE,
            x,
            y,
            width,
            height,
            parent,
            None,
            None,
            None,
        );
        apply_font(hwnd, font);
        set_control_text(hwnd, text);
        hwnd
    }
}

fn create_edit(
    parent: HWND,
    font: HFONT,
    id: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> HWND {
    unsafe {
        let style_bits = WS_CHILD.0
            | WS_VISIBLE.0
            | WS_BORDER.0
            | WS_TABSTOP.0
            | (ES_AUTOHSCROLL as u32);
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("EDIT"),
            PCWSTR::null(),
            WINDOW_STYLE(style_bits),
            x,
            y,
            width,
            height,
            parent,
            HMENU(id as isize),
            None,
            None,
        );
        apply_font(hwnd, font);
        hwnd
    }
}

#[allow(clippy::too_many_arguments)]
fn create_combo(
    parent: HWND,
    font: HFONT,
    id: i32,
    options: &[&str],
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> HWND {
    unsafe {
        let style_bits = WS_CHILD.0
            | WS_VISIBLE.0
            | WS_TABSTOP.0
            | WS_VSCROLL.0
            | (CBS_DROPDOWNLIST as u32);
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("COMBOBOX"),
            PCWSTR::null(),
            WINDOW_STYLE(style_bits),
            x,
            y,
            width,
            height,
            parent,
            HMENU(id as isize),
            None,
            None,
        );
        apply_font(hwnd, font);

        for option in options {
            let text = to_wstring(option);
            SendMessageW(hwnd, CB_ADDSTRING, WPARAM(0), LPARAM(text.as_ptr() as isize));
        }
        SendMessageW(hwnd, CB_SETCURSEL, WPARAM(0), LPARAM(0));
        hwnd
    }
}
