//! Platform-independent form layout
//!
//! Decides which control represents each feature and where it goes. The
//! Win32 window only turns these rows into child windows.

use crate::domain::{FeatureDescriptor, InputKind, Schema};

pub const ID_BTN_PREDICT: i32 = 1001;
pub const ID_FIELD_BASE: i32 = 2000;

const MARGIN_X: i32 = 10;
const MARGIN_Y: i32 = 10;
const PAD_Y: i32 = 5;
const ROW_HEIGHT: i32 = 24;
const LABEL_WIDTH: i32 = 120;
const CONTROL_WIDTH: i32 = 180;
// Combo boxes are created with room for their drop-down list
const COMBO_LIST_HEIGHT: i32 = 120;
const BUTTON_WIDTH: i32 = 100;
const BUTTON_HEIGHT: i32 = 30;
const BUTTON_GAP: i32 = 20;

/// Rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Input control backing one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Free-text edit box
    Edit,
    /// Read-only drop-down, first option preselected
    ComboBox { options: &'static [&'static str] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub descriptor: &'static FeatureDescriptor,
    pub label: String,
    pub control: ControlKind,
    pub control_id: i32,
    pub label_rect: Rect,
    pub control_rect: Rect,
}

impl FormRow {
    /// Height passed to the control when it is created
    pub fn creation_height(&self) -> i32 {
        match self.control {
            ControlKind::Edit => self.control_rect.h,
            ControlKind::ComboBox { .. } => self.control_rect.h + COMBO_LIST_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    rows: Vec<FormRow>,
    button_rect: Rect,
}

impl FormLayout {
    /// One labeled row per descriptor, followed by the centered Predict button
    pub fn for_schema(schema: Schema, client_width: i32) -> Self {
        let row_pitch = ROW_HEIGHT + 2 * PAD_Y;
        let control_x = MARGIN_X + LABEL_WIDTH + 2 * MARGIN_X;

        let rows: Vec<FormRow> = schema
            .descriptors()
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let y = MARGIN_Y + index as i32 * row_pitch + PAD_Y;
                FormRow {
                    descriptor,
                    label: descriptor.label(),
                    control: control_for(descriptor),
                    control_id: ID_FIELD_BASE + index as i32,
                    label_rect: Rect::new(MARGIN_X, y, LABEL_WIDTH, ROW_HEIGHT),
                    control_rect: Rect::new(control_x, y, CONTROL_WIDTH, ROW_HEIGHT),
                }
            })
            .collect();

        let last_bottom = rows
            .last()
            .map(|row| row.control_rect.bottom())
            .unwrap_or(MARGIN_Y);
        let button_rect = Rect::new(
            ((client_width - BUTTON_WIDTH) / 2).max(MARGIN_X),
            last_bottom + BUTTON_GAP,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );

        Self { rows, button_rect }
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn button_rect(&self) -> Rect {
        self.button_rect
    }

    pub fn row_for_control(&self, control_id: i32) -> Option<&FormRow> {
        self.rows.iter().find(|row| row.control_id == control_id)
    }

    /// Client height needed to show every row and the button
    pub fn required_height(&self) -> i32 {
        self.button_rect.bottom() + BUTTON_GAP
    }
}

fn control_for(descriptor: &FeatureDescriptor) -> ControlKind {
    match descriptor.kind {
        InputKind::Numeric => ControlKind::Edit,
        InputKind::Choice(options) => ControlKind::ComboBox { options },
    }
}
