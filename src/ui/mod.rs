//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: The toolbar, editor and footer
//! - geometry shared by rendering and mouse hit-testing

mod overlays;
mod render;
mod status;

pub use render::{line_number_width, render};

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::controller::ConfirmPrompt;

pub const LOAD_LABEL: &str = "[ Load ]";
pub const SAVE_LABEL: &str = "[ Save ]";

/// The three horizontal bands of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub toolbar: Rect,
    pub editor: Rect,
    pub footer: Rect,
}

pub fn shell_layout(area: Rect) -> ShellLayout {
    let toolbar_height = area.height.min(1);
    let footer_height = area.height.saturating_sub(toolbar_height).min(1);
    let editor_height = area
        .height
        .saturating_sub(toolbar_height + footer_height);
    ShellLayout {
        toolbar: Rect::new(area.x, area.y, area.width, toolbar_height),
        editor: Rect::new(area.x, area.y + toolbar_height, area.width, editor_height),
        footer: Rect::new(
            area.x,
            area.y + toolbar_height + editor_height,
            area.width,
            footer_height,
        ),
    }
}

/// Hit areas of the Load and Save buttons.
pub fn toolbar_buttons(toolbar: Rect) -> (Rect, Rect) {
    #[allow(clippy::cast_possible_truncation)]
    let load_width = LOAD_LABEL.width() as u16;
    #[allow(clippy::cast_possible_truncation)]
    let save_width = SAVE_LABEL.width() as u16;
    let load = clip(Rect::new(toolbar.x + 1, toolbar.y, load_width, toolbar.height), toolbar);
    let save = clip(
        Rect::new(toolbar.x + 2 + load_width, toolbar.y, save_width, toolbar.height),
        toolbar,
    );
    (load, save)
}

/// Where document text lands inside the editor band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorGeometry {
    /// Line number column, including its trailing space
    pub gutter: Rect,
    /// Text columns
    pub text: Rect,
    /// Display columns scrolled off to the left
    pub h_offset: usize,
}

pub fn editor_geometry(model: &Model, editor: Rect) -> EditorGeometry {
    let gutter_width = (line_number_width(model.editor.line_count()) + 1).min(editor.width);
    let gutter = Rect::new(editor.x, editor.y, gutter_width, editor.height);
    let text = Rect::new(
        editor.x + gutter_width,
        editor.y,
        editor.width - gutter_width,
        editor.height,
    );
    let text_width = usize::from(text.width).max(1);
    let h_offset = model
        .editor
        .cursor_display_column()
        .saturating_sub(text_width - 1);
    EditorGeometry {
        gutter,
        text,
        h_offset,
    }
}

pub fn picker_popup_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).max(40);
    let height = area.height.saturating_sub(4).max(10);
    centered_popup_rect(width, height, area)
}

/// Rows of the picker popup that list directory entries.
///
/// Inside the border: directory line, input line, filter line, the list,
/// and a hint line.
pub fn picker_list_rect(area: Rect) -> Rect {
    let inner = inner_rect(picker_popup_rect(area));
    Rect::new(
        inner.x,
        inner.y + 3,
        inner.width,
        inner.height.saturating_sub(4),
    )
}

pub fn confirm_popup_rect(area: Rect, prompt: &ConfirmPrompt) -> Rect {
    #[allow(clippy::cast_possible_truncation)]
    let text_width = prompt.detail.width().max(prompt.title.width()) as u16;
    let width = text_width.saturating_add(6).max(36);
    centered_popup_rect(width, 7, area)
}

/// Hit areas of the confirm buttons, in button order.
pub fn confirm_button_rects(popup: Rect, prompt: &ConfirmPrompt) -> Vec<Rect> {
    let inner = inner_rect(popup);
    let row = inner.y + inner.height.saturating_sub(2);
    let labels: Vec<String> = prompt.buttons.iter().map(|b| button_label(b)).collect();
    #[allow(clippy::cast_possible_truncation)]
    let total = labels.iter().map(|l| l.width() as u16 + 2).sum::<u16>().saturating_sub(2);
    let mut x = inner.x + inner.width.saturating_sub(total) / 2;
    labels
        .iter()
        .map(|label| {
            #[allow(clippy::cast_possible_truncation)]
            let width = label.width() as u16;
            let rect = clip(Rect::new(x, row, width, 1), inner);
            x = x.saturating_add(width + 2);
            rect
        })
        .collect()
}

pub fn button_label(text: &str) -> String {
    format!("[ {text} ]")
}

pub fn alert_popup_rect(area: Rect, message: &str) -> Rect {
    let max_width = area.width.saturating_sub(4).max(30);
    #[allow(clippy::cast_possible_truncation)]
    let wanted = (message.width() as u16).saturating_add(6).max(30);
    let width = wanted.min(max_width);
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    #[allow(clippy::cast_possible_truncation)]
    let text_rows = message.width().div_ceil(text_width).max(1) as u16;
    centered_popup_rect(width, text_rows + 4, area)
}

pub fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}

fn inner_rect(popup: Rect) -> Rect {
    Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    )
}

fn clip(rect: Rect, bounds: Rect) -> Rect {
    rect.intersection(bounds)
}
