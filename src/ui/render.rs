use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::app::dialog::Modal;
use crate::editor::expand_tabs;

use super::{editor_geometry, overlays, shell_layout, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = shell_layout(area);

    status::render_toolbar(model, frame, layout.toolbar);
    render_editor(model, frame, layout.editor);
    status::render_footer(model, frame, layout.footer);

    match &model.modal {
        Some(Modal::Picker(picker)) => overlays::render_picker_overlay(picker, frame, area),
        Some(Modal::Confirm(dialog)) => overlays::render_confirm_overlay(dialog, frame, area),
        None if model.help_visible => overlays::render_help_overlay(model, frame, area),
        None => {}
    }
    if let Some(message) = model.active_alert() {
        overlays::render_alert_overlay(message, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let geometry = editor_geometry(model, area);
    let tab_width = model.editor.tab_width();
    let total_lines = model.editor.line_count();
    let gutter_width = usize::from(geometry.gutter.width.saturating_sub(1));

    let visible_height = usize::from(area.height);
    let start = model.editor.scroll_top();
    let end = (start + visible_height).min(total_lines);
    let (cursor_line, _) = model.editor.cursor();
    let cursor_col = model.editor.cursor_display_column();
    let text_width = usize::from(geometry.text.width);
    let show_cursor = !model.modal_active() && model.active_alert().is_none();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = expand_tabs(&model.editor.line(line_idx).unwrap_or_default(), tab_width);
        let line_num = format!("{:>gutter_width$} ", line_idx + 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        let visible = slice_columns(&line_text, geometry.h_offset, text_width);
        if show_cursor && line_idx == cursor_line {
            // Split line at cursor position for cursor rendering
            let col = cursor_col - geometry.h_offset;
            let (before, rest) = split_at_column(&visible, col);
            let mut rest_chars = rest.chars();
            let cursor_char = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
            let after: String = rest_chars.collect();

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(visible));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// The part of `text` between display columns `start` and `start + width`.
///
/// A wide character cut by either edge is dropped.
fn slice_columns(text: &str, start: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if col >= start && col + w <= start + width {
            out.push(ch);
        }
        col += w;
        if col >= start + width {
            break;
        }
    }
    out
}

fn split_at_column(text: &str, column: usize) -> (&str, &str) {
    let mut col = 0;
    for (idx, ch) in text.char_indices() {
        if col >= column {
            return text.split_at(idx);
        }
        col += ch.width().unwrap_or(0);
    }
    (text, "")
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
