use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::app::dialog::{ConfirmDialog, FilePicker, PickerMode};
use crate::controller::DOCUMENT_FILTER;

use super::{
    alert_popup_rect, button_label, confirm_button_rects, confirm_popup_rect, inner_rect,
    picker_list_rect, picker_popup_rect,
};

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White))
}

pub fn render_picker_overlay(picker: &FilePicker, frame: &mut Frame, area: Rect) {
    let popup = picker_popup_rect(area);
    frame.render_widget(Clear, popup);
    frame.render_widget(popup_block(picker.mode.title()), popup);

    let inner = inner_rect(popup);
    let dim_style = Style::default().fg(Color::Indexed(245));
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);

    let dir_line = Line::styled(
        format!(" {}", picker.dir().display()),
        Style::default().fg(Color::Cyan),
    );
    frame.render_widget(Paragraph::new(dir_line), row(0));

    let prompt = match picker.mode {
        PickerMode::Open => " Path: ",
        PickerMode::Save => " Name: ",
    };
    let input_line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Yellow)),
        Span::raw(picker.input().to_string()),
        Span::styled(" ", Style::default().bg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(input_line), row(1));

    let filter_line = if let Some(err) = picker.error() {
        Line::styled(format!(" {err}"), Style::default().fg(Color::Red))
    } else if picker.show_all() {
        Line::styled(" All files (*)", dim_style)
    } else {
        Line::styled(format!(" {}", picker.filter().label()), dim_style)
    };
    frame.render_widget(Paragraph::new(filter_line), row(2));

    let list = picker_list_rect(area);
    let rows = usize::from(list.height);
    let lines: Vec<Line> = picker
        .entries()
        .iter()
        .enumerate()
        .skip(picker.scroll_offset())
        .take(rows)
        .map(|(idx, entry)| {
            let name = if entry.is_dir && entry.name != ".." {
                format!("  {}/", entry.name)
            } else {
                format!("  {}", entry.name)
            };
            let style = if picker.selected() == Some(idx) {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else if entry.is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::styled(name, style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list);

    let hint = Line::styled(
        " Enter open \u{2502} Bksp parent \u{2502} Ctrl-A all files \u{2502} Esc cancel",
        dim_style,
    );
    frame.render_widget(
        Paragraph::new(hint),
        row(inner.height.saturating_sub(1)),
    );
}

pub fn render_confirm_overlay(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    let prompt = dialog.prompt();
    let popup = confirm_popup_rect(area, prompt);
    frame.render_widget(Clear, popup);
    frame.render_widget(popup_block(prompt.title), popup);

    let inner = inner_rect(popup);
    let detail = Paragraph::new(prompt.detail).alignment(Alignment::Center);
    frame.render_widget(detail, Rect::new(inner.x, inner.y + 1, inner.width, 1));

    for (idx, (label, rect)) in prompt
        .buttons
        .iter()
        .zip(confirm_button_rects(popup, prompt))
        .enumerate()
    {
        let style = if dialog.focused() == idx {
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(Span::styled(button_label(label), style)), rect);
    }
}

pub fn render_alert_overlay(message: &str, frame: &mut Frame, area: Rect) {
    let popup = alert_popup_rect(area, message);
    let block = popup_block("Alert").style(Style::default().bg(Color::Red).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let inner = inner_rect(popup);
    let text_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(2),
    );
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: false }),
        text_area,
    );
    let hint = Line::styled("any key closes", Style::default().fg(Color::Indexed(252)));
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1),
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = super::centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    // File
    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  Ctrl-O / [ Load ]   Open a file"));
    all_lines.push(Line::raw("  Ctrl-S / [ Save ]   Save (asks before overwriting)"));
    all_lines.push(Line::raw("  Drag file onto window  Load it without asking"));
    all_lines.push(Line::raw(format!("  Filter: {}", DOCUMENT_FILTER.label())));
    all_lines.push(Line::raw(""));

    // Editor
    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  PageUp/PageDown     Page"));
    all_lines.push(Line::raw(format!(
        "  Tab                 Indent ({} columns)",
        model.editor.tab_width()
    )));
    all_lines.push(Line::raw("  Mouse click/wheel   Place cursor / scroll"));
    all_lines.push(Line::raw(""));

    // Dialogs
    all_lines.push(Line::styled("Dialogs", section_style));
    all_lines.push(Line::raw("  Up/Down, Enter      Pick entry / enter directory"));
    all_lines.push(Line::raw("  Backspace           Parent directory (empty input)"));
    all_lines.push(Line::raw("  Ctrl-A              Show all files"));
    all_lines.push(Line::raw("  Tab, Left/Right     Move between buttons"));
    all_lines.push(Line::raw("  Esc                 Cancel"));
    all_lines.push(Line::raw(""));

    // Other
    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-Q / Ctrl-C     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    // Config
    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = popup_block("Help").padding(Padding::uniform(1));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    all_lines.truncate(usize::from(content_height));
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(all_lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}
