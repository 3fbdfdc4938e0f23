use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::{LOAD_LABEL, SAVE_LABEL};

pub fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let button_style = if model.modal_active() {
        Style::default().fg(Color::Indexed(245))
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(LOAD_LABEL, button_style),
        Span::raw(" "),
        Span::styled(SAVE_LABEL, button_style),
        Span::styled(
            "   Ctrl-O load  Ctrl-S save  F1 help",
            Style::default().fg(Color::Indexed(245)),
        ),
    ]);
    let toolbar = Paragraph::new(line).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(toolbar, area);
}

pub fn render_footer(model: &Model, frame: &mut Frame, area: Rect) {
    let path = model
        .footer_path
        .as_ref()
        .map_or_else(|| "untitled".to_string(), |p| p.display().to_string());
    let (line, col) = model.editor.cursor();
    let status = format!(" {path}  Ln {}, Col {}", line + 1, col + 1);
    let footer =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}
