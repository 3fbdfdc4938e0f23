use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::dialog::Modal;
use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::ui::{self, point_in_rect};

impl App {
    /// Translate a terminal event into a message for the current model.
    pub fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        if model.active_alert().is_some() {
            return None;
        }
        let dropped = crate::dnd::parse_drop_payload(text);
        match &model.modal {
            Some(Modal::Picker(_)) => {
                let typed = dropped.first().map_or_else(
                    || text.trim_end_matches(['\r', '\n']).to_string(),
                    |path| path.display().to_string(),
                );
                Some(Message::PickerPaste(typed))
            }
            Some(Modal::Confirm(_)) => None,
            None if !dropped.is_empty() => Some(Message::Drop(dropped)),
            None => Some(Message::EditorInsertText(text.to_string())),
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if model.active_alert().is_some() {
            return Some(Message::DismissAlert);
        }

        match &model.modal {
            Some(Modal::Confirm(_)) => {
                return match key.code {
                    KeyCode::Left | KeyCode::BackTab => Some(Message::ConfirmFocusPrev),
                    KeyCode::Right | KeyCode::Tab => Some(Message::ConfirmFocusNext),
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Message::ConfirmSubmit),
                    KeyCode::Char('o' | 'y') if !ctrl => {
                        Some(Message::ConfirmRespond(crate::controller::CONFIRM_RESPONSE))
                    }
                    KeyCode::Esc | KeyCode::Char('n' | 'c') => Some(Message::ConfirmDismiss),
                    _ => None,
                };
            }
            Some(Modal::Picker(_)) => {
                return match key.code {
                    KeyCode::Up => Some(Message::PickerUp),
                    KeyCode::Down => Some(Message::PickerDown),
                    KeyCode::Enter => Some(Message::PickerSubmit),
                    KeyCode::Esc => Some(Message::PickerCancel),
                    KeyCode::Backspace => Some(Message::PickerBackspace),
                    KeyCode::Char('a') if ctrl => Some(Message::PickerToggleAll),
                    KeyCode::Char(c) if !ctrl && !alt => Some(Message::PickerInput(c)),
                    _ => None,
                };
            }
            None => {}
        }

        if model.help_visible {
            return Some(match key.code {
                KeyCode::Char('q' | 'c') if ctrl => Message::Quit,
                _ => Message::HideHelp,
            });
        }

        match key.code {
            // File
            KeyCode::Char('o') if ctrl => Some(Message::Load),
            KeyCode::Char('s') if ctrl => Some(Message::Save),

            // Quit
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),

            KeyCode::F(1) => Some(Message::ToggleHelp),

            // Editor
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::EditorInsertChar(c)),
            KeyCode::Enter => Some(Message::EditorNewline),
            KeyCode::Tab => Some(Message::EditorTab),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
            KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorPageUp),
            KeyCode::PageDown => Some(Message::EditorPageDown),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let area = model.area();
        let left_down = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

        if model.active_alert().is_some() {
            return left_down.then_some(Message::DismissAlert);
        }

        match &model.modal {
            Some(Modal::Confirm(dialog)) => {
                if !left_down {
                    return None;
                }
                let popup = ui::confirm_popup_rect(area, dialog.prompt());
                return ui::confirm_button_rects(popup, dialog.prompt())
                    .iter()
                    .position(|rect| point_in_rect(mouse.column, mouse.row, *rect))
                    .map(Message::ConfirmRespond);
            }
            Some(Modal::Picker(picker)) => {
                return match mouse.kind {
                    MouseEventKind::ScrollUp => Some(Message::PickerUp),
                    MouseEventKind::ScrollDown => Some(Message::PickerDown),
                    MouseEventKind::Down(MouseButton::Left) => {
                        let list = ui::picker_list_rect(area);
                        if !point_in_rect(mouse.column, mouse.row, list) {
                            return None;
                        }
                        let idx = picker.scroll_offset() + usize::from(mouse.row - list.y);
                        (idx < picker.entries().len()).then_some(Message::PickerClick(idx))
                    }
                    _ => None,
                };
            }
            None => {}
        }

        if model.help_visible {
            return left_down.then_some(Message::HideHelp);
        }

        let layout = ui::shell_layout(area);
        if left_down && point_in_rect(mouse.column, mouse.row, layout.toolbar) {
            let (load, save) = ui::toolbar_buttons(layout.toolbar);
            if point_in_rect(mouse.column, mouse.row, load) {
                return Some(Message::Load);
            }
            if point_in_rect(mouse.column, mouse.row, save) {
                return Some(Message::Save);
            }
            return None;
        }

        if !point_in_rect(mouse.column, mouse.row, layout.editor) {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::EditorScrollUp(3)),
            MouseEventKind::ScrollDown => Some(Message::EditorScrollDown(3)),
            MouseEventKind::Down(MouseButton::Left) => {
                let geometry = ui::editor_geometry(model, layout.editor);
                let line = model.editor.scroll_top() + usize::from(mouse.row - layout.editor.y);
                let column = usize::from(mouse.column.saturating_sub(geometry.text.x))
                    + geometry.h_offset;
                Some(Message::EditorClick(line, column))
            }
            _ => None,
        }
    }
}
