use std::path::PathBuf;

use crate::app::Model;
use crate::controller::Completion;
use crate::editor::Direction;

use super::dialog::{Modal, PickerStep};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert pasted text at the cursor
    EditorInsertText(String),
    /// Split line at cursor (Enter)
    EditorNewline,
    /// Indent to the next tab stop (Tab)
    EditorTab,
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    EditorPageUp,
    EditorPageDown,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),
    /// Place the cursor from a mouse click (line, display column)
    EditorClick(usize, usize),

    // File
    /// Load button
    Load,
    /// Save button
    Save,
    /// Files dropped on the window
    Drop(Vec<PathBuf>),
    /// A background read or write finished
    Completed(Completion),

    // File picker
    PickerUp,
    PickerDown,
    PickerInput(char),
    PickerPaste(String),
    PickerBackspace,
    /// Toggle between filtered and all files
    PickerToggleAll,
    PickerSubmit,
    PickerCancel,
    /// Click on a listed entry
    PickerClick(usize),

    // Confirm
    ConfirmFocusNext,
    ConfirmFocusPrev,
    /// Answer with the focused button
    ConfirmSubmit,
    /// Answer with a specific button
    ConfirmRespond(usize),
    /// Close without choosing
    ConfirmDismiss,

    /// Close the front alert
    DismissAlert,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// File operations are not started here; the controller runs them in the
/// side-effect pass that follows. A dialog that closes leaves its answer
/// on the model for that pass to pick up.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editor
        Message::EditorInsertChar(ch) => {
            model.editor.insert_char(ch);
            model.ensure_cursor_visible();
        }
        Message::EditorInsertText(text) => {
            model.editor.insert_text(&text);
            model.ensure_cursor_visible();
        }
        Message::EditorNewline => {
            model.editor.insert_newline();
            model.ensure_cursor_visible();
        }
        Message::EditorTab => {
            model.editor.insert_tab();
            model.ensure_cursor_visible();
        }
        Message::EditorDeleteBack => {
            model.editor.delete_back();
            model.ensure_cursor_visible();
        }
        Message::EditorDeleteForward => {
            model.editor.delete_forward();
        }
        Message::EditorMoveCursor(dir) => {
            model.editor.move_cursor(dir);
            model.ensure_cursor_visible();
        }
        Message::EditorMoveHome => model.editor.move_home(),
        Message::EditorMoveEnd => model.editor.move_end(),
        Message::EditorMoveToStart => {
            model.editor.move_to_start();
            model.ensure_cursor_visible();
        }
        Message::EditorMoveToEnd => {
            model.editor.move_to_end();
            model.ensure_cursor_visible();
        }
        Message::EditorPageUp => {
            let height = model.editor_height();
            model.editor.page_up(height);
            model.ensure_cursor_visible();
        }
        Message::EditorPageDown => {
            let height = model.editor_height();
            model.editor.page_down(height);
            model.ensure_cursor_visible();
        }
        Message::EditorScrollUp(n) => model.editor.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor.scroll_down(n),
        Message::EditorClick(line, column) => {
            model.editor.move_to_display_column(line, column);
        }

        // Handled by the controller in the side-effect pass
        Message::Load | Message::Save | Message::Drop(_) | Message::Completed(_) => {}

        // File picker
        Message::PickerUp | Message::PickerDown | Message::PickerClick(_) => {
            let rows = model.picker_rows();
            let mut submit = false;
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                match msg {
                    Message::PickerUp => picker.select_prev(),
                    Message::PickerDown => picker.select_next(),
                    Message::PickerClick(idx) => {
                        // A click on the highlighted entry opens it.
                        submit = picker.selected() == Some(idx);
                        picker.select(idx);
                    }
                    _ => {}
                }
                picker.ensure_selected_visible(rows);
            }
            if submit {
                return update(model, Message::PickerSubmit);
            }
        }
        Message::PickerInput(ch) => {
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                picker.push_char(ch);
            }
        }
        Message::PickerPaste(text) => {
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                picker.push_str(&text);
            }
        }
        Message::PickerBackspace => {
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                picker.backspace();
            }
        }
        Message::PickerToggleAll => {
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                picker.toggle_show_all();
            }
        }
        Message::PickerSubmit => {
            let chosen = match &mut model.modal {
                Some(Modal::Picker(picker)) => match picker.submit() {
                    PickerStep::Chosen(path) => Some((picker.mode, picker.dir().to_path_buf(), path)),
                    PickerStep::Pending => None,
                },
                _ => None,
            };
            if let Some((mode, dir, path)) = chosen {
                model.last_dialog_dir = Some(dir);
                model.resolve_modal(mode.completion(Some(path)));
            }
        }
        Message::PickerCancel => {
            let closing = match &model.modal {
                Some(Modal::Picker(picker)) => Some((picker.mode, picker.dir().to_path_buf())),
                _ => None,
            };
            if let Some((mode, dir)) = closing {
                model.last_dialog_dir = Some(dir);
                model.resolve_modal(mode.completion(None));
            }
        }

        // Confirm
        Message::ConfirmFocusNext => {
            if let Some(Modal::Confirm(dialog)) = &mut model.modal {
                dialog.focus_next();
            }
        }
        Message::ConfirmFocusPrev => {
            if let Some(Modal::Confirm(dialog)) = &mut model.modal {
                dialog.focus_prev();
            }
        }
        Message::ConfirmSubmit | Message::ConfirmRespond(_) | Message::ConfirmDismiss => {
            let response = match (&model.modal, &msg) {
                (Some(Modal::Confirm(dialog)), Message::ConfirmSubmit) => Some(dialog.focused()),
                (Some(Modal::Confirm(_)), Message::ConfirmRespond(idx)) => Some(*idx),
                (Some(Modal::Confirm(dialog)), _) => Some(dialog.prompt().dismiss_response()),
                _ => None,
            };
            if let Some(response) = response {
                model.resolve_modal(Completion::Confirm(response));
            }
        }

        Message::DismissAlert => model.dismiss_alert(),

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
            let rows = model.picker_rows();
            if let Some(Modal::Picker(picker)) = &mut model.modal {
                picker.ensure_selected_visible(rows);
            }
        }

        // Application
        Message::Quit => model.should_quit = true,
    }
    model
}
