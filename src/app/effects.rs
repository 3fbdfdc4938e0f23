use std::path::Path;

use crate::app::dialog::{ConfirmDialog, FilePicker, Modal, PickerMode};
use crate::app::{App, Message, Model};
use crate::controller::{
    ConfirmPrompt, Controller, CursorPlacement, Dialogs, FileFilter, FileIo, StatusLine,
    TextWidget,
};
use crate::worker::FileWorker;

/// The terminal shell as seen by the [`Controller`].
///
/// Dialogs become overlays on the model, file operations go to the worker,
/// and the editor and footer are the model's own.
pub(super) struct ShellHost<'a> {
    model: &'a mut Model,
    worker: &'a mut FileWorker,
}

impl<'a> ShellHost<'a> {
    pub(super) const fn new(model: &'a mut Model, worker: &'a mut FileWorker) -> Self {
        Self { model, worker }
    }

    fn open_picker(&mut self, mode: PickerMode, filter: &FileFilter) {
        let dir = self.model.dialog_start_dir();
        tracing::debug!(?mode, dir = %dir.display(), "opening file picker");
        self.model
            .open_modal(Modal::Picker(FilePicker::new(mode, dir, *filter)));
        let rows = self.model.picker_rows();
        if let Some(Modal::Picker(picker)) = &mut self.model.modal {
            picker.ensure_selected_visible(rows);
        }
    }
}

impl Dialogs for ShellHost<'_> {
    fn show_open_dialog(&mut self, filter: &FileFilter) {
        self.open_picker(PickerMode::Open, filter);
    }

    fn show_save_dialog(&mut self, filter: &FileFilter) {
        self.open_picker(PickerMode::Save, filter);
    }

    fn show_confirm(&mut self, prompt: &ConfirmPrompt) {
        self.model
            .open_modal(Modal::Confirm(ConfirmDialog::new(*prompt)));
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.model.alert(message);
    }
}

impl FileIo for ShellHost<'_> {
    fn read_file(&mut self, path: &Path) {
        self.worker.read(path);
    }

    fn write_file(&mut self, path: &Path, contents: String) {
        self.worker.write(path, contents);
    }
}

impl TextWidget for ShellHost<'_> {
    fn value(&self) -> String {
        self.model.editor.value()
    }

    fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
        self.model.editor.set_value(text, cursor);
        self.model.ensure_cursor_visible();
    }
}

impl StatusLine for ShellHost<'_> {
    fn show_path(&mut self, path: &Path) {
        self.model.footer_path = Some(path.to_path_buf());
    }
}

impl App {
    /// Run the controller for messages that touch files.
    ///
    /// Called after [`update`](crate::app::update) with the same message.
    /// Any dialog answer left on the model by that update is handed to the
    /// controller here, so the answer is processed before the next event.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        controller: &mut Controller,
        worker: &mut FileWorker,
        msg: &Message,
    ) {
        let mut host = ShellHost::new(model, worker);
        match msg {
            Message::Load => controller.load(&mut host),
            Message::Save => controller.save(&mut host),
            Message::Drop(paths) => controller.drop_files(&mut host, paths),
            Message::Completed(completion) => controller.resume(&mut host, completion.clone()),
            _ => {}
        }
        if let Some(outcome) = host.model.take_dialog_outcome() {
            tracing::debug!(?outcome, "dialog closed");
            controller.resume(&mut host, outcome);
        }
    }
}
