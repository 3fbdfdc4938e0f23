//! Capabilities the controller needs from whatever is hosting it.
//!
//! Every request here is fire-and-forget: the host answers later by
//! handing a [`Completion`](super::Completion) back to
//! [`Controller::resume`](super::Controller::resume).

use std::path::Path;

use super::{ConfirmPrompt, FileFilter};

/// Where the cursor lands after the widget content is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPlacement {
    #[default]
    Start,
    #[cfg(test)]
    End,
}

/// Modal dialogs.
pub trait Dialogs {
    /// Ask for one existing file. Answered with `Completion::OpenDialog`.
    fn show_open_dialog(&mut self, filter: &FileFilter);
    /// Ask for a destination path. Answered with `Completion::SaveDialog`.
    fn show_save_dialog(&mut self, filter: &FileFilter);
    /// Ask the user to pick a button. Answered with `Completion::Confirm`.
    fn show_confirm(&mut self, prompt: &ConfirmPrompt);
    /// Show a message the user must dismiss. Not answered.
    fn alert(&mut self, message: &str);
}

/// Whole-file filesystem access.
pub trait FileIo {
    /// Answered with `Completion::Read`.
    fn read_file(&mut self, path: &Path);
    /// Answered with `Completion::Write`.
    fn write_file(&mut self, path: &Path, contents: String);
}

/// The text component holding the document.
pub trait TextWidget {
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str, cursor: CursorPlacement);
}

/// The footer label that names the loaded file.
pub trait StatusLine {
    fn show_path(&mut self, path: &Path);
}

/// Everything the controller talks to.
pub trait Host: Dialogs + FileIo + TextWidget + StatusLine {}

impl<T: Dialogs + FileIo + TextWidget + StatusLine + ?Sized> Host for T {}
