use std::collections::VecDeque;
use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::controller::Completion;
use crate::editor::TextArea;

use super::dialog::{FilePicker, Modal};

/// The complete application state.
///
/// All UI state lives here. The bound file path does not: that belongs to
/// the [`Controller`](crate::controller::Controller).
pub struct Model {
    /// The document widget
    pub editor: TextArea,
    /// Footer label: the last file loaded successfully
    pub footer_path: Option<PathBuf>,
    /// Open dialog, if any
    pub modal: Option<Modal>,
    /// Alerts waiting to be dismissed, oldest first
    alerts: VecDeque<String>,
    /// Answer from a dialog that closed during the last update
    dialog_outcome: Option<Completion>,
    /// Directory the last picker was showing
    pub last_dialog_dir: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("footer_path", &self.footer_path)
            .field("modal", &self.modal.is_some())
            .field("alerts", &self.alerts.len())
            .field("terminal_size", &self.terminal_size)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self {
            editor: TextArea::new(),
            footer_path: None,
            modal: None,
            alerts: VecDeque::new(),
            dialog_outcome: None,
            last_dialog_dir: None,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            terminal_size,
            should_quit: false,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.editor = TextArea::new().with_tab_width(tab_width);
        self
    }

    /// The whole terminal as a rect.
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    /// Rows available for document text.
    pub fn editor_height(&self) -> usize {
        usize::from(crate::ui::shell_layout(self.area()).editor.height)
    }

    /// Rows available for picker entries.
    pub(super) fn picker_rows(&self) -> usize {
        usize::from(crate::ui::picker_list_rect(self.area()).height)
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        let height = self.editor_height();
        self.editor.ensure_cursor_visible(height);
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push_back(message.into());
    }

    /// The alert currently on screen.
    pub fn active_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub(super) fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub const fn modal_active(&self) -> bool {
        self.modal.is_some()
    }

    pub fn picker(&self) -> Option<&FilePicker> {
        match &self.modal {
            Some(Modal::Picker(picker)) => Some(picker),
            _ => None,
        }
    }

    /// Close the open dialog, leaving its answer for the side-effect pass.
    pub(super) fn resolve_modal(&mut self, outcome: Completion) {
        self.modal = None;
        self.dialog_outcome = Some(outcome);
    }

    pub(super) const fn take_dialog_outcome(&mut self) -> Option<Completion> {
        self.dialog_outcome.take()
    }

    /// Where a newly opened picker starts.
    pub(super) fn dialog_start_dir(&self) -> PathBuf {
        if let Some(dir) = &self.last_dialog_dir {
            return dir.clone();
        }
        if let Some(parent) = self
            .footer_path
            .as_deref()
            .and_then(std::path::Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
        {
            return parent.to_path_buf();
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}
