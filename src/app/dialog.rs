//! Modal dialog state: the file picker used for open and save, and the
//! confirm box.

use std::path::{Path, PathBuf};

use crate::controller::{Completion, ConfirmPrompt, FileFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

impl PickerMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open File",
            Self::Save => "Save File",
        }
    }

    /// The answer this picker gives the controller when it closes.
    pub fn completion(self, choice: Option<PathBuf>) -> Completion {
        match self {
            Self::Open => Completion::OpenDialog(choice),
            Self::Save => Completion::SaveDialog(choice),
        }
    }
}

/// A row in the picker listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// Display name (filename or "..")
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    /// Still open (e.g. moved into a directory).
    Pending,
    Chosen(PathBuf),
}

/// Directory-listing file chooser.
///
/// The extension filter only decides what is listed; a typed path is
/// accepted whatever its extension.
#[derive(Debug, Clone)]
pub struct FilePicker {
    pub mode: PickerMode,
    filter: FileFilter,
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: Option<usize>,
    scroll_offset: usize,
    input: String,
    show_all: bool,
    error: Option<String>,
}

impl FilePicker {
    pub fn new(mode: PickerMode, dir: PathBuf, filter: FileFilter) -> Self {
        let mut picker = Self {
            mode,
            filter,
            dir,
            entries: Vec::new(),
            selected: None,
            scroll_offset: 0,
            input: String::new(),
            show_all: false,
            error: None,
        };
        picker.refresh();
        picker
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Why the directory could not be listed, if it couldn't.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.error = None;
        self.scroll_offset = 0;

        if let Some(parent) = self.dir.parent() {
            self.entries.push(PickerEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        match std::fs::read_dir(&self.dir) {
            Ok(read) => {
                let mut dirs = Vec::new();
                let mut files = Vec::new();
                for entry in read.filter_map(std::result::Result::ok) {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.starts_with('.') {
                        continue;
                    }
                    let path = entry.path();
                    // Follow symlinks so linked directories are enterable.
                    let is_dir = path.is_dir();
                    if is_dir {
                        dirs.push(PickerEntry { name, path, is_dir });
                    } else if self.show_all || self.filter.matches(&path) {
                        files.push(PickerEntry { name, path, is_dir });
                    }
                }
                dirs.sort_by(|a, b| a.name.cmp(&b.name));
                files.sort_by(|a, b| a.name.cmp(&b.name));
                self.entries.extend(dirs);
                self.entries.extend(files);
            }
            Err(err) => {
                tracing::debug!(dir = %self.dir.display(), %err, "picker listing failed");
                self.error = Some(err.to_string());
            }
        }

        // Start on the first real entry rather than "..".
        let first = usize::from(self.dir.parent().is_some());
        self.selected = if self.entries.len() > first {
            Some(first)
        } else if self.entries.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1).min(self.entries.len() - 1));
        self.select(next);
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let prev = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(prev);
    }

    /// Select entry `idx`. In save mode a selected file's name becomes the input.
    pub fn select(&mut self, idx: usize) {
        let Some(entry) = self.entries.get(idx) else {
            return;
        };
        if self.mode == PickerMode::Save && !entry.is_dir {
            self.input.clone_from(&entry.name);
        }
        self.selected = Some(idx);
    }

    /// Keep the selection within `rows` visible rows.
    pub fn ensure_selected_visible(&mut self, rows: usize) {
        let Some(sel) = self.selected else {
            return;
        };
        if rows == 0 {
            self.scroll_offset = sel;
        } else if sel < self.scroll_offset {
            self.scroll_offset = sel;
        } else if sel >= self.scroll_offset + rows {
            self.scroll_offset = sel + 1 - rows;
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Append pasted text, dropping line breaks.
    pub fn push_str(&mut self, text: &str) {
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    /// Delete from the input; on an empty input, go up a directory.
    pub fn backspace(&mut self) {
        if self.input.pop().is_none() {
            self.go_parent();
        }
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        self.refresh();
    }

    pub fn go_parent(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let came_from = self
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.enter_dir(parent);
        // Highlight the directory we came from.
        if let Some(name) = came_from
            && let Some(idx) = self.entries.iter().position(|e| e.name == name)
        {
            self.selected = Some(idx);
        }
    }

    pub fn enter_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.input.clear();
        self.refresh();
    }

    /// Act on Enter: a typed path wins over the selected entry.
    pub fn submit(&mut self) -> PickerStep {
        let typed = self.input.trim();
        if !typed.is_empty() {
            let path = self.resolve_typed(typed);
            if path.is_dir() {
                self.enter_dir(path);
                return PickerStep::Pending;
            }
            return PickerStep::Chosen(path);
        }

        let Some(entry) = self.selected.and_then(|i| self.entries.get(i)).cloned() else {
            return PickerStep::Pending;
        };
        if entry.is_dir {
            self.enter_dir(entry.path);
            PickerStep::Pending
        } else {
            PickerStep::Chosen(entry.path)
        }
    }

    fn resolve_typed(&self, typed: &str) -> PathBuf {
        if let Some(rest) = typed.strip_prefix("~/")
            && let Some(home) = std::env::var_os("HOME")
        {
            return PathBuf::from(home).join(rest);
        }
        let path = PathBuf::from(typed);
        if path.is_absolute() {
            path
        } else {
            self.dir.join(path)
        }
    }
}

/// A question with a row of buttons. Button 0 is the affirmative one.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    prompt: ConfirmPrompt,
    focused: usize,
}

impl ConfirmDialog {
    pub const fn new(prompt: ConfirmPrompt) -> Self {
        Self { prompt, focused: 0 }
    }

    pub const fn prompt(&self) -> &ConfirmPrompt {
        &self.prompt
    }

    pub const fn focused(&self) -> usize {
        self.focused
    }

    pub const fn focus_next(&mut self) {
        let count = self.prompt.buttons.len();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
        }
    }

    pub const fn focus_prev(&mut self) {
        let count = self.prompt.buttons.len();
        if count > 0 {
            self.focused = (self.focused + count - 1) % count;
        }
    }
}

/// Whichever dialog currently owns input.
#[derive(Debug, Clone)]
pub enum Modal {
    Picker(FilePicker),
    Confirm(ConfirmDialog),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{DOCUMENT_FILTER, OVERWRITE_PROMPT};
    use std::fs;
    use tempfile::tempdir;

    fn names(picker: &FilePicker) -> Vec<&str> {
        picker.entries().iter().map(|e| e.name.as_str()).collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();
        fs::write(dir.path().join("photo.png"), "p").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "h").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.html"), "i").unwrap();
        dir
    }

    #[test]
    fn test_listing_puts_dirs_first_and_applies_filter() {
        let dir = fixture();
        let picker = FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        assert_eq!(names(&picker), vec!["..", "sub", "a.js", "b.txt"]);
        assert_eq!(picker.selected(), Some(1));
    }

    #[test]
    fn test_show_all_lists_unfiltered_files() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        picker.toggle_show_all();
        assert!(picker.show_all());
        assert_eq!(names(&picker), vec!["..", "sub", "a.js", "b.txt", "photo.png"]);
    }

    #[test]
    fn test_submit_on_directory_enters_it() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        assert_eq!(picker.submit(), PickerStep::Pending);
        assert_eq!(picker.dir(), dir.path().join("sub"));
        assert_eq!(names(&picker), vec!["..", "inner.html"]);
    }

    #[test]
    fn test_submit_on_file_chooses_it() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        picker.select_next();
        picker.select_next();
        assert_eq!(picker.submit(), PickerStep::Chosen(dir.path().join("b.txt")));
    }

    #[test]
    fn test_typed_name_is_resolved_against_current_dir() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Save, dir.path().to_path_buf(), DOCUMENT_FILTER);
        for ch in "new.md".chars() {
            picker.push_char(ch);
        }
        assert_eq!(picker.submit(), PickerStep::Chosen(dir.path().join("new.md")));
    }

    #[test]
    fn test_typed_absolute_path_wins_over_selection() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        let target = dir.path().join("photo.png");
        picker.push_str(&target.to_string_lossy());
        assert_eq!(picker.submit(), PickerStep::Chosen(target));
    }

    #[test]
    fn test_save_mode_selection_fills_input() {
        let dir = fixture();
        let mut picker =
            FilePicker::new(PickerMode::Save, dir.path().to_path_buf(), DOCUMENT_FILTER);
        picker.select_next();
        assert_eq!(picker.input(), "a.js");
    }

    #[test]
    fn test_backspace_on_empty_input_goes_to_parent() {
        let dir = fixture();
        let sub = dir.path().join("sub");
        let mut picker = FilePicker::new(PickerMode::Open, sub, DOCUMENT_FILTER);
        picker.push_char('x');
        picker.backspace();
        assert_eq!(picker.input(), "");
        picker.backspace();
        assert_eq!(picker.dir(), dir.path());
        let selected = picker.selected().and_then(|i| picker.entries().get(i));
        assert_eq!(selected.map(|e| e.name.as_str()), Some("sub"));
    }

    #[test]
    fn test_unreadable_directory_reports_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        let picker = FilePicker::new(PickerMode::Open, missing, DOCUMENT_FILTER);
        assert!(picker.error().is_some());
        assert_eq!(names(&picker), vec![".."]);
    }

    #[test]
    fn test_ensure_selected_visible_scrolls() {
        let dir = tempdir().unwrap();
        for i in 0..20 {
            fs::write(dir.path().join(format!("f{i:02}.txt")), "").unwrap();
        }
        let mut picker =
            FilePicker::new(PickerMode::Open, dir.path().to_path_buf(), DOCUMENT_FILTER);
        for _ in 0..10 {
            picker.select_next();
        }
        picker.ensure_selected_visible(5);
        assert_eq!(picker.scroll_offset(), 7);
    }

    #[test]
    fn test_confirm_focus_wraps() {
        let mut dialog = ConfirmDialog::new(OVERWRITE_PROMPT);
        assert_eq!(dialog.focused(), 0);
        dialog.focus_next();
        assert_eq!(dialog.focused(), 1);
        dialog.focus_next();
        assert_eq!(dialog.focused(), 0);
        dialog.focus_prev();
        assert_eq!(dialog.focused(), 1);
    }

    #[test]
    fn test_picker_mode_maps_to_completion() {
        assert_eq!(
            PickerMode::Open.completion(None),
            Completion::OpenDialog(None)
        );
        assert_eq!(
            PickerMode::Save.completion(Some(PathBuf::from("/x"))),
            Completion::SaveDialog(Some(PathBuf::from("/x")))
        );
    }
}
