//! Load/save policy.
//!
//! The [`Controller`] turns the three user intents (drop a file, Load,
//! Save) into dialog requests and whole-file I/O, and keeps the
//! [`Session`] consistent. It never blocks: each request goes out through
//! the [`Host`] capabilities and the answer comes back later as a
//! [`Completion`] passed to [`Controller::resume`]. Answers are handled
//! in the order they arrive, so two racing loads land in completion order.

mod error;
mod host;

use std::path::{Path, PathBuf};

pub use error::FileError;
pub use host::{CursorPlacement, Dialogs, FileIo, Host, StatusLine, TextWidget};

/// Advisory extension filter for the open and save dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    /// Whether `path` has one of the filter's extensions (ASCII case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext))
    }

    /// e.g. `Documents (*.txt, *.text)`
    pub fn label(&self) -> String {
        let patterns = self
            .extensions
            .iter()
            .map(|ext| format!("*.{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ({patterns})", self.name)
    }
}

pub const DOCUMENT_FILTER: FileFilter = FileFilter {
    name: "Documents",
    extensions: &["txt", "text", "html", "js"],
};

/// Contents of a confirm dialog. Button 0 is the affirmative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub detail: &'static str,
    pub buttons: &'static [&'static str],
}

impl ConfirmPrompt {
    /// Response index reported when the dialog is dismissed without a choice.
    pub const fn dismiss_response(&self) -> usize {
        if self.buttons.len() > 1 { self.buttons.len() - 1 } else { 1 }
    }
}

pub const OVERWRITE_PROMPT: ConfirmPrompt = ConfirmPrompt {
    title: "Save file",
    detail: "The file will be overwritten. Are you sure?",
    buttons: &["OK", "Cancel"],
};

/// Button index that means "go ahead".
pub const CONFIRM_RESPONSE: usize = 0;

/// Which file, if any, the open document is bound to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    current_path: Option<PathBuf>,
}

impl Session {
    pub const fn new() -> Self {
        Self { current_path: None }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub const fn is_bound(&self) -> bool {
        self.current_path.is_some()
    }

    fn bind(&mut self, path: PathBuf) {
        tracing::debug!(path = %path.display(), "session bound");
        self.current_path = Some(path);
    }
}

/// An answer to a request the controller made earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The open dialog closed; `None` when cancelled.
    OpenDialog(Option<PathBuf>),
    /// The save dialog closed; `None` when cancelled.
    SaveDialog(Option<PathBuf>),
    /// The confirm dialog closed with this button index.
    Confirm(usize),
    /// A read finished.
    Read {
        path: PathBuf,
        result: Result<Vec<u8>, FileError>,
    },
    /// A write finished.
    Write {
        path: PathBuf,
        result: Result<(), FileError>,
    },
}

#[derive(Debug, Default)]
pub struct Controller {
    session: Session,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Load the first dropped file. No confirmation.
    pub fn drop_files<H: Host + ?Sized>(&mut self, host: &mut H, paths: &[PathBuf]) {
        let Some(first) = paths.first() else {
            return;
        };
        if paths.len() > 1 {
            tracing::debug!(ignored = paths.len() - 1, "extra dropped files ignored");
        }
        self.read_and_load(host, first.clone());
    }

    /// Ask for a file to load.
    #[allow(clippy::unused_self)]
    pub fn load<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.show_open_dialog(&DOCUMENT_FILTER);
    }

    /// Overwrite the bound file after confirmation, or save-as when unbound.
    pub fn save<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.session.is_bound() {
            self.save_as(host);
            return;
        }
        host.show_confirm(&OVERWRITE_PROMPT);
    }

    /// Ask for a destination and write there.
    #[allow(clippy::unused_self)]
    pub fn save_as<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.show_save_dialog(&DOCUMENT_FILTER);
    }

    /// Continue whatever operation `completion` answers.
    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H, completion: Completion) {
        match completion {
            Completion::OpenDialog(None) | Completion::SaveDialog(None) => {
                tracing::debug!("dialog cancelled");
            }
            Completion::OpenDialog(Some(path)) => self.read_and_load(host, path),
            Completion::SaveDialog(Some(path)) => {
                self.session.bind(path.clone());
                let content = host.value();
                Self::write(host, &path, content);
            }
            Completion::Confirm(response) => {
                if response != CONFIRM_RESPONSE {
                    tracing::debug!(response, "overwrite declined");
                    return;
                }
                let Some(path) = self.session.current_path().map(Path::to_path_buf) else {
                    return;
                };
                let content = host.value();
                Self::write(host, &path, content);
            }
            Completion::Read { path, result } => match result {
                Ok(bytes) => {
                    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read complete");
                    host.show_path(&path);
                    host.set_value(&String::from_utf8_lossy(&bytes), CursorPlacement::Start);
                }
                Err(err) => {
                    tracing::info!(path = %path.display(), %err, "read failed");
                    host.alert(&err.alert_text());
                }
            },
            Completion::Write { path, result } => match result {
                Ok(()) => tracing::debug!(path = %path.display(), "write complete"),
                Err(err) => {
                    tracing::info!(path = %path.display(), %err, "write failed");
                    host.alert(&err.alert_text());
                }
            },
        }
    }

    // The session is bound before the read finishes, so a failed read
    // leaves it bound to the unreadable path.
    fn read_and_load<H: Host + ?Sized>(&mut self, host: &mut H, path: PathBuf) {
        self.session.bind(path.clone());
        host.read_file(&path);
    }

    fn write<H: Host + ?Sized>(host: &mut H, path: &Path, content: String) {
        tracing::debug!(path = %path.display(), bytes = content.len(), "write dispatched");
        host.write_file(path, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Request {
        OpenDialog,
        SaveDialog,
        Confirm(&'static str),
        Alert(String),
        Read(PathBuf),
        Write(PathBuf, String),
    }

    #[derive(Default)]
    struct FakeHost {
        requests: Vec<Request>,
        text: String,
        cursor: Option<CursorPlacement>,
        footer: Option<PathBuf>,
    }

    impl Dialogs for FakeHost {
        fn show_open_dialog(&mut self, filter: &FileFilter) {
            assert_eq!(filter, &DOCUMENT_FILTER);
            self.requests.push(Request::OpenDialog);
        }
        fn show_save_dialog(&mut self, filter: &FileFilter) {
            assert_eq!(filter, &DOCUMENT_FILTER);
            self.requests.push(Request::SaveDialog);
        }
        fn show_confirm(&mut self, prompt: &ConfirmPrompt) {
            self.requests.push(Request::Confirm(prompt.title));
        }
        fn alert(&mut self, message: &str) {
            self.requests.push(Request::Alert(message.to_string()));
        }
    }

    impl FileIo for FakeHost {
        fn read_file(&mut self, path: &Path) {
            self.requests.push(Request::Read(path.to_path_buf()));
        }
        fn write_file(&mut self, path: &Path, contents: String) {
            self.requests.push(Request::Write(path.to_path_buf(), contents));
        }
    }

    impl TextWidget for FakeHost {
        fn value(&self) -> String {
            self.text.clone()
        }
        fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
            self.text = text.to_string();
            self.cursor = Some(cursor);
        }
    }

    impl StatusLine for FakeHost {
        fn show_path(&mut self, path: &Path) {
            self.footer = Some(path.to_path_buf());
        }
    }

    fn read_ok(path: &str, body: &str) -> Completion {
        Completion::Read {
            path: PathBuf::from(path),
            result: Ok(body.as_bytes().to_vec()),
        }
    }

    fn bound_controller(host: &mut FakeHost, path: &str) -> Controller {
        let mut controller = Controller::new();
        controller.drop_files(host, &[PathBuf::from(path)]);
        controller.resume(host, read_ok(path, ""));
        host.requests.clear();
        controller
    }

    #[test]
    fn test_new_session_is_unbound() {
        let controller = Controller::new();
        assert!(!controller.session().is_bound());
        assert_eq!(controller.session().current_path(), None);
    }

    #[test]
    fn test_load_opens_dialog_only() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.load(&mut host);
        assert_eq!(host.requests, vec![Request::OpenDialog]);
        assert!(!controller.session().is_bound());
    }

    #[test]
    fn test_load_cancel_changes_nothing() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.load(&mut host);
        controller.resume(&mut host, Completion::OpenDialog(None));
        assert_eq!(host.requests, vec![Request::OpenDialog]);
        assert!(!controller.session().is_bound());
    }

    #[test]
    fn test_load_selection_binds_before_read_completes() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.load(&mut host);
        controller.resume(&mut host, Completion::OpenDialog(Some("/tmp/a.txt".into())));
        assert_eq!(controller.session().current_path(), Some(Path::new("/tmp/a.txt")));
        assert_eq!(host.requests.last(), Some(&Request::Read("/tmp/a.txt".into())));
        assert_eq!(host.footer, None);
    }

    #[test]
    fn test_read_success_sets_footer_then_widget() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &["/tmp/a.txt".into()]);
        controller.resume(&mut host, read_ok("/tmp/a.txt", "hello"));
        assert_eq!(host.text, "hello");
        assert_eq!(host.cursor, Some(CursorPlacement::Start));
        assert_eq!(host.footer, Some(PathBuf::from("/tmp/a.txt")));
    }

    #[test]
    fn test_read_failure_alerts_and_keeps_binding() {
        let mut host = FakeHost {
            text: "untouched".to_string(),
            ..FakeHost::default()
        };
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &["/missing.txt".into()]);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        controller.resume(
            &mut host,
            Completion::Read {
                path: "/missing.txt".into(),
                result: Err(FileError::read(Path::new("/missing.txt"), &io)),
            },
        );
        assert_eq!(
            host.requests.last(),
            Some(&Request::Alert("error : not found, open '/missing.txt'".to_string()))
        );
        assert_eq!(host.text, "untouched");
        assert_eq!(host.footer, None);
        assert_eq!(controller.session().current_path(), Some(Path::new("/missing.txt")));
    }

    #[test]
    fn test_drop_uses_first_path_and_never_confirms() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &["/a.txt".into(), "/b.txt".into()]);
        assert_eq!(host.requests, vec![Request::Read("/a.txt".into())]);
        assert_eq!(controller.session().current_path(), Some(Path::new("/a.txt")));
    }

    #[test]
    fn test_drop_with_no_paths_is_noop() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &[]);
        assert!(host.requests.is_empty());
        assert!(!controller.session().is_bound());
    }

    #[test]
    fn test_save_when_unbound_goes_to_save_as() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.save(&mut host);
        assert_eq!(host.requests, vec![Request::SaveDialog]);
    }

    #[test]
    fn test_save_as_cancel_writes_nothing_and_stays_unbound() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.save(&mut host);
        controller.resume(&mut host, Completion::SaveDialog(None));
        assert_eq!(host.requests, vec![Request::SaveDialog]);
        assert!(!controller.session().is_bound());
    }

    #[test]
    fn test_save_as_binds_and_writes_widget_content() {
        let mut host = FakeHost {
            text: "x".to_string(),
            ..FakeHost::default()
        };
        let mut controller = Controller::new();
        controller.save(&mut host);
        controller.resume(&mut host, Completion::SaveDialog(Some("/tmp/new.txt".into())));
        assert_eq!(
            host.requests.last(),
            Some(&Request::Write("/tmp/new.txt".into(), "x".to_string()))
        );
        assert_eq!(controller.session().current_path(), Some(Path::new("/tmp/new.txt")));
    }

    #[test]
    fn test_save_when_bound_asks_for_confirmation() {
        let mut host = FakeHost::default();
        let mut controller = bound_controller(&mut host, "/tmp/a.txt");
        controller.save(&mut host);
        assert_eq!(host.requests, vec![Request::Confirm("Save file")]);
    }

    #[test]
    fn test_confirm_ok_writes_to_bound_path() {
        let mut host = FakeHost::default();
        let mut controller = bound_controller(&mut host, "/tmp/a.txt");
        host.text = "hello world".to_string();
        controller.save(&mut host);
        controller.resume(&mut host, Completion::Confirm(CONFIRM_RESPONSE));
        assert_eq!(
            host.requests.last(),
            Some(&Request::Write("/tmp/a.txt".into(), "hello world".to_string()))
        );
    }

    #[test]
    fn test_any_other_confirm_response_is_cancel() {
        let mut host = FakeHost::default();
        let mut controller = bound_controller(&mut host, "/tmp/a.txt");
        for response in [1, 2, 7] {
            controller.save(&mut host);
            controller.resume(&mut host, Completion::Confirm(response));
        }
        assert!(
            host.requests
                .iter()
                .all(|r| !matches!(r, Request::Write(..)))
        );
        assert_eq!(controller.session().current_path(), Some(Path::new("/tmp/a.txt")));
    }

    #[test]
    fn test_write_failure_alerts_without_rollback() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.save(&mut host);
        controller.resume(&mut host, Completion::SaveDialog(Some("/ro/out.txt".into())));
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        controller.resume(
            &mut host,
            Completion::Write {
                path: "/ro/out.txt".into(),
                result: Err(FileError::write(Path::new("/ro/out.txt"), &io)),
            },
        );
        assert_eq!(
            host.requests.last(),
            Some(&Request::Alert("error : denied, write '/ro/out.txt'".to_string()))
        );
        assert_eq!(controller.session().current_path(), Some(Path::new("/ro/out.txt")));
    }

    #[test]
    fn test_write_success_is_silent() {
        let mut host = FakeHost::default();
        let mut controller = bound_controller(&mut host, "/tmp/a.txt");
        controller.resume(
            &mut host,
            Completion::Write {
                path: "/tmp/a.txt".into(),
                result: Ok(()),
            },
        );
        assert!(host.requests.is_empty());
    }

    #[test]
    fn test_reads_apply_in_completion_order() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &["/first.txt".into()]);
        controller.drop_files(&mut host, &["/second.txt".into()]);
        // The second read finishes first; the slower first read wins the widget.
        controller.resume(&mut host, read_ok("/second.txt", "two"));
        controller.resume(&mut host, read_ok("/first.txt", "one"));
        assert_eq!(host.text, "one");
        assert_eq!(host.footer, Some(PathBuf::from("/first.txt")));
        assert_eq!(controller.session().current_path(), Some(Path::new("/second.txt")));
    }

    #[test]
    fn test_read_decodes_invalid_utf8_lossily() {
        let mut host = FakeHost::default();
        let mut controller = Controller::new();
        controller.drop_files(&mut host, &["/bin.txt".into()]);
        controller.resume(
            &mut host,
            Completion::Read {
                path: "/bin.txt".into(),
                result: Ok(vec![b'a', 0xff, b'b']),
            },
        );
        assert_eq!(host.text, "a\u{fffd}b");
    }

    #[test]
    fn test_filter_matches_extensions_case_insensitively() {
        assert!(DOCUMENT_FILTER.matches(Path::new("notes.TXT")));
        assert!(DOCUMENT_FILTER.matches(Path::new("app.js")));
        assert!(!DOCUMENT_FILTER.matches(Path::new("image.png")));
        assert!(!DOCUMENT_FILTER.matches(Path::new("Makefile")));
        assert_eq!(
            DOCUMENT_FILTER.label(),
            "Documents (*.txt, *.text, *.html, *.js)"
        );
    }

    #[test]
    fn test_overwrite_prompt_dismiss_is_cancel() {
        assert_eq!(OVERWRITE_PROMPT.buttons[CONFIRM_RESPONSE], "OK");
        assert_eq!(OVERWRITE_PROMPT.dismiss_response(), 1);
    }
}
