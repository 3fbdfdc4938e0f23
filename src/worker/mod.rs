//! Background file I/O.
//!
//! Each read or write runs on its own short-lived thread and reports back
//! through a channel the event loop drains. Results come out in the order
//! the operations finish. Nothing is cancelled and nothing times out.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::controller::{Completion, FileError};

pub struct FileWorker {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl FileWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Read the whole file at `path` in the background.
    pub fn read(&mut self, path: &Path) {
        let path = path.to_path_buf();
        self.spawn(
            "jotpad-read",
            path.clone(),
            move |tx| {
                let result = fs::read(&path).map_err(|err| FileError::read(&path, &err));
                let _ = tx.send(Completion::Read { path, result });
            },
            |path, err| Completion::Read {
                result: Err(FileError::read(&path, &err)),
                path,
            },
        );
    }

    /// Replace the file at `path` with `contents` in the background.
    pub fn write(&mut self, path: &Path, contents: String) {
        let path = path.to_path_buf();
        self.spawn(
            "jotpad-write",
            path.clone(),
            move |tx| {
                let result =
                    fs::write(&path, contents).map_err(|err| FileError::write(&path, &err));
                let _ = tx.send(Completion::Write { path, result });
            },
            |path, err| Completion::Write {
                result: Err(FileError::write(&path, &err)),
                path,
            },
        );
    }

    /// Next finished operation, if any.
    pub fn try_recv(&mut self) -> Option<Completion> {
        let done = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(done)
    }

    /// Wait up to `timeout` for the next finished operation.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(done) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(done)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Operations started but not yet received.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn spawn(
        &mut self,
        name: &str,
        path: PathBuf,
        job: impl FnOnce(Sender<Completion>) + Send + 'static,
        on_spawn_error: impl FnOnce(PathBuf, std::io::Error) -> Completion,
    ) {
        let tx = self.tx.clone();
        self.in_flight += 1;
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || job(tx));
        if let Err(err) = spawned {
            tracing::warn!(path = %path.display(), %err, "could not start I/O thread");
            let _ = self.tx.send(on_spawn_error(path, err));
        }
    }
}

impl Default for FileWorker {
    fn default() -> Self {
        Self::new()
    }
}
