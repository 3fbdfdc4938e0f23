use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::controller::Controller;
use crate::worker::FileWorker;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure. File read and write failures are shown
    /// as alerts and never end the loop.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: jotpad requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new((size.width, size.height)).with_tab_width(self.tab_width);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let result = self
            .enable_terminal_features()
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        if let Err(err) = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture) {
            tracing::warn!(%err, "failed to reset terminal input modes");
        }
        ratatui::restore();

        result
    }

    fn enable_terminal_features(&self) -> Result<()> {
        execute!(stdout(), EnableBracketedPaste).context("Failed to enable bracketed paste")?;
        if self.mouse_enabled {
            execute!(stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;
        }
        Ok(())
    }

    /// Apply one message: pure update first, then the controller.
    pub(super) fn dispatch(
        model: &mut Model,
        controller: &mut Controller,
        worker: &mut FileWorker,
        msg: Message,
    ) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, controller, worker, &side_msg);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut controller = Controller::new();
        let mut worker = FileWorker::new();
        let mut needs_render = true;

        loop {
            while let Some(completion) = worker.try_recv() {
                Self::dispatch(
                    model,
                    &mut controller,
                    &mut worker,
                    Message::Completed(completion),
                );
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if worker.in_flight() > 0 {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    Self::dispatch(model, &mut controller, &mut worker, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        Self::dispatch(model, &mut controller, &mut worker, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
