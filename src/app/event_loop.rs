use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, input, update};
use crate::editor::Editor;
use crate::ui::SurfaceTable;

/// Poll timeout while idle.
const IDLE_POLL_MS: u64 = 250;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: linemark requires an interactive terminal")?;
        let size = terminal.size()?;

        let editor = self
            .initial_text
            .as_deref()
            .map_or_else(Editor::default, Editor::from_text);
        let mut model = Model::new(editor, (size.width, size.height))
            .with_source_path(self.source_path.clone())
            .with_inspector(self.inspector_visible);
        // Nothing has focus until the first frame mounts the surfaces.
        model.editor.request_focus();
        tracing::info!(
            lines = model.editor.lines().len(),
            width = size.width,
            height = size.height,
            "editor started"
        );

        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut surfaces = SurfaceTable::new();
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if needs_render {
                frame_idx += 1;
                terminal.draw(|frame| crate::ui::render(model, &mut surfaces, frame))?;
                needs_render = false;

                // The draw mounted surfaces for every line, so this is the
                // earliest point a queued focus request can land.
                if model.editor.pending_focus() > 0 {
                    let report = model.editor.reconcile_focus(&mut surfaces);
                    tracing::trace!(
                        frame = frame_idx,
                        resolved = report.resolved.len(),
                        pending = report.pending,
                        "focus tick"
                    );
                    // Redraw for the new caret, or to retry after the next
                    // mount.
                    needs_render = !report.resolved.is_empty() || report.pending > 0;
                }
            }

            if model.should_quit {
                break;
            }

            let poll_ms = if needs_render { 0 } else { IDLE_POLL_MS };
            if event::poll(Duration::from_millis(poll_ms))? {
                let mut msg = input::handle_event(&event::read()?, model, &mut surfaces);
                // Coalesce key repeat bursts into a single render.
                loop {
                    if let Some(msg) = msg.take() {
                        tracing::debug!(frame = frame_idx, ?msg, "message");
                        dispatch(model, msg);
                        needs_render = true;
                    }
                    // A queued focus request means the surfaces no longer
                    // match the cursor; draw and reconcile before reading on.
                    if model.should_quit
                        || model.editor.pending_focus() > 0
                        || !event::poll(Duration::ZERO)?
                    {
                        break;
                    }
                    msg = input::handle_event(&event::read()?, model, &mut surfaces);
                }
            }
        }
        Ok(())
    }
}

fn dispatch(model: &mut Model, msg: Message) {
    *model = update(std::mem::take(model), msg);
}
