//! # Session Runner
//!
//! Reads a script line by line, executes each command and renders the
//! result.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Loop                                         │
//! │                                                                         │
//! │  input (file / stdin)                                                   │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  parse_line ──► None (blank / comment) ──► next line                    │
//! │     │                                                                   │
//! │     ├──► Err ──► stderr "line N: ..." ──► next line                     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  execute ──► render ──► stdout                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad line never ends the session. Only failing to read input or to
//! write output does.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::commands::{execute, SessionCommand};
use crate::error::CliError;
use crate::render::Renderer;
use crate::state::LedgerState;

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines_read: usize,
    pub commands_run: usize,
    pub errors: usize,
}

pub struct Session {
    state: LedgerState,
    renderer: Renderer,
}

impl Session {
    pub fn new(state: LedgerState, renderer: Renderer) -> Self {
        Session { state, renderer }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Runs every line of `input`.
    ///
    /// A line that is not valid UTF-8 is reported like any other bad line.
    pub fn run<R, W, E>(
        &self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<SessionSummary, CliError>
    where
        R: BufRead,
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        let mut summary = SessionSummary::default();
        let mut raw = Vec::new();

        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let line_no = summary.lines_read + 1;
            summary.lines_read = line_no;

            match decode_line(&raw).and_then(SessionCommand::parse_line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    debug!(line = line_no, command = command.name(), "Executing command");
                    let output = execute(&self.state, command);
                    self.renderer.write_output(out, &output)?;
                    out.flush()?;
                    summary.commands_run += 1;
                }
                Err(error) => {
                    warn!(line = line_no, code = %error.code, "Rejected session line");
                    self.renderer.write_error(err, line_no, &error)?;
                    summary.errors += 1;
                }
            }
        }

        info!(
            lines = summary.lines_read,
            commands = summary.commands_run,
            errors = summary.errors,
            "Session finished"
        );
        Ok(summary)
    }
}

/// Strips the line ending and checks the text is UTF-8.
fn decode_line(raw: &[u8]) -> Result<&str, CliError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw)
        .map_err(|e| CliError::parse(format!("line is not valid UTF-8 ({})", e)))
}
