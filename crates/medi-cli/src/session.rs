//! Line-oriented interactive search session.
//!
//! Input is read on a helper thread that only forwards lines over a channel.
//! The view lives on the calling thread, which waits for the next line with a
//! timeout equal to the pending debounce deadline and ticks the view when it
//! expires. Lines that arrive inside the window supersede each other, so a
//! burst of edits produces a single search.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use medi_core::{SearchView, ViewEvent};
use medi_model::{CatalogInfo, SearchField};

use crate::render::render_view;

pub const PROMPT_HELP: &str = "Tapez un nom pour rechercher. Commandes: :dci, :commercial, \
                               :select N, :clear, :help, :quit";

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Query(String),
    Field(SearchField),
    Select(usize),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `:` are commands; anything else replaces the query.
pub fn parse_line(line: &str) -> SessionInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return SessionInput::Query(line.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("dci"), None) => SessionInput::Field(SearchField::GenericName),
        (Some("commercial"), None) => SessionInput::Field(SearchField::CommercialName),
        (Some("select"), Some(row)) => match row.parse::<usize>() {
            Ok(row) if row >= 1 => SessionInput::Select(row - 1),
            _ => SessionInput::Unknown(line.to_string()),
        },
        (Some("clear"), None) => SessionInput::Clear,
        (Some("help"), None) => SessionInput::Help,
        (Some("quit" | "q"), None) => SessionInput::Quit,
        _ => SessionInput::Unknown(line.to_string()),
    }
}

fn spawn_reader<R>(input: R) -> Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in input.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Runs a session until `:quit` or end of input.
///
/// The view is rendered to `out` whenever its results or selection change.
pub fn run_session<R, W>(
    view: &mut SearchView,
    info: &CatalogInfo,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let lines = spawn_reader(input);
    writeln!(out, "{PROMPT_HELP}").context("write output")?;
    loop {
        let received = match view.until_due(Instant::now()) {
            Some(wait) => {
                match lines.recv_timeout(wait) {
                    Ok(line) => Some(line),
                    Err(RecvTimeoutError::Timeout) => {
                        if view.tick(Instant::now()) {
                            write_view(view, info, out)?;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => None,
                }
            }
            None => lines.recv().ok(),
        };
        let Some(line) = received else {
            debug!("input closed");
            break;
        };
        let line = line.context("read input")?;
        let before = (view.results_generation(), view.selection());
        let now = Instant::now();
        match parse_line(&line) {
            SessionInput::Query(query) => {
                view.update(ViewEvent::QueryChanged(query), now);
            }
            SessionInput::Clear => {
                view.update(ViewEvent::QueryChanged(String::new()), now);
            }
            SessionInput::Field(field) => {
                view.update(ViewEvent::FieldChanged(field), now);
            }
            SessionInput::Select(index) => {
                if !view.update(ViewEvent::RowClicked(index), now)
                    && view.selected_index() != Some(index)
                {
                    writeln!(out, "Ligne {} introuvable", index + 1).context("write output")?;
                }
            }
            SessionInput::Help => {
                writeln!(out, "{PROMPT_HELP}").context("write output")?;
            }
            SessionInput::Quit => break,
            SessionInput::Unknown(text) => {
                warn!(input = %text, "unknown command");
                writeln!(out, "Commande inconnue: {text}").context("write output")?;
            }
        }
        if before != (view.results_generation(), view.selection()) {
            write_view(view, info, out)?;
        }
    }
    if view.flush() {
        write_view(view, info, out)?;
    }
    Ok(())
}

fn write_view<W: Write>(view: &SearchView, info: &CatalogInfo, out: &mut W) -> Result<()> {
    writeln!(out, "{}", render_view(view, info)).context("write output")?;
    out.flush().context("flush output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(
            parse_line("dolip\n"),
            SessionInput::Query("dolip".to_string())
        );
        assert_eq!(parse_line("  "), SessionInput::Query("  ".to_string()));
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(parse_line(":dci"), SessionInput::Field(SearchField::GenericName));
        assert_eq!(
            parse_line(" :commercial"),
            SessionInput::Field(SearchField::CommercialName)
        );
        assert_eq!(parse_line(":select 3"), SessionInput::Select(2));
        assert_eq!(parse_line(":clear"), SessionInput::Clear);
        assert_eq!(parse_line(":q"), SessionInput::Quit);
    }

    #[test]
    fn bad_commands_are_unknown() {
        assert!(matches!(parse_line(":select 0"), SessionInput::Unknown(_)));
        assert!(matches!(parse_line(":select x"), SessionInput::Unknown(_)));
        assert!(matches!(parse_line(":sort"), SessionInput::Unknown(_)));
    }
}
