//! Interface capture overlay.
//!
//! Runs alongside the section scan on the same line stream and collects the
//! `edit ... next` blocks found inside `config system interface`. The overlay
//! is a small state machine; [`step`] is a pure function of the current state
//! and line so each transition can be tested on its own.
//!
//! Activation is a plain substring test for [`INTERFACE_MARKER`] on any line,
//! so a matching comment or a nested occurrence also switches it on.

use super::section::{Interface, InterfaceIndex};

/// Text that switches the overlay on.
pub const INTERFACE_MARKER: &str = "config system interface";

/// Where the overlay is in the line stream.
///
/// `depth` counts `config` openers seen since activation minus `end`s, so
/// blocks nested inside an interface (`config ipv6`, `config secondaryip`)
/// and their own `edit`/`next` lines stay inside the interface body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// Outside any interface section
    #[default]
    Idle,
    /// Inside an interface section, between interfaces
    AwaitingEdit { depth: usize },
    /// Inside an `edit` block
    Capturing {
        name: String,
        depth: usize,
        lines: Vec<String>,
        start_line: usize,
    },
}

impl CaptureState {
    pub fn is_active(&self) -> bool {
        !matches!(self, CaptureState::Idle)
    }
}

/// Advance the overlay by one line.
///
/// Returns the next state and, when an interface block is finished, the
/// captured interface. `line_no` is the 1-indexed position of `line`.
pub fn step(state: CaptureState, line: &str, line_no: usize) -> (CaptureState, Option<Interface>) {
    let trimmed = line.trim();
    let opens = super::is_section_opener(trimmed);
    let closes = trimmed == "end";

    match state {
        CaptureState::Idle => {
            if line.contains(INTERFACE_MARKER) {
                let depth = usize::from(opens);
                (CaptureState::AwaitingEdit { depth }, None)
            } else {
                (CaptureState::Idle, None)
            }
        }

        CaptureState::AwaitingEdit { depth } => {
            if opens {
                (CaptureState::AwaitingEdit { depth: depth + 1 }, None)
            } else if closes {
                if depth <= 1 {
                    (CaptureState::Idle, None)
                } else {
                    (CaptureState::AwaitingEdit { depth: depth - 1 }, None)
                }
            } else if depth <= 1 && trimmed.starts_with("edit ") {
                let next = CaptureState::Capturing {
                    name: edit_argument(trimmed).to_string(),
                    depth,
                    lines: vec![line.to_string()],
                    start_line: line_no,
                };
                (next, None)
            } else {
                (CaptureState::AwaitingEdit { depth }, None)
            }
        }

        CaptureState::Capturing {
            name,
            depth,
            mut lines,
            start_line,
        } => {
            if closes && depth <= 1 {
                // Enclosing section closed before `next`: keep what we have.
                return (CaptureState::Idle, finish(name, lines, start_line));
            }

            lines.push(line.to_string());

            let depth = if opens {
                depth + 1
            } else if closes {
                depth - 1
            } else {
                depth
            };

            if !opens && !closes && depth <= 1 && trimmed == "next" {
                (
                    CaptureState::AwaitingEdit { depth },
                    finish(name, lines, start_line),
                )
            } else {
                let next = CaptureState::Capturing {
                    name,
                    depth,
                    lines,
                    start_line,
                };
                (next, None)
            }
        }
    }
}

fn finish(name: String, lines: Vec<String>, start_line: usize) -> Option<Interface> {
    if name.is_empty() {
        return None;
    }
    let end_line = start_line + lines.len().saturating_sub(1);
    Some(Interface {
        name,
        body: lines.join("\n"),
        start_line,
        end_line,
    })
}

/// Name given to an `edit` statement.
///
/// Quoted arguments are taken up to the closing quote, so names containing
/// spaces survive. Unquoted arguments use the first token.
pub fn edit_argument(trimmed: &str) -> &str {
    let rest = trimmed.strip_prefix("edit").unwrap_or(trimmed).trim_start();
    match rest.strip_prefix('"') {
        Some(quoted) => match quoted.find('"') {
            Some(close) => &quoted[..close],
            None => quoted.trim_end(),
        },
        None => rest.split_whitespace().next().unwrap_or(""),
    }
}

/// Drives [`step`] over a document and collects the results.
#[derive(Debug, Default)]
pub struct InterfaceCapture {
    state: CaptureState,
    index: InterfaceIndex,
}

impl InterfaceCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn feed(&mut self, line: &str, line_no: usize) {
        let state = std::mem::take(&mut self.state);
        let (next, captured) = step(state, line, line_no);
        self.state = next;

        if let Some(interface) = captured {
            tracing::trace!(name = %interface.name, "captured interface");
            self.index.insert(interface);
        }
    }

    /// Finish the scan. An interface still open at end of input is dropped.
    pub fn finish(self) -> InterfaceIndex {
        if let CaptureState::Capturing { name, .. } = &self.state {
            tracing::warn!(name = %name, "interface block not terminated, dropping");
        }
        self.index
    }
}
