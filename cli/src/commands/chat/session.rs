//! # Chatbox Terminal Session
//!
//! File: cli/src/commands/chat/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives a mounted `ChatWidget` from a line-oriented reader. Each line is
//! typed into the input control and the trigger is activated. The transcript
//! shows the user region after every submission and the bot region every time
//! it changes.
//!
//! The session is a single task selecting over the next input line and the
//! bot region's change notifications, so transcript lines come out in the
//! order the widget produced them. When input ends, the session keeps
//! listening until no reply is outstanding.
//!
use crate::core::error::Result;
use crate::widget::{ChatWidget, ElementId, TextElement};
use anyhow::{bail, Context};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Presentation options of the transcript.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Prefix every line with the local time.
    pub timestamps: bool,
}

/// What happened during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub submitted: usize,
}

fn write_line<W: Write>(out: &mut W, options: &SessionOptions, who: &str, text: &str) -> Result<()> {
    let written = if options.timestamps {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(out, "[{}] {}> {}", now, who, text)
    } else {
        writeln!(out, "{}> {}", who, text)
    };
    written.context("Failed to write transcript")?;
    out.flush().context("Failed to flush transcript")
}

/// # Run Session (`run_session`)
///
/// ## Arguments
///
/// * `widget`: The mounted widget.
/// * `trigger`: The trigger activated for every line.
/// * `reader`: Source of user lines.
/// * `out`: Transcript sink.
/// * `options`: Transcript presentation.
///
/// ## Returns
///
/// * `Result<SessionSummary>`: Once input has ended and every reply has been shown.
///
/// ## Errors
///
/// Returns an error if reading input or writing the transcript fails, or if
/// `trigger` is not bound to the widget.
pub async fn run_session<R, W>(
    widget: &ChatWidget,
    trigger: ElementId,
    reader: R,
    out: &mut W,
    options: &SessionOptions,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    let mut bot_rx = widget.bot_display().subscribe();
    let mut input_open = true;
    let mut submitted = 0;

    loop {
        if !input_open && widget.handler().outstanding() == 0 {
            // A reply may have landed between the last wake-up and now.
            if bot_rx.has_changed().unwrap_or(false) {
                let text = bot_rx.borrow_and_update().clone();
                write_line(out, options, "bot", &text)?;
            }
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input line")? {
                    Some(text) => {
                        widget.input().set_text(&text);
                        if !widget.activate(trigger).default_prevented() {
                            bail!("Element {:?} is not a trigger of this widget", trigger);
                        }
                        submitted += 1;
                        write_line(out, options, "you", &widget.user_display().text())?;
                        let bot = bot_rx.borrow_and_update().clone();
                        write_line(out, options, "bot", &bot)?;
                    }
                    None => {
                        debug!("End of input after {} message(s)", submitted);
                        input_open = false;
                    }
                }
            }
            changed = bot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let bot = bot_rx.borrow_and_update().clone();
                write_line(out, options, "bot", &bot)?;
            }
        }
    }

    Ok(SessionSummary { submitted })
}
