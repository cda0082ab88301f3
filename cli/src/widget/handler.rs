//! # Chatbox Form Handler
//!
//! File: cli/src/widget/handler.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ChatFormHandler` is the whole behaviour of the chat widget. On every
//! submission it:
//! 1. Reads the input control.
//! 2. Shows that text in the user message region.
//! 3. Clears the input control.
//! 4. Shows `PENDING_TEXT` in the bot message region.
//! 5. Schedules a one-shot reply that writes `REPLY_TEXT` after `REPLY_DELAY`.
//! 6. Tells the caller to suppress the event's default action.
//!
//! The bot is a stub: the reply is static and the delay is fixed.
//!
//! ## Overlapping submissions
//!
//! A submission made while an earlier reply is still pending is governed by
//! `OverlapPolicy`:
//! - `LastFireWins`: every submission keeps its own reply timer. Each timer
//!   overwrites the bot region when it fires; the last one to fire wins.
//! - `CancelPrevious`: the new submission cancels the pending reply of the
//!   previous one, so only the newest reply ever fires.
//!
use super::element::TextElement;
use super::scheduler::{ScheduledTask, Scheduler};
use serde::Deserialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Text shown in the bot region while a reply is pending.
pub const PENDING_TEXT: &str = "Processing...";

/// The bot's only reply.
pub const REPLY_TEXT: &str = "This is a simulated bot response.";

/// Delay between a submission and its reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(2000);

/// What a new submission does to a reply that is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Keep every reply timer; the last one to fire wins.
    #[default]
    LastFireWins,
    /// Cancel the previous pending reply.
    CancelPrevious,
}

/// Lifecycle of the bot message region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    /// Nothing submitted yet.
    Idle,
    /// At least one reply is scheduled and has not fired.
    Pending,
    /// A reply was written and none is outstanding.
    Answered,
}

/// How the triggering event should proceed after the handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Suppress the default action (form submission, navigation).
    PreventDefault,
    /// Let the default action happen.
    Proceed,
}

impl EventDisposition {
    pub fn default_prevented(self) -> bool {
        matches!(self, EventDisposition::PreventDefault)
    }
}

#[derive(Default)]
struct Lifecycle {
    outstanding: usize,
    answered: bool,
    last_reply: Option<ScheduledTask>,
}

fn lock(lifecycle: &Mutex<Lifecycle>) -> MutexGuard<'_, Lifecycle> {
    lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The chat widget's submit handler, with every collaborator injected.
pub struct ChatFormHandler {
    input: Arc<dyn TextElement>,
    user_display: Arc<dyn TextElement>,
    bot_display: Arc<dyn TextElement>,
    scheduler: Arc<dyn Scheduler>,
    policy: OverlapPolicy,
    lifecycle: Arc<Mutex<Lifecycle>>,
}

impl ChatFormHandler {
    pub fn new(
        input: Arc<dyn TextElement>,
        user_display: Arc<dyn TextElement>,
        bot_display: Arc<dyn TextElement>,
        scheduler: Arc<dyn Scheduler>,
        policy: OverlapPolicy,
    ) -> Self {
        Self {
            input,
            user_display,
            bot_display,
            scheduler,
            policy,
            lifecycle: Arc::new(Mutex::new(Lifecycle::default())),
        }
    }

    /// # Handle Submission (`handle_submit`)
    ///
    /// Moves the input text to the user region, clears the input, marks the
    /// bot region as pending and schedules the reply. Never blocks.
    ///
    /// Any text is accepted, including the empty string. The text is stored
    /// as plain text; renderers escape it.
    ///
    /// ## Returns
    ///
    /// * `EventDisposition::PreventDefault`, for every input.
    pub fn handle_submit(&self) -> EventDisposition {
        let value = self.input.text();
        self.user_display.set_text(&value);
        self.input.set_text("");
        self.bot_display.set_text(PENDING_TEXT);
        debug!("Submitted message ({} chars), reply pending", value.chars().count());

        {
            let mut lifecycle = lock(&self.lifecycle);
            if self.policy == OverlapPolicy::CancelPrevious {
                if let Some(previous) = lifecycle.last_reply.take() {
                    if previous.cancel() {
                        lifecycle.outstanding -= 1;
                        debug!("Cancelled the previous pending reply");
                    }
                }
            }
            lifecycle.outstanding += 1;
        }

        // Scheduled without the lifecycle lock held; a scheduler may fire inline.
        let bot_display = Arc::clone(&self.bot_display);
        let lifecycle = Arc::clone(&self.lifecycle);
        let reply = self.scheduler.schedule(
            REPLY_DELAY,
            Box::new(move || {
                let mut lifecycle = lock(&lifecycle);
                bot_display.set_text(REPLY_TEXT);
                lifecycle.outstanding = lifecycle.outstanding.saturating_sub(1);
                lifecycle.answered = true;
                debug!("Bot reply delivered, {} still pending", lifecycle.outstanding);
            }),
        );
        lock(&self.lifecycle).last_reply = Some(reply);

        EventDisposition::PreventDefault
    }

    pub fn state(&self) -> BotState {
        let lifecycle = lock(&self.lifecycle);
        if lifecycle.outstanding > 0 {
            BotState::Pending
        } else if lifecycle.answered {
            BotState::Answered
        } else {
            BotState::Idle
        }
    }

    /// Replies scheduled that have neither fired nor been cancelled.
    pub fn outstanding(&self) -> usize {
        lock(&self.lifecycle).outstanding
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }
}

impl fmt::Debug for ChatFormHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatFormHandler")
            .field("policy", &self.policy)
            .field("state", &self.state())
            .field("outstanding", &self.outstanding())
            .finish()
    }
}
