//! # Chatbox Widget
//!
//! File: cli/src/widget/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The chat widget: an input control, a user message region, a bot message
//! region and any number of send triggers. Activating a trigger runs
//! `ChatFormHandler::handle_submit`.
//!
//! ## Architecture
//!
//! - `element.rs`: the `TextElement` seam and the observable `TextCell`
//! - `document.rs`: elements, selectors and the canonical chat page
//! - `scheduler.rs`: one-shot reply timers (tokio-backed or manual)
//! - `handler.rs`: the submit handler and its constants
//!
//! `ChatWidget::mount` wires them together: it resolves the three required
//! elements of a `Document` and binds every element matching the trigger
//! selector. Nothing is looked up globally; whoever mounts the widget supplies
//! the document and the scheduler.
//!
//! ## Examples
//!
//! ```rust
//! let selectors = WidgetSelectors::default();
//! let document = Document::chat_page(&selectors);
//! let clock = ManualScheduler::new();
//! let widget = ChatWidget::mount(&document, &selectors, Arc::new(clock.clone()), OverlapPolicy::default())?;
//!
//! widget.input().set_text("Hello");
//! assert!(widget.activate(widget.triggers()[0]).default_prevented());
//! clock.advance(REPLY_DELAY);
//! assert_eq!(widget.bot_display().text(), REPLY_TEXT);
//! ```
//!
use crate::core::error::{ChatboxError, Result};
use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub mod document;
pub mod element;
pub mod handler;
pub mod scheduler;

pub use document::{Document, ElementId, Selector, WidgetSelectors};
pub use element::{TextCell, TextElement};
pub use handler::{BotState, ChatFormHandler, EventDisposition, OverlapPolicy, REPLY_DELAY};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};

/// A `ChatFormHandler` mounted on a document.
#[derive(Debug)]
pub struct ChatWidget {
    handler: ChatFormHandler,
    triggers: Vec<ElementId>,
    input: TextCell,
    user_display: TextCell,
    bot_display: TextCell,
}

impl ChatWidget {
    /// # Mount Widget (`mount`)
    ///
    /// Resolves the input and both display regions, builds the handler and
    /// binds it to every element matching `selectors.trigger`.
    ///
    /// ## Arguments
    ///
    /// * `document`: The markup to mount on. The widget shares the text of its elements.
    /// * `selectors`: Where the widget's elements are.
    /// * `scheduler`: Runs the delayed reply.
    /// * `policy`: What a new submission does to a still-pending reply.
    ///
    /// ## Errors
    ///
    /// Returns `ChatboxError::MissingElement` when the input or a display
    /// region is absent. The widget cannot work without them, so this is
    /// logged at error level. Zero triggers is only a warning.
    pub fn mount(
        document: &Document,
        selectors: &WidgetSelectors,
        scheduler: Arc<dyn Scheduler>,
        policy: OverlapPolicy,
    ) -> Result<Self> {
        let input = locate(document, &selectors.input)?;
        let user_display = locate(document, &selectors.user_display)?;
        let bot_display = locate(document, &selectors.bot_display)?;

        let triggers = document.query_all(&selectors.trigger);
        if triggers.is_empty() {
            warn!(
                "No trigger matches '{}'; the widget can never be activated.",
                selectors.trigger
            );
        }
        info!(
            "Chat widget mounted with {} trigger(s), overlap policy {:?}",
            triggers.len(),
            policy
        );

        let handler = ChatFormHandler::new(
            Arc::new(input.clone()),
            Arc::new(user_display.clone()),
            Arc::new(bot_display.clone()),
            scheduler,
            policy,
        );

        Ok(Self {
            handler,
            triggers,
            input,
            user_display,
            bot_display,
        })
    }

    /// Delivers an activation to `element`. An element that is not a bound
    /// trigger has no handler, so its default action proceeds.
    pub fn activate(&self, element: ElementId) -> EventDisposition {
        if !self.triggers.contains(&element) {
            debug!("Activation on unbound element {:?} ignored", element);
            return EventDisposition::Proceed;
        }
        self.handler.handle_submit()
    }

    pub fn triggers(&self) -> &[ElementId] {
        &self.triggers
    }

    pub fn handler(&self) -> &ChatFormHandler {
        &self.handler
    }

    pub fn input(&self) -> &TextCell {
        &self.input
    }

    pub fn user_display(&self) -> &TextCell {
        &self.user_display
    }

    pub fn bot_display(&self) -> &TextCell {
        &self.bot_display
    }
}

fn locate(document: &Document, selector: &Selector) -> Result<TextCell> {
    match document.query(selector).and_then(|id| document.get(id)) {
        Some(element) => Ok(element.text_cell().clone()),
        None => {
            error!("Chat widget cannot mount: no element matches '{}'", selector);
            Err(anyhow!(ChatboxError::MissingElement {
                selector: selector.to_string(),
            }))
        }
    }
}
