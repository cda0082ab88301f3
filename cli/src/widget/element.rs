//! # Chatbox Text Elements
//!
//! File: cli/src/widget/element.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The chat handler never touches a concrete UI. It reads and assigns text
//! through the `TextElement` trait, so a terminal, a rendered page or a test
//! can supply the input control and the two display regions.
//!
//! `TextCell` is the in-memory implementation used everywhere in this crate.
//! It is backed by a `tokio::sync::watch` channel, so front-ends can subscribe
//! and redraw whenever a display region changes.
//!
//! Text is plain text. The page template escapes it when rendering.
//!
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// A UI control whose text content can be read and assigned.
///
/// Assignment replaces the previous content; it never appends.
pub trait TextElement: Send + Sync {
    /// Returns the current text content.
    fn text(&self) -> String;

    /// Replaces the text content.
    fn set_text(&self, text: &str);
}

/// Shared, observable text content.
///
/// Clones refer to the same value: a write through one clone is visible
/// through every other clone and wakes every subscriber.
#[derive(Clone)]
pub struct TextCell {
    inner: Arc<watch::Sender<String>>,
}

impl TextCell {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Creates a cell holding `text`.
    pub fn with_text(text: &str) -> Self {
        let (tx, _rx) = watch::channel(text.to_string());
        Self {
            inner: Arc::new(tx),
        }
    }

    /// Subscribes to changes. The receiver starts with the current value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.inner.subscribe()
    }
}

impl Default for TextCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextCell").field(&*self.inner.borrow()).finish()
    }
}

impl TextElement for TextCell {
    fn text(&self) -> String {
        self.inner.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        // `send_replace` stores the value even when nobody is subscribed.
        self.inner.send_replace(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_replaces() {
        let cell = TextCell::with_text("old");
        cell.set_text("new");
        assert_eq!(cell.text(), "new");
        cell.set_text("");
        assert_eq!(cell.text(), "");
    }

    #[test]
    fn test_clones_share_content() {
        let cell = TextCell::new();
        let other = cell.clone();
        other.set_text("shared");
        assert_eq!(cell.text(), "shared");
    }

    #[tokio::test]
    async fn test_subscriber_sees_change() {
        let cell = TextCell::new();
        let mut rx = cell.subscribe();
        assert!(!rx.has_changed().unwrap());

        cell.set_text("Processing...");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "Processing...");
    }
}
