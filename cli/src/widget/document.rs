//! # Chatbox Document Model
//!
//! File: cli/src/widget/document.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small, explicit stand-in for page markup. A `Document` is an ordered list
//! of elements, each with a tag, an optional id, a set of classes and a
//! `TextCell` holding its text. Elements are located with `Selector`s
//! (`#id` or `.class`), which is all the chat widget needs to find its input,
//! its two display regions and its triggers.
//!
//! ## Examples
//!
//! ```rust
//! let selectors = WidgetSelectors::default();
//! let document = Document::chat_page(&selectors);
//! let bot = document.query(&selectors.bot_display).expect("chat page has a bot region");
//! let elements = document.snapshot();
//! ```
//!
use super::element::{TextCell, TextElement};
use crate::core::error::ChatboxError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Locates elements by id (`#name`) or by class (`.name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
}

impl FromStr for Selector {
    type Err = ChatboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChatboxError::InvalidSelector(s.to_string());
        let (make, name): (fn(String) -> Selector, &str) = if let Some(name) = s.strip_prefix('#') {
            (Selector::Id, name)
        } else if let Some(name) = s.strip_prefix('.') {
            (Selector::Class, name)
        } else {
            return Err(invalid());
        };
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(make(name.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(name) => write!(f, "#{}", name),
            Selector::Class(name) => write!(f, ".{}", name),
        }
    }
}

/// The selectors the chat widget mounts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSelectors {
    pub input: Selector,
    pub user_display: Selector,
    pub bot_display: Selector,
    pub trigger: Selector,
}

impl Default for WidgetSelectors {
    fn default() -> Self {
        Self {
            input: Selector::Class("input".to_string()),
            user_display: Selector::Id("usermessage".to_string()),
            bot_display: Selector::Id("botmessage".to_string()),
            trigger: Selector::Class("animated-button".to_string()),
        }
    }
}

/// Position of an element inside its `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single node of the document.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: TextCell,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: TextCell::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.text.set_text(text);
        self
    }

    /// Applies a selector as an id, or as a class. Used when building markup from selectors.
    fn marked_by(self, selector: &Selector) -> Self {
        match selector {
            Selector::Id(name) => self.with_id(name),
            Selector::Class(name) => self.with_class(name),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Handle to this element's text. Clones share the content.
    pub fn text_cell(&self) -> &TextCell {
        &self.text
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(name) => self.id.as_deref() == Some(name.as_str()),
            Selector::Class(name) => self.classes.iter().any(|c| c == name),
        }
    }
}

/// Serializable view of an element at a point in time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ElementSnapshot {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
}

/// Ordered collection of elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Canonical Chat Page (`chat_page`)
    ///
    /// Builds the markup the chat widget expects: one input, a user message
    /// region, a bot message region and one send trigger, each marked with the
    /// matching selector.
    pub fn chat_page(selectors: &WidgetSelectors) -> Self {
        let mut document = Self::new();
        document.push(Element::new("div").marked_by(&selectors.user_display));
        document.push(Element::new("div").marked_by(&selectors.bot_display));
        document.push(Element::new("input").marked_by(&selectors.input));
        document.push(
            Element::new("button")
                .marked_by(&selectors.trigger)
                .with_text("Send"),
        );
        document
    }

    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// First element matching `selector`, in document order.
    pub fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.matches(selector))
            .map(ElementId)
    }

    /// Every element matching `selector`, in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(selector))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Current state of every element, in document order. This is what the
    /// page template renders.
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.elements
            .iter()
            .map(|e| ElementSnapshot {
                tag: e.tag().to_string(),
                id: e.id().map(str::to_string),
                classes: e.classes().to_vec(),
                text: e.text_cell().text(),
            })
            .collect()
    }
}
