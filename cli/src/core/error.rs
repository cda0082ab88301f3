//! # Chatbox Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout the Chatbox application.
//! Errors with a domain meaning (a missing widget element, a broken knowledge
//! base) get a dedicated `ChatboxError` variant; everything else travels as an
//! `anyhow::Error` with context attached at the call site.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ChatboxError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover various domains:
//! - Configuration errors
//! - Widget mounting errors (selectors, missing elements)
//! - FAQ knowledge base errors
//! - Page template errors
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! let id = document
//!     .query(&selector)
//!     .ok_or_else(|| ChatboxError::MissingElement { selector: selector.to_string() })?;
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<ChatboxError>().map_or(false, |ce| matches!(ce, ChatboxError::MissingElement { .. })) => {
//!         eprintln!("The page markup is incomplete.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Chatbox application.
#[derive(Error, Debug)]
pub enum ChatboxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selector '{0}': expected '#id' or '.class'")]
    InvalidSelector(String),

    #[error("Required element '{selector}' not found in document.")]
    MissingElement { selector: String },

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Invalid intent pattern: {source}")]
    Pattern {
        #[from]
        source: regex::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
