//! # Chatbox Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Infrastructure shared by the commands:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `ChatboxError` type and the crate-wide `Result`
//! - `templating`: rendering chat documents to HTML pages
//!
pub mod config;
pub mod error;
pub mod templating;
