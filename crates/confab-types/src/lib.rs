//! Shared domain types for Confab.
//!
//! This crate contains the core domain types used across the Confab console:
//! session keys, chat and transcript types, runtime settings, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, secrecy.

pub mod chat;
pub mod config;
pub mod error;
pub mod memory;
