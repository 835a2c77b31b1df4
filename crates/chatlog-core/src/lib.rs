//! Core domain models for chatlog
//!
//! This crate contains:
//! - Chat events as delivered by the replay chat API
//! - The canonical log line format shared by the archiver and the sanitizer
//! - The pagination cursor and the shared error type

pub mod error;
pub mod event;
pub mod line;

pub use error::{Error, Result};
pub use event::{ChatEvent, UNKNOWN_NICKNAME};
pub use line::{Cursor, LogLine};
