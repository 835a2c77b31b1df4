//! PII redaction for archived chat logs
//!
//! [`Redactor`] masks e-mail addresses and phone numbers and rewrites single
//! log lines without their nickname and user hash. [`Sanitizer`] applies it
//! to a whole directory tree of logs.

pub mod redactor;
pub mod sanitizer;

pub use redactor::{DEFAULT_PLACEHOLDER, Redactor};
pub use sanitizer::{SanitizeReport, Sanitizer};
