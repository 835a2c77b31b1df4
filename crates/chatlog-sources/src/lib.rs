//! Replay chat archival
//!
//! Drains the cursor-paginated replay chat API into a plain-text log, one
//! [`chatlog_core::LogLine`] per chat message.

pub mod api;
pub mod archiver;
pub mod http;

pub use api::{ChatApi, ChatContent, ChatPage, SUCCESS_CODE};
pub use archiver::{ArchiveOptions, ArchiveSummary, Archiver, Completion};
pub use http::{HttpChatApi, HttpOptions};
