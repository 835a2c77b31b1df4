//! Storage layer for chatlog
//!
//! This crate provides:
//! - Export of the `channel` table from the crawler's SQLite database
//! - Loading and ordering of the exported channel list

pub mod channels;
pub mod db;
pub mod error;

pub use channels::{ChannelRecord, load_channels, sort_by_follower, write_channels_json};
pub use db::ChannelStore;
pub use error::{Result, StorageError};
