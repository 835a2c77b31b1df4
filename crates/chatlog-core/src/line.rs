use std::fmt;

use crate::{ChatEvent, Result};

/// Pagination token for the replay chat API (`nextPlayerMessageTime`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Cursor used for the first request of a run
    pub fn initial() -> Self {
        Self("0".to_string())
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One archived chat message in its canonical text form:
/// `[YYYY-MM-DD HH:MM:SS] nickname: content (userIdHash)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub nickname: String,
    pub content: String,
    pub user_id_hash: String,
}

impl LogLine {
    pub fn from_event(event: &ChatEvent) -> Result<Self> {
        Ok(Self {
            timestamp: event.local_timestamp()?,
            nickname: event.nickname(),
            content: event.content.clone(),
            user_id_hash: event.user_id_hash.clone(),
        })
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.timestamp, self.nickname, self.content, self.user_id_hash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_cursor() {
        assert_eq!(Cursor::initial().as_str(), "0");
        assert_eq!(Cursor::new("12345").to_string(), "12345");
    }

    #[test]
    fn test_log_line_format() {
        let event = ChatEvent {
            message_time: 1_704_070_800_000,
            user_id_hash: "abcdef1234567890".to_string(),
            content: "call me later".to_string(),
            profile: Some(r#"{"nickname":"Alice"}"#.to_string()),
        };

        let line = LogLine::from_event(&event).unwrap();
        assert_eq!(
            line.to_string(),
            "[2024-01-01 10:00:00] Alice: call me later (abcdef1234567890)"
        );
    }

    #[test]
    fn test_log_line_unknown_nickname() {
        let event = ChatEvent {
            message_time: 0,
            user_id_hash: "ff".to_string(),
            content: "hi".to_string(),
            profile: Some("null".to_string()),
        };

        let line = LogLine::from_event(&event).unwrap();
        assert_eq!(line.to_string(), "[1970-01-01 09:00:00] Unknown: hi (ff)");
    }
}
