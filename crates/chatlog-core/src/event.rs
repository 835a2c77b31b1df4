use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use time::macros::{format_description, offset};

use crate::{Error, Result};

/// Nickname used when a profile is absent or unreadable
pub const UNKNOWN_NICKNAME: &str = "Unknown";

/// Replay chat timestamps are rendered at a fixed +09:00 offset.
const LOCAL_OFFSET: time::UtcOffset = offset!(+9);

/// A single chat message from the replay chat API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "messageTime")]
    pub message_time: i64,
    #[serde(rename = "userIdHash")]
    pub user_id_hash: String,
    pub content: String,
    /// JSON-encoded profile blob. The key is always present but may be null.
    #[serde(deserialize_with = "nullable")]
    pub profile: Option<String>,
}

impl ChatEvent {
    /// Nickname from the profile blob, or [`UNKNOWN_NICKNAME`]
    pub fn nickname(&self) -> String {
        let Some(blob) = self.profile.as_deref() else {
            return UNKNOWN_NICKNAME.to_string();
        };
        if blob.is_empty() || blob == "null" {
            return UNKNOWN_NICKNAME.to_string();
        }

        serde_json::from_str::<serde_json::Value>(blob)
            .ok()
            .and_then(|profile| {
                profile
                    .get("nickname")
                    .and_then(|n| n.as_str())
                    .map(|n| n.to_string())
            })
            .unwrap_or_else(|| UNKNOWN_NICKNAME.to_string())
    }

    /// `YYYY-MM-DD HH:MM:SS` at the fixed local offset, sub-second part dropped
    pub fn local_timestamp(&self) -> Result<String> {
        let seconds = self.message_time.div_euclid(1000);
        let utc = OffsetDateTime::from_unix_timestamp(seconds).map_err(|e| {
            Error::Protocol(format!(
                "messageTime {} out of range: {}",
                self.message_time, e
            ))
        })?;

        utc.to_offset(LOCAL_OFFSET)
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to format timestamp: {}", e)))
    }
}

/// Deserialize a key that must be present but may hold `null`.
pub(crate) fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}
