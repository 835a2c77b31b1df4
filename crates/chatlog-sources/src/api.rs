//! Chat API trait and response shapes

use std::sync::Arc;

use async_trait::async_trait;
use chatlog_core::{ChatEvent, Cursor, Result};
use serde::{Deserialize, Deserializer};

/// `code` value of a successful response
pub const SUCCESS_CODE: i64 = 200;

/// One page of replay chat history
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPage {
    pub code: i64,
    #[serde(default)]
    pub content: Option<ChatContent>,
}

/// Payload of a chat page.
///
/// Both fields distinguish a missing key (`None`) from an explicit `null`
/// (`Some(None)`): a missing key is a protocol error, `null` is not.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatContent {
    #[serde(rename = "videoChats", default, deserialize_with = "present")]
    pub video_chats: Option<Option<Vec<ChatEvent>>>,

    #[serde(
        rename = "nextPlayerMessageTime",
        default,
        deserialize_with = "present_cursor"
    )]
    pub next_player_message_time: Option<Option<Cursor>>,
}

/// Source of replay chat pages
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetch the page of `video_id`'s chat that starts at `cursor`
    async fn fetch_page(&self, video_id: &str, cursor: &Cursor) -> Result<ChatPage>;
}

#[async_trait]
impl<T: ChatApi + ?Sized> ChatApi for Arc<T> {
    async fn fetch_page(&self, video_id: &str, cursor: &Cursor) -> Result<ChatPage> {
        (**self).fetch_page(video_id, cursor).await
    }
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCursor {
    Text(String),
    Number(i64),
}

fn present_cursor<'de, D>(deserializer: D) -> std::result::Result<Option<Option<Cursor>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCursor>::deserialize(deserializer)?;
    Ok(Some(raw.map(|raw| match raw {
        RawCursor::Text(token) => Cursor::new(token),
        RawCursor::Number(token) => Cursor::new(token.to_string()),
    })))
}
