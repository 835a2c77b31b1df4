use std::time::Duration;

use async_trait::async_trait;
use chatlog_core::{Cursor, Error, Result};

use crate::api::{ChatApi, ChatPage};

/// Connection settings for [`HttpChatApi`]
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub base_url: String,
    pub user_agent: String,
    /// `None` leaves requests without a timeout
    pub timeout: Option<Duration>,
}

/// [`ChatApi`] backed by the replay chat HTTP endpoint
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(options: HttpOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            Error::Other(anyhow::anyhow!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the chat page for `video_id` starting at `cursor`
    pub fn page_url(&self, video_id: &str, cursor: &Cursor) -> String {
        format!(
            "{}/videos/{}/chats?playerMessageTime={}",
            self.base_url, video_id, cursor
        )
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_page(&self, video_id: &str, cursor: &Cursor) -> Result<ChatPage> {
        let url = self.page_url(video_id, cursor);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::Protocol(format!("Unexpected chat page from {}: {}", url, e)))
    }
}
