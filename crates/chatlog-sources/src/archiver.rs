//! Paginated archival loop

use std::path::PathBuf;
use std::time::Duration;

use chatlog_core::{Cursor, Error, LogLine, Result};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::api::{ChatApi, SUCCESS_CODE};

#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Directory receiving `chatLog-{id}.log`
    pub output_dir: PathBuf,
    /// Pause before every request
    pub request_delay: Duration,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            request_delay: Duration::from_millis(500),
        }
    }
}

/// Why an archival run stopped without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A page arrived with a null next cursor
    LastPage,
    /// The API answered with a non-success code or no chats
    NoMoreChats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub video_id: String,
    pub path: PathBuf,
    /// Pages whose chats were written
    pub pages: usize,
    pub lines: usize,
    pub completion: Completion,
}

#[derive(Default)]
struct Progress {
    pages: usize,
    lines: usize,
}

/// Drains one replay's chat history into a log file
pub struct Archiver<A> {
    api: A,
    options: ArchiveOptions,
}

impl<A: ChatApi> Archiver<A> {
    pub fn new(api: A, options: ArchiveOptions) -> Self {
        Self { api, options }
    }

    pub fn log_path(&self, video_id: &str) -> PathBuf {
        self.options
            .output_dir
            .join(format!("chatLog-{}.log", video_id))
    }

    /// Archive every chat of `video_id`, truncating any previous log.
    ///
    /// Lines written before an error stay on disk.
    pub async fn archive(&self, video_id: &str) -> Result<ArchiveSummary> {
        let path = self.log_path(video_id);
        let mut writer = BufWriter::new(File::create(&path).await?);
        let mut progress = Progress::default();

        let outcome = self.drain(video_id, &mut writer, &mut progress).await;
        let flushed = writer.flush().await;
        let completion = outcome?;
        flushed?;

        tracing::info!(
            "Saved {} chat lines from {} pages to {}",
            progress.lines,
            progress.pages,
            path.display()
        );

        Ok(ArchiveSummary {
            video_id: video_id.to_string(),
            path,
            pages: progress.pages,
            lines: progress.lines,
            completion,
        })
    }

    async fn drain(
        &self,
        video_id: &str,
        writer: &mut BufWriter<File>,
        progress: &mut Progress,
    ) -> Result<Completion> {
        let mut cursor = Cursor::initial();

        loop {
            tokio::time::sleep(self.options.request_delay).await;
            let page = self.api.fetch_page(video_id, &cursor).await?;

            if page.code != SUCCESS_CODE {
                tracing::info!("No valid chat data (code {}), request finished", page.code);
                return Ok(Completion::NoMoreChats);
            }

            let content = page
                .content
                .ok_or_else(|| Error::Protocol("missing field `content`".to_string()))?;
            let chats = match content.video_chats {
                None => return Err(Error::Protocol("missing field `videoChats`".to_string())),
                Some(Some(chats)) if !chats.is_empty() => chats,
                Some(_) => {
                    tracing::info!("No more chats, request finished");
                    return Ok(Completion::NoMoreChats);
                }
            };

            for event in &chats {
                let line = LogLine::from_event(event)?;
                writer.write_all(format!("{}\n", line).as_bytes()).await?;
                progress.lines += 1;
            }
            progress.pages += 1;

            match content.next_player_message_time {
                None => {
                    return Err(Error::Protocol(
                        "missing field `nextPlayerMessageTime`".to_string(),
                    ));
                }
                Some(None) => {
                    tracing::info!("Reached the last chat page");
                    return Ok(Completion::LastPage);
                }
                Some(Some(next)) => {
                    tracing::info!("Chat page archived (nextPlayerMessageTime: {})", next);
                    cursor = next;
                }
            }
        }
    }
}
