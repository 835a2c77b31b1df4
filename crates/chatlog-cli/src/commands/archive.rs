use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chatlog_config::Config;
use chatlog_sources::{ArchiveOptions, Archiver, ChatApi, Completion, HttpChatApi, HttpOptions};

pub async fn handle(config: &Config, ids: Vec<String>, output_dir: Option<PathBuf>) -> Result<()> {
    let api = HttpChatApi::new(HttpOptions {
        base_url: config.api.base_url.clone(),
        user_agent: config.api.user_agent.clone(),
        timeout: config.api.timeout(),
    })?;

    let options = ArchiveOptions {
        output_dir: output_dir.unwrap_or_else(|| config.archive.output_dir.clone()),
        request_delay: config.api.request_delay(),
    };
    std::fs::create_dir_all(&options.output_dir)?;

    let archiver = Archiver::new(api, options);

    if !ids.is_empty() {
        let mut failed = 0;
        for id in &ids {
            if !archive_one(&archiver, id).await {
                failed += 1;
            }
        }
        if failed > 0 {
            anyhow::bail!("{} of {} replays failed to archive", failed, ids.len());
        }
        return Ok(());
    }

    // Operator loop: one replay per line until EOF or an empty line
    let stdin = io::stdin();
    loop {
        print!("Replay ID: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let id = line.trim();
        if id.is_empty() {
            break;
        }

        archive_one(&archiver, id).await;
    }

    Ok(())
}

async fn archive_one<A: ChatApi>(archiver: &Archiver<A>, id: &str) -> bool {
    tracing::info!(video_id = %id, path = %archiver.log_path(id).display(), "Archiving replay chat");

    match archiver.archive(id).await {
        Ok(summary) => {
            let reason = match summary.completion {
                Completion::LastPage => "last page reached",
                Completion::NoMoreChats => "no more chats",
            };
            println!(
                "✓ Saved {} chat lines to {} ({})",
                summary.lines,
                summary.path.display(),
                reason
            );
            true
        }
        Err(e) => {
            eprintln!("✗ Failed to archive replay {}: {}", id, e);
            false
        }
    }
}
