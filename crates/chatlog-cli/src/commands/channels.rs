use std::path::PathBuf;

use anyhow::Result;
use chatlog_config::Config;
use chatlog_storage::{ChannelStore, load_channels, sort_by_follower, write_channels_json};

use crate::cli::ChannelsCommands;

pub async fn handle(config: &Config, cmd: ChannelsCommands) -> Result<()> {
    match cmd {
        ChannelsCommands::Export { database, output } => {
            let database = database.unwrap_or_else(|| config.channels.database.clone());
            let output = output.unwrap_or_else(|| config.channels.json.clone());
            export(database, output).await
        }
        ChannelsCommands::List { input } => {
            list(input.unwrap_or_else(|| config.channels.json.clone()))
        }
    }
}

async fn export(database: PathBuf, output: PathBuf) -> Result<()> {
    let store = ChannelStore::open(&database).await?;
    let rows = store.export_channels().await?;
    store.close().await;

    write_channels_json(&output, &rows)?;
    println!("✓ Saved {} channels to {}", rows.len(), output.display());

    Ok(())
}

fn list(input: PathBuf) -> Result<()> {
    let mut channels = load_channels(&input)?;
    sort_by_follower(&mut channels);

    for channel in channels {
        println!("{}\t{}", channel.name, channel.follower);
    }

    Ok(())
}
