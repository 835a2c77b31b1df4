use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatlog")]
#[command(about = "Archive and sanitize replay chat logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "CHATLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the chat of one or more replays
    ///
    /// Without IDs, prompts for replay IDs until an empty line or EOF.
    Archive {
        /// Replay (video) IDs
        ids: Vec<String>,

        /// Directory for chatLog-<id>.log files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Mask nicknames, e-mails and phone numbers in a tree of chat logs
    Sanitize {
        /// Directory containing original chat logs (default: chat_logs)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output directory for masked logs (default: chat_logs_deploy)
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// Export and inspect the channel table
    #[command(subcommand)]
    Channels(ChannelsCommands),
}

#[derive(Subcommand)]
pub enum ChannelsCommands {
    /// Export the channel table of the crawler database to JSON
    Export {
        /// SQLite database (default: server/sqlite.db)
        #[arg(long)]
        database: Option<PathBuf>,

        /// Output file (default: channels.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print channels ordered by follower count
    List {
        /// Channel JSON file (default: channels.json)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
