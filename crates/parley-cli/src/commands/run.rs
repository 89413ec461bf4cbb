//! `parley run`: treat stdin as a chat channel.
//!
//! Each non-empty line is one message. Dispatch happens on tokio's
//! blocking pool, since commands are synchronous and may do I/O.

use std::sync::Arc;

use clap::Args;
use parley_types::Message;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::Bot;
use crate::console::sequenced;

/// Arguments for `parley run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Channel the messages appear to come from.
    #[arg(long, default_value = "console")]
    pub channel: String,

    /// User the messages appear to come from.
    #[arg(long, default_value = "local")]
    pub user: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let bot = Bot::load(args.config.as_deref())?;
    info!(commands = bot.commands.len(), "reading messages from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut handled = 0;
    let mut seq = 0;
    let mut awaited = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        seq += 1;
        let message = sequenced(Message::new(args.channel.as_str(), args.user.as_str(), text), seq);
        let commands = Arc::clone(&bot.commands);
        let outcome = tokio::task::spawn_blocking(move || {
            commands
                .dispatch(&message)
                .map(|name| (name.to_string(), commands.runs_async(name)))
        })
        .await?;

        match outcome {
            Some((name, runs_async)) => {
                debug!(command = %name, "message handled");
                handled += 1;
                if runs_async {
                    awaited.push(seq);
                }
            }
            None => info!(text, "no command matched"),
        }
    }

    bot.settle(&awaited);
    info!(handled, "stdin closed");
    Ok(())
}
