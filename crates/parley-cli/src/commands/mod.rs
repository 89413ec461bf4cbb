//! Subcommand implementations and the setup they share.

pub mod run;
pub mod send;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use parley_commands::default_commands;
use parley_core::Commands;
use parley_core::help::{filter_help, format_help};
use tracing::warn;

use crate::config_loader;
use crate::console::ConsoleClient;

/// Extra time granted to replies beyond the longest script timeout.
const REPLY_GRACE: Duration = Duration::from_secs(1);

/// Arguments shared by every subcommand that builds the bot.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for `parley help`.
#[derive(Args, Debug)]
pub struct HelpArgs {
    /// Only show commands whose usage starts with this word.
    pub query: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// A fully assembled bot talking to the terminal.
pub struct Bot {
    pub client: Arc<ConsoleClient>,
    pub commands: Arc<Commands>,
    /// How long to wait for replies from commands that run in the background.
    pub reply_timeout: Duration,
}

impl Bot {
    /// Load configuration and assemble every command.
    pub fn load(config: Option<&str>) -> anyhow::Result<Self> {
        let config = config_loader::load_config(config)?;
        let client = Arc::new(ConsoleClient::stdout());
        let commands =
            default_commands(client.clone(), &config).context("failed to assemble commands")?;

        let longest = config
            .commands
            .scripts
            .iter()
            .map(|s| s.timeout_secs)
            .max()
            .unwrap_or(0);

        Ok(Self {
            client,
            commands,
            reply_timeout: Duration::from_secs(longest) + REPLY_GRACE,
        })
    }

    /// Wait for replies to the messages handed to background commands.
    ///
    /// `awaited` holds the sequence numbers (see
    /// [`sequenced`](crate::console::sequenced)) of those messages only;
    /// replies to synchronous commands were written during dispatch.
    pub fn settle(&self, awaited: &[u64]) {
        if awaited.is_empty() {
            return;
        }
        let missing = self.client.wait_for_replies(awaited, self.reply_timeout);
        if !missing.is_empty() {
            warn!(
                awaited = awaited.len(),
                missing = missing.len(),
                "gave up waiting for background replies"
            );
        }
    }
}

/// `parley commands`: count and sorted names.
pub fn list(args: ConfigArgs) -> anyhow::Result<()> {
    let bot = Bot::load(args.config.as_deref())?;
    let names = bot.commands.names();
    println!("{} commands:", names.len());
    for name in names {
        println!("  {name}");
    }
    Ok(())
}

/// `parley help [query]`: the text the `help` command would send.
pub fn help(args: HelpArgs) -> anyhow::Result<()> {
    let bot = Bot::load(args.config.config.as_deref())?;
    let entries = bot.commands.collect_help();
    let entries = filter_help(&entries, args.query.as_deref().unwrap_or_default());
    print!("{}", format_help(&entries));
    if entries.is_empty() {
        println!();
    }
    Ok(())
}
