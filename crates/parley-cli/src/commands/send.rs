//! `parley send`: dispatch one message.

use clap::Args;
use parley_types::Message;
use tracing::debug;

use super::Bot;
use crate::console::sequenced;

/// Arguments for `parley send`.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message text; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Channel the message appears to come from.
    #[arg(long, default_value = "console")]
    pub channel: String,

    /// User the message appears to come from.
    #[arg(long, default_value = "local")]
    pub user: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub fn run(args: SendArgs) -> anyhow::Result<()> {
    let bot = Bot::load(args.config.as_deref())?;
    let message = sequenced(Message::new(args.channel, args.user, args.text.join(" ")), 0);

    match bot.commands.dispatch(&message) {
        Some(name) => {
            debug!(command = name, "message handled");
            if bot.commands.runs_async(name) {
                bot.settle(&[0]);
            }
        }
        None => eprintln!("no command matched"),
    }
    Ok(())
}
