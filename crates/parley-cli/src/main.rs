//! `parley` -- CLI binary for the parley chat bot.
//!
//! Provides the following subcommands:
//!
//! - `parley run` -- Dispatch every line read from stdin as a chat message.
//! - `parley send` -- Dispatch a single message.
//! - `parley commands` -- List the registered commands.
//! - `parley help` -- Print the help text the bot would send.
//!
//! Replies go to stdout; logs go to stderr.

use clap::{Parser, Subcommand};

mod commands;
mod config_loader;
mod console;

/// parley chat bot CLI.
#[derive(Parser)]
#[command(
    name = "parley",
    about = "parley chat bot CLI",
    version,
    disable_help_subcommand = true
)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Read messages from stdin, one per line, and dispatch each.
    Run(commands::run::RunArgs),

    /// Dispatch a single message.
    Send(commands::send::SendArgs),

    /// List registered commands.
    #[command(name = "commands")]
    List(commands::ConfigArgs),

    /// Print help for all commands, or those starting with a query.
    Help(commands::HelpArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await?,
        Commands::Send(args) => commands::send::run(args)?,
        Commands::List(args) => commands::list(args)?,
        Commands::Help(args) => commands::help(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_send_with_global_verbose() {
        let cli = Cli::try_parse_from(["parley", "send", "-v", "reply", "hi", "there"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Send(args) => assert_eq!(args.text, vec!["reply", "hi", "there"]),
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn help_subcommand_is_ours() {
        let cli = Cli::try_parse_from(["parley", "help", "ip"]).unwrap();
        match cli.command {
            Commands::Help(args) => assert_eq!(args.query.as_deref(), Some("ip")),
            _ => panic!("expected help"),
        }
    }

    #[test]
    fn commands_subcommand_takes_config() {
        let cli = Cli::try_parse_from(["parley", "commands", "--config", "/tmp/c.json"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.config.as_deref(), Some("/tmp/c.json")),
            _ => panic!("expected commands"),
        }
    }
}
