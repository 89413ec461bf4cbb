//! Commands shipped with the parley chat bot.
//!
//! | Command | Matcher | Behaviour |
//! |---------|---------|-----------|
//! | [`PingCommand`] | text `ping` | replies `pong` |
//! | [`ReplyCommand`] | prefix `reply` | renders the rest through the template namespace |
//! | [`RandomCommand`] | prefix `random` | picks one of the given options |
//! | [`HelpCommand`] | prefix `help` | lists the help entries of its own registry |
//! | [`ScriptCommand`] | configured regex | runs a shell script on its own thread |
//!
//! [`default_commands`] assembles all of them from a [`Config`].

pub mod help;
pub mod ping;
pub mod random;
pub mod reply;
pub mod script;

use std::sync::Arc;

use parley_core::{ChatClient, Command, Commands, MatcherError};
use parley_types::Config;
use tracing::info;

pub use help::HelpCommand;
pub use ping::PingCommand;
pub use random::RandomCommand;
pub use reply::ReplyCommand;
pub use script::{ScriptCommand, ScriptError};

/// Errors raised while assembling commands from configuration.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A script's pattern is not a valid regular expression.
    #[error("script `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: MatcherError,
    },

    /// A script argument names a group its pattern does not define.
    #[error("script `{name}`: argument `{arg}` is not a named group of its pattern")]
    UnknownArgument { name: String, arg: String },
}

/// Build a registry holding one command per configured script.
///
/// Fails on the first script whose pattern or argument list is invalid.
pub fn script_commands(
    client: &Arc<dyn ChatClient>,
    config: &Config,
) -> Result<Commands, CommandError> {
    let mut scripts = Commands::new();
    for script in &config.commands.scripts {
        let command = ScriptCommand::new(script, Arc::clone(client))?
            .enabled(config.commands.is_enabled(&script.name));
        scripts.register(command);
    }
    Ok(scripts)
}

/// Assemble the full command set.
///
/// Built-ins come first, in the order `ping`, `reply`, `random`, `help`;
/// the script commands are merged after them. The returned registry is
/// the one [`HelpCommand`] reports on.
pub fn default_commands(
    client: Arc<dyn ChatClient>,
    config: &Config,
) -> Result<Arc<Commands>, CommandError> {
    let scripts = script_commands(&client, config)?;
    let enabled = |name: &str| config.commands.is_enabled(name);

    let commands = Arc::new_cyclic(|registry| {
        let mut commands = Commands::new();
        commands.register_all([
            Some(Box::new(PingCommand::new(Arc::clone(&client)).enabled(enabled(ping::NAME)))
                as Box<dyn Command>),
            Some(Box::new(ReplyCommand::new(Arc::clone(&client)).enabled(enabled(reply::NAME)))
                as Box<dyn Command>),
            Some(
                Box::new(RandomCommand::new(Arc::clone(&client)).enabled(enabled(random::NAME)))
                    as Box<dyn Command>,
            ),
            Some(Box::new(
                HelpCommand::new(registry.clone(), Arc::clone(&client)).enabled(enabled(help::NAME)),
            ) as Box<dyn Command>),
        ]);
        commands.merge(scripts);
        commands
    });

    info!(count = commands.len(), "commands ready");
    Ok(commands)
}
