//! `help [query]`: list what the bot understands.

use std::sync::{Arc, Weak};

use anyhow::anyhow;
use parley_core::help::{filter_help, format_help};
use parley_core::matcher::REMAINING_TEXT;
use parley_core::{ChatClient, Command, Commands, Matcher, PrefixMatcher};
use parley_types::HelpEntry;

/// Declared name of the command.
pub const NAME: &str = "help";

/// Lists the help entries of the registry that contains it.
///
/// Holds a [`Weak`] reference so the registry does not keep itself
/// alive; build both with [`Arc::new_cyclic`].
pub struct HelpCommand {
    registry: Weak<Commands>,
    client: Arc<dyn ChatClient>,
    enabled: bool,
}

impl HelpCommand {
    pub fn new(registry: Weak<Commands>, client: Arc<dyn ChatClient>) -> Self {
        Self {
            registry,
            client,
            enabled: true,
        }
    }

    /// Switch the command on or off before registration.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        let registry = self.registry.clone();
        let client = Arc::clone(&self.client);
        Box::new(PrefixMatcher::new(NAME, move |result, message| {
            let registry = registry
                .upgrade()
                .ok_or_else(|| anyhow!("command registry has been dropped"))?;
            let query = result.get_string(REMAINING_TEXT);
            let entries = filter_help(&registry.collect_help(), query);

            if entries.is_empty() && !query.is_empty() {
                return client.send_message(message, &format!("No command matches `{query}`."));
            }
            client.send_message(message, &format_help(&entries))
        }))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn help(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("help [command]", "list all commands, or those starting with a word")
                .example("help")
                .example("help ip"),
        ]
    }
}
