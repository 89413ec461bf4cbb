//! `ping` liveness check.

use std::sync::Arc;

use parley_core::{ChatClient, Command, Matcher, TextMatcher};
use parley_types::HelpEntry;

/// Declared name of the command.
pub const NAME: &str = "ping";

/// Replies `pong` to a bare `ping`.
pub struct PingCommand {
    client: Arc<dyn ChatClient>,
    enabled: bool,
}

impl PingCommand {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
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

impl Command for PingCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        let client = Arc::clone(&self.client);
        Box::new(TextMatcher::new(NAME, move |_, message| {
            client.send_message(message, "pong")
        }))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn help(&self) -> Vec<HelpEntry> {
        vec![HelpEntry::new("ping", "check whether the bot is alive").example("ping")]
    }
}
