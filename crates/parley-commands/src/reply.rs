//! `reply <text>`: echo text back after expanding template placeholders.
//!
//! Any function another command published into the template namespace
//! is available, e.g. `reply lunch: {{ random pizza sushi }}`.

use std::sync::Arc;

use parley_core::matcher::REMAINING_TEXT;
use parley_core::{ChatClient, Command, Matcher, PrefixMatcher, template};
use parley_types::HelpEntry;
use tracing::debug;

/// Declared name of the command.
pub const NAME: &str = "reply";

pub struct ReplyCommand {
    client: Arc<dyn ChatClient>,
    enabled: bool,
}

impl ReplyCommand {
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

impl Command for ReplyCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        let client = Arc::clone(&self.client);
        Box::new(PrefixMatcher::new(NAME, move |result, message| {
            let text = result.get_string(REMAINING_TEXT);
            if text.is_empty() {
                return client.send_message(message, "Usage: `reply <text>`");
            }
            match template::render(text) {
                Ok(rendered) => client.send_message(message, &rendered),
                Err(e) => {
                    debug!(error = %e, "template rendering failed");
                    client.reply_error(message, &anyhow::Error::new(e))
                }
            }
        }))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn help(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("reply <text>", "send the text back, expanding {{ function args }}")
                .example("reply hello")
                .example("reply lunch: {{ random pizza sushi }}"),
        ]
    }
}
