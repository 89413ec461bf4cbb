//! Command capability trait.
//!
//! A [`Command`] must name itself and produce a [`Matcher`]. Everything
//! else is an optional capability expressed as a provided method:
//!
//! | Capability | Method | Default |
//! |------------|--------|---------|
//! | Enablement | [`is_enabled`](Command::is_enabled) | `true` |
//! | Help entries | [`help`](Command::help) | none |
//! | Template functions | [`template_functions`](Command::template_functions) | none |
//! | Async execution marker | [`runs_async`](Command::runs_async) | `false` |
//!
//! Commands talk back to the chat through a [`ChatClient`].

use parley_types::{HelpEntry, Message};

use crate::matcher::Matcher;
use crate::template::TemplateFunctions;

/// A pluggable chat command.
pub trait Command: Send + Sync {
    /// Declared display name (e.g. `"ping"`).
    ///
    /// Normalised through [`naming::display_name`](crate::naming::display_name)
    /// when the registry compiles, so `"PingCommand"` is listed as `"Ping"`.
    fn name(&self) -> &str;

    /// Build the matcher deciding which messages this command handles.
    ///
    /// Called once per registry compilation.
    fn matcher(&self) -> Box<dyn Matcher>;

    /// Whether the command should be registered at all.
    ///
    /// Checked once, at registration time.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Entries listed by the `help` command.
    fn help(&self) -> Vec<HelpEntry> {
        Vec::new()
    }

    /// Functions published into the process-wide template namespace on
    /// registration.
    fn template_functions(&self) -> TemplateFunctions {
        TemplateFunctions::new()
    }

    /// Whether the command's actions offload work to their own thread.
    ///
    /// Informational: scheduling stays the command's responsibility.
    fn runs_async(&self) -> bool {
        false
    }
}

/// Outbound side of the chat transport, as seen by commands.
pub trait ChatClient: Send + Sync {
    /// Post `text` into the conversation `message` came from.
    fn send_message(&self, message: &Message, text: &str) -> anyhow::Result<()>;

    /// Report a failure back to the user.
    fn reply_error(&self, message: &Message, error: &anyhow::Error) -> anyhow::Result<()> {
        self.send_message(message, &format!("Error: {error:#}"))
    }
}
