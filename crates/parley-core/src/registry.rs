//! Command registry and dispatch.
//!
//! [`Commands`] holds registered commands in insertion order, which is
//! also dispatch priority. Matchers and display names are derived lazily
//! in a single compilation step guarded by a [`OnceLock`] owned by the
//! registry, so concurrent first callers compile exactly once and never
//! observe a half-built index. Registration needs `&mut self`, which
//! rules out a reset racing with readers.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut commands = Commands::new();
//! commands.register(PingCommand::new(client.clone()));
//! commands.merge(scripts);
//! if let Some(name) = commands.dispatch(&message) {
//!     tracing::info!(command = name, "handled");
//! }
//! ```

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use parley_types::Message;
use tracing::{debug, error, trace, warn};

use crate::command::Command;
use crate::matcher::Matcher;
use crate::naming::display_name;
use crate::template;

/// One compiled command: its matcher plus the metadata dispatch reports.
struct CompiledEntry {
    name: String,
    matcher: Box<dyn Matcher>,
    runs_async: bool,
}

/// Ordered list of commands. Only the first matching command runs.
#[derive(Default)]
pub struct Commands {
    commands: Vec<Box<dyn Command>>,
    /// Index-aligned with `commands` as of the last compilation.
    compiled: OnceLock<Vec<CompiledEntry>>,
    compilations: AtomicUsize,
}

impl Commands {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single command.
    ///
    /// Same filtering as [`register_all`](Self::register_all).
    pub fn register(&mut self, command: impl Command + 'static) {
        self.register_all([Some(Box::new(command) as Box<dyn Command>)]);
    }

    /// Register commands in order.
    ///
    /// `None` entries and commands reporting [`is_enabled`](Command::is_enabled)
    /// `== false` are skipped silently. Template functions of accepted
    /// commands are published into the [`template`] namespace. Any
    /// previous compilation is discarded.
    pub fn register_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Option<Box<dyn Command>>>,
    {
        for command in commands.into_iter().flatten() {
            if !command.is_enabled() {
                debug!(command = command.name(), "command disabled, skipping");
                continue;
            }
            template::register_functions(command.template_functions());
            self.commands.push(command);
        }
        self.compiled.take();
    }

    /// Fold another registry's commands into this one, after ours.
    ///
    /// The other registry has already filtered its commands; they go
    /// through [`register_all`](Self::register_all) again all the same.
    pub fn merge(&mut self, other: Commands) {
        self.register_all(other.commands.into_iter().map(Some));
    }

    /// Run the first command whose matcher accepts `message`.
    ///
    /// Returns the display name of the command that handled it, or
    /// `None` when nothing matched. A runner that returns an error or
    /// panics is logged; the message still counts as handled and the
    /// error goes no further.
    pub fn dispatch(&self, message: &Message) -> Option<&str> {
        let entries = self.compiled();

        for entry in entries {
            let Some(matched) = entry.matcher.evaluate(message) else {
                continue;
            };

            // No runner means the matcher already executed the command.
            if let Some(runner) = matched.runner {
                debug!(
                    command = %entry.name,
                    runs_async = entry.runs_async,
                    session = %message.session_key(),
                    "running command"
                );
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| (*runner)(&matched.result, message)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(command = %entry.name, error = %e, "command failed"),
                    Err(payload) => error!(
                        command = %entry.name,
                        panic = panic_message(payload.as_ref()),
                        "command panicked"
                    ),
                }
            }

            return Some(entry.name.as_str());
        }

        trace!(session = %message.session_key(), "no command matched");
        None
    }

    /// Boolean form of [`dispatch`](Self::dispatch).
    pub fn run(&self, message: &Message) -> bool {
        self.dispatch(message).is_some()
    }

    /// Number of registered (enabled, non-absent) commands.
    pub fn len(&self) -> usize {
        self.compiled().len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display names of all registered commands, sorted.
    ///
    /// The order is for presentation; dispatch priority stays
    /// registration order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.compiled().iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    /// Whether a command with this display name offloads its work.
    ///
    /// Callers that exit right after dispatch use this to wait for replies
    /// still in flight.
    pub fn runs_async(&self, name: &str) -> bool {
        self.compiled()
            .iter()
            .any(|entry| entry.name == name && entry.runs_async)
    }

    /// How many times the matcher/name index has been built.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::SeqCst)
    }

    /// Registered commands in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    fn compiled(&self) -> &[CompiledEntry] {
        self.compiled.get_or_init(|| self.compile())
    }

    fn compile(&self) -> Vec<CompiledEntry> {
        self.compilations.fetch_add(1, Ordering::SeqCst);

        let mut seen = HashSet::with_capacity(self.commands.len());
        let entries: Vec<CompiledEntry> = self
            .commands
            .iter()
            .map(|command| {
                let name = display_name(command.name());
                if !seen.insert(name.clone()) {
                    warn!(command = %name, "duplicate command name, dispatch uses registration order");
                }
                CompiledEntry {
                    matcher: command.matcher(),
                    runs_async: command.runs_async(),
                    name,
                }
            })
            .collect();

        debug!(count = entries.len(), "compiled command matchers");
        entries
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic>"
    }
}
