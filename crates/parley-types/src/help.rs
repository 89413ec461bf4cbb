//! Help entries.
//!
//! Commands describe themselves to end users through [`HelpEntry`]
//! values; the registry collects them in registration order.

use serde::{Deserialize, Serialize};

/// A description/example pairing shown by the `help` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Usage line, e.g. `"ip <op> <ip>"`.
    pub command: String,

    /// What the command does.
    pub description: String,

    /// Example invocations.
    #[serde(default)]
    pub examples: Vec<String>,

    /// Optional grouping label.
    #[serde(default)]
    pub category: Option<String>,

    /// Link to further documentation.
    #[serde(default, alias = "helpUrl")]
    pub help_url: Option<String>,
}

impl HelpEntry {
    /// Create an entry with no examples, category or link.
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            examples: Vec::new(),
            category: None,
            help_url: None,
        }
    }

    /// Append an example invocation.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Set the grouping label.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the documentation link.
    pub fn help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }
}
