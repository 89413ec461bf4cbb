//! Configuration schema types.
//!
//! All structs accept both `snake_case` and `camelCase` field names in
//! JSON via `#[serde(alias)]`. Unknown fields are silently ignored for
//! forward compatibility, and every section falls back to its default
//! when absent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// Root configuration for the parley bot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Command selection and script definitions.
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Config {
    /// Parse and validate a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for script in &self.commands.scripts {
            let name = script.name.trim();
            if name.is_empty() {
                return Err(ParleyError::ConfigInvalid {
                    reason: "script with an empty name".into(),
                });
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(ParleyError::ConfigInvalid {
                    reason: format!("duplicate script name `{name}`"),
                });
            }
            if script.pattern.trim().is_empty() {
                return Err(ParleyError::ConfigInvalid {
                    reason: format!("script `{name}` has an empty pattern"),
                });
            }
            if script.script.trim().is_empty() {
                return Err(ParleyError::ConfigInvalid {
                    reason: format!("script `{name}` has no script path"),
                });
            }
            if script.timeout_secs == 0 {
                return Err(ParleyError::ConfigInvalid {
                    reason: format!("script `{name}` has a zero timeout"),
                });
            }
        }
        Ok(())
    }
}

// ── Commands ─────────────────────────────────────────────────────────────

/// Which commands run, plus the config-driven script commands.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommandsConfig {
    /// Names of built-in or script commands to switch off.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Shell scripts exposed as chat commands.
    #[serde(default)]
    pub scripts: Vec<ScriptConfig>,
}

impl CommandsConfig {
    /// Whether the command with the given display name may be registered.
    ///
    /// Comparison is case-insensitive.
    pub fn is_enabled(&self, name: &str) -> bool {
        !self
            .disabled
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }
}

/// A shell script reachable from chat.
///
/// `pattern` is a regular expression with named groups; `args` lists the
/// group names whose captures are passed to the script, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Display name of the command.
    pub name: String,

    /// Regular expression matched against the whole message text.
    pub pattern: String,

    /// Path of the script to execute.
    pub script: String,

    /// Named capture groups passed as positional arguments.
    #[serde(default)]
    pub args: Vec<String>,

    /// Program the script is handed to.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Upper bound on a single run.
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,

    /// One-line description for `help`.
    #[serde(default)]
    pub description: String,

    /// Example invocations for `help`.
    #[serde(default)]
    pub examples: Vec<String>,
}

fn default_interpreter() -> String {
    "/bin/sh".into()
}

fn default_timeout_secs() -> u64 {
    30
}
