//! # parley-types
//!
//! Core type definitions for the parley chat bot.
//!
//! This crate is the foundation of the dependency graph -- every other
//! parley crate depends on it. It contains:
//!
//! - **[`error`]** -- [`ParleyError`] and the crate-wide [`Result`] alias
//! - **[`config`]** -- Configuration schema (commands, scripts)
//! - **[`event`]** -- The inbound chat [`Message`]
//! - **[`help`]** -- [`HelpEntry`] values surfaced by the `help` command

pub mod config;
pub mod error;
pub mod event;
pub mod help;

pub use config::{CommandsConfig, Config, ScriptConfig};
pub use error::{ParleyError, Result};
pub use event::Message;
pub use help::HelpEntry;
