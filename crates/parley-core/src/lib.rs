//! Command dispatch core for the parley chat bot.
//!
//! Given a registry of pluggable [`Command`]s, each exposing a
//! [`Matcher`], this crate decides which single command handles an
//! incoming [`Message`](parley_types::Message) and invokes it.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matcher`] | [`Matcher`] trait, [`MatchResult`] and the concrete matchers |
//! | [`command`] | [`Command`] capability trait and the [`ChatClient`] it talks through |
//! | [`registry`] | [`Commands`]: ordered registration, lazy compilation, first-match dispatch |
//! | [`help`] | Help aggregation and formatting |
//! | [`template`] | Process-wide template-function namespace and renderer |
//! | [`naming`] | Display-name derivation |
//!
//! # Dispatch flow
//!
//! ```text
//! Commands::register(cmd) ──> commands[]          (insertion order = priority)
//!                                  │
//!                     first dispatch / len / names
//!                                  │
//!                        compile once (OnceLock)
//!                                  │
//!                      matchers[] + names[]  ──> dispatch(msg)
//!                                                   │
//!                                  first Some(Match) wins, runner invoked
//! ```

pub mod command;
pub mod help;
pub mod matcher;
pub mod naming;
pub mod registry;
pub mod template;

pub use command::{ChatClient, Command};
pub use matcher::{
    ConditionalMatcher, GroupMatcher, Match, MatchResult, Matcher, MatcherError, PrefixMatcher,
    RegexMatcher, Runner, TextMatcher,
};
pub use registry::Commands;
pub use template::{TemplateError, TemplateFunction, TemplateFunctions};
