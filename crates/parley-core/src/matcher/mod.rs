//! Message matchers.
//!
//! A [`Matcher`] is a pure function of an incoming [`Message`] to an
//! optional [`Match`]. A match carries the extracted parameters and,
//! usually, a deferred [`Runner`] that the registry invokes. Matchers
//! never run their runner themselves; [`ConditionalMatcher`] is the one
//! exception and signals "already handled" by returning no runner.

mod conditional;
mod group;
mod pattern;
mod prefix;
mod result;
mod text;

use std::sync::Arc;

use parley_types::Message;

pub use self::conditional::ConditionalMatcher;
pub use self::group::GroupMatcher;
pub use self::prefix::PrefixMatcher;
pub use self::pattern::{RegexMatcher, compile as compile_pattern};
pub use self::result::{FULL_MATCH, MatchResult, REMAINING_TEXT};
pub use self::text::TextMatcher;

/// Deferred command action.
///
/// Errors are the command's own concern: the registry logs them and
/// still reports the message as handled.
pub type Runner = Arc<dyn Fn(&MatchResult, &Message) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure into a [`Runner`].
pub fn runner<F>(f: F) -> Runner
where
    F: Fn(&MatchResult, &Message) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A successful match.
#[derive(Clone)]
pub struct Match {
    /// Action to invoke, `None` when the matcher already handled the message.
    pub runner: Option<Runner>,
    /// Parameters extracted from the message.
    pub result: MatchResult,
}

impl Match {
    /// A match whose runner the registry will invoke.
    pub fn run(runner: Runner, result: MatchResult) -> Self {
        Self {
            runner: Some(runner),
            result,
        }
    }

    /// A match that was handled inside the matcher.
    pub fn handled() -> Self {
        Self {
            runner: None,
            result: MatchResult::default(),
        }
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("runner", &self.runner.as_ref().map(|_| "<runner>"))
            .field("result", &self.result)
            .finish()
    }
}

/// Compare two strings ignoring case, using Unicode lowercase mappings.
pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Decides whether a message belongs to a command.
pub trait Matcher: Send + Sync {
    /// Evaluate the message, returning `None` to decline it.
    fn evaluate(&self, message: &Message) -> Option<Match>;
}

/// Errors raised while building a matcher.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// The regular expression does not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
