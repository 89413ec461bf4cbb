//! Exact-word matcher.

use parley_types::Message;

use super::{Match, MatchResult, Matcher, Runner, eq_fold, runner};

/// Matches when the whole message equals the command word.
///
/// Comparison ignores case (Unicode lowercase) and surrounding whitespace.
pub struct TextMatcher {
    command: String,
    runner: Runner,
}

impl TextMatcher {
    pub fn new<F>(command: impl Into<String>, run: F) -> Self
    where
        F: Fn(&MatchResult, &Message) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            command: command.into(),
            runner: runner(run),
        }
    }
}

impl Matcher for TextMatcher {
    fn evaluate(&self, message: &Message) -> Option<Match> {
        let text = message.text.trim();
        if !eq_fold(text, &self.command) {
            return None;
        }
        let result = MatchResult::new().with(super::FULL_MATCH, text);
        Some(Match::run(self.runner.clone(), result))
    }
}
