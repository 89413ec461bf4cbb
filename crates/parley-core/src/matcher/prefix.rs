//! Leading-word matcher.

use parley_types::Message;

use super::{
    FULL_MATCH, Match, MatchResult, Matcher, REMAINING_TEXT, Runner, eq_fold, runner,
};

/// Matches messages that start with a prefix word.
///
/// The prefix must be the whole message or be followed by whitespace, so
/// `reply` matches `reply hi` but not `replying`. The trimmed remainder
/// is stored under [`REMAINING_TEXT`]. The prefix is compared ignoring
/// case, using Unicode lowercase mappings.
pub struct PrefixMatcher {
    prefix: String,
    runner: Runner,
}

impl PrefixMatcher {
    pub fn new<F>(prefix: impl Into<String>, run: F) -> Self
    where
        F: Fn(&MatchResult, &Message) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            prefix: prefix.into(),
            runner: runner(run),
        }
    }

    fn remainder<'a>(&self, text: &'a str) -> Option<&'a str> {
        let width = self.prefix.chars().count();
        let split = text.char_indices().nth(width).map_or(text.len(), |(i, _)| i);
        let (head, rest) = text.split_at(split);
        if !eq_fold(head, &self.prefix) {
            return None;
        }
        if rest.is_empty() {
            return Some(rest);
        }
        rest.starts_with(char::is_whitespace).then(|| rest.trim())
    }
}

impl Matcher for PrefixMatcher {
    fn evaluate(&self, message: &Message) -> Option<Match> {
        let text = message.text.trim();
        let rest = self.remainder(text)?;
        let result = MatchResult::new()
            .with(FULL_MATCH, text)
            .with(REMAINING_TEXT, rest);
        Some(Match::run(self.runner.clone(), result))
    }
}
