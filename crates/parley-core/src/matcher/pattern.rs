//! Regular-expression matcher.

use parley_types::Message;
use regex::Regex;

use super::{FULL_MATCH, Match, MatchResult, Matcher, MatcherError, Runner, runner};

/// Matches the whole message against a regular expression.
///
/// The pattern is anchored and case-insensitive. Every named capture
/// group that participated in the match becomes a parameter; the full
/// match is stored under [`FULL_MATCH`].
pub struct RegexMatcher {
    regex: Regex,
    runner: Runner,
}

impl RegexMatcher {
    /// Compile `pattern` and pair it with an action.
    pub fn new<F>(pattern: &str, run: F) -> Result<Self, MatcherError>
    where
        F: Fn(&MatchResult, &Message) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Ok(Self::from_regex(compile(pattern)?, runner(run)))
    }

    /// Use an already compiled expression as-is.
    pub fn from_regex(regex: Regex, runner: Runner) -> Self {
        Self { regex, runner }
    }
}

/// Compile a user pattern into the anchored, case-insensitive form used
/// by [`RegexMatcher`].
pub fn compile(pattern: &str) -> Result<Regex, MatcherError> {
    Regex::new(&format!("(?i)^(?:{pattern})$")).map_err(|source| MatcherError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl Matcher for RegexMatcher {
    fn evaluate(&self, message: &Message) -> Option<Match> {
        let text = message.text.trim();
        let captures = self.regex.captures(text)?;

        let mut result = MatchResult::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                result.set(name, value.as_str());
            }
        }
        result.set(FULL_MATCH, &captures[0]);
        Some(Match::run(self.runner.clone(), result))
    }
}
