//! Ordered combination of matchers.

use parley_types::Message;

use super::{Match, Matcher};

/// Tries each sub-matcher in order and returns the first match.
///
/// Lets one command answer to several patterns.
#[derive(Default)]
pub struct GroupMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl GroupMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-matcher; earlier sub-matchers take priority.
    pub fn with(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl Matcher for GroupMatcher {
    fn evaluate(&self, message: &Message) -> Option<Match> {
        self.matchers.iter().find_map(|m| m.evaluate(message))
    }
}
