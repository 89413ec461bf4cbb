//! Self-executing matcher.

use parley_types::Message;

use super::{Match, Matcher};

/// Matcher that handles the message itself.
///
/// The callback runs during evaluation and reports whether it consumed
/// the message. A consumed message yields [`Match::handled`], which has
/// no runner, so the registry stops scanning without invoking anything.
pub struct ConditionalMatcher {
    handle: Box<dyn Fn(&Message) -> bool + Send + Sync>,
}

impl ConditionalMatcher {
    pub fn new<F>(handle: F) -> Self
    where
        F: Fn(&Message) -> bool + Send + Sync + 'static,
    {
        Self {
            handle: Box::new(handle),
        }
    }
}

impl Matcher for ConditionalMatcher {
    fn evaluate(&self, message: &Message) -> Option<Match> {
        (self.handle)(message).then(Match::handled)
    }
}
