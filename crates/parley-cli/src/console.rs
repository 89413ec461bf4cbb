//! Terminal-backed chat client.

use std::collections::HashSet;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use parley_core::ChatClient;
use parley_types::Message;

/// Metadata key carrying the CLI's per-message sequence number.
pub const SEQUENCE_KEY: &str = "console_seq";

/// Stamp `message` with a sequence number so its replies can be awaited.
pub fn sequenced(mut message: Message, seq: u64) -> Message {
    message.metadata.insert(SEQUENCE_KEY.into(), seq.into());
    message
}

fn sequence_of(message: &Message) -> Option<u64> {
    message.metadata.get(SEQUENCE_KEY)?.as_u64()
}

#[derive(Default)]
struct Replies {
    delivered: usize,
    answered: HashSet<u64>,
}

/// Writes every reply as its own line(s) and records which messages were
/// answered.
///
/// Replies may arrive from script threads after dispatch returns;
/// [`wait_for_replies`](Self::wait_for_replies) lets the CLI linger until
/// the messages it handed to background commands have been answered.
pub struct ConsoleClient<W = io::Stdout> {
    out: Mutex<W>,
    replies: Mutex<Replies>,
    arrived: Condvar,
}

impl ConsoleClient {
    /// A client printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleClient<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            replies: Mutex::new(Replies::default()),
            arrived: Condvar::new(),
        }
    }

    /// Number of replies written so far.
    pub fn delivered(&self) -> usize {
        self.replies.lock().delivered
    }

    /// Block until every sequence number in `awaited` got a reply or
    /// `timeout` passes. Returns the ones still unanswered.
    pub fn wait_for_replies(&self, awaited: &[u64], timeout: Duration) -> Vec<u64> {
        let deadline = Instant::now() + timeout;
        let mut replies = self.replies.lock();
        loop {
            let missing: Vec<u64> = awaited
                .iter()
                .copied()
                .filter(|seq| !replies.answered.contains(seq))
                .collect();
            if missing.is_empty() || self.arrived.wait_until(&mut replies, deadline).timed_out() {
                return missing
                    .into_iter()
                    .filter(|seq| !replies.answered.contains(seq))
                    .collect();
            }
        }
    }
}

impl<W: Write + Send> ChatClient for ConsoleClient<W> {
    fn send_message(&self, message: &Message, text: &str) -> anyhow::Result<()> {
        {
            let mut out = self.out.lock();
            writeln!(out, "{text}")?;
            out.flush()?;
        }
        {
            let mut replies = self.replies.lock();
            replies.delivered += 1;
            if let Some(seq) = sequence_of(message) {
                replies.answered.insert(seq);
            }
        }
        self.arrived.notify_all();
        Ok(())
    }
}
