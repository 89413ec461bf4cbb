//! Registry behaviour under concurrent first use.
//!
//! A freshly registered registry is shared between many threads that all
//! race to be the first caller. Matcher production is counted to prove
//! compilation happened exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use parley_core::{Command, Commands, Matcher, RegexMatcher};
use parley_types::Message;

const THREADS: usize = 32;
const COMMANDS: usize = 8;

/// Command whose matcher production and runs are counted.
struct Counting {
    name: String,
    pattern: String,
    produced: Arc<AtomicUsize>,
    runs: Arc<AtomicUsize>,
}

impl Command for Counting {
    fn name(&self) -> &str {
        &self.name
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        self.produced.fetch_add(1, Ordering::SeqCst);
        let runs = Arc::clone(&self.runs);
        Box::new(
            RegexMatcher::new(&self.pattern, move |_, _| {
                runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap(),
        )
    }
}

struct Fixture {
    commands: Arc<Commands>,
    produced: Arc<AtomicUsize>,
    runs: Vec<Arc<AtomicUsize>>,
}

/// Commands `cmd0..cmdN`; `cmdI` matches `cmdI` exactly, and every
/// command also matches anything starting with `shared`.
fn fixture() -> Fixture {
    let produced = Arc::new(AtomicUsize::new(0));
    let mut runs = Vec::new();
    let mut commands = Commands::new();

    for i in 0..COMMANDS {
        let counter = Arc::new(AtomicUsize::new(0));
        runs.push(Arc::clone(&counter));
        commands.register(Counting {
            name: format!("cmd{i}"),
            pattern: format!("cmd{i}|shared.*"),
            produced: Arc::clone(&produced),
            runs: counter,
        });
    }

    Fixture {
        commands: Arc::new(commands),
        produced,
        runs,
    }
}

#[test]
fn concurrent_first_dispatch_compiles_once() {
    let Fixture {
        commands,
        produced,
        runs,
    } = fixture();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let commands = Arc::clone(&commands);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let target = t % COMMANDS;
                let name = commands
                    .dispatch(&Message::new("C1", format!("U{t}"), format!("cmd{target}")))
                    .map(str::to_string);
                (target, name, commands.len())
            })
        })
        .collect();

    for handle in handles {
        let (target, name, len) = handle.join().expect("dispatch thread panicked");
        assert_eq!(name.as_deref(), Some(format!("cmd{target}").as_str()));
        assert_eq!(len, COMMANDS);
    }

    assert_eq!(produced.load(Ordering::SeqCst), COMMANDS);
    assert_eq!(commands.compilations(), 1);
    let total_runs: usize = runs.iter().map(|r| r.load(Ordering::SeqCst)).sum();
    assert_eq!(total_runs, THREADS);
}

#[test]
fn concurrent_mixed_calls_see_complete_index() {
    let Fixture {
        commands, produced, ..
    } = fixture();
    let barrier = Arc::new(Barrier::new(THREADS));

    thread::scope(|scope| {
        for t in 0..THREADS {
            let commands = &commands;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                match t % 3 {
                    0 => assert_eq!(commands.len(), COMMANDS),
                    1 => assert_eq!(commands.names().len(), COMMANDS),
                    _ => assert!(commands.run(&Message::new("C1", "U1", "cmd3"))),
                }
            });
        }
    });

    assert_eq!(produced.load(Ordering::SeqCst), COMMANDS);
    assert_eq!(commands.compilations(), 1);
}

#[test]
fn overlapping_patterns_run_only_the_earliest() {
    let Fixture { commands, runs, .. } = fixture();
    let barrier = Arc::new(Barrier::new(THREADS));

    thread::scope(|scope| {
        for _ in 0..THREADS {
            let commands = &commands;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                assert_eq!(
                    commands.dispatch(&Message::new("C1", "U1", "shared message")),
                    Some("cmd0")
                );
            });
        }
    });

    assert_eq!(runs[0].load(Ordering::SeqCst), THREADS);
    assert!(runs[1..].iter().all(|r| r.load(Ordering::SeqCst) == 0));
}

#[test]
fn repeated_calls_never_recompile() {
    let Fixture {
        commands, produced, ..
    } = fixture();

    for _ in 0..100 {
        commands.len();
        commands.names();
        commands.dispatch(&Message::new("C1", "U1", "nothing matches this"));
    }

    assert_eq!(produced.load(Ordering::SeqCst), COMMANDS);
    assert_eq!(commands.compilations(), 1);
}
