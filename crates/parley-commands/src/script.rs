//! Shell scripts exposed as chat commands.
//!
//! Each configured script becomes one [`ScriptCommand`]. Its pattern's
//! named groups supply the script's positional arguments, the script runs
//! on a dedicated thread under a timeout, and the outcome is posted back
//! as `OK:\n<stdout>` or `ERROR:\n<reason>`.

use std::io::Read;
use std::process::{Child, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use parley_core::matcher::{compile_pattern, runner};
use parley_core::{ChatClient, Command, Matcher, RegexMatcher};
use parley_types::{HelpEntry, ScriptConfig};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::CommandError;

/// How often a running script is checked for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Help category shared by all script commands.
const CATEGORY: &str = "Scripts";

/// Errors from a single script run.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{status}\n{stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An interpreter, a script path and a time limit.
#[derive(Debug, Clone)]
pub struct Script {
    interpreter: String,
    path: String,
    timeout: Duration,
}

impl Script {
    pub fn new(interpreter: impl Into<String>, path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            path: path.into(),
            timeout,
        }
    }

    /// Run to completion and return stdout.
    ///
    /// A non-zero exit is an error carrying stderr. The timeout covers the
    /// whole run, including output still held open by processes the
    /// script left in the background; on expiry the script's entire
    /// process group is killed.
    pub fn run(&self, args: &[String]) -> Result<String, ScriptError> {
        let mut command = std::process::Command::new(&self.interpreter);
        command
            .arg(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| ScriptError::Spawn {
            program: self.interpreter.clone(),
            source,
        })?;

        // Drain both pipes concurrently so a chatty script cannot block
        // on a full pipe while we wait for it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                kill_group(&mut child);
                return Err(ScriptError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        // The interpreter is gone, but a background process may still
        // hold the pipes open.
        let (Some(stdout), Some(stderr)) = (receive(&stdout, deadline), receive(&stderr, deadline))
        else {
            kill_group(&mut child);
            return Err(ScriptError::Timeout(self.timeout));
        };

        if status.success() {
            Ok(stdout)
        } else {
            Err(ScriptError::Failed {
                status,
                stderr: stderr.trim_end().to_string(),
            })
        }
    }
}

/// Read a pipe to its end on a separate thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Drained output, or `None` if the pipe is still open at `deadline`.
fn receive(output: &Receiver<String>, deadline: Instant) -> Option<String> {
    match output.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Some(text),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

/// Kill the script together with everything it started.
#[cfg(unix)]
fn kill_group(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Ok(pid) = i32::try_from(child.id()) {
        if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            debug!(pid, error = %e, "process group already gone");
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// A configured script reachable from chat.
pub struct ScriptCommand {
    name: String,
    pattern: Regex,
    args: Vec<String>,
    script: Arc<Script>,
    help: HelpEntry,
    client: Arc<dyn ChatClient>,
    enabled: bool,
}

impl std::fmt::Debug for ScriptCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptCommand")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("args", &self.args)
            .field("script", &self.script)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl ScriptCommand {
    /// Validate `config` and build the command.
    ///
    /// The pattern must compile and every argument must name one of its
    /// capture groups.
    pub fn new(config: &ScriptConfig, client: Arc<dyn ChatClient>) -> Result<Self, CommandError> {
        let pattern =
            compile_pattern(&config.pattern).map_err(|source| CommandError::InvalidPattern {
                name: config.name.clone(),
                source,
            })?;

        let groups: Vec<&str> = pattern.capture_names().flatten().collect();
        if let Some(arg) = config.args.iter().find(|a| !groups.contains(&a.as_str())) {
            return Err(CommandError::UnknownArgument {
                name: config.name.clone(),
                arg: arg.clone(),
            });
        }

        let usage = std::iter::once(config.name.clone())
            .chain(config.args.iter().map(|a| format!("<{a}>")))
            .collect::<Vec<_>>()
            .join(" ");
        let mut help = HelpEntry::new(usage, &config.description).category(CATEGORY);
        for example in &config.examples {
            help = help.example(example);
        }

        debug!(command = %config.name, script = %config.script, "script command configured");
        Ok(Self {
            name: config.name.clone(),
            pattern,
            args: config.args.clone(),
            script: Arc::new(Script::new(
                &config.interpreter,
                &config.script,
                Duration::from_secs(config.timeout_secs),
            )),
            help,
            client,
            enabled: true,
        })
    }

    /// Switch the command on or off before registration.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Command for ScriptCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        let name = self.name.clone();
        let arg_names = self.args.clone();
        let script = Arc::clone(&self.script);
        let client = Arc::clone(&self.client);

        let run = runner(move |result, message| {
            let args: Vec<String> = arg_names
                .iter()
                .map(|group| result.get_string(group).to_string())
                .collect();
            let name = name.clone();
            let script = Arc::clone(&script);
            let client = Arc::clone(&client);
            let message = message.clone();

            let thread_name = format!("script-{name}");
            thread::Builder::new()
                .name(thread_name.clone())
                .spawn(move || {
                    let started = Instant::now();
                    let reply = match script.run(&args) {
                        Ok(stdout) => {
                            info!(
                                command = %name,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "script finished"
                            );
                            format!("OK:\n{stdout}")
                        }
                        Err(e) => {
                            warn!(command = %name, error = %e, "script failed");
                            format!("ERROR:\n{e}")
                        }
                    };
                    if let Err(e) = client.send_message(&message, &reply) {
                        warn!(command = %name, error = %e, "failed to deliver script output");
                    }
                })
                .with_context(|| format!("failed to spawn thread `{thread_name}`"))?;
            Ok(())
        });

        Box::new(RegexMatcher::from_regex(self.pattern.clone(), run))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn help(&self) -> Vec<HelpEntry> {
        vec![self.help.clone()]
    }

    fn runs_async(&self) -> bool {
        true
    }
}
