//! End-to-end assembly: JSON config in, dispatching registry out.

use std::io::Write;
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::time::Duration;

use parking_lot::Mutex;
use parley_commands::{CommandError, default_commands};
use parley_core::ChatClient;
use parley_types::{Config, Message};
use tempfile::NamedTempFile;

struct Channel(Mutex<Sender<String>>);

impl ChatClient for Channel {
    fn send_message(&self, _message: &Message, text: &str) -> anyhow::Result<()> {
        self.0.lock().send(text.to_string())?;
        Ok(())
    }
}

fn config_with_script(script: &str, disabled: &[&str]) -> Config {
    let raw = serde_json::json!({
        "commands": {
            "disabled": disabled,
            "scripts": [{
                "name": "ip",
                "pattern": r"ip +(?P<op>\w+) +(?P<ip>\d+\.\d+\.\d+\.\d+)",
                "script": script,
                "args": ["op", "ip"],
                "timeoutSecs": 5,
                "description": "allow/check/ban ip to connect to the internet",
                "examples": ["ip allow 192.168.18.44"]
            }]
        }
    });
    Config::from_json(&raw.to_string()).unwrap()
}

#[test]
fn full_command_set_dispatches_in_priority_order() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"echo "$1 $2 done""#).unwrap();
    let config = config_with_script(file.path().to_str().unwrap(), &[]);

    let (tx, rx) = channel();
    let commands = default_commands(Arc::new(Channel(Mutex::new(tx))), &config).unwrap();

    assert_eq!(
        commands.names(),
        vec!["help", "ip", "ping", "random", "reply"]
    );

    assert_eq!(commands.dispatch(&Message::new("C1", "U1", "ping")), Some("ping"));
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), "pong");

    assert_eq!(
        commands.dispatch(&Message::new("C1", "U1", "ip allow 192.168.18.44")),
        Some("ip")
    );
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(10)).unwrap(),
        "OK:\nallow 192.168.18.44 done\n"
    );

    assert_eq!(commands.dispatch(&Message::new("C1", "U1", "weather")), None);
}

#[test]
fn help_lists_scripts_under_their_own_category() {
    let config = config_with_script("/opt/bot/allow_ip.sh", &[]);
    let (tx, rx) = channel();
    let commands = default_commands(Arc::new(Channel(Mutex::new(tx))), &config).unwrap();

    commands.run(&Message::new("C1", "U1", "help"));
    let text = rx.recv_timeout(Duration::from_secs(1)).unwrap();
    let general = text.find("*General*").unwrap();
    let scripts = text.find("*Scripts*").unwrap();
    assert!(general < scripts);
    assert!(text.contains("`ip <op> <ip>` -- allow/check/ban ip to connect to the internet"));
    assert!(text.contains("e.g. `ip allow 192.168.18.44`"));
}

#[test]
fn disabled_script_is_dropped() {
    let config = config_with_script("/opt/bot/allow_ip.sh", &["IP", "help"]);
    let (tx, _rx) = channel();
    let commands = default_commands(Arc::new(Channel(Mutex::new(tx))), &config).unwrap();

    assert_eq!(commands.names(), vec!["ping", "random", "reply"]);
    assert!(!commands.run(&Message::new("C1", "U1", "ip allow 10.0.0.1")));
}

#[test]
fn bad_pattern_is_a_startup_error() {
    let raw = r#"{"commands":{"scripts":[{"name":"x","pattern":"(","script":"x.sh"}]}}"#;
    let config = Config::from_json(raw).unwrap();
    let (tx, _rx) = channel();

    match default_commands(Arc::new(Channel(Mutex::new(tx))), &config) {
        Err(CommandError::InvalidPattern { name, .. }) => assert_eq!(name, "x"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("invalid pattern accepted"),
    }
}

#[test]
fn registry_is_released_when_last_handle_drops() {
    let (tx, _rx) = channel();
    let commands = default_commands(Arc::new(Channel(Mutex::new(tx))), &Config::default()).unwrap();
    let weak = Arc::downgrade(&commands);
    drop(commands);
    assert!(weak.upgrade().is_none());
}
