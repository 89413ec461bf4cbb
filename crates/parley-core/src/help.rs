//! Help aggregation.
//!
//! [`Commands::collect_help`] gathers the [`HelpEntry`] values of every
//! registered command; [`filter_help`] and [`format_help`] turn them into
//! what the `help` command prints.

use parley_types::HelpEntry;

use crate::registry::Commands;

/// Category heading for entries without one.
const UNCATEGORIZED: &str = "General";

impl Commands {
    /// Help entries of all registered commands.
    ///
    /// Follows registration order, and each command's own entry order
    /// within it. Nothing is deduplicated or sorted. Does not compile
    /// the registry.
    pub fn collect_help(&self) -> Vec<HelpEntry> {
        self.iter().flat_map(|command| command.help()).collect()
    }
}

/// Entries whose usage line starts with `query`, ignoring case.
///
/// An empty query keeps everything.
pub fn filter_help(entries: &[HelpEntry], query: &str) -> Vec<HelpEntry> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| e.command.to_lowercase().starts_with(&query))
        .cloned()
        .collect()
}

/// Render entries as plain text grouped by category.
///
/// Categories appear in the order they are first seen; entries keep
/// their relative order within a category.
pub fn format_help(entries: &[HelpEntry]) -> String {
    if entries.is_empty() {
        return "No commands available.".into();
    }

    let mut categories: Vec<&str> = Vec::new();
    for entry in entries {
        let category = entry.category.as_deref().unwrap_or(UNCATEGORIZED);
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    let mut out = String::new();
    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("*{category}*\n"));
        for entry in entries
            .iter()
            .filter(|e| e.category.as_deref().unwrap_or(UNCATEGORIZED) == *category)
        {
            out.push_str(&format!("  `{}` -- {}\n", entry.command, entry.description));
            for example in &entry.examples {
                out.push_str(&format!("      e.g. `{example}`\n"));
            }
            if let Some(url) = &entry.help_url {
                out.push_str(&format!("      more: {url}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use parley_types::Message;

    use super::*;
    use crate::command::Command;
    use crate::matcher::{Matcher, TextMatcher};

    struct Documented {
        name: &'static str,
        entries: Vec<HelpEntry>,
        enabled: bool,
    }

    impl Command for Documented {
        fn name(&self) -> &str {
            self.name
        }

        fn matcher(&self) -> Box<dyn Matcher> {
            Box::new(TextMatcher::new(self.name, |_, _| Ok(())))
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn help(&self) -> Vec<HelpEntry> {
            self.entries.clone()
        }
    }

    fn documented(name: &'static str, entries: Vec<HelpEntry>) -> Documented {
        Documented {
            name,
            entries,
            enabled: true,
        }
    }

    #[test]
    fn collects_in_registration_and_entry_order() {
        let mut commands = Commands::new();
        commands.register(documented(
            "ip",
            vec![
                HelpEntry::new("ip allow <ip>", "allow"),
                HelpEntry::new("ip check <ip>", "check"),
            ],
        ));
        commands.register(documented("silent", vec![]));
        commands.register(documented("ping", vec![HelpEntry::new("ping", "pong")]));

        let commands_listed: Vec<String> = commands
            .collect_help()
            .into_iter()
            .map(|e| e.command)
            .collect();
        assert_eq!(commands_listed, vec!["ip allow <ip>", "ip check <ip>", "ping"]);
    }

    #[test]
    fn collect_help_skips_disabled_and_does_not_compile() {
        let mut commands = Commands::new();
        commands.register(Documented {
            name: "off",
            entries: vec![HelpEntry::new("off", "hidden")],
            enabled: false,
        });
        commands.register(documented("on", vec![HelpEntry::new("on", "shown")]));

        assert_eq!(commands.collect_help(), vec![HelpEntry::new("on", "shown")]);
        assert_eq!(commands.compilations(), 0);
        assert_eq!(commands.dispatch(&Message::new("C1", "U1", "on")), Some("on"));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut commands = Commands::new();
        commands.register(documented("a", vec![HelpEntry::new("same", "x")]));
        commands.register(documented("b", vec![HelpEntry::new("same", "x")]));
        assert_eq!(commands.collect_help().len(), 2);
    }

    #[test]
    fn filter_by_prefix() {
        let entries = vec![
            HelpEntry::new("ip <op> <ip>", "ip"),
            HelpEntry::new("ping", "pong"),
            HelpEntry::new("reply <text>", "echo"),
        ];
        let found = filter_help(&entries, "  IP ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].command, "ip <op> <ip>");
        assert_eq!(filter_help(&entries, "").len(), 3);
        assert_eq!(filter_help(&entries, "p").len(), 1);
    }

    #[test]
    fn format_groups_by_category() {
        let entries = vec![
            HelpEntry::new("ping", "pong"),
            HelpEntry::new("ip <op> <ip>", "manage ips")
                .category("Network")
                .example("ip allow 10.0.0.1"),
            HelpEntry::new("random <a> <b>", "pick one").help_url("https://example.com/random"),
        ];
        let text = format_help(&entries);
        assert_eq!(
            text,
            "*General*\n\
             \x20 `ping` -- pong\n\
             \x20 `random <a> <b>` -- pick one\n\
             \x20     more: https://example.com/random\n\
             \n\
             *Network*\n\
             \x20 `ip <op> <ip>` -- manage ips\n\
             \x20     e.g. `ip allow 10.0.0.1`\n"
        );
    }

    #[test]
    fn format_empty() {
        assert_eq!(format_help(&[]), "No commands available.");
    }
}
