//! `random <a> <b> ...`: pick one option at random.
//!
//! Also publishes the `random` template function so other commands can
//! write `{{ random a b c }}`.

use std::sync::Arc;

use anyhow::anyhow;
use parley_core::matcher::REMAINING_TEXT;
use parley_core::template::{TemplateError, TemplateFunctions, function_from};
use parley_core::{ChatClient, Command, Matcher, PrefixMatcher};
use parley_types::HelpEntry;
use rand::seq::SliceRandom;

/// Declared name of the command, also the name of its template function.
pub const NAME: &str = "random";

pub struct RandomCommand {
    client: Arc<dyn ChatClient>,
    enabled: bool,
}

impl RandomCommand {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            enabled: true,
        }
    }

    /// Switch the command on or off before registration.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Choose one of `options`, `None` when there are none.
pub fn pick<'a>(options: &[&'a str]) -> Option<&'a str> {
    options.choose(&mut rand::thread_rng()).copied()
}

impl Command for RandomCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn matcher(&self) -> Box<dyn Matcher> {
        let client = Arc::clone(&self.client);
        Box::new(PrefixMatcher::new(NAME, move |result, message| {
            let options: Vec<&str> = result.get_string(REMAINING_TEXT).split_whitespace().collect();
            match pick(&options) {
                Some(choice) => client.send_message(message, choice),
                None => client.reply_error(message, &anyhow!("usage: random <option> <option> ...")),
            }
        }))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn help(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("random <option> <option> ...", "pick one of the given options")
                .example("random pizza sushi burger"),
        ]
    }

    fn template_functions(&self) -> TemplateFunctions {
        let mut functions = TemplateFunctions::new();
        functions.insert(
            NAME.into(),
            function_from(|args| {
                pick(args).map(str::to_string).ok_or_else(|| TemplateError::Failed {
                    name: NAME.into(),
                    reason: "needs at least one option".into(),
                })
            }),
        );
        functions
    }
}

#[cfg(test)]
mod tests {
    use parley_core::{Commands, template};
    use parley_types::Message;

    use super::*;
    use crate::testing::Recording;

    #[test]
    fn picks_one_of_the_options() {
        let client = Arc::new(Recording::default());
        let mut commands = Commands::new();
        commands.register(RandomCommand::new(client.clone()));

        for _ in 0..20 {
            commands.run(&Message::new("C1", "U1", "random a b c"));
        }
        let sent = client.sent();
        assert_eq!(sent.len(), 20);
        assert!(sent.iter().all(|s| ["a", "b", "c"].contains(&s.as_str())));
    }

    #[test]
    fn no_options_is_an_error() {
        let client = Arc::new(Recording::default());
        let mut commands = Commands::new();
        commands.register(RandomCommand::new(client.clone()));

        commands.run(&Message::new("C1", "U1", "random"));
        assert_eq!(client.sent(), vec!["Error: usage: random <option> <option> ..."]);
    }

    #[test]
    fn registration_publishes_template_function() {
        let client = Arc::new(Recording::default());
        let mut commands = Commands::new();
        commands.register(RandomCommand::new(client));

        assert_eq!(template::render("{{ random only }}").unwrap(), "only");
        assert!(matches!(
            template::render("{{ random }}"),
            Err(TemplateError::Failed { .. })
        ));
    }

    #[test]
    fn pick_handles_empty() {
        assert_eq!(pick(&[]), None);
        assert_eq!(pick(&["x"]), Some("x"));
    }
}
