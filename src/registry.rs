use std::fmt;

use indexmap::IndexMap;

use crate::option::OptionDescriptor;

/// Zero-argument command handler. Returns `true` on success.
pub type CommandHandler = Box<dyn Fn() -> bool>;

/// A named operation with its human-readable title and outcome messages.
pub struct CommandDescriptor {
    pub handler: CommandHandler,
    pub title: String,
    pub success_msg: String,
    pub failure_msg: String,
}

impl CommandDescriptor {
    pub fn new(
        title: impl Into<String>,
        success_msg: impl Into<String>,
        failure_msg: impl Into<String>,
        handler: impl Fn() -> bool + 'static,
    ) -> Self {
        CommandDescriptor {
            handler: Box::new(handler),
            title: title.into(),
            success_msg: success_msg.into(),
            failure_msg: failure_msg.into(),
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("title", &self.title)
            .field("success_msg", &self.success_msg)
            .field("failure_msg", &self.failure_msg)
            .finish_non_exhaustive()
    }
}

/// Command names and options known to one tool.
///
/// Commands are keyed by their lower-cased name and iterate in the order they
/// were first registered. Options iterate in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    commands: IndexMap<String, CommandDescriptor>,
    options: Vec<OptionDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `descriptor` under `name`. A later registration of the same
    /// name (in any case) replaces the earlier one.
    pub fn add_command(&mut self, name: &str, descriptor: CommandDescriptor) {
        self.commands.insert(name.to_lowercase(), descriptor);
    }

    /// Append an option. Only the type tag is normalized here.
    pub fn add_option(&mut self, mut option: OptionDescriptor) {
        option.type_tag = option.type_tag.to_lowercase();
        self.options.push(option);
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(&name.to_lowercase())
    }

    pub fn commands(&self) -> impl Iterator<Item = (&str, &CommandDescriptor)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }
}
