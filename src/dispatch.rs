use crate::binder;
use crate::config::DispatchConfig;
use crate::error::{DispatchError, ParseError};
use crate::help;
use crate::logger::Logger;
use crate::option::OptionDescriptor;
use crate::platform::platform;
use crate::registry::{CommandDescriptor, Registry};

pub const DEFAULT_VERSION: &str = "0.0.1";

/// How a [`Cli::run`] call ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help,
    Version,
    /// The handler ran; `succeeded` is what it returned.
    Executed { command: String, succeeded: bool },
}

/// A multi-command tool: its identity, its registry and the logger every run
/// reports through.
pub struct Cli {
    name: String,
    version: String,
    log: Box<dyn Logger>,
    registry: Registry,
    config: DispatchConfig,
}

impl Cli {
    pub fn new(name: impl Into<String>, log: impl Logger + 'static) -> Self {
        Cli {
            name: name.into(),
            version: DEFAULT_VERSION.to_string(),
            log: Box::new(log),
            registry: Registry::new(),
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    pub fn add_command(&mut self, name: &str, descriptor: CommandDescriptor) {
        self.registry.add_command(name, descriptor);
    }

    pub fn add_option(&mut self, option: OptionDescriptor) {
        self.registry.add_option(option);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn help_text(&self) -> String {
        help::render(&self.name, &self.registry, platform())
    }

    fn show_help(&self) {
        self.log.info(&self.help_text());
    }

    /// Run against the process arguments.
    pub fn run_env(&self) -> Result<Outcome, DispatchError> {
        self.run(std::env::args())
    }

    /// Dispatch one invocation. `args` starts with the program name, as
    /// `std::env::args` does.
    ///
    /// Every error is logged before it is returned. A handler returning
    /// `false` is not an error: it is logged with the command's failure
    /// message and reported as `Outcome::Executed { succeeded: false, .. }`.
    pub fn run<I, S>(&self, args: I) -> Result<Outcome, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let _program = args.next();
        let Some(first) = args.next() else {
            self.show_help();
            return Ok(Outcome::Help);
        };

        let cmd = first.to_lowercase();
        if matches!(cmd.as_str(), "-h" | "-help" | "--help") {
            self.show_help();
            return Ok(Outcome::Help);
        }
        if matches!(cmd.as_str(), "-v" | "-version" | "--version") {
            self.log
                .info(&format!("{} version : {}", self.name, self.version));
            if !self.config.version_fallthrough {
                return Ok(Outcome::Version);
            }
        }

        let Some(command) = self.registry.lookup(&cmd) else {
            self.log
                .error(&format!("Unsupported command `{first}`, please check the helper"));
            self.show_help();
            return Err(DispatchError::UnknownCommand(first));
        };

        let flags = match binder::bind(&cmd, self.registry.options()) {
            Ok(flags) => flags,
            Err(e) => {
                self.log.error(&e.to_string());
                return Err(e.into());
            }
        };
        let parsed = match flags.parse(args) {
            Ok(parsed) => parsed,
            Err(ParseError::HelpRequested(text)) => {
                self.log.info(&text);
                return Ok(Outcome::Help);
            }
            Err(e) => {
                if self.config.exit_on_parse_error {
                    e.exit();
                }
                self.log.error(e.to_string().trim_end());
                return Err(e.into());
            }
        };
        if !parsed.rest.is_empty() {
            tracing::debug!(command = %cmd, rest = ?parsed.rest, "ignoring positional arguments");
        }

        self.log
            .info(&format!("Executing the command: {}", command.title));
        let succeeded = (command.handler)();
        if succeeded {
            self.log.info(&command.success_msg);
        } else {
            self.log.error(&command.failure_msg);
        }
        Ok(Outcome::Executed {
            command: cmd,
            succeeded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;
    use tracing::Level;

    #[test]
    fn version_is_terminal_by_default() {
        let log = MemoryLogger::new();
        let mut cli = Cli::new("tool", log.clone());
        cli.set_version("1.2.3");

        assert_eq!(cli.run(["tool", "-V"]).unwrap(), Outcome::Version);
        assert_eq!(log.messages(Level::INFO), vec!["tool version : 1.2.3".to_string()]);
        assert!(log.messages(Level::ERROR).is_empty());
    }

    #[test]
    fn version_falls_through_when_configured() {
        let log = MemoryLogger::new();
        let cli = Cli::new("tool", log.clone()).with_config(DispatchConfig {
            version_fallthrough: true,
            ..DispatchConfig::default()
        });

        let err = cli.run(["tool", "-v"]).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCommand(ref c) if c == "-v"));
        assert!(log.contains(Level::INFO, "tool version : 0.0.1"));
        assert!(log.contains(Level::ERROR, "Unsupported command"));
        assert!(log.contains(Level::INFO, "Command line helper"));
    }

    #[test]
    fn help_tokens_ignore_case() {
        let log = MemoryLogger::new();
        let cli = Cli::new("tool", log.clone());
        for token in ["-h", "-H", "-HELP", "--help"] {
            assert_eq!(cli.run(["tool", token]).unwrap(), Outcome::Help);
        }
        assert_eq!(log.messages(Level::INFO).len(), 4);
    }

    #[test]
    fn identity_and_config_accessors() {
        let mut cli = Cli::new("tool", MemoryLogger::new());
        assert_eq!(cli.name(), "tool");
        assert_eq!(cli.version(), DEFAULT_VERSION);
        assert_eq!(cli.config(), DispatchConfig::default());

        cli.set_version("2.0.0");
        let cli = cli.with_config(DispatchConfig::legacy());
        assert_eq!(cli.version(), "2.0.0");
        assert!(cli.config().version_fallthrough);
        assert!(cli.config().exit_on_parse_error);
    }

    #[test]
    fn help_after_command_shows_flag_usage() {
        let log = MemoryLogger::new();
        let mut cli = Cli::new("tool", log.clone());
        let ran = std::rc::Rc::new(std::cell::Cell::new(false));
        let flag = ran.clone();
        cli.add_command(
            "echo",
            CommandDescriptor::new("Echo", "ok", "failed", move || {
                flag.set(true);
                true
            }),
        );
        cli.add_option(OptionDescriptor::typed(
            "m",
            &crate::option::Slot::new(String::new()),
            "Test message".to_string(),
            "Display message",
        ));

        assert_eq!(cli.run(["tool", "echo", "-h"]).unwrap(), Outcome::Help);
        assert!(!ran.get());
        assert!(log.contains(Level::INFO, "Display message"));
        assert!(log.messages(Level::ERROR).is_empty());
        assert!(!log.contains(Level::INFO, "Executing the command"));
    }

    #[test]
    fn failing_handler_logs_failure_message() {
        let log = MemoryLogger::new();
        let mut cli = Cli::new("tool", log.clone());
        cli.add_command("sync", CommandDescriptor::new("Sync", "synced", "sync failed", || false));

        let outcome = cli.run(["tool", "SYNC"]).unwrap();
        assert_eq!(
            outcome,
            Outcome::Executed {
                command: "sync".to_string(),
                succeeded: false
            }
        );
        assert_eq!(log.messages(Level::ERROR), vec!["sync failed".to_string()]);
        assert!(!log.contains(Level::INFO, "synced"));
    }
}
