//! Building blocks for single-binary tools with several named commands.
//!
//! Commands are registered with a zero-argument handler; options bind typed
//! flags into [`Slot`]s the caller keeps. [`Cli::run`] resolves the command
//! from the first argument, binds every option to a fresh flag set, parses
//! the remaining arguments and invokes the handler.
//!
//! ```no_run
//! use flagcmd::{Cli, CommandDescriptor, OptionDescriptor, Slot, TracingLogger};
//!
//! let msg = Slot::new(String::new());
//! let mut cli = Cli::new("tool", TracingLogger::new("tool"));
//! cli.add_option(OptionDescriptor::typed("m", &msg, "hello".to_string(), "Message"));
//! let m = msg.clone();
//! cli.add_command(
//!     "echo",
//!     CommandDescriptor::new("Echo function", "Echo done", "Echo failed", move || {
//!         println!("{}", m.get());
//!         true
//!     }),
//! );
//! let _ = cli.run_env();
//! ```

pub mod binder;
mod config;
mod dispatch;
mod error;
mod help;
pub mod logger;
pub mod option;
pub mod platform;
mod registry;

pub use config::DispatchConfig;
pub use dispatch::{Cli, Outcome, DEFAULT_VERSION};
pub use error::{ConfigurationError, DispatchError, ParseError};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use option::{FlagValue, Kind, OptionDescriptor, Slot, Storage, Value};
pub use registry::{CommandDescriptor, CommandHandler, Registry};
