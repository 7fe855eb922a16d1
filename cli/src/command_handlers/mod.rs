pub mod echo;
pub mod greet;
pub mod status;

use flagcmd::{Cli, TracingLogger};

/// Register every demo command and the options they share.
pub fn register(cli: &mut Cli, log: &TracingLogger) {
    status::register(cli, log.named("status"));
    echo::register(cli, log.named("echo"));
    greet::register(cli, log.named("greet"));
}
