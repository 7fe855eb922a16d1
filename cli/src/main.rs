mod command_handlers;
mod setup;

use anyhow::Result;
use flagcmd::{Cli, TracingLogger};

const TOOL_NAME: &str = "flagcmd-demo";

fn main() -> Result<()> {
    setup::init_tracing()?;

    let log = TracingLogger::new(TOOL_NAME);
    let mut cli = Cli::new(TOOL_NAME, log.named("cli")).with_config(setup::dispatch_config());
    cli.set_version(env!("CARGO_PKG_VERSION"));
    command_handlers::register(&mut cli, &log);

    if cli.run_env().is_err() {
        std::process::exit(2);
    }
    Ok(())
}
