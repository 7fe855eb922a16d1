use flagcmd::{Cli, CommandDescriptor, Logger, TracingLogger};

pub fn register(cli: &mut Cli, log: TracingLogger) {
    cli.add_command(
        "status",
        CommandDescriptor::new(
            "Status function",
            "Status returned successfully",
            "Status failed",
            move || {
                log.info("CLI is running fine");
                true
            },
        ),
    );
}
