use flagcmd::{Cli, CommandDescriptor, Logger, OptionDescriptor, Slot, TracingLogger};

pub fn register(cli: &mut Cli, log: TracingLogger) {
    let msg = Slot::new(String::new());
    cli.add_option(OptionDescriptor::typed(
        "m",
        &msg,
        "Test message".to_string(),
        "Display message",
    ));
    cli.add_command(
        "echo",
        CommandDescriptor::new(
            "Echo function",
            "Echo returned successfully",
            "Echo failed",
            move || msg.with(|m| echo(&log, m)),
        ),
    );
}

fn echo(log: &impl Logger, msg: &str) -> bool {
    if msg.is_empty() {
        return false;
    }
    log.info(msg);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagcmd::MemoryLogger;

    #[test]
    fn empty_message_fails() {
        let log = MemoryLogger::new();
        assert!(!echo(&log, ""));
        assert!(echo(&log, "hi"));
        assert_eq!(log.messages(tracing::Level::INFO), vec!["hi".to_string()]);
    }
}
