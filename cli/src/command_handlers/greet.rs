use flagcmd::{Cli, CommandDescriptor, Logger, OptionDescriptor, Slot, TracingLogger};

struct GreetArgs {
    name: Slot<String>,
    count: Slot<isize>,
    loud: Slot<bool>,
}

pub fn register(cli: &mut Cli, log: TracingLogger) {
    let args = GreetArgs {
        name: Slot::new(String::new()),
        count: Slot::new(0),
        loud: Slot::new(false),
    };
    cli.add_option(OptionDescriptor::typed(
        "name",
        &args.name,
        "world".to_string(),
        "Who to greet",
    ));
    cli.add_option(OptionDescriptor::typed("count", &args.count, 1, "Number of greetings"));
    cli.add_option(OptionDescriptor::typed("loud", &args.loud, false, "Shout the greeting"));
    cli.add_command(
        "greet",
        CommandDescriptor::new(
            "Greet function",
            "Greeting delivered",
            "Greeting failed: count must be positive",
            move || greet(&log, &args),
        ),
    );
}

fn greet(log: &impl Logger, args: &GreetArgs) -> bool {
    let count = args.count.get();
    if count <= 0 {
        return false;
    }
    let mut line = format!("Hello, {}!", args.name.get());
    if args.loud.get() {
        line = line.to_uppercase();
    }
    for _ in 0..count {
        log.info(&line);
    }
    true
}
