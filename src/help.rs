use std::fmt::Write;

use crate::platform::PlatformOps;
use crate::registry::Registry;

/// Render the help text: usage line, commands, then options, each list in
/// registration order.
pub fn render(name: &str, registry: &Registry, platform: &dyn PlatformOps) -> String {
    let mut msg = String::from("Command line helper\n\n");
    let _ = writeln!(msg, "{} <cmd>\n", platform.final_binary_name(name));
    msg.push_str("Use the following commands\n\n");
    for (cmd, _) in registry.commands() {
        let _ = writeln!(msg, "  {cmd}");
    }
    msg.push_str("\nSupported options\n\n");
    for opt in registry.options() {
        let _ = writeln!(msg, "  {} <{}>  :  {}", opt.flag, opt.type_tag, opt.usage);
    }
    msg
}
