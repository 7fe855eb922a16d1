use assert_cmd::Command;
use predicates::prelude::*;

fn demo() -> Command {
    let mut cmd = Command::cargo_bin("flagcmd-demo").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").env_remove("FLAGCMD_DEMO_LEGACY");
    cmd
}

#[test]
fn no_command_prints_help() {
    demo()
        .assert()
        .success()
        .stderr(predicate::str::contains("Use the following commands"))
        .stderr(predicate::str::contains("  status"))
        .stderr(predicate::str::contains("m <string>  :  Display message"))
        .stderr(predicate::str::contains("Executing the command").not());
}

#[test]
fn status_succeeds() {
    demo()
        .arg("STATUS")
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing the command: Status function"))
        .stderr(predicate::str::contains("CLI is running fine"))
        .stderr(predicate::str::contains("Status returned successfully"));
}

#[test]
fn echo_uses_flag_or_default() {
    demo()
        .args(["echo", "-m", "CLI Test message"])
        .assert()
        .success()
        .stderr(predicate::str::contains("CLI Test message"))
        .stderr(predicate::str::contains("Echo returned successfully"));

    demo()
        .arg("echo")
        .assert()
        .success()
        .stderr(predicate::str::contains("Test message"));
}

#[test]
fn echo_with_empty_message_reports_failure() {
    demo()
        .args(["echo", "-m="])
        .assert()
        .success()
        .stderr(predicate::str::contains("Echo failed"));
}

#[test]
fn greet_binds_int_and_bool_flags() {
    demo()
        .args(["greet", "-name", "ada", "-count=2", "-loud"])
        .assert()
        .success()
        .stderr(predicate::str::contains("HELLO, ADA!").count(2))
        .stderr(predicate::str::contains("Greeting delivered"));
}

#[test]
fn unknown_command_exits_with_error() {
    demo()
        .arg("test")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported command `test`"))
        .stderr(predicate::str::contains("Command line helper"));
}

#[test]
fn version_is_printed() {
    demo()
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "flagcmd-demo version : {}",
            env!("CARGO_PKG_VERSION")
        )))
        .stderr(predicate::str::contains("Unsupported command").not());
}

#[test]
fn bad_flag_value_exits_with_error() {
    demo()
        .args(["greet", "-count", "many"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Greet function").not());
}

#[test]
fn legacy_mode_falls_through_on_version() {
    demo()
        .env("FLAGCMD_DEMO_LEGACY", "1")
        .arg("-v")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("version :"))
        .stderr(predicate::str::contains("Unsupported command `-v`"));
}

#[test]
fn legacy_mode_exits_from_flag_backend() {
    demo()
        .env("FLAGCMD_DEMO_LEGACY", "1")
        .args(["greet", "-count", "many"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: invalid value 'many'"))
        .stderr(predicate::str::contains("--count <count>"))
        .stderr(predicate::str::contains("Executing the command").not())
        .stderr(predicate::str::contains("ERROR").not());
}

#[test]
fn help_after_command_lists_its_flags() {
    demo()
        .args(["greet", "-h"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Number of greetings"))
        .stderr(predicate::str::contains("Greeting delivered").not());
}
