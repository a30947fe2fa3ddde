//! CLI tests for the tag, CTCP, and tokenizer subcommands.

use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

fn oulu_cmd() -> Command {
    Command::new(cargo::cargo_bin!("oulu"))
}

fn run_with_stdin(args: &[&str], stdin_body: &str) -> std::process::Output {
    let mut child = oulu_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn oulu command");

    {
        let stdin = child.stdin.as_mut().expect("stdin handle");
        stdin
            .write_all(stdin_body.as_bytes())
            .expect("write stdin body");
    }

    child.wait_with_output().expect("wait for output")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn escape_tag_strips_line_ending() {
    let output = run_with_stdin(&["escape-tag", "--output", "json"], "a b;c\r\n");
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["mode"], "escape");
    assert_eq!(json["output"], "a\\sb\\:c");
}

#[test]
fn unescape_tag_pretty() {
    let output = run_with_stdin(&["unescape-tag", "--output", "pretty"], "foo\\sbar\\\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "foo bar\n");
}

#[test]
fn ctcp_json() {
    let output = run_with_stdin(&["ctcp", "--output", "json"], "\x01ACTION waves\x01\r\n");
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["ctcp"]["name"], "ACTION");
    assert_eq!(json["ctcp"]["body"], "waves");
}

#[test]
fn ctcp_pretty() {
    let output = run_with_stdin(&["ctcp", "--output", "pretty"], "\x01VERSION\x01");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "name: VERSION\nbody: \n"
    );
}

#[test]
fn not_ctcp_exits_one() {
    let output = run_with_stdin(&["ctcp", "--output", "json"], "\x01 FOO");
    assert_eq!(output.status.code(), Some(1));
    assert!(json_stdout(&output)["ctcp"].is_null());

    let output = run_with_stdin(&["ctcp", "--output", "pretty"], "hello");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a CTCP message"));
}

#[test]
fn tokenize_middle_and_trailing() {
    let output = run_with_stdin(&["tokenize", "--output", "json"], "this is :a test\n");
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["trailing"], false);
    assert_eq!(json["tokens"], serde_json::json!(["this", "is", ":a", "test"]));

    let output = run_with_stdin(
        &["tokenize", "--trailing", "--output", "json"],
        "this is :a test\n",
    );
    let json = json_stdout(&output);
    assert_eq!(json["trailing"], true);
    assert_eq!(json["tokens"], serde_json::json!(["this", "is", "a test"]));
}

#[test]
fn tokenize_pretty_one_per_line() {
    let output = run_with_stdin(&["tokenize", "--output", "pretty"], "PRIVMSG   #chan hi");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "PRIVMSG\n#chan\nhi\n"
    );
}
