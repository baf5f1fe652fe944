use std::io::Write;
use std::process::{Command, Output, Stdio};

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cmdline-demo"))
}

fn simple(args: &[&str]) -> Output {
    demo()
        .arg("simple")
        .arg("--")
        .args(args)
        .output()
        .expect("failed to run cmdline-demo simple")
}

fn shell(input: &str) -> Output {
    let mut child = demo()
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cmdline-demo shell");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write shell input");
    child
        .wait_with_output()
        .expect("failed to wait for cmdline-demo shell")
}

#[test]
fn help_works() {
    let out = demo()
        .arg("--help")
        .output()
        .expect("failed to run cmdline-demo --help");
    assert!(
        out.status.success(),
        "cmdline-demo --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("simple") && stdout.contains("shell"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn simple_prints_connection() {
    let out = simple(&["--host", "a.com", "-t", "https", "--gzip", "extra"]);
    assert!(
        out.status.success(),
        "simple failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout), "https://a.com:80\ngzip\n");
}

#[test]
fn simple_without_arguments_prints_usage() {
    let out = simple(&[]);
    assert!(out.status.success(), "status: {}", out.status);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.starts_with("usage: simple --host=string [options] ... \n"),
        "unexpected usage:\n{stdout}"
    );
    assert!(stdout.contains("  -p, --port    port number (i32 [=80])\n"));
}

#[test]
fn simple_rejects_port_out_of_range() {
    let out = simple(&["--host", "a.com", "-p", "70000"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("option value is invalid: --port=70000"),
        "unexpected stderr:\n{stderr}"
    );
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("usage: simple"));
}

#[test]
fn simple_json_report() {
    let out = demo()
        .args(["simple", "--json", "--", "--host=a.com", "-p", "8080", "file"])
        .output()
        .expect("failed to run cmdline-demo simple --json");
    assert!(out.status.success(), "status: {}", out.status);
    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("report is not JSON");
    assert_eq!(report["success"], true);
    assert_eq!(report["rest"], serde_json::json!(["file"]));
    let port = report["options"]
        .as_array()
        .expect("options array")
        .iter()
        .find(|o| o["name"] == "port")
        .expect("port entry");
    assert_eq!(port["value"], "8080");
    assert_eq!(port["present"], true);
}

#[test]
fn simple_json_help_exits_successfully() {
    let out = demo()
        .args(["simple", "--json", "--", "-h"])
        .output()
        .expect("failed to run cmdline-demo simple --json");
    assert!(
        out.status.success(),
        "status: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("report is not JSON");
    assert_eq!(report["success"], false);
}

#[test]
fn simple_json_failure_exits_with_one() {
    let out = demo()
        .args(["simple", "--json", "--", "--host=a.com", "--port=0"])
        .output()
        .expect("failed to run cmdline-demo simple --json");
    assert_eq!(out.status.code(), Some(1));
    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("report is not JSON");
    assert_eq!(report["success"], false);
}

#[test]
fn shell_parses_each_line_until_quit() {
    let out = shell("--host a.com -p 8080 x \"y z\"\n--host=b --port=0\n-q\n--host=never\n");
    assert!(out.status.success(), "status: {}", out.status);

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("a.com:8080\n- x\n- y z\n"), "stdout:\n{stdout}");
    assert!(stdout.contains("usage: sh --host=string [options] ... filename ..."));
    assert!(!stdout.contains("never"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("option value is invalid: --port=0"),
        "stderr:\n{stderr}"
    );
}

#[test]
fn shell_reports_unclosed_quote() {
    let out = shell("--host \"a.com\n");
    assert!(out.status.success(), "status: {}", out.status);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("quote is not closed"), "stderr:\n{stderr}");
}
