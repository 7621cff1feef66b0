//! CLI arg parsing tests for the sminer agent binary. Only paths that exit
//! on their own are exercised here (the bare invocation runs the loop).

use std::process::Command;

fn run_agent(args: &[&str], xdg: Option<&std::path::Path>) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_sminer_agent");
    let mut cmd = Command::new(exe);
    cmd.args(args);
    if let Some(dir) = xdg {
        cmd.env("XDG_CONFIG_HOME", dir);
    }
    let output = cmd.output().expect("run sminer_agent");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

#[test]
fn help_prints_usage() {
    let (ok, text) = run_agent(&["--help"], None);
    assert!(ok);
    assert!(text.contains("Usage:"), "no usage in: {text}");
    assert!(text.contains("--test"), "no test flag in: {text}");
}

#[test]
fn unexpected_argument_prints_usage() {
    let (ok, text) = run_agent(&["--bogus"], None);
    assert!(ok);
    assert!(text.contains("Unexpected argument"), "got: {text}");
}

#[test]
fn test_mode_without_device_prints_usage() {
    let (ok, text) = run_agent(&["--test", "run"], None);
    assert!(ok);
    assert!(text.contains("Usage:"), "got: {text}");
}

#[test]
fn save_writes_config_file() {
    let td = tempfile::tempdir().unwrap();
    let (ok, text) = run_agent(
        &[
            "--save",
            "--device",
            "1",
            "--namepass",
            "alice:secret",
            "--address",
            "stratum+tcp://pool.example.com:3333",
            "--tstart",
            "20:00",
            "--tend=6:30",
        ],
        Some(td.path()),
    );
    assert!(ok, "save failed: {text}");

    let cfg = td.path().join("sminer_agent").join("miner.json");
    let data = std::fs::read_to_string(cfg).expect("miner.json created");
    assert!(data.contains("MiningAddress"), "keys missing: {data}");
    assert!(data.contains("20:00"));
    assert!(data.contains("6:30"));
}

#[test]
fn save_rejects_bad_device_code() {
    let td = tempfile::tempdir().unwrap();
    let (ok, _text) = run_agent(
        &[
            "--save",
            "--device",
            "5",
            "--namepass",
            "alice:secret",
            "--address",
            "stratum+tcp://pool.example.com:3333",
        ],
        Some(td.path()),
    );
    assert!(!ok, "device code 5 should be rejected");
}
