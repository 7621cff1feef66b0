//! Config persistence: save/load round-trip and the on-disk key contract.

use sminer_agent::config::{config_path, load_config, save_config, MinerConfig};
use sminer_agent::device::DeviceKind;
use std::fs;
use std::sync::Mutex;

// Global lock to serialize tests that mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn sample() -> MinerConfig {
    MinerConfig {
        mining_address: "stratum+tcp://pool.example.com:3333".to_string(),
        username: "alice".to_string(),
        password: "secret".to_string(),
        device: 1,
        start_time_in_day: "19:00".to_string(),
        end_time_in_day: "7:00".to_string(),
    }
}

#[test]
fn save_then_load_round_trips() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());

    save_config(&sample()).unwrap();
    let loaded = load_config().unwrap();
    std::env::remove_var("XDG_CONFIG_HOME");

    assert_eq!(loaded.mining_address, "stratum+tcp://pool.example.com:3333");
    assert_eq!(loaded.username, "alice");
    assert_eq!(loaded.password, "secret");
    assert_eq!(loaded.device_kind().unwrap(), DeviceKind::Gpu);
    assert_eq!(loaded.start_time_in_day, "19:00");
    assert_eq!(loaded.end_time_in_day, "7:00");
}

#[test]
fn on_disk_json_uses_recognized_keys() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());

    save_config(&sample()).unwrap();
    let data = fs::read_to_string(config_path()).unwrap();
    std::env::remove_var("XDG_CONFIG_HOME");

    for key in [
        "MiningAddress",
        "Username",
        "Password",
        "Device",
        "StartTimeInDay",
        "EndTimeInDay",
    ] {
        assert!(data.contains(key), "{key} missing from: {data}");
    }
}

#[test]
fn unknown_device_code_is_rejected() {
    let mut cfg = sample();
    cfg.device = 2;
    let err = cfg.device_kind().unwrap_err();
    assert!(err.to_string().contains("unsupported device"), "got: {err}");
}

#[test]
fn window_rebuild_reports_the_offending_field() {
    let mut cfg = sample();
    cfg.end_time_in_day = "7pm".to_string();
    let err = cfg.window().unwrap_err();
    assert!(err.to_string().contains("EndTimeInDay"), "got: {err}");
}

#[test]
fn equal_config_times_yield_an_inactive_window() {
    let mut cfg = sample();
    cfg.start_time_in_day = "07:00".to_string();
    cfg.end_time_in_day = "7:00".to_string();
    let w = cfg.window().unwrap();
    assert_eq!(w, sminer_agent::window::Window::Never);
}
