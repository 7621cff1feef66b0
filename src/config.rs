//! Persisted agent configuration: load/save a JSON record of the recognized
//! keys under $XDG_CONFIG_HOME/sminer_agent/miner.json (fallback to the
//! platform config dir). Re-read every poll cycle so edits apply within one
//! cycle; nothing in the agent caches it.

use crate::device::DeviceKind;
use crate::error::AgentError;
use crate::window::{parse_time_of_day, Window};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_START_TIME: &str = "19:00";
pub const DEFAULT_END_TIME: &str = "7:00";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerConfig {
    #[serde(rename = "MiningAddress")]
    pub mining_address: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    /// 0 = cpu, 1 = gpu
    #[serde(rename = "Device")]
    pub device: i64,
    #[serde(rename = "StartTimeInDay")]
    pub start_time_in_day: String,
    #[serde(rename = "EndTimeInDay")]
    pub end_time_in_day: String,
}

/// Opaque pass-through used only to build the worker invocation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub address: String,
    pub username: String,
    pub password: String,
}

impl MinerConfig {
    pub fn device_kind(&self) -> Result<DeviceKind, AgentError> {
        DeviceKind::from_code(self.device)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            address: self.mining_address.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Build the daily window from the configured times. Fails with
    /// `ConfigTime` if either field does not parse; callers must treat the
    /// window as indeterminate, never as always-active.
    pub fn window(&self) -> Result<Window, AgentError> {
        let start = parse_time_of_day("StartTimeInDay", &self.start_time_in_day)?;
        let end = parse_time_of_day("EndTimeInDay", &self.end_time_in_day)?;
        Ok(Window::new(start, end))
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sminer_agent")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sminer_agent")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("miner.json")
}

pub fn load_config() -> Result<MinerConfig, AgentError> {
    let s = fs::read_to_string(config_path())?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_config(cfg: &MinerConfig) -> Result<(), AgentError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(cfg)?;
    fs::write(path, data)?;
    Ok(())
}
