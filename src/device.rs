//! Device kinds the agent can host a worker on. Closed set: adding a kind
//! means adding one probe arm and one invocation builder, nothing else.

use crate::error::AgentError;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Cpu,
    Gpu,
}

#[cfg(windows)]
const CPU_WORKER: &str = "minerd.exe";
#[cfg(not(windows))]
const CPU_WORKER: &str = "minerd";

#[cfg(windows)]
const GPU_WORKER: &str = "ethminer.exe";
#[cfg(not(windows))]
const GPU_WORKER: &str = "ethminer";

impl DeviceKind {
    /// Map the persisted config code (0 = cpu, 1 = gpu).
    pub fn from_code(code: i64) -> Result<Self, AgentError> {
        match code {
            0 => Ok(DeviceKind::Cpu),
            1 => Ok(DeviceKind::Gpu),
            other => Err(AgentError::DeviceNotSupported(other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceKind::Cpu => "cpu",
            DeviceKind::Gpu => "gpu",
        }
    }

    /// Process name the worker shows up under in the process table.
    pub fn worker_process_name(&self) -> &'static str {
        match self {
            DeviceKind::Cpu => CPU_WORKER,
            DeviceKind::Gpu => GPU_WORKER,
        }
    }

    fn binary_override_var(&self) -> &'static str {
        match self {
            DeviceKind::Cpu => "SMINER_CPU_MINER",
            DeviceKind::Gpu => "SMINER_GPU_MINER",
        }
    }

    /// Resolve the worker binary: env override, then a sibling of the agent
    /// executable, then rely on PATH.
    pub fn worker_binary(&self) -> PathBuf {
        if let Some(p) = std::env::var_os(self.binary_override_var()) {
            return PathBuf::from(p);
        }
        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                let candidate = parent.join(self.worker_process_name());
                if candidate.exists() {
                    return candidate;
                }
            }
        }
        PathBuf::from(self.worker_process_name())
    }
}
