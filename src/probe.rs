//! Device busy probes. A device whose state cannot be measured is reported
//! as an error and treated as busy by callers (never launch blind).

use crate::device::DeviceKind;
use crate::error::AgentError;
use nvml_wrapper::Nvml;
use std::ffi::OsStr;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

/// Any single GPU above this instantaneous utilization marks the whole
/// resource busy. Exactly at the threshold still counts as free.
pub const GPU_UTIL_BUSY_THRESHOLD: u32 = 60;

pub fn is_free(kind: DeviceKind) -> Result<bool, AgentError> {
    match kind {
        DeviceKind::Cpu => Ok(cpu_free()),
        DeviceKind::Gpu => gpu_free(),
    }
}

/// The CPU worker is itself the busy signal: if it is already in the process
/// table the CPU is taken (and launching again would double-run it).
fn cpu_free() -> bool {
    !process_running(DeviceKind::Cpu.worker_process_name())
}

/// Fresh enumeration on every call; process state is never cached across
/// cycles.
pub fn process_running(name: &str) -> bool {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::All, false, ProcessRefreshKind::nothing());
    let running = sys.processes_by_exact_name(OsStr::new(name)).next().is_some();
    running
}

fn gpu_free() -> Result<bool, AgentError> {
    let readings = gpu_utilizations()?;
    debug!(?readings, "gpu utilization");
    Ok(all_within_threshold(&readings, GPU_UTIL_BUSY_THRESHOLD))
}

/// True when every reading is at or below the threshold (vacuously true for
/// an empty reading set).
pub fn all_within_threshold(readings: &[u32], threshold: u32) -> bool {
    readings.iter().all(|&pct| pct <= threshold)
}

fn gpu_utilizations() -> Result<Vec<u32>, AgentError> {
    let nvml =
        Nvml::init().map_err(|e| AgentError::ProbeUnavailable(format!("nvml init: {e}")))?;
    let count = nvml
        .device_count()
        .map_err(|e| AgentError::ProbeUnavailable(format!("nvml device count: {e}")))?;
    let mut readings = Vec::with_capacity(count as usize);
    for idx in 0..count {
        let device = nvml
            .device_by_index(idx)
            .map_err(|e| AgentError::ProbeUnavailable(format!("nvml device {idx}: {e}")))?;
        let util = device
            .utilization_rates()
            .map_err(|e| AgentError::ProbeUnavailable(format!("nvml utilization {idx}: {e}")))?;
        readings.push(util.gpu);
    }
    Ok(readings)
}
