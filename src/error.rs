//! Error taxonomy for the agent. Everything here is recovered at the cycle
//! boundary; no variant ever terminates the supervision loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("bad {field} time {value:?} (expected HH:MM), maybe user config wrong")]
    ConfigTime { field: &'static str, value: String },

    #[error("unsupported device code {0} (cpu=0, gpu=1)")]
    DeviceNotSupported(i64),

    #[error("device probe unavailable: {0}")]
    ProbeUnavailable(String),

    #[error("mining address {0:?} is not a usable url")]
    InvalidAddress(String),

    #[error("failed to start worker {worker}: {source}")]
    WorkerSpawn {
        worker: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
