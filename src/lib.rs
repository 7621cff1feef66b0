//! Time-gated miner supervision: a daily window evaluator, CPU/GPU busy
//! probes and an idempotent worker supervisor, polled on a fixed cadence.

pub mod agent;
pub mod config;
pub mod device;
pub mod error;
pub mod probe;
pub mod supervisor;
pub mod window;
