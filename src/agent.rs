//! The supervision loop: re-read configuration every cycle, evaluate the
//! daily window and converge the worker towards it.

use crate::{config, supervisor};
use anyhow::{Context, Result};
use chrono::Local;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Run until the process is killed. A failed cycle is logged and absorbed;
/// the next tick retries from scratch.
pub async fn run() -> Result<()> {
    info!("secret miner service started");
    let mut ticker = interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(e) = run_cycle().await {
            warn!("cycle failed: {e:#}");
        }
    }
}

/// One poll cycle. Config is loaded fresh so edits apply within a cycle.
pub async fn run_cycle() -> Result<()> {
    let cfg = config::load_config().context("read config")?;
    let kind = cfg.device_kind()?;

    let window = match cfg.window() {
        Ok(w) => w,
        Err(e) => {
            // Indeterminate window must not read as always-active; the safe
            // convergence is a stopped worker.
            warn!("{e}; treating window as inactive");
            supervisor::ensure_stopped(kind);
            return Ok(());
        }
    };

    let now = Local::now().time();
    if window.contains(now) {
        supervisor::ensure_running_if_free(kind, &cfg.credentials()).await?;
    } else {
        supervisor::ensure_stopped(kind);
    }
    Ok(())
}
