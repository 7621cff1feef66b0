//! Entry point for the sminer agent. With no arguments it runs the
//! supervision loop; otherwise it dispatches the one-shot config/test paths.

use anyhow::{anyhow, Context};
use sminer_agent::config::{self, MinerConfig, DEFAULT_END_TIME, DEFAULT_START_TIME};
use sminer_agent::device::DeviceKind;
use sminer_agent::{agent, supervisor};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct ParsedArgs {
    save: bool,
    test: Option<String>,
    device: Option<String>,
    namepass: Option<String>,
    address: Option<String>,
    tstart: String,
    tend: String,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [-s|--save -d 0|1 -u USER:PASS -a ADDRESS [--tstart HH:MM] [--tend HH:MM]] [-t|--test run|kill -d 0|1]\nWith no arguments the agent runs its supervision loop until killed."
    )
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sminer_agent".into());
    let mut save = false;
    let mut test: Option<String> = None;
    let mut device: Option<String> = None;
    let mut namepass: Option<String> = None;
    let mut address: Option<String> = None;
    let mut tstart = DEFAULT_START_TIME.to_string();
    let mut tend = DEFAULT_END_TIME.to_string();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(usage(&prog));
            }
            "-s" | "--save" => {
                save = true;
            }
            "-t" | "--test" => {
                test = it.next();
            }
            "-d" | "--device" => {
                device = it.next();
            }
            "-u" | "--namepass" => {
                namepass = it.next();
            }
            "-a" | "--address" => {
                address = it.next();
            }
            "--tstart" => {
                if let Some(v) = it.next() {
                    tstart = v;
                }
            }
            "--tend" => {
                if let Some(v) = it.next() {
                    tend = v;
                }
            }
            _ if arg.starts_with("--test=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        test = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--device=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        device = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--tstart=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        tstart = v.to_string();
                    }
                }
            }
            _ if arg.starts_with("--tend=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        tend = v.to_string();
                    }
                }
            }
            _ => {
                return Err(format!("Unexpected argument {arg:?}.\n{}", usage(&prog)));
            }
        }
    }
    Ok(ParsedArgs {
        save,
        test,
        device,
        namepass,
        address,
        tstart,
        tend,
    })
}

fn device_from_arg(device: &str) -> anyhow::Result<DeviceKind> {
    let code: i64 = device
        .parse()
        .map_err(|_| anyhow!("device must be 0 (cpu) or 1 (gpu), got {device:?}"))?;
    Ok(DeviceKind::from_code(code)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if env::args().len() == 1 {
        return tokio::select! {
            res = agent::run() => res,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                Ok(())
            }
        };
    }

    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    // One-shot test entry points, distinct from the continuous loop.
    if let (Some(test), Some(device)) = (&parsed.test, &parsed.device) {
        let kind = device_from_arg(device)?;
        match test.as_str() {
            "run" => {
                let cfg = config::load_config().context("read config")?;
                supervisor::ensure_running_if_free(kind, &cfg.credentials()).await?;
            }
            "kill" => supervisor::ensure_stopped(kind),
            other => eprintln!("unknown test mode {other:?} (expected run or kill)"),
        }
        return Ok(());
    }

    if parsed.save {
        if let (Some(device), Some(namepass), Some(address)) =
            (&parsed.device, &parsed.namepass, &parsed.address)
        {
            let kind = device_from_arg(device)?;
            let (username, password) = namepass
                .split_once(':')
                .ok_or_else(|| anyhow!("namepass must be USER:PASSWORD"))?;
            let cfg = MinerConfig {
                mining_address: address.clone(),
                username: username.to_string(),
                password: password.to_string(),
                device: match kind {
                    DeviceKind::Cpu => 0,
                    DeviceKind::Gpu => 1,
                },
                start_time_in_day: parsed.tstart.clone(),
                end_time_in_day: parsed.tend.clone(),
            };
            config::save_config(&cfg).context("write config")?;
            info!("save config success");
            return Ok(());
        }
    }

    eprintln!("{}", usage("sminer_agent"));
    Ok(())
}
