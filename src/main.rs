use anyhow::Result;
use clap::Parser;
use pmcheck::ui::Logger;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod cmd;

use cli::{Cli, Cmd, USAGE_TEXT};
use cmd::{cmd_choose, cmd_lockfile, cmd_version};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("[pmcheck] ERROR: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PMCHECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pmcheck=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn run() -> Result<i32> {
    let log = Logger;

    let cli = Cli::parse();
    let Some(cmd) = cli.cmd else {
        eprintln!("{USAGE_TEXT}");
        return Ok(2);
    };

    match cmd {
        Cmd::Help => {
            print!("{USAGE_TEXT}");
            Ok(0)
        }

        Cmd::Version { min, show_stderr } => cmd_version(&log, min.as_deref(), show_stderr),

        Cmd::Lockfile { dir } => cmd_lockfile(&log, dir),

        Cmd::Choose { dir, min, json } => cmd_choose(&log, dir, min.as_deref(), json),
    }
}
