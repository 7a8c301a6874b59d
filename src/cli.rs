use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const USAGE_TEXT: &str = r#"pmcheck: decide whether a project should be upgraded with yarn or npm

Usage:
  pmcheck version [--min <semver>] [--show-stderr]
  pmcheck lockfile [<dir>]
  pmcheck choose [<dir>] [--min <semver>] [--json]

Conventions:
  - yarn is usable when `yarn --version` reports at least 0.16.0 (older releases lose track of the manifest).
  - A project counts as a yarn project when <dir>/yarn.lock exists.
  - `choose` answers yarn only when both hold; otherwise npm. yarn and npm are never mixed in one project.
  - Exit codes: 0 = yes/ok, 1 = no, 2 = usage error.
  - Set PMCHECK_LOG (e.g. PMCHECK_LOG=pmcheck=debug) for debug output.
"#;

#[derive(Parser, Debug)]
#[command(name = "pmcheck")]
#[command(disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print usage
    Help,

    /// Print the installed yarn version if it is recent enough
    Version {
        /// Minimum acceptable yarn version
        #[arg(long, value_name = "SEMVER")]
        min: Option<String>,
        /// Let `yarn --version` write to stderr instead of discarding it
        #[arg(long = "show-stderr")]
        show_stderr: bool,
    },

    /// Check whether <dir>/yarn.lock exists
    Lockfile {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },

    /// Pick yarn or npm for a project
    Choose {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,
        /// Minimum acceptable yarn version
        #[arg(long, value_name = "SEMVER")]
        min: Option<String>,
        /// Print a JSON report instead of the bare name
        #[arg(long)]
        json: bool,
    },
}
