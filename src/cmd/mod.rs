mod choose;
mod lockfile;
mod version;

pub use choose::cmd_choose;
pub use lockfile::cmd_lockfile;
pub use version::cmd_version;

use pmcheck::ui::{Log, Logger};
use pmcheck::version::Version;
use std::env;
use std::path::PathBuf;

/// Parse a `--min` value, falling back to the built-in minimum.
fn parse_min(log: &Logger, min: Option<&str>) -> Option<Version> {
    let Some(raw) = min.map(str::trim) else {
        return Some(pmcheck::pm::MIN_YARN_VERSION);
    };
    match raw.parse::<Version>() {
        Ok(v) => Some(v),
        Err(e) => {
            log.errorf(&format!("--min: {e}"));
            None
        }
    }
}

fn project_dir(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => Ok(env::current_dir()?),
    }
}
