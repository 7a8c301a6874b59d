use anyhow::Result;
use pmcheck::pm::{Availability, VersionProbe, YARN};
use pmcheck::runner::{StderrMode, SystemRunner};
use pmcheck::ui::{Log, Logger};

use super::parse_min;

pub fn cmd_version(log: &Logger, min: Option<&str>, show_stderr: bool) -> Result<i32> {
    let Some(min) = parse_min(log, min) else {
        return Ok(2);
    };

    let mut probe = VersionProbe::new(&SystemRunner, log).min_version(min.clone());
    if show_stderr {
        probe = probe.stderr(StderrMode::Inherit);
    }

    match probe.probe() {
        Availability::Supported(v) => {
            println!("{v}");
            Ok(0)
        }
        Availability::TooOld(v) => {
            log.infof(&format!("{YARN} {v} is older than {min}; not using it"));
            Ok(1)
        }
        Availability::Unavailable => {
            log.infof(&format!("{YARN} not found (or `{YARN} --version` failed)"));
            Ok(1)
        }
        // Already reported by the probe.
        Availability::Unparseable => Ok(1),
    }
}
