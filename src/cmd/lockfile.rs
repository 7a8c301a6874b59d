use anyhow::Result;
use pmcheck::pm::{is_project_using_yarn, LOCKFILE};
use pmcheck::ui::{Log, Logger};
use std::path::PathBuf;

use super::project_dir;

pub fn cmd_lockfile(log: &Logger, dir: Option<PathBuf>) -> Result<i32> {
    let dir = project_dir(dir)?;
    if is_project_using_yarn(&dir) {
        println!("{}", dir.join(LOCKFILE).display());
        return Ok(0);
    }
    log.infof(&format!("no {LOCKFILE} in {}", dir.display()));
    Ok(1)
}
