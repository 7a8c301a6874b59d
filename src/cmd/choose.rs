use anyhow::{Context, Result};
use pmcheck::pm::{choose, is_project_using_yarn, PackageManager, VersionProbe};
use pmcheck::runner::SystemRunner;
use pmcheck::ui::Logger;
use serde::Serialize;
use std::path::PathBuf;

use super::{parse_min, project_dir};

#[derive(Debug, Serialize)]
struct Report {
    package_manager: PackageManager,
    install_command: Vec<String>,
    yarn_version: Option<String>,
    yarn_lock: bool,
}

pub fn cmd_choose(
    log: &Logger,
    dir: Option<PathBuf>,
    min: Option<&str>,
    json: bool,
) -> Result<i32> {
    let Some(min) = parse_min(log, min) else {
        return Ok(2);
    };
    let dir = project_dir(dir)?;

    let availability = VersionProbe::new(&SystemRunner, log)
        .min_version(min)
        .probe();
    let pm = choose(&availability, &dir);

    if !json {
        println!("{}", pm.name());
        return Ok(0);
    }

    let (cmd, args) = pm.install_command();
    let mut install_command = vec![cmd];
    install_command.extend(args);
    let report = Report {
        package_manager: pm,
        install_command,
        yarn_version: availability.into_version(),
        yarn_lock: is_project_using_yarn(&dir),
    };
    let out = serde_json::to_string_pretty(&report).context("json format")?;
    println!("{out}");
    Ok(0)
}
