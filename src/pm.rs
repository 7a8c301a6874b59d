use serde::Serialize;
use std::path::Path;

use crate::runner::{CommandRunner, StderrMode, SystemRunner};
use crate::ui::{Log, Logger};
use crate::version::Version;

pub const YARN: &str = "yarn";
pub const LOCKFILE: &str = "yarn.lock";

/// Oldest yarn we trust: earlier releases have a missing-manifest bug.
pub const MIN_YARN_VERSION: Version = Version::new(0, 16, 0);

/// Outcome of asking the system for yarn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Availability {
    /// Not installed, or `yarn --version` failed.
    Unavailable,
    /// Ran, but printed something that is not a version.
    Unparseable,
    /// Installed, older than the minimum.
    TooOld(String),
    Supported(String),
}

impl Availability {
    pub fn version(&self) -> Option<&str> {
        match self {
            Availability::Supported(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_version(self) -> Option<String> {
        match self {
            Availability::Supported(v) => Some(v),
            _ => None,
        }
    }
}

pub struct VersionProbe<'a> {
    runner: &'a dyn CommandRunner,
    log: &'a dyn Log,
    min: Version,
    stderr: StderrMode,
}

impl<'a> VersionProbe<'a> {
    pub fn new(runner: &'a dyn CommandRunner, log: &'a dyn Log) -> Self {
        VersionProbe {
            runner,
            log,
            min: MIN_YARN_VERSION,
            stderr: StderrMode::platform_default(),
        }
    }

    pub fn min_version(mut self, min: Version) -> Self {
        self.min = min;
        self
    }

    pub fn stderr(mut self, mode: StderrMode) -> Self {
        self.stderr = mode;
        self
    }

    pub fn probe(&self) -> Availability {
        let raw = match self.runner.output(YARN, &["--version"], self.stderr) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!("{YARN} unavailable: {e:#}");
                return Availability::Unavailable;
            }
        };

        let candidate = raw.trim();
        match candidate.parse::<Version>() {
            Ok(v) if v >= self.min => Availability::Supported(candidate.to_string()),
            Ok(_) => {
                tracing::debug!("{YARN} {candidate} is older than {}", self.min);
                Availability::TooOld(candidate.to_string())
            }
            Err(_) => {
                self.log
                    .errorf(&format!("cannot parse {YARN} version: {candidate}"));
                Availability::Unparseable
            }
        }
    }

    /// The installed yarn version, if it is recent enough to use.
    pub fn probe_version(&self) -> Option<String> {
        self.probe().into_version()
    }
}

pub fn yarn_version_if_available() -> Option<String> {
    VersionProbe::new(&SystemRunner, &Logger).probe_version()
}

/// Whether the project was installed with yarn. Any failure to stat the
/// lockfile counts as "no".
pub fn is_project_using_yarn(project_dir: &Path) -> bool {
    project_dir.join(LOCKFILE).exists()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Yarn => YARN,
            PackageManager::Npm => "npm",
        }
    }

    pub fn install_command(self) -> (String, Vec<String>) {
        (self.name().into(), vec!["install".into()])
    }
}

/// Yarn only when a usable yarn exists and the project already has a
/// yarn lockfile; yarn and npm are never mixed in one project.
pub fn choose(availability: &Availability, project_dir: &Path) -> PackageManager {
    if availability.version().is_some() && is_project_using_yarn(project_dir) {
        PackageManager::Yarn
    } else {
        PackageManager::Npm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::TempDir;

    struct Canned {
        stdout: Option<&'static str>,
        calls: Cell<usize>,
        seen_stderr: Cell<Option<StderrMode>>,
    }

    impl Canned {
        fn prints(s: &'static str) -> Self {
            Canned {
                stdout: Some(s),
                calls: Cell::new(0),
                seen_stderr: Cell::new(None),
            }
        }

        fn missing() -> Self {
            Canned {
                stdout: None,
                calls: Cell::new(0),
                seen_stderr: Cell::new(None),
            }
        }
    }

    impl CommandRunner for Canned {
        fn output(&self, program: &str, args: &[&str], stderr: StderrMode) -> Result<String> {
            assert_eq!(program, "yarn");
            assert_eq!(args, ["--version"]);
            self.calls.set(self.calls.get() + 1);
            self.seen_stderr.set(Some(stderr));
            self.stdout
                .map(str::to_string)
                .ok_or_else(|| anyhow!("run yarn: not found"))
        }
    }

    #[derive(Default)]
    struct Recorder {
        errors: RefCell<Vec<String>>,
    }

    impl Log for Recorder {
        fn infof(&self, _msg: &str) {}

        fn errorf(&self, msg: &str) {
            self.errors.borrow_mut().push(msg.to_string());
        }
    }

    #[test]
    fn supported_version_is_returned_trimmed() {
        let runner = Canned::prints("  1.2.3\n");
        let log = Recorder::default();
        let probe = VersionProbe::new(&runner, &log);

        assert_eq!(probe.probe_version().as_deref(), Some("1.2.3"));
        assert!(log.errors.borrow().is_empty());
    }

    #[test]
    fn minimum_itself_is_accepted() {
        let runner = Canned::prints("0.16.0\n");
        let log = Recorder::default();
        assert_eq!(
            VersionProbe::new(&runner, &log).probe(),
            Availability::Supported("0.16.0".into())
        );
    }

    #[test]
    fn older_versions_are_rejected() {
        let log = Recorder::default();
        for old in ["0.15.0", "0.15.9", "0.16.0-rc.1"] {
            let runner = Canned::prints(old);
            let probe = VersionProbe::new(&runner, &log);
            assert_eq!(probe.probe(), Availability::TooOld(old.to_string()));
            assert_eq!(probe.probe_version(), None);
        }
        assert!(log.errors.borrow().is_empty());
    }

    #[test]
    fn malformed_output_logs_once() {
        let runner = Canned::prints("not-a-version\n");
        let log = Recorder::default();

        let got = VersionProbe::new(&runner, &log).probe();

        assert_eq!(got, Availability::Unparseable);
        assert_eq!(
            *log.errors.borrow(),
            vec!["cannot parse yarn version: not-a-version".to_string()]
        );
    }

    #[test]
    fn non_ascii_digits_and_unsafe_numbers_are_unparseable() {
        for out in ["1.0.0-1\u{0661}", "1.0.0-\u{0661}a", "9007199254740992.0.0"] {
            let runner = Canned::prints(out);
            let log = Recorder::default();

            let got = VersionProbe::new(&runner, &log).probe();

            assert_eq!(got, Availability::Unparseable, "{out:?}");
            assert_eq!(log.errors.borrow().len(), 1, "{out:?}");
        }
    }

    #[test]
    fn empty_output_is_unparseable() {
        let runner = Canned::prints("\n");
        let log = Recorder::default();
        assert_eq!(VersionProbe::new(&runner, &log).probe_version(), None);
        assert_eq!(log.errors.borrow().len(), 1);
    }

    #[test]
    fn missing_binary_is_silent() {
        let runner = Canned::missing();
        let log = Recorder::default();

        let got = VersionProbe::new(&runner, &log).probe();

        assert_eq!(got, Availability::Unavailable);
        assert_eq!(runner.calls.get(), 1);
        assert!(log.errors.borrow().is_empty());
    }

    #[test]
    fn minimum_is_configurable() {
        let runner = Canned::prints("1.22.19");
        let log = Recorder::default();
        let probe = VersionProbe::new(&runner, &log).min_version(Version::new(2, 0, 0));
        assert_eq!(probe.probe(), Availability::TooOld("1.22.19".into()));
    }

    #[test]
    fn stderr_mode_reaches_the_runner() {
        let runner = Canned::prints("1.0.0");
        let log = Recorder::default();

        VersionProbe::new(&runner, &log).probe();
        assert_eq!(
            runner.seen_stderr.get(),
            Some(StderrMode::platform_default())
        );

        VersionProbe::new(&runner, &log)
            .stderr(StderrMode::Inherit)
            .probe();
        assert_eq!(runner.seen_stderr.get(), Some(StderrMode::Inherit));
    }

    #[test]
    fn probing_is_repeatable() {
        let runner = Canned::prints("1.22.19\n");
        let log = Recorder::default();
        let probe = VersionProbe::new(&runner, &log);

        assert_eq!(probe.probe_version(), probe.probe_version());
        assert_eq!(runner.calls.get(), 2);
    }

    #[test]
    fn lockfile_detection() {
        let td = TempDir::new().unwrap();
        assert!(!is_project_using_yarn(td.path()));

        fs::write(td.path().join("yarn.lock"), "").unwrap();
        assert!(is_project_using_yarn(td.path()));
        assert!(is_project_using_yarn(td.path()));

        assert!(!is_project_using_yarn(&td.path().join("missing")));
    }

    #[test]
    fn lockfile_directory_counts_as_present() {
        let td = TempDir::new().unwrap();
        fs::create_dir(td.path().join("yarn.lock")).unwrap();
        assert!(is_project_using_yarn(td.path()));
    }

    #[test]
    fn other_lockfiles_are_ignored() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("package-lock.json"), "{}").unwrap();
        fs::write(td.path().join("pnpm-lock.yaml"), "").unwrap();
        assert!(!is_project_using_yarn(td.path()));
    }

    #[test]
    fn choose_needs_both_yarn_and_lockfile() {
        let td = TempDir::new().unwrap();
        let ok = Availability::Supported("1.22.19".into());

        assert_eq!(choose(&ok, td.path()), PackageManager::Npm);

        fs::write(td.path().join("yarn.lock"), "").unwrap();
        assert_eq!(choose(&ok, td.path()), PackageManager::Yarn);
        assert_eq!(
            choose(&Availability::TooOld("0.15.0".into()), td.path()),
            PackageManager::Npm
        );
        assert_eq!(
            choose(&Availability::Unavailable, td.path()),
            PackageManager::Npm
        );
    }

    #[test]
    fn install_commands() {
        assert_eq!(
            PackageManager::Yarn.install_command(),
            ("yarn".to_string(), vec!["install".to_string()])
        );
        assert_eq!(PackageManager::Npm.install_command().0, "npm");
    }
}
