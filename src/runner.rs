use anyhow::{anyhow, Context, Result};
use std::process::{Command, Stdio};

/// What happens to a probed command's standard error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StderrMode {
    /// Let the child write to our stderr.
    Inherit,
    /// Send it to the null device (`2>/dev/null`).
    Discard,
}

impl StderrMode {
    /// Discard everywhere except Windows, where the child's error output
    /// stays visible.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            StderrMode::Inherit
        } else {
            StderrMode::Discard
        }
    }

    fn stdio(self) -> Stdio {
        match self {
            StderrMode::Inherit => Stdio::inherit(),
            StderrMode::Discard => Stdio::null(),
        }
    }
}

/// Runs a command to completion and hands back its standard output.
///
/// Implementations return an error when the program cannot be spawned or
/// exits unsuccessfully.
pub trait CommandRunner {
    fn output(&self, program: &str, args: &[&str], stderr: StderrMode) -> Result<String>;
}

/// Spawns real processes found on `PATH`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[&str], stderr: StderrMode) -> Result<String> {
        tracing::debug!(program, ?args, ?stderr, "spawning");
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(stderr.stdio())
            .output()
            .with_context(|| format!("run {program}"))?;
        if !out.status.success() {
            return Err(anyhow!("{program} failed: {}", out.status));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
