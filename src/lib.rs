//! Decide whether a project should be driven with yarn.
//!
//! Two checks back the decision: [`pm::VersionProbe`] asks the installed
//! `yarn` for its version and rejects releases older than
//! [`pm::MIN_YARN_VERSION`], and [`pm::is_project_using_yarn`] looks for a
//! `yarn.lock` in the project. Neither check fails: problems surface as an
//! absent version or `false`.

pub mod pm;
pub mod runner;
pub mod ui;
pub mod version;
