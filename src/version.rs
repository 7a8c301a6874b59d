use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn re_semver() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^v?(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?$",
        )
        .expect("regex")
    })
}

/// Longest input accepted, matching npm's semver.
pub const MAX_LENGTH: usize = 256;

/// Largest numeric component accepted (`Number.MAX_SAFE_INTEGER`).
pub const MAX_COMPONENT: u64 = 9_007_199_254_740_991;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid semantic version: {0:?}")]
pub struct ParseVersionError(String);

/// A `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version.
///
/// Ordering follows semver precedence. Build metadata is accepted when
/// parsing but dropped, so it never takes part in comparisons.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Vec<Identifier>,
}

/// One dot-separated pre-release identifier. Numeric identifiers sort
/// before alphanumeric ones.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    Alpha(String),
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Vec::new(),
        }
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());
        if s.len() > MAX_LENGTH {
            return Err(err());
        }
        let caps = re_semver().captures(s).ok_or_else(err)?;

        let num = |i: usize| -> Result<u64, ParseVersionError> {
            match caps[i].parse::<u64>() {
                Ok(n) if n <= MAX_COMPONENT => Ok(n),
                _ => Err(err()),
            }
        };
        let major = num(1)?;
        let minor = num(2)?;
        let patch = num(3)?;

        let mut pre = Vec::new();
        if let Some(m) = caps.get(4) {
            for part in m.as_str().split('.') {
                // Numeric identifiers past the safe range compare as text.
                match part.parse::<u64>() {
                    Ok(n) if n <= MAX_COMPONENT => pre.push(Identifier::Numeric(n)),
                    _ => pre.push(Identifier::Alpha(part.to_string())),
                }
            }
        }

        Ok(Version {
            major,
            minor,
            patch,
            pre,
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                // A release outranks any of its pre-releases.
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, id) in self.pre.iter().enumerate() {
            f.write_str(if i == 0 { "-" } else { "." })?;
            match id {
                Identifier::Numeric(n) => write!(f, "{n}")?,
                Identifier::Alpha(s) => f.write_str(s)?,
            }
        }
        Ok(())
    }
}
