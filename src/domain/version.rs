use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Version triple as written into project files
///
/// The revision component is implicit and always zero. A version written
/// with only two groups has no build number; it displays as zero and the
/// first build increment sets it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Version {
            major,
            minor,
            build: Some(build),
        }
    }

    /// Build number as written, zero when absent
    pub fn build_number(&self) -> u32 {
        self.build.unwrap_or(0)
    }

    /// Parse a dotted version string of 2 to 4 numeric groups (e.g., "1.2", "1.2.3.4")
    ///
    /// A missing build group is kept as absent. The revision group, if
    /// present, must be numeric but is otherwise ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(BumpError::version(format!(
                "Invalid version format: '{}' - expected 2 to 4 dotted numbers",
                input
            )));
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            numbers.push(parse_component(part, input)?);
        }

        Ok(Version {
            major: numbers[0],
            minor: numbers[1],
            build: numbers.get(2).copied(),
        })
    }

    /// Apply an increment mode to this version
    ///
    /// Fails only when a component would overflow.
    pub fn bump(&self, mode: IncrementMode) -> Result<Self> {
        let next = match mode {
            IncrementMode::None => Some(*self),
            IncrementMode::Build => {
                next_build(self.build).map(|build| Version::new(self.major, self.minor, build))
            }
            IncrementMode::MinorAndReset => {
                increment(self.minor).map(|minor| Version::new(self.major, minor, 0))
            }
            IncrementMode::MajorAndReset => {
                increment(self.major).map(|major| Version::new(major, 0, 0))
            }
            IncrementMode::MinorAndBuild => increment(self.minor)
                .zip(next_build(self.build))
                .map(|(minor, build)| Version::new(self.major, minor, build)),
            IncrementMode::MajorAndBuild => increment(self.major)
                .zip(next_build(self.build))
                .map(|(major, build)| Version::new(major, 0, build)),
        };

        next.ok_or_else(|| {
            BumpError::version(format!("Version {} cannot be incremented further", self))
        })
    }

    /// Four-component form with the revision fixed at zero
    pub fn to_four_part(&self) -> String {
        format!("{}.0", self)
    }
}

fn parse_component(part: &str, input: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BumpError::version(format!(
            "Invalid version component '{}' in '{}'",
            part, input
        )));
    }
    part.parse::<u32>()
        .map_err(|_| BumpError::version(format!("Version component out of range: {}", part)))
}

fn increment(component: u32) -> Option<u32> {
    component.checked_add(1)
}

// An absent build number counts as one below zero
fn next_build(build: Option<u32>) -> Option<u32> {
    match build {
        Some(build) => increment(build),
        None => Some(0),
    }
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build_number())
    }
}

/// Increment policy applied to every version touched in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncrementMode {
    /// Leave the version as it is
    None,
    /// Increment build only
    #[default]
    Build,
    /// Increment minor, zero build
    MinorAndReset,
    /// Increment major, zero minor and build
    MajorAndReset,
    /// Increment minor and build
    MinorAndBuild,
    /// Increment major and build, zero minor
    MajorAndBuild,
}

impl IncrementMode {
    /// Select the mode from the command-line flags
    pub fn from_flags(major: bool, minor: bool, build: bool) -> Self {
        match (major, minor, build) {
            (true, _, true) => IncrementMode::MajorAndBuild,
            (false, true, true) => IncrementMode::MinorAndBuild,
            (true, _, false) => IncrementMode::MajorAndReset,
            (false, true, false) => IncrementMode::MinorAndReset,
            (false, false, _) => IncrementMode::Build,
        }
    }

    /// Get the mode name as a string
    pub fn name(&self) -> &'static str {
        match self {
            IncrementMode::None => "none",
            IncrementMode::Build => "build",
            IncrementMode::MinorAndReset => "minor",
            IncrementMode::MajorAndReset => "major",
            IncrementMode::MinorAndBuild => "minor+build",
            IncrementMode::MajorAndBuild => "major+build",
        }
    }
}

impl fmt::Display for IncrementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse `current` and bump it, returning the new three-part string
pub fn next_version(current: &str, mode: IncrementMode) -> Result<String> {
    Ok(Version::parse(current.trim())?.bump(mode)?.to_string())
}
