use std::fmt;
use std::str::FromStr;

/// Oldest daemon release the bridge is known to work against.
pub const MIN_DAEMON_VERSION: &str = "0.34.1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("invalid version format: {0}, expected X.Y.Z")]
    Format(String),
    #[error("non-integer part in version {version}: {part}")]
    NonInteger { version: String, part: String },
}

/// A `major.minor.patch` triple. Ordering is lexicographic over the
/// three numbers, which is what the derived `Ord` gives us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DaemonVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl DaemonVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The minimum supported daemon version.
    pub fn minimum() -> Self {
        // MIN_DAEMON_VERSION is a well-formed literal
        Self::new(0, 34, 1)
    }

    pub fn is_older_than(&self, other: &DaemonVersion) -> bool {
        self < other
    }
}

impl FromStr for DaemonVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::Format(s.to_string()));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
            *slot = part.parse().map_err(|_| VersionError::NonInteger {
                version: s.to_string(),
                part: part.to_string(),
            })?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl fmt::Display for DaemonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns `true` when `installed` is strictly older than `required`.
pub fn compare_versions(installed: &str, required: &str) -> Result<bool, VersionError> {
    let installed: DaemonVersion = installed.parse()?;
    let required: DaemonVersion = required.parse()?;
    Ok(installed.is_older_than(&required))
}
