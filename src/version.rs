//! Linked libgphoto2 version check.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Oldest libgphoto2 release whose widget API this crate relies on.
pub const MINIMUM_VERSION: LibraryVersion = LibraryVersion::new(2, 5, 0);

/// A `major.minor.patch` libgphoto2 version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl LibraryVersion {
    /// Create a version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for LibraryVersion {
    type Err = Error;

    /// Parses `"2.5.31"`. A missing patch reads as 0; extra components and
    /// suffixes such as `"2.5.31.1"` or `"2.5.28-dev"` are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidLinkedVersion(format!("unable to parse version '{s}'"));

        let mut parts = s.trim().split('.').map(|part| {
            let digits: &str = part
                .find(|c: char| !c.is_ascii_digit())
                .map_or(part, |end| part.get(..end).unwrap_or(part));
            digits.parse::<u32>()
        });

        let major = parts.next().and_then(|p| p.ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.ok()).ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(part) => part.map_err(|_| invalid())?,
            None => 0,
        };
        Ok(Self::new(major, minor, patch))
    }
}

/// Parse the linked version string and check it against [`MINIMUM_VERSION`].
pub fn ensure_supported(linked: &str) -> Result<LibraryVersion> {
    let version: LibraryVersion = linked.parse()?;
    if version < MINIMUM_VERSION {
        return Err(Error::InvalidLinkedVersion(format!(
            "libgphoto2 {version} is linked, {MINIMUM_VERSION} or newer is required"
        )));
    }
    log::debug!("linked libgphoto2 {version}");
    Ok(version)
}
