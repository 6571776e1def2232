use crate::{Error, Result};
use std::fmt;

const MAJOR: u8 = 1;
const MAX_MINOR: u8 = 1;

/// LAS version.
///
/// Versions read from a file are kept as-is, even if this crate wouldn't let you set them, so
/// that slightly noncompliant files roundtrip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// For now, always 1.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// No checks are done, see [Version::verify] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lasfile::Version;
    /// let version = Version::new(1, 1);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Checks that a major version can be assigned to a header.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lasfile::Version;
    /// assert!(Version::verify_major(1).is_ok());
    /// assert!(Version::verify_major(2).is_err());
    /// ```
    pub fn verify_major(major: u8) -> Result<u8> {
        if major == MAJOR {
            Ok(major)
        } else {
            Err(Error::InvalidVersionMajor(major))
        }
    }

    /// Checks that a minor version can be assigned to a header.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lasfile::Version;
    /// assert!(Version::verify_minor(0).is_ok());
    /// assert!(Version::verify_minor(1).is_ok());
    /// assert!(Version::verify_minor(2).is_err());
    /// ```
    pub fn verify_minor(minor: u8) -> Result<u8> {
        if minor <= MAX_MINOR {
            Ok(minor)
        } else {
            Err(Error::InvalidVersionMinor(minor))
        }
    }

    /// Checks both parts of this version.
    pub fn verify(&self) -> Result<()> {
        let _ = Version::verify_major(self.major)?;
        let _ = Version::verify_minor(self.minor)?;
        Ok(())
    }

    /// Does this version require the two-byte point data start signature?
    ///
    /// # Examples
    ///
    /// ```
    /// # use lasfile::Version;
    /// assert!(Version::new(1, 0).requires_point_data_start_signature());
    /// assert!(!Version::new(1, 1).requires_point_data_start_signature());
    /// ```
    pub fn requires_point_data_start_signature(&self) -> bool {
        self.major == MAJOR && self.minor == 0
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 0)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify() {
        assert!(Version::new(1, 0).verify().is_ok());
        assert!(Version::new(1, 1).verify().is_ok());
        assert!(Version::new(1, 2).verify().is_err());
        assert!(Version::new(2, 0).verify().is_err());
        assert!(Version::new(0, 0).verify().is_err());
    }

    #[test]
    fn display() {
        assert_eq!("1.1", Version::new(1, 1).to_string());
    }

    #[test]
    fn ordering() {
        assert!(Version::new(1, 0) < Version::new(1, 1));
    }
}
