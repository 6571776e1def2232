use crate::{Error, Result};
use std::fmt;

const RECORD_LENGTH: u16 = 20;
const GPS_TIME_LENGTH: u16 = 8;

/// Point data record format.
///
/// Las 1.0 and 1.1 define two formats: zero, the base record, and one, which adds gps time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Format(u8);

impl Format {
    /// Creates a new format from its id.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert!(Format::new(1).is_ok());
    /// assert!(Format::new(2).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        if n <= 1 {
            Ok(Format(n))
        } else {
            Err(Error::UnsupportedPointFormat(n))
        }
    }

    /// Does this point format have a gps_time field?
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert!(!Format::new(0).unwrap().has_gps_time());
    /// assert!(Format::new(1).unwrap().has_gps_time());
    /// ```
    pub fn has_gps_time(&self) -> bool {
        self.0 == 1
    }

    /// Returns the length of one point record in this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(28, Format::new(1).unwrap().len());
    /// ```
    pub fn len(&self) -> u16 {
        if self.has_gps_time() {
            RECORD_LENGTH + GPS_TIME_LENGTH
        } else {
            RECORD_LENGTH
        }
    }

    /// Returns this format's id.
    pub fn to_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
