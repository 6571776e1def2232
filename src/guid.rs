//! Globally unique identifiers, as used for the project id.
//!
//! The project id is stored in the header as a Microsoft-style GUID: the first three groups are
//! little-endian integers and the last eight bytes are stored as-is.
//!
//! ```
//! use lasfile::Guid;
//! let guid: Guid = "8388f1b8-aa1b-4108-bca3-6bc68e7b062e".parse().unwrap();
//! assert_eq!(&[0xb8u8, 0xf1, 0x88, 0x83][..], &guid.to_bytes()[..4]);
//! assert_eq!("8388f1b8-aa1b-4108-bca3-6bc68e7b062e", guid.to_string());
//! ```

use crate::{Error, Result};
use std::{fmt, str::FromStr};
use uuid::Uuid;

const CANONICAL_LEN: usize = 36;
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// A 128-bit identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Guid(Uuid);

impl Guid {
    /// Creates a new, random guid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Guid;
    /// assert_ne!(Guid::new_v4(), Guid::new_v4());
    /// ```
    pub fn new_v4() -> Guid {
        Guid(Uuid::new_v4())
    }

    /// Returns the all-zero guid.
    pub fn nil() -> Guid {
        Guid(Uuid::nil())
    }

    /// Parses a guid from its canonical `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` form.
    ///
    /// Hex digits may be upper or lower case. Any other layout (braces, urns, missing hyphens) is
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Guid;
    /// assert!(Guid::parse_str("8388F1B8-AA1B-4108-BCA3-6BC68E7B062E").is_ok());
    /// assert!(Guid::parse_str("8388F1B8AA1B4108BCA36BC68E7B062E").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Guid> {
        let is_canonical = s.len() == CANONICAL_LEN
            && s.char_indices().all(|(i, c)| {
                if HYPHENS.contains(&i) {
                    c == '-'
                } else {
                    c.is_ascii_hexdigit()
                }
            });
        if !is_canonical {
            return Err(Error::InvalidGuid(s.to_string()));
        }
        Uuid::parse_str(s)
            .map(Guid)
            .map_err(|_| Error::InvalidGuid(s.to_string()))
    }

    /// Creates a guid from the sixteen bytes stored in a las header.
    pub fn from_bytes(bytes: [u8; 16]) -> Guid {
        Guid(Uuid::from_bytes_le(bytes))
    }

    /// Returns the sixteen bytes as stored in a las header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Guid;
    /// let guid = Guid::new_v4();
    /// assert_eq!(guid, Guid::from_bytes(guid.to_bytes()));
    /// ```
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes_le()
    }

    /// Returns true if every byte is zero.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Guid> {
        Guid::parse_str(s)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Guid {
        Guid(uuid)
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Uuid {
        guid.0
    }
}
