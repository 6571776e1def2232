//! Raw structures that map directly onto the structures of the las 1.0 and 1.1 formats.
//!
//! In general, these structures are "dumb", meaning that they do the least amount of validity
//! checking. For example:
//!
//! ```
//! let raw_header = lasfile::raw::Header::default();
//! assert_eq!(0, raw_header.number_of_variable_length_records);
//!
//! let header = lasfile::Header::default();
//! assert_eq!(lasfile::Version::new(1, 0), header.version());
//! ```
//!
//! In general, users should prefer to use the non-raw versions, e.g. `lasfile::Header` over
//! `lasfile::raw::Header`, in order to ensure that they are following The Rules.

pub mod header;
pub mod point;
pub mod vlr;

pub use self::header::Header;
pub use self::point::Point;
pub use self::vlr::Vlr;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// The point data start signature required by las 1.0.
pub const POINT_DATA_START_SIGNATURE: [u8; 2] = [0xDD, 0xCC];
