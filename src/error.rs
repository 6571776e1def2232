use crate::{Transform, Version, point::Violations};
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The reader has been closed.
    #[error("the reader is closed")]
    ClosedReader,

    /// The writer has been closed.
    #[error("the writer is closed")]
    ClosedWriter,

    /// The file signature was not "LASF".
    #[error("file signature must be LASF, found {0:?}")]
    InvalidFileSignature([u8; 4]),

    /// The string is not a canonical, hyphenated guid.
    #[error("invalid guid string: {0}")]
    InvalidGuid(String),

    /// The header is too large to be described by its 16-bit size field.
    #[error("the header is too large: {0} bytes")]
    HeaderTooLarge(usize),

    /// A header rewrite would move the start of the point data.
    #[error("the offset to point data would change from {old} to {new}")]
    HeaderSizeChanged {
        /// The offset to point data in the file.
        old: u32,
        /// The offset to point data required by the new header.
        new: u32,
    },

    /// The point data record length does not match the point format.
    #[error("point format {format} requires a record length of {expected}, found {found}")]
    InvalidPointDataRecordLength {
        /// The point format id.
        format: u8,
        /// The length required by the format.
        expected: u16,
        /// The length found in the header.
        found: u16,
    },

    /// The point, as validated, has fields outside of their allowed ranges.
    #[error("point data members out of range: {0:?}")]
    InvalidPoint(Violations),

    /// The major version can only be one.
    #[error("version major must be 1, got {0}")]
    InvalidVersionMajor(u8),

    /// The minor version can only be zero or one.
    #[error("version minor must be 0 or 1, got {0}")]
    InvalidVersionMinor(u8),

    /// The coordinate can't be converted to an `i32` with this transform.
    #[error("the transform {transform} cannot convert {n} to an i32")]
    InverseTransform {
        /// The float that couldn't be transformed.
        n: f64,
        /// The transform that was used.
        transform: Transform,
    },

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file being appended to was written with a different point format.
    #[error("cannot append points of format {requested} to a file of format {existing}")]
    FormatMismatch {
        /// The format of the existing file.
        existing: u8,
        /// The format of the header passed to the writer.
        requested: u8,
    },

    /// The offset to point data doesn't fit in a u32.
    #[error("the offset to point data is too large: {0}")]
    OffsetToPointDataTooLarge(usize),

    /// The requested point is past the end of the file.
    #[error("point index {index} is out of range, the file has {count} points")]
    PointIndex {
        /// The requested index.
        index: u64,
        /// The number of points in the file.
        count: u64,
    },

    /// Points by return are only stored for the first five returns.
    #[error("return count index {0} is out of range, must be less than 5")]
    ReturnCountIndex(usize),

    /// Too many points were written for the 32-bit point count.
    #[error("too many points for a las 1.0/1.1 file: {0}")]
    TooManyPoints(u64),

    /// Too many vlrs for the 32-bit vlr count.
    #[error("too many vlrs for a las 1.0/1.1 header: {0}")]
    TooManyVlrs(usize),

    /// Only point formats zero and one are supported.
    #[error("unsupported point format: {0}")]
    UnsupportedPointFormat(u8),

    /// A version read from disk isn't one of the versions this crate can write.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(Version),

    /// The vlr index is past the end of the table.
    #[error("vlr index {index} is out of range, the table has {len} vlrs")]
    VlrIndex {
        /// The requested index.
        index: usize,
        /// The number of vlrs in the table.
        len: usize,
    },

    /// The vlrs run past the start of the point data.
    #[error("the vlrs end at byte {end}, past the offset to point data {offset_to_point_data}")]
    VlrOverrun {
        /// The byte offset at which the vlrs end.
        end: u64,
        /// The offset to point data declared by the header.
        offset_to_point_data: u32,
    },

    /// The vlr data is too long for its 16-bit record length.
    #[error("the vlr is too long: {0} bytes")]
    VlrTooLong(usize),
}

impl Error {
    /// Returns true if this error means the file contents are malformed or unsupported.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Error;
    /// assert!(Error::InvalidFileSignature(*b"LASG").is_format_error());
    /// assert!(!Error::ClosedWriter.is_format_error());
    /// ```
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFileSignature(_)
                | Error::InvalidGuid(_)
                | Error::InvalidPointDataRecordLength { .. }
                | Error::FormatMismatch { .. }
                | Error::UnsupportedPointFormat(_)
                | Error::UnsupportedVersion(_)
                | Error::VlrOverrun { .. }
        )
    }

    /// Returns true if this error is a value or index outside of its allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Error;
    /// assert!(Error::InvalidVersionMinor(2).is_range_error());
    /// assert!(Error::ReturnCountIndex(5).is_range_error());
    /// assert!(Error::TooManyVlrs(usize::MAX).is_range_error());
    /// ```
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Error::HeaderSizeChanged { .. }
                | Error::HeaderTooLarge(_)
                | Error::InvalidVersionMajor(_)
                | Error::InvalidVersionMinor(_)
                | Error::InverseTransform { .. }
                | Error::OffsetToPointDataTooLarge(_)
                | Error::PointIndex { .. }
                | Error::ReturnCountIndex(_)
                | Error::TooManyPoints(_)
                | Error::TooManyVlrs(_)
                | Error::VlrIndex { .. }
                | Error::VlrTooLong(_)
        )
    }

    /// Returns true if this error came from the underlying stream.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns true if the reader or writer was already closed.
    pub fn is_closed_error(&self) -> bool {
        matches!(self, Error::ClosedReader | Error::ClosedWriter)
    }
}
