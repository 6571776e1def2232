//! Defines raw las points and the bit-packed scan byte.

use crate::{Result, point::Format};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// A raw point.
///
/// The documentation for struct members follows the ASPRS LAS 1.1 format document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// The X, Y, and Z values are stored as long integers.
    ///
    /// The X, Y, and Z values are used in conjunction with the scale values and the offset values
    /// to determine the coordinate for each point as described in the Public Header Block section.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The intensity value is the integer representation of the pulse return magnitude.
    ///
    /// This value is optional and system specific. However, it should always be included if
    /// available.
    pub intensity: u16,

    /// Return number, number of returns, scan direction, and edge of flight line, packed into one
    /// byte.
    pub flags: ScanFlags,

    /// Classification in the following table is the standard for both LAS 1.0 and 1.1.
    ///
    /// | Classification value | Meaning |
    /// | -------------------- | ------- |
    /// | 0 | Created, never classified |
    /// | 1 | Unclassified |
    /// | 2 | Ground |
    /// | 3 | Low vegetation |
    /// | 4 | Medium vegetation |
    /// | 5 | High vegetation |
    /// | 6 | Building |
    /// | 7 | Low point (noise) |
    /// | 8 | Model key-point (mass point) |
    /// | 9 | Water |
    /// | 10-11 | Reserved |
    /// | 12 | Overlap points |
    /// | 13-31 | Reserved |
    ///
    /// Las 1.1 uses the top three bits as synthetic, key-point, and withheld flags. The byte is
    /// kept whole here.
    pub classification: u8,

    /// The Scan Angle Rank is a signed one-byte number with a valid range from -90 to +90.
    ///
    /// The Scan Angle Rank is the angle (rounded to the nearest integer in the absolute value
    /// sense) at which the laser point was output from the laser system including the roll of the
    /// aircraft.
    pub scan_angle_rank: i8,

    /// This field may be used at the user’s discretion.
    pub user_data: u8,

    /// This value indicates the file from which this point originated.
    ///
    /// A Point Source ID of zero implies that this point originated in this file.
    pub point_source_id: u16,

    /// The GPS Time is the double floating point time tag value at which the point was acquired.
    ///
    /// Only present in point format 1.
    pub gps_time: Option<f64>,
}

/// The scan byte of a point record.
///
/// From low bit to high bit: return number (three bits), number of returns (three bits), scan
/// direction (one bit), and edge of flight line (one bit).
///
/// ```
/// use lasfile::raw::point::ScanFlags;
/// let flags = ScanFlags::new(3, 7, 0, 1);
/// assert_eq!(0b1011_1011, u8::from(flags));
/// assert_eq!(7, flags.number_of_returns());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScanFlags(u8);

impl ScanFlags {
    /// Packs the four scan fields into one byte.
    ///
    /// Each value is masked to its bit width.
    pub fn new(
        return_number: u8,
        number_of_returns: u8,
        scan_direction: u8,
        flight_line_edge: u8,
    ) -> ScanFlags {
        ScanFlags(
            (return_number & 0b111)
                | (number_of_returns & 0b111) << 3
                | (scan_direction & 1) << 6
                | (flight_line_edge & 1) << 7,
        )
    }

    /// Returns the return number.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::raw::point::ScanFlags;
    /// assert_eq!(1, ScanFlags::from(0b0000_1001).return_number());
    /// ```
    pub fn return_number(&self) -> u8 {
        self.0 & 0b111
    }

    /// Returns the number of returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::raw::point::ScanFlags;
    /// assert_eq!(1, ScanFlags::from(0b0000_1001).number_of_returns());
    /// ```
    pub fn number_of_returns(&self) -> u8 {
        self.0 >> 3 & 0b111
    }

    /// Returns the scan direction bit.
    ///
    /// One is a positive scan direction, zero negative.
    pub fn scan_direction(&self) -> u8 {
        self.0 >> 6 & 1
    }

    /// Returns the edge of flight line bit.
    pub fn flight_line_edge(&self) -> u8 {
        self.0 >> 7
    }
}

impl From<u8> for ScanFlags {
    fn from(n: u8) -> ScanFlags {
        ScanFlags(n)
    }
}

impl From<ScanFlags> for u8 {
    fn from(flags: ScanFlags) -> u8 {
        flags.0
    }
}

impl Point {
    /// Reads a raw point.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::raw::Point;
    /// use lasfile::point::Format;
    /// let cursor = Cursor::new(vec![0; 28]);
    /// let point = Point::read_from(cursor, Format::new(1).unwrap()).unwrap();
    /// assert_eq!(Some(0.), point.gps_time);
    /// ```
    pub fn read_from<R: Read>(mut read: R, format: Format) -> Result<Point> {
        let x = read.read_i32::<LittleEndian>()?;
        let y = read.read_i32::<LittleEndian>()?;
        let z = read.read_i32::<LittleEndian>()?;
        let intensity = read.read_u16::<LittleEndian>()?;
        let flags = ScanFlags(read.read_u8()?);
        let classification = read.read_u8()?;
        let scan_angle_rank = read.read_i8()?;
        let user_data = read.read_u8()?;
        let point_source_id = read.read_u16::<LittleEndian>()?;
        let gps_time = if format.has_gps_time() {
            Some(read.read_f64::<LittleEndian>()?)
        } else {
            None
        };
        Ok(Point {
            x,
            y,
            z,
            intensity,
            flags,
            classification,
            scan_angle_rank,
            user_data,
            point_source_id,
            gps_time,
        })
    }

    /// Writes a raw point.
    ///
    /// A missing gps time is written as zero when the format requires one, and a gps time is
    /// dropped when the format has no room for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::raw::Point;
    /// use lasfile::point::Format;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Point::default().write_to(&mut cursor, Format::default()).unwrap();
    /// assert_eq!(20, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W, format: Format) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.flags.0)?;
        write.write_u8(self.classification)?;
        write.write_i8(self.scan_angle_rank)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        if format.has_gps_time() {
            write.write_f64::<LittleEndian>(self.gps_time.unwrap_or(0.))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn format(n: u8) -> Format {
        Format::new(n).unwrap()
    }

    #[test]
    fn pack_scan_flags() {
        assert_eq!(0b1011_1011, u8::from(ScanFlags::new(3, 7, 0, 1)));
        assert_eq!(0, u8::from(ScanFlags::new(0, 0, 0, 0)));
        assert_eq!(0b0100_0000, u8::from(ScanFlags::new(0, 0, 1, 0)));
    }

    #[test]
    fn unpack_scan_flags() {
        let flags = ScanFlags::from(0b1011_1011);
        assert_eq!(3, flags.return_number());
        assert_eq!(7, flags.number_of_returns());
        assert_eq!(0, flags.scan_direction());
        assert_eq!(1, flags.flight_line_edge());
    }

    #[test]
    fn scan_flags_mask_to_width() {
        let flags = ScanFlags::new(9, 8, 2, 3);
        assert_eq!(1, flags.return_number());
        assert_eq!(0, flags.number_of_returns());
        assert_eq!(0, flags.scan_direction());
        assert_eq!(1, flags.flight_line_edge());
    }

    #[test]
    fn roundtrip_format_1() {
        let point = Point {
            x: -1,
            y: 2,
            z: i32::MAX,
            intensity: 300,
            flags: ScanFlags::new(1, 2, 1, 0),
            classification: 2,
            scan_angle_rank: -90,
            user_data: 7,
            point_source_id: 42,
            gps_time: Some(1234.5),
        };
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, format(1)).unwrap();
        assert_eq!(28, cursor.get_ref().len());
        cursor.set_position(0);
        assert_eq!(point, Point::read_from(cursor, format(1)).unwrap());
    }

    #[test]
    fn field_offsets() {
        let point = Point {
            intensity: 0x0102,
            flags: ScanFlags::new(3, 7, 0, 1),
            classification: 31,
            scan_angle_rank: -1,
            ..Default::default()
        };
        let mut cursor = Cursor::new(Vec::new());
        point.write_to(&mut cursor, format(0)).unwrap();
        let bytes = cursor.into_inner();
        assert_eq!(&[0x02u8, 0x01][..], &bytes[12..14]);
        assert_eq!(0b1011_1011, bytes[14]);
        assert_eq!(31, bytes[15]);
        assert_eq!(0xff, bytes[16]);
    }

    #[test]
    fn missing_gps_time_writes_zero() {
        let mut cursor = Cursor::new(Vec::new());
        Point::default().write_to(&mut cursor, format(1)).unwrap();
        assert_eq!(&[0; 8], &cursor.get_ref()[20..28]);
    }

    #[test]
    fn format_0_has_no_gps_time() {
        let point = Point::read_from(Cursor::new(vec![0; 20]), format(0)).unwrap();
        assert_eq!(None, point.gps_time);
    }
}
