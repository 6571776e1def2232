//! Three-dimensional points with additional attributes.

mod format;

pub use self::format::Format;

use crate::{Error, Result, Transform, Vector, raw, raw::point::ScanFlags};
use bitflags::bitflags;

const EPSILON: f64 = 1e-5;
const RETURN_NUMBER_RANGE: std::ops::RangeInclusive<u8> = 1..=6;
const NUMBER_OF_RETURNS_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
const MAX_CLASSIFICATION: u8 = 31;
const SCAN_ANGLE_RANK_RANGE: std::ops::RangeInclusive<i8> = -90..=90;

bitflags! {
    /// The fields of a point that are outside of their allowed ranges.
    ///
    /// ```
    /// use lasfile::{Point, point::Violations};
    /// let point = Point {
    ///     return_number: 7,
    ///     number_of_returns: 1,
    ///     scan_angle_rank: 91,
    ///     ..Default::default()
    /// };
    /// assert_eq!(Violations::RETURN_NUMBER | Violations::SCAN_ANGLE_RANK, point.validate());
    /// assert_eq!(33, point.validate().bits());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Violations: u8 {
        /// Return number is not in 1 through 6.
        const RETURN_NUMBER = 0x01;
        /// Number of returns is not in 1 through 5.
        const NUMBER_OF_RETURNS = 0x02;
        /// Scan direction is not a single bit.
        const SCAN_DIRECTION = 0x04;
        /// Edge of flight line is not a single bit.
        const FLIGHT_LINE_EDGE = 0x08;
        /// Classification is larger than 31.
        const CLASSIFICATION = 0x10;
        /// Scan angle rank is not in -90 through 90.
        const SCAN_ANGLE_RANK = 0x20;
        /// Gps time is not a finite number.
        const TIME = 0x40;
    }
}

/// A point is the basic unit of information in LAS data.
///
/// Fields can be assigned any value. Use [Point::validate] to find the ones that are out of
/// range; they are masked to their bit widths when written.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    /// The x coordinate, as a float.
    pub x: f64,
    /// The y coordinate, as a float.
    pub y: f64,
    /// The z coordinate, as a float.
    pub z: f64,
    /// The integer representation of the pulse return magnitude.
    pub intensity: u16,
    /// The pulse return number for a given output pulse, one through six.
    ///
    /// Zero is stored as-is but reported by [Point::validate].
    pub return_number: u8,
    /// The total number of returns for a given pulse, one through five.
    ///
    /// Zero is stored as-is but reported by [Point::validate].
    pub number_of_returns: u8,
    /// The direction at which the scanner mirror was traveling, one for positive.
    pub scan_direction: u8,
    /// One if the point is at the end of a scan.
    pub flight_line_edge: u8,
    /// The ASPRS classification for this point.
    pub classification: u8,
    /// The angle, rounded to the nearest integer, of the output of the laser pulse.
    ///
    /// Zero degrees is nadir, -90 is to the left.
    pub scan_angle_rank: i8,
    /// Used at the user's discretion.
    pub user_data: u8,
    /// The file from which this point originated.
    pub point_source_id: u16,
    /// The time at which the point was acquired.
    ///
    /// Only stored by point format 1.
    pub gps_time: Option<f64>,
}

impl Point {
    /// Creates a point from a raw point.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, raw};
    /// let raw_point = raw::Point::default();
    /// let point = Point::new(raw_point, &Default::default());
    /// ```
    pub fn new(raw_point: raw::Point, transforms: &Vector<Transform>) -> Point {
        Point {
            x: transforms.x.direct(raw_point.x),
            y: transforms.y.direct(raw_point.y),
            z: transforms.z.direct(raw_point.z),
            intensity: raw_point.intensity,
            return_number: raw_point.flags.return_number(),
            number_of_returns: raw_point.flags.number_of_returns(),
            scan_direction: raw_point.flags.scan_direction(),
            flight_line_edge: raw_point.flags.flight_line_edge(),
            classification: raw_point.classification,
            scan_angle_rank: raw_point.scan_angle_rank,
            user_data: raw_point.user_data,
            point_source_id: raw_point.point_source_id,
            gps_time: raw_point.gps_time,
        }
    }

    /// Creates a raw las point from this point.
    ///
    /// Returns an error if a coordinate can't be stored as an `i32` with these transforms.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Point;
    /// let point = Point::default();
    /// let raw_point = point.into_raw(&Default::default()).unwrap();
    /// ```
    pub fn into_raw(self, transforms: &Vector<Transform>) -> Result<raw::Point> {
        Ok(raw::Point {
            x: transforms.x.inverse(self.x)?,
            y: transforms.y.inverse(self.y)?,
            z: transforms.z.inverse(self.z)?,
            intensity: self.intensity,
            flags: ScanFlags::from(self.scan_flags()),
            classification: self.classification,
            scan_angle_rank: self.scan_angle_rank,
            user_data: self.user_data,
            point_source_id: self.point_source_id,
            gps_time: self.gps_time,
        })
    }

    /// Returns the packed scan byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Point;
    /// let point = Point {
    ///     return_number: 3,
    ///     number_of_returns: 7,
    ///     scan_direction: 0,
    ///     flight_line_edge: 1,
    ///     ..Default::default()
    /// };
    /// assert_eq!(0b1011_1011, point.scan_flags());
    /// ```
    pub fn scan_flags(&self) -> u8 {
        ScanFlags::new(
            self.return_number,
            self.number_of_returns,
            self.scan_direction,
            self.flight_line_edge,
        )
        .into()
    }

    /// Unpacks a scan byte into the four scan fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Point;
    /// let mut point = Point::default();
    /// point.set_scan_flags(0b1011_1011);
    /// assert_eq!(3, point.return_number);
    /// assert_eq!(7, point.number_of_returns);
    /// assert_eq!(0, point.scan_direction);
    /// assert_eq!(1, point.flight_line_edge);
    /// ```
    pub fn set_scan_flags(&mut self, flags: u8) {
        let flags = ScanFlags::from(flags);
        self.return_number = flags.return_number();
        self.number_of_returns = flags.number_of_returns();
        self.scan_direction = flags.scan_direction();
        self.flight_line_edge = flags.flight_line_edge();
    }

    /// Returns the set of fields that are out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, point::Violations};
    /// let point = Point { return_number: 1, number_of_returns: 1, ..Default::default() };
    /// assert!(point.validate().is_empty());
    /// let point = Point { classification: 32, ..point };
    /// assert_eq!(Violations::CLASSIFICATION, point.validate());
    ///
    /// let unset = Violations::RETURN_NUMBER | Violations::NUMBER_OF_RETURNS;
    /// assert_eq!(unset, Point::default().validate());
    /// ```
    pub fn validate(&self) -> Violations {
        let mut violations = Violations::empty();
        if !RETURN_NUMBER_RANGE.contains(&self.return_number) {
            violations |= Violations::RETURN_NUMBER;
        }
        if !NUMBER_OF_RETURNS_RANGE.contains(&self.number_of_returns) {
            violations |= Violations::NUMBER_OF_RETURNS;
        }
        if self.scan_direction > 1 {
            violations |= Violations::SCAN_DIRECTION;
        }
        if self.flight_line_edge > 1 {
            violations |= Violations::FLIGHT_LINE_EDGE;
        }
        if self.classification > MAX_CLASSIFICATION {
            violations |= Violations::CLASSIFICATION;
        }
        if !SCAN_ANGLE_RANK_RANGE.contains(&self.scan_angle_rank) {
            violations |= Violations::SCAN_ANGLE_RANK;
        }
        if self.gps_time.is_some_and(|t| !t.is_finite()) {
            violations |= Violations::TIME;
        }
        violations
    }

    /// Returns true if every field is in range.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Returns an error naming the out-of-range fields, if there are any.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Point;
    /// let point = Point { return_number: 1, number_of_returns: 1, ..Default::default() };
    /// assert!(point.check().is_ok());
    /// assert!(Point { scan_direction: 2, ..point }.check().is_err());
    /// ```
    pub fn check(&self) -> Result<()> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidPoint(violations))
        }
    }
}

/// Points are equal if their coordinates are within 1e-5 of each other.
///
/// The other attributes are not compared.
impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
    }
}
