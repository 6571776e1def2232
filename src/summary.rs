//! Statistics over a collection of points.
//!
//! A `Summary` can be used to check, or repair, the counts and bounds in a header:
//!
//! ```
//! use lasfile::{Point, Reader, Summary, Writer};
//! let mut writer = Writer::default();
//! writer.write_point(Point { x: 1., return_number: 1, ..Default::default() }).unwrap();
//! writer.write_point(Point { x: 2., return_number: 2, ..Default::default() }).unwrap();
//! let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
//!
//! let summary = Summary::from_reader(&mut reader).unwrap();
//! assert_eq!(2, summary.number_of_points());
//! assert_eq!(1, summary.number_of_points_by_return(2));
//! assert_eq!(2., summary.max().unwrap().x);
//! ```

use crate::{Bounds, Error, Header, Point, Reader, Result, Vector};
use std::io::{Read, Seek};

const RETURN_SLOTS: usize = 8;
const CLASSIFICATION_SLOTS: usize = 32;

/// Counts and extents of a set of points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    number_of_points: u64,
    by_return_number: [u64; RETURN_SLOTS],
    by_number_of_returns: [u64; RETURN_SLOTS],
    classifications: [u64; CLASSIFICATION_SLOTS],
    min: Option<Point>,
    max: Option<Point>,
}

impl Summary {
    /// Summarizes the remaining points of a reader.
    pub fn from_reader<R: Read + Seek>(reader: &mut Reader<R>) -> Result<Summary> {
        let mut summary = Summary::default();
        for point in reader.points() {
            summary.add(&point?);
        }
        Ok(summary)
    }

    /// Adds a point to this summary.
    ///
    /// Return numbers and number of returns above seven are counted in the last slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Summary};
    /// let mut summary = Summary::default();
    /// summary.add(&Point { classification: 2, ..Default::default() });
    /// assert_eq!(1, summary.classification_count(2));
    /// ```
    pub fn add(&mut self, point: &Point) {
        self.number_of_points += 1;
        self.by_return_number[slot(point.return_number)] += 1;
        self.by_number_of_returns[slot(point.number_of_returns)] += 1;
        self.classifications[usize::from(point.classification) % CLASSIFICATION_SLOTS] += 1;
        shrink(self.min.get_or_insert(*point), point);
        grow(self.max.get_or_insert(*point), point);
    }

    /// Returns the number of points.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the number of points with this return number.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Summary;
    /// assert_eq!(0, Summary::default().number_of_points_by_return(1));
    /// assert_eq!(0, Summary::default().number_of_points_by_return(42));
    /// ```
    pub fn number_of_points_by_return(&self, return_number: u8) -> u64 {
        self.by_return_number
            .get(usize::from(return_number))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of points whose pulse had this many returns.
    pub fn number_of_points_by_number_of_returns(&self, number_of_returns: u8) -> u64 {
        self.by_number_of_returns
            .get(usize::from(number_of_returns))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of points with this classification.
    pub fn classification_count(&self, classification: u8) -> u64 {
        self.classifications
            .get(usize::from(classification))
            .copied()
            .unwrap_or(0)
    }

    /// Returns a point holding the smallest value of every field, if any point was added.
    pub fn min(&self) -> Option<&Point> {
        self.min.as_ref()
    }

    /// Returns a point holding the largest value of every field, if any point was added.
    pub fn max(&self) -> Option<&Point> {
        self.max.as_ref()
    }

    /// Returns the xyz bounds of the points, if any point was added.
    pub fn bounds(&self) -> Option<Bounds> {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => Some(Bounds {
                min: Vector::new(min.x, min.y, min.z),
                max: Vector::new(max.x, max.y, max.z),
            }),
            _ => None,
        }
    }

    /// Writes these counts and bounds into a header.
    ///
    /// The bounds are left alone if the summary is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Header, Point, Summary};
    /// let summary: Summary = vec![Point { x: 3., return_number: 1, ..Default::default() }]
    ///     .into_iter()
    ///     .collect();
    /// let mut header = Header::default();
    /// summary.update_header(&mut header).unwrap();
    /// assert_eq!(1, header.number_of_points());
    /// assert_eq!(1, header.number_of_points_by_return(0).unwrap());
    /// assert_eq!(3., header.max().x);
    /// ```
    pub fn update_header(&self, header: &mut Header) -> Result<()> {
        let number_of_points = u32::try_from(self.number_of_points)
            .map_err(|_| Error::TooManyPoints(self.number_of_points))?;
        header.set_number_of_points(number_of_points);
        for (i, &n) in self.by_return_number[1..=5].iter().enumerate() {
            let n = u32::try_from(n).map_err(|_| Error::TooManyPoints(n))?;
            header.set_number_of_points_by_return(i, n)?;
        }
        if let Some(bounds) = self.bounds() {
            header.set_bounds(bounds);
        }
        Ok(())
    }
}

impl Extend<Point> for Summary {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.add(&point);
        }
    }
}

impl FromIterator<Point> for Summary {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Summary {
        let mut summary = Summary::default();
        summary.extend(iter);
        summary
    }
}

fn slot(n: u8) -> usize {
    usize::from(n).min(RETURN_SLOTS - 1)
}

fn shrink(min: &mut Point, point: &Point) {
    min.x = min.x.min(point.x);
    min.y = min.y.min(point.y);
    min.z = min.z.min(point.z);
    min.intensity = min.intensity.min(point.intensity);
    min.return_number = min.return_number.min(point.return_number);
    min.number_of_returns = min.number_of_returns.min(point.number_of_returns);
    min.scan_direction = min.scan_direction.min(point.scan_direction);
    min.flight_line_edge = min.flight_line_edge.min(point.flight_line_edge);
    min.classification = min.classification.min(point.classification);
    min.scan_angle_rank = min.scan_angle_rank.min(point.scan_angle_rank);
    min.user_data = min.user_data.min(point.user_data);
    min.point_source_id = min.point_source_id.min(point.point_source_id);
    min.gps_time = match (min.gps_time, point.gps_time) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
}

fn grow(max: &mut Point, point: &Point) {
    max.x = max.x.max(point.x);
    max.y = max.y.max(point.y);
    max.z = max.z.max(point.z);
    max.intensity = max.intensity.max(point.intensity);
    max.return_number = max.return_number.max(point.return_number);
    max.number_of_returns = max.number_of_returns.max(point.number_of_returns);
    max.scan_direction = max.scan_direction.max(point.scan_direction);
    max.flight_line_edge = max.flight_line_edge.max(point.flight_line_edge);
    max.classification = max.classification.max(point.classification);
    max.scan_angle_rank = max.scan_angle_rank.max(point.scan_angle_rank);
    max.user_data = max.user_data.max(point.user_data);
    max.point_source_id = max.point_source_id.max(point.point_source_id);
    max.gps_time = match (max.gps_time, point.gps_time) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
}
