//! Write las points.
//!
//! A `Writer` uses a `Header` for its configuration:
//!
//! ```
//! use std::io::Cursor;
//! use lasfile::{Header, Point, Writer};
//!
//! let mut header = Header::default();
//! header.set_version_minor(1).unwrap();
//! header.set_point_format(1).unwrap();
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! writer.write_point(Point { gps_time: Some(42.), ..Default::default() }).unwrap();
//! writer.close().unwrap();
//! assert_eq!(1, writer.header().number_of_points());
//! ```
//!
//! The point count, the counts by return, and the bounds are tracked as points are written and
//! stored in the header when the writer closes. Use `WriterOptions` to keep the header's own
//! return counts or bounds instead:
//!
//! ```
//! use std::io::Cursor;
//! use lasfile::{Header, Writer, WriterOptions};
//!
//! let mut header = Header::default();
//! header.set_min(-10., -10., -10.);
//! header.set_max(10., 10., 10.);
//! let options = WriterOptions::default().with_bounds_update(false);
//! let writer = Writer::with_options(Cursor::new(Vec::new()), header, options).unwrap();
//! ```

use crate::{Bounds, Error, Header, Point, Result, Version, raw};
use log::{debug, error, warn};
use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write},
    path::Path,
};

const RETURN_COUNT_LEN: usize = 5;

/// How a file is opened for writing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Creates or truncates the file, then writes the header.
    #[default]
    Write,
    /// Adds points after the points already in the file.
    Append,
}

/// Options for a `Writer`.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    bounds_update: bool,
    return_counts_update: bool,
}

impl WriterOptions {
    /// Should the header bounds be replaced with the bounds of the written points on close?
    ///
    /// Defaults to true. Nothing is replaced if no points were written.
    pub fn with_bounds_update(mut self, bounds_update: bool) -> Self {
        self.bounds_update = bounds_update;
        self
    }

    /// Should the header's point counts by return be replaced with the counted values on close?
    ///
    /// Defaults to true.
    pub fn with_return_counts_update(mut self, return_counts_update: bool) -> Self {
        self.return_counts_update = return_counts_update;
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            bounds_update: true,
            return_counts_update: true,
        }
    }
}

/// Writes LAS data.
///
/// The header is written when the writer is created, and rewritten with the final point counts
/// when the writer is closed. Dropping an open writer closes it.
#[derive(Debug)]
pub struct Writer<W: Write + Seek> {
    write: Option<W>,
    header: Header,
    options: WriterOptions,
    closed: bool,
    start: u64,
    offset_to_point_data: u32,
    header_offset_to_point_data: u32,
    number_of_points: u64,
    number_of_points_by_return: [u64; RETURN_COUNT_LEN],
    bounds: Bounds,
    warned_missing_gps_time: bool,
}

impl<W: Write + Seek> Writer<W> {
    /// Creates a new writer with default options.
    ///
    /// The header's point counts are cleared, and the header is written to the `Write` at its
    /// current position.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default());
    /// ```
    pub fn new(write: W, header: Header) -> Result<Writer<W>> {
        Self::with_options(write, header, WriterOptions::default())
    }

    /// Creates a new writer with custom options.
    pub fn with_options(mut write: W, mut header: Header, options: WriterOptions) -> Result<Self> {
        verify_version(header.version())?;
        let start = write.stream_position()?;
        header.set_number_of_points(0);
        for i in 0..RETURN_COUNT_LEN {
            header.set_number_of_points_by_return(i, 0)?;
        }
        let offset_to_point_data = header.offset_to_point_data()?;
        header.write_to(&mut write)?;
        debug!(
            "opened a las {} writer for point format {}",
            header.version(),
            header.point_format()
        );
        Ok(Writer {
            write: Some(write),
            header,
            options,
            closed: false,
            start,
            offset_to_point_data,
            header_offset_to_point_data: offset_to_point_data,
            number_of_points: 0,
            number_of_points_by_return: [0; RETURN_COUNT_LEN],
            bounds: Bounds::empty(),
            warned_missing_gps_time: false,
        })
    }

    fn resume(mut write: W, start: u64, header: Header, options: WriterOptions) -> Result<Self> {
        verify_version(header.version())?;
        let point_data_start = write.stream_position()?;
        let offset_to_point_data = u32::try_from(point_data_start - start).map_err(|_| {
            Error::OffsetToPointDataTooLarge((point_data_start - start) as usize)
        })?;
        let header_offset_to_point_data = header.offset_to_point_data()?;
        let record_length = u64::from(header.point_data_record_length());
        let end = write.seek(SeekFrom::End(0))?;
        let number_of_points = end.saturating_sub(point_data_start) / record_length;
        if number_of_points != u64::from(header.number_of_points()) {
            warn!(
                "the header says {} points but the file holds {}, appending after the last \
                 complete point",
                header.number_of_points(),
                number_of_points
            );
        }
        let _ = write.seek(SeekFrom::Start(
            point_data_start + number_of_points * record_length,
        ))?;
        let mut number_of_points_by_return = [0; RETURN_COUNT_LEN];
        for (i, n) in header.points_by_return().iter().enumerate() {
            number_of_points_by_return[i] = u64::from(*n);
        }
        let bounds = if number_of_points > 0 {
            header.bounds()
        } else {
            Bounds::empty()
        };
        debug!(
            "appending to a las {} file with {} points of format {}",
            header.version(),
            number_of_points,
            header.point_format()
        );
        Ok(Writer {
            write: Some(write),
            header,
            options,
            closed: false,
            start,
            offset_to_point_data,
            header_offset_to_point_data,
            number_of_points,
            number_of_points_by_return,
            bounds,
            warned_missing_gps_time: false,
        })
    }

    /// Writes a point.
    ///
    /// Points are not validated, out-of-range scan fields are masked to their bit widths. A
    /// point without a gps time is written with a gps time of zero if the format requires one.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Writer};
    /// let mut writer = Writer::default();
    /// writer.write_point(Point::default()).unwrap();
    /// ```
    pub fn write_point(&mut self, point: Point) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        let write = self.write.as_mut().ok_or(Error::ClosedWriter)?;
        if self.number_of_points >= u64::from(u32::MAX) {
            return Err(Error::TooManyPoints(self.number_of_points + 1));
        }
        let format = self.header.point_format();
        if format.has_gps_time() && point.gps_time.is_none() && !self.warned_missing_gps_time {
            warn!("writing points without gps time to point format {format}, using zero");
            self.warned_missing_gps_time = true;
        }
        point
            .into_raw(self.header.transforms())
            .and_then(|raw_point| raw_point.write_to(write, format))?;
        self.number_of_points += 1;
        if (1..=RETURN_COUNT_LEN).contains(&usize::from(point.return_number)) {
            self.number_of_points_by_return[usize::from(point.return_number) - 1] += 1;
        }
        self.bounds.grow(&point);
        Ok(())
    }

    /// Writes several points.
    pub fn write_points(&mut self, points: &[Point]) -> Result<()> {
        for point in points {
            self.write_point(*point)?;
        }
        Ok(())
    }

    /// Rewrites the header, its vlrs, and the bytes before the points in place.
    ///
    /// The new header must be the same size as the current one and use the same point format.
    /// When appending to a las 1.0 file without a point data start signature, the header is
    /// rewritten without the signature too. Point counts and bounds are still replaced on close.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Header, Vlr, Writer};
    /// let mut writer = Writer::default();
    /// let mut header = writer.header().clone();
    /// header.set_system_identifier("MODIFICATION");
    /// writer.write_header(header.clone()).unwrap();
    ///
    /// header.vlrs_mut().push(Vlr::default());
    /// assert!(writer.write_header(header).is_err());
    /// ```
    pub fn write_header(&mut self, header: Header) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        let write = self.write.as_mut().ok_or(Error::ClosedWriter)?;
        let offset_to_point_data = header.offset_to_point_data()?;
        if offset_to_point_data != self.header_offset_to_point_data {
            return Err(Error::HeaderSizeChanged {
                old: self.header_offset_to_point_data,
                new: offset_to_point_data,
            });
        }
        if header.point_format() != self.header.point_format() {
            return Err(Error::FormatMismatch {
                existing: self.header.point_format().to_u8(),
                requested: header.point_format().to_u8(),
            });
        }
        let position = write.stream_position()?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        header.write_with_offset(&mut *write, self.offset_to_point_data)?;
        let _ = write.seek(SeekFrom::Start(position))?;
        self.header = header;
        Ok(())
    }

    /// Closes this writer, rewriting the header with the final counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Writer;
    /// let mut writer = Writer::default();
    /// writer.close().unwrap();
    /// assert!(writer.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        let write = self.write.as_mut().ok_or(Error::ClosedWriter)?;
        let number_of_points = u32::try_from(self.number_of_points)
            .map_err(|_| Error::TooManyPoints(self.number_of_points))?;
        self.header.set_number_of_points(number_of_points);
        if self.options.return_counts_update {
            for (i, &n) in self.number_of_points_by_return.iter().enumerate() {
                let n = u32::try_from(n).map_err(|_| Error::TooManyPoints(n))?;
                self.header.set_number_of_points_by_return(i, n)?;
            }
        }
        if self.options.bounds_update && !self.bounds.is_empty() {
            self.header.set_bounds(self.bounds);
        }
        let mut raw_header = self.header.to_raw()?;
        raw_header.offset_to_point_data = self.offset_to_point_data;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        raw_header.write_to(&mut *write)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        write.flush()?;
        self.closed = true;
        debug!("closed a writer after {} points", self.number_of_points);
        Ok(())
    }

    /// Returns a reference to this writer's header.
    ///
    /// The point counts and bounds are updated when the writer closes.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the number of points in the file, including any that were there before an
    /// append.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns true if this writer has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes this writer, if needed, and returns the underlying `Write`.
    ///
    /// The `Write` is positioned at the start of the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Writer;
    /// let writer = Writer::default();
    /// let cursor = writer.into_inner().unwrap();
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        let mut inner = self.write.take().ok_or(Error::ClosedWriter)?;
        let _ = inner.seek(SeekFrom::Start(self.start))?;
        Ok(inner)
    }
}

impl<W: Read + Write + Seek> Writer<W> {
    /// Creates a writer that adds points after the points already in this stream.
    ///
    /// The header is read from the stream's current position. The existing points are counted
    /// from the length of the stream, so a file whose header was never finalized is appended to
    /// after its last complete point. The header's counts by return and bounds are carried
    /// forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Writer};
    /// let mut writer = Writer::default();
    /// writer.write_point(Point::default()).unwrap();
    /// let cursor = writer.into_inner().unwrap();
    ///
    /// let mut writer = Writer::append(cursor, Default::default()).unwrap();
    /// writer.write_point(Point::default()).unwrap();
    /// writer.close().unwrap();
    /// assert_eq!(2, writer.header().number_of_points());
    /// ```
    pub fn append(mut write: W, options: WriterOptions) -> Result<Writer<W>> {
        let start = write.stream_position()?;
        let header = Header::read_from(&mut write)?;
        Writer::resume(write, start, header, options)
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path, truncating any existing file.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Writer;
    /// let dir = tempfile::tempdir().unwrap();
    /// let writer = Writer::from_path(dir.path().join("points.las"), Default::default()).unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, header: Header) -> Result<Writer<BufWriter<File>>> {
        Writer::open(path, header, Mode::Write)
    }

    /// Opens a writer for a path in the given mode.
    ///
    /// In append mode the header is only used to check that the point formats match, the file's
    /// own header is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Header, Mode, Point, Reader, Writer};
    /// let dir = tempfile::tempdir().unwrap();
    /// let path = dir.path().join("points.las");
    ///
    /// let mut writer = Writer::open(&path, Header::default(), Mode::Write).unwrap();
    /// writer.write_point(Point::default()).unwrap();
    /// writer.close().unwrap();
    ///
    /// let mut writer = Writer::open(&path, Header::default(), Mode::Append).unwrap();
    /// writer.write_point(Point::default()).unwrap();
    /// writer.close().unwrap();
    ///
    /// let reader = Reader::from_path(&path).unwrap();
    /// assert_eq!(2, reader.header().number_of_points());
    /// ```
    pub fn open<P: AsRef<Path>>(
        path: P,
        header: Header,
        mode: Mode,
    ) -> Result<Writer<BufWriter<File>>> {
        Writer::open_with_options(path, header, mode, WriterOptions::default())
    }

    /// Opens a writer for a path in the given mode, with custom options.
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        header: Header,
        mode: Mode,
        options: WriterOptions,
    ) -> Result<Writer<BufWriter<File>>> {
        match mode {
            Mode::Write => File::create(path)
                .map_err(Error::from)
                .and_then(|file| Writer::with_options(BufWriter::new(file), header, options)),
            Mode::Append => {
                let mut file = OpenOptions::new().read(true).write(true).open(path)?;
                let existing = Header::read_from(BufReader::new(&mut file))?;
                if existing.point_format() != header.point_format() {
                    return Err(Error::FormatMismatch {
                        existing: existing.point_format().to_u8(),
                        requested: header.point_format().to_u8(),
                    });
                }
                let offset_to_point_data = raw_offset_to_point_data(&mut file)?;
                let _ = file.seek(SeekFrom::Start(u64::from(offset_to_point_data)))?;
                Writer::resume(BufWriter::new(file), 0, existing, options)
            }
        }
    }
}

impl Default for Writer<Cursor<Vec<u8>>> {
    fn default() -> Writer<Cursor<Vec<u8>>> {
        Writer::new(Cursor::new(Vec::new()), Header::default())
            .expect("a default header can always be written to memory")
    }
}

impl<W: Write + Seek> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed && self.write.is_some() {
            if let Err(err) = self.close() {
                error!("error when closing the writer on drop: {err}");
            }
        }
    }
}

fn verify_version(version: Version) -> Result<()> {
    Version::verify_major(version.major)
        .map(|_| ())
        .map_err(|_| Error::UnsupportedVersion(version))
}

fn raw_offset_to_point_data<R: Read + Seek>(read: &mut R) -> Result<u32> {
    let _ = read.seek(SeekFrom::Start(0))?;
    let raw_header = raw::Header::read_from(read)?;
    Ok(raw_header.offset_to_point_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reader, Vlr};

    fn point(x: f64, return_number: u8) -> Point {
        Point {
            x,
            y: x + 1.,
            z: x + 2.,
            return_number,
            number_of_returns: 2,
            ..Default::default()
        }
    }

    #[test]
    fn close_corrects_counts() {
        let mut header = Header::default();
        header.set_number_of_points(42);
        header.set_number_of_points_by_return(4, 42).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        writer.write_point(point(1., 1)).unwrap();
        writer.write_point(point(2., 2)).unwrap();
        writer.write_point(point(3., 2)).unwrap();
        writer.write_point(point(4., 0)).unwrap();
        let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(4, reader.header().number_of_points());
        assert_eq!([1, 2, 0, 0, 0], reader.header().points_by_return());
    }

    #[test]
    fn close_updates_bounds() {
        let mut writer = Writer::default();
        writer.write_point(point(1., 1)).unwrap();
        writer.write_point(point(-1., 1)).unwrap();
        let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        let header = reader.header();
        assert_eq!(-1., header.min().x);
        assert_eq!(1., header.max().x);
        assert_eq!(0., header.min().y);
        assert_eq!(4., header.max().z);
    }

    #[test]
    fn bounds_update_disabled() {
        let mut header = Header::default();
        header.set_min(-10., -10., -10.);
        header.set_max(10., 10., 10.);
        let options = WriterOptions::default()
            .with_bounds_update(false)
            .with_return_counts_update(false);
        let mut writer = Writer::with_options(Cursor::new(Vec::new()), header, options).unwrap();
        writer.write_point(point(1., 1)).unwrap();
        let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(-10., reader.header().min().x);
        assert_eq!([0; 5], reader.header().points_by_return());
        assert_eq!(1, reader.header().number_of_points());
    }

    #[test]
    fn no_points_keeps_header_bounds() {
        let mut header = Header::default();
        header.set_max(1., 2., 3.);
        let writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(2., reader.header().max().y);
    }

    #[test]
    fn closed() {
        let mut writer = Writer::default();
        writer.close().unwrap();
        assert!(writer.is_closed());
        assert!(writer.write_point(Point::default()).unwrap_err().is_closed_error());
        assert!(
            writer
                .write_header(Header::default())
                .unwrap_err()
                .is_closed_error()
        );
        assert!(writer.close().unwrap_err().is_closed_error());
        assert!(writer.into_inner().is_ok());
    }

    #[test]
    fn missing_gps_time_writes_zero() {
        let mut header = Header::default();
        header.set_point_format(1).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        writer.write_point(Point::default()).unwrap();
        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(Some(0.), reader.read_point().unwrap().unwrap().gps_time);
    }

    #[test]
    fn write_header_in_place() {
        let mut header = Header::default();
        header.vlrs_mut().push(Vlr::new("lasfile", 1, "first", vec![1, 2]));
        let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        writer.write_point(point(1., 1)).unwrap();
        let mut header = writer.header().clone();
        header.set_file_source_id(7);
        header.vlrs_mut().get_mut(0).unwrap().data = vec![3, 4];
        writer.write_header(header).unwrap();
        writer.write_point(point(2., 1)).unwrap();
        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(7, reader.header().file_source_id());
        assert_eq!(vec![3, 4], reader.header().vlrs().get(0).unwrap().data);
        assert_eq!(2, reader.header().number_of_points());
        assert_eq!(1., reader.read_point().unwrap().unwrap().x);
        assert_eq!(2., reader.read_point().unwrap().unwrap().x);
    }

    #[test]
    fn write_header_size_changed() {
        let mut writer = Writer::default();
        let mut header = writer.header().clone();
        header.vlrs_mut().push(Vlr::default());
        assert!(matches!(
            writer.write_header(header),
            Err(Error::HeaderSizeChanged { old: 229, new: 283 })
        ));
    }

    #[test]
    fn write_header_format_changed() {
        let mut writer = Writer::default();
        let mut header = writer.header().clone();
        header.set_point_format(1).unwrap();
        assert!(matches!(
            writer.write_header(header),
            Err(Error::FormatMismatch {
                existing: 0,
                requested: 1
            })
        ));
    }

    #[test]
    fn append() {
        let mut writer = Writer::default();
        writer.write_point(point(1., 1)).unwrap();
        let cursor = writer.into_inner().unwrap();
        let mut writer = Writer::append(cursor, WriterOptions::default()).unwrap();
        assert_eq!(1, writer.number_of_points());
        writer.write_point(point(-5., 2)).unwrap();
        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(2, reader.header().number_of_points());
        assert_eq!([1, 1, 0, 0, 0], reader.header().points_by_return());
        assert_eq!(-5., reader.header().min().x);
        assert_eq!(1., reader.header().max().x);
        let points = reader.points().collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(vec![point(1., 1), point(-5., 2)], points);
    }

    #[test]
    fn append_counts_points_in_stream() {
        let mut writer = Writer::default();
        writer.write_point(point(1., 1)).unwrap();
        writer.write_point(point(2., 1)).unwrap();
        let mut cursor = writer.into_inner().unwrap();
        let mut header = Header::read_from(&mut cursor).unwrap();
        header.set_number_of_points(0);
        cursor.set_position(0);
        header.to_raw().unwrap().write_to(&mut cursor).unwrap();
        cursor.set_position(0);

        let mut writer = Writer::append(cursor, WriterOptions::default()).unwrap();
        assert_eq!(2, writer.number_of_points());
        writer.write_point(point(3., 1)).unwrap();
        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        assert_eq!(3, reader.header().number_of_points());
        let xs: Vec<f64> = reader.points().map(|p| p.unwrap().x).collect();
        assert_eq!(vec![1., 2., 3.], xs);
    }

    #[test]
    fn unsupported_version() {
        let raw_header = raw::Header {
            version: Version::new(2, 0),
            ..Default::default()
        };
        let header = Header::from_raw(raw_header, Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            Writer::new(Cursor::new(Vec::new()), header),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn into_inner_rewinds() {
        let mut cursor = Cursor::new(vec![0; 3]);
        cursor.set_position(3);
        let writer = Writer::new(cursor, Default::default()).unwrap();
        let cursor = writer.into_inner().unwrap();
        assert_eq!(3, cursor.position());
        assert_eq!(3 + 229, cursor.get_ref().len());
    }

    #[test]
    fn drop_closes() {
        let mut buf = Vec::new();
        {
            let mut writer = Writer::new(Cursor::new(&mut buf), Default::default()).unwrap();
            writer.write_point(point(1., 1)).unwrap();
        }
        let reader = Reader::new(Cursor::new(buf)).unwrap();
        assert_eq!(1, reader.header().number_of_points());
    }
}
