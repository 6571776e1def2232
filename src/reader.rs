//! Read las points.
//!
//! If you're reading any significant number of points, you'll want to make sure you're using a
//! `BufRead` instead of just a `Read`. `Reader::from_path` does this for you:
//!
//! ```no_run
//! use lasfile::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Use `Reader::read_point` to read one point, and `Reader::points` to get an iterator over
//! `Result<Point>`:
//!
//! ```
//! use std::io::Cursor;
//! use lasfile::{Header, Point, Reader, Writer};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
//! for i in 0..3 {
//!     writer.write_point(Point { x: f64::from(i), ..Default::default() }).unwrap();
//! }
//! let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
//! let first_point = reader.read_point().unwrap().unwrap();
//! let the_rest = reader.points().map(|r| r.unwrap()).collect::<Vec<_>>();
//! assert_eq!(2, the_rest.len());
//! assert!(reader.read_point().unwrap().is_none());
//! ```

use crate::{Error, Header, Point, Result, raw};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

/// An iterator over of the points in a `Reader`.
///
/// This struct is generally created by calling `points()` on `Reader`.
#[derive(Debug)]
pub struct PointIterator<'a, R: Read + Seek> {
    reader: &'a mut Reader<R>,
}

impl<R: Read + Seek> Iterator for PointIterator<'_, R> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_point().transpose()
    }
}

/// Reads las data.
///
/// A reader is open until it is closed or dropped. Every operation on a closed reader returns
/// [Error::ClosedReader].
#[derive(Debug)]
pub struct Reader<R: Read + Seek> {
    read: Option<R>,
    header: Header,
    index: u64,
    start: u64,
}

impl<R: Read + Seek> Reader<R> {
    /// Creates a new reader.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned about performance
    /// you should do that wrapping yourself (or use `from_path`).
    ///
    /// The reader's point zero is at the start of the stream's point data, so the header may
    /// begin at any position in the stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::{Header, Reader};
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let reader = Reader::new(cursor).unwrap();
    /// ```
    pub fn new(mut read: R) -> Result<Reader<R>> {
        let header = Header::read_from(&mut read)?;
        let start = read.stream_position()?;
        debug!(
            "opened a las {} reader with {} points of format {}",
            header.version(),
            header.number_of_points(),
            header.point_format()
        );
        Ok(Reader {
            read: Some(read),
            header,
            index: 0,
            start,
        })
    }

    /// Returns a reference to this reader's header.
    ///
    /// Clone it for a snapshot that outlives the reader.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next point, or `None` when every point has been read.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Reader, Writer};
    /// let mut writer = Writer::default();
    /// writer.write_point(Point::default()).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// assert!(reader.read_point().unwrap().is_some());
    /// assert!(reader.read_point().unwrap().is_none());
    /// ```
    pub fn read_point(&mut self) -> Result<Option<Point>> {
        let read = self.read.as_mut().ok_or(Error::ClosedReader)?;
        if self.index < u64::from(self.header.number_of_points()) {
            let point = raw::Point::read_from(read, self.header.point_format())
                .map(|p| Point::new(p, self.header.transforms()))?;
            self.index += 1;
            Ok(Some(point))
        } else {
            Ok(None)
        }
    }

    /// Reads the point at this index, zero-based.
    ///
    /// The position of the sequential reads is not changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Reader, Writer};
    /// let mut writer = Writer::default();
    /// writer.write_point(Point { x: 1., ..Default::default() }).unwrap();
    /// writer.write_point(Point { x: 2., ..Default::default() }).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// assert_eq!(2., reader.read_point_at(1).unwrap().x);
    /// assert_eq!(1., reader.read_point().unwrap().unwrap().x);
    /// assert!(reader.read_point_at(2).is_err());
    /// ```
    pub fn read_point_at(&mut self, index: u64) -> Result<Point> {
        let read = self.read.as_mut().ok_or(Error::ClosedReader)?;
        let count = u64::from(self.header.number_of_points());
        if index >= count {
            return Err(Error::PointIndex { index, count });
        }
        let position = read.stream_position()?;
        let _ = read.seek(SeekFrom::Start(point_position(
            self.start,
            &self.header,
            index,
        )?))?;
        let point = raw::Point::read_from(&mut *read, self.header.point_format())
            .map(|p| Point::new(p, self.header.transforms()));
        let _ = read.seek(SeekFrom::Start(position))?;
        point
    }

    /// Seeks to the given point number, zero-indexed.
    ///
    /// Seeking past the last point is allowed, the next read returns `None`. An index whose byte
    /// offset does not fit in a `u64` is an [Error::PointIndex].
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Point, Reader, Writer};
    /// let mut writer = Writer::default();
    /// writer.write_point(Point::default()).unwrap();
    /// writer.write_point(Point { x: 1., ..Default::default() }).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// reader.seek(1).unwrap(); // <- seeks to the second point
    /// assert_eq!(1., reader.read_point().unwrap().unwrap().x);
    /// ```
    pub fn seek(&mut self, index: u64) -> Result<()> {
        let read = self.read.as_mut().ok_or(Error::ClosedReader)?;
        let _ = read.seek(SeekFrom::Start(point_position(
            self.start,
            &self.header,
            index,
        )?))?;
        self.index = index;
        Ok(())
    }

    /// Returns an iterator over this reader's remaining points.
    pub fn points(&mut self) -> PointIterator<'_, R> {
        PointIterator { reader: self }
    }

    /// Closes this reader, releasing the underlying stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Reader, Writer};
    /// let mut reader = Reader::new(Writer::default().into_inner().unwrap()).unwrap();
    /// reader.close().unwrap();
    /// assert!(reader.read_point().is_err());
    /// assert!(reader.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        match self.read.take() {
            Some(_) => {
                debug!("closed a reader after {} points", self.index);
                Ok(())
            }
            None => Err(Error::ClosedReader),
        }
    }

    /// Returns true if this reader has been closed.
    pub fn is_closed(&self) -> bool {
        self.read.is_none()
    }
}

impl Reader<BufReader<File>> {
    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Reader;
    /// assert!(Reader::from_path("does/not/exist.las").unwrap_err().is_io_error());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| Reader::new(BufReader::new(file)))
    }
}

fn point_position(start: u64, header: &Header, index: u64) -> Result<u64> {
    index
        .checked_mul(u64::from(header.point_data_record_length()))
        .and_then(|offset| offset.checked_add(start))
        .ok_or(Error::PointIndex {
            index,
            count: u64::from(header.number_of_points()),
        })
}
