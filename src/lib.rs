//! Read and write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! 1.0 and 1.1 point cloud data.
//!
//! # Reading
//!
//! Create a `Reader` from a `Path`:
//!
//! ```no_run
//! use lasfile::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Or anything that implements `Read` and `Seek`:
//!
//! ```no_run
//! use std::io::BufReader;
//! use std::fs::File;
//! use lasfile::Reader;
//! let read = BufReader::new(File::open("points.las").unwrap());
//! let reader = Reader::new(read).unwrap();
//! ```
//!
//! ## Prefer `BufRead`
//!
//! Your performance will be better if your `Read` is actually a `BufRead`. `Reader::from_path`
//! takes care of this for you, but `Reader::new` doesn't.
//!
//! ## Read points
//!
//! Read points one-by-one with `Reader::read_point`, jump around with `Reader::read_point_at`,
//! or iterate over all points with `Reader::points`:
//!
//! ```no_run
//! use lasfile::Reader;
//! let mut reader = Reader::from_path("points.las").unwrap();
//! let first = reader.read_point().unwrap().unwrap();
//! let tenth = reader.read_point_at(9).unwrap();
//! for wrapped_point in reader.points() {
//!     let point = wrapped_point.unwrap();
//!     println!("Point coordinates: ({}, {}, {})", point.x, point.y, point.z);
//! }
//! ```
//!
//! # Writing
//!
//! Create a `Writer` from a `Write` and a `Header`:
//!
//! ```
//! use std::io::Cursor;
//! use lasfile::{Writer, Header};
//! let write = Cursor::new(Vec::new());
//! let header = Header::default();
//! let writer = Writer::new(write, header).unwrap();
//! ```
//!
//! You can also write out to a path (automatically buffered with `BufWriter`), or append to an
//! existing file:
//!
//! ```
//! use lasfile::{Header, Mode, Writer};
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("points.las");
//! let writer = Writer::from_path(&path, Header::default()).unwrap();
//! drop(writer);
//! let writer = Writer::open(&path, Header::default(), Mode::Append).unwrap();
//! ```
//!
//! Configure the header to change the version, point format, or scaling of the data:
//!
//! ```
//! use lasfile::Header;
//! let mut header = Header::default();
//! header.set_version_minor(1).unwrap();
//! header.set_point_format(1).unwrap();
//! header.set_scale(0.001, 0.001, 0.001);
//! ```
//!
//! ## Write points
//!
//! Write points one at a time:
//!
//! ```
//! use lasfile::{Writer, Point};
//! let mut writer = Writer::default();
//! let point = Point { x: 1., y: 2., z: 3., ..Default::default() };
//! writer.write_point(point).unwrap();
//! ```
//!
//! The header is rewritten with the final point counts and bounds when the writer is closed or
//! dropped.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod header;
pub mod point;
pub mod raw;
pub mod reader;
pub mod summary;
pub mod vlr;
pub mod writer;

mod bounds;
mod error;
mod guid;
mod transform;
mod utils;
mod vector;
mod version;

pub use crate::{
    bounds::Bounds,
    error::Error,
    guid::Guid,
    header::Header,
    point::Point,
    reader::Reader,
    summary::Summary,
    transform::Transform,
    vector::Vector,
    version::Version,
    vlr::{Vlr, VlrTable},
    writer::{Mode, Writer, WriterOptions},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
