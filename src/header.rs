//! A `Header` describes the configuration and properties of las data.
//!
//! # Reading
//!
//! A `Reader` uses a `Header` to expose metadata:
//!
//! ```no_run
//! use lasfile::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! let header = reader.header();
//! println!("The file has {} points.", header.number_of_points());
//! ```
//!
//! # Writing
//!
//! A `Writer` uses a `Header` to configure how it will write points. Every field has a getter and
//! a setter; the setters that can fail return a `Result`:
//!
//! ```
//! use lasfile::Header;
//! let mut header = Header::default();
//! header.set_version_minor(1).unwrap();
//! assert!(header.set_version_minor(2).is_err());
//! header.set_point_format(1).unwrap();
//! header.set_scale(0.001, 0.001, 0.001);
//! ```
//!
//! The header size and offset to point data are computed from the header's contents, so adding a
//! vlr moves the start of the point data:
//!
//! ```
//! use lasfile::{Header, Vlr};
//! let mut header = Header::default();
//! assert_eq!(229, header.offset_to_point_data().unwrap());
//! header.vlrs_mut().push(Vlr::default());
//! assert_eq!(283, header.offset_to_point_data().unwrap());
//! ```

use crate::{
    Bounds, Error, Guid, Result, Transform, Vector, Version, Vlr, VlrTable,
    point::Format,
    raw::{self, POINT_DATA_START_SIGNATURE, header::HEADER_SIZE},
    utils::{AsLasStr, FromLasStr, to_field_string},
};
use chrono::{Datelike, NaiveDate, Utc};
use log::warn;
use num_traits::AsPrimitive;
use std::{
    fmt,
    io::{Read, Write},
};

const SYSTEM_IDENTIFIER: &str = "lasfile";
const GENERATING_SOFTWARE: &str = concat!("lasfile ", env!("CARGO_PKG_VERSION"));
const IDENTIFIER_LEN: usize = 32;
const RETURN_COUNT_LEN: usize = 5;

const PROJ4_USER_ID: &str = "lasfile";
const PROJ4_RECORD_ID: u16 = 4326;
const PROJ4_DESCRIPTION: &str = "proj4";

/// Metadata describing the layout, source, and interpretation of the points.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    file_source_id: u16,
    reserved: u16,
    project_id: Guid,
    version: Version,
    system_identifier: String,
    generating_software: String,
    file_creation_day_of_year: u16,
    file_creation_year: u16,
    point_format: Format,
    number_of_points: u32,
    number_of_points_by_return: [u32; RETURN_COUNT_LEN],
    transforms: Vector<Transform>,
    bounds: Bounds,
    vlrs: VlrTable,
    proj4: Option<String>,
    padding: Vec<u8>,
    vlr_padding: Vec<u8>,
}

impl Header {
    /// Reads a header and its vlrs.
    ///
    /// On success the stream is positioned at the offset to point data.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let header = Header::read_from(&mut cursor).unwrap();
    /// assert_eq!(229, cursor.position());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let raw_header = raw::Header::read_from(&mut read)?;
        if !raw_header.has_valid_file_signature() {
            return Err(Error::InvalidFileSignature(raw_header.file_signature));
        }
        let mut position = (HEADER_SIZE as usize + raw_header.padding.len()) as u64;
        let mut vlrs = Vec::new();
        for _ in 0..raw_header.number_of_variable_length_records {
            let vlr = raw::Vlr::read_from(&mut read)?;
            position += vlr.len() as u64;
            vlrs.push(Vlr::from_raw(vlr));
        }
        let offset_to_point_data = raw_header.offset_to_point_data;
        let vlr_padding_len = u64::from(offset_to_point_data)
            .checked_sub(position)
            .ok_or(Error::VlrOverrun {
                end: position,
                offset_to_point_data,
            })?;
        let mut vlr_padding = Vec::new();
        let _ = read
            .by_ref()
            .take(vlr_padding_len)
            .read_to_end(&mut vlr_padding)?;
        if (vlr_padding.len() as u64) < vlr_padding_len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        Header::from_raw(raw_header, vlrs, vlr_padding)
    }

    /// Creates a header from a raw header, its vlrs, and the bytes between the vlrs and the
    /// points.
    ///
    /// A proj4 vlr is lifted out of the vlrs, and a trailing las 1.0 point data start signature
    /// is dropped from the vlr padding. Versions outside of 1.0 and 1.1 are kept as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Header, raw};
    /// let header = Header::from_raw(raw::Header::default(), Vec::new(), Vec::new()).unwrap();
    /// ```
    pub fn from_raw(
        raw_header: raw::Header,
        vlrs: Vec<Vlr>,
        vlr_padding: Vec<u8>,
    ) -> Result<Header> {
        if !raw_header.has_valid_file_signature() {
            return Err(Error::InvalidFileSignature(raw_header.file_signature));
        }
        if raw_header.version.verify().is_err() {
            warn!(
                "header version {} is not 1.0 or 1.1, keeping it as-is",
                raw_header.version
            );
        }
        let point_format = Format::new(raw_header.point_data_format_id)?;
        if raw_header.point_data_record_length != point_format.len() {
            return Err(Error::InvalidPointDataRecordLength {
                format: raw_header.point_data_format_id,
                expected: point_format.len(),
                found: raw_header.point_data_record_length,
            });
        }
        let mut vlr_padding = vlr_padding;
        if raw_header.version.requires_point_data_start_signature()
            && vlr_padding.ends_with(&POINT_DATA_START_SIGNATURE)
        {
            vlr_padding.truncate(vlr_padding.len() - POINT_DATA_START_SIGNATURE.len());
        }
        let mut vlrs = VlrTable::from(vlrs);
        let proj4 = match vlrs.position(PROJ4_USER_ID, PROJ4_RECORD_ID) {
            Some(index) => {
                let vlr = vlrs.remove(index)?;
                Some(vlr.data.as_las_string())
            }
            None => None,
        };
        Ok(Header {
            file_source_id: raw_header.file_source_id,
            reserved: raw_header.reserved,
            project_id: Guid::from_bytes(raw_header.guid),
            version: raw_header.version,
            system_identifier: raw_header.system_identifier.as_las_string(),
            generating_software: raw_header.generating_software.as_las_string(),
            file_creation_day_of_year: raw_header.file_creation_day_of_year,
            file_creation_year: raw_header.file_creation_year,
            point_format,
            number_of_points: raw_header.number_of_point_records,
            number_of_points_by_return: raw_header.number_of_points_by_return,
            transforms: Vector {
                x: Transform {
                    scale: raw_header.x_scale_factor,
                    offset: raw_header.x_offset,
                },
                y: Transform {
                    scale: raw_header.y_scale_factor,
                    offset: raw_header.y_offset,
                },
                z: Transform {
                    scale: raw_header.z_scale_factor,
                    offset: raw_header.z_offset,
                },
            },
            bounds: Bounds {
                min: Vector::new(raw_header.min_x, raw_header.min_y, raw_header.min_z),
                max: Vector::new(raw_header.max_x, raw_header.max_y, raw_header.max_z),
            },
            vlrs,
            proj4,
            padding: raw_header.padding,
            vlr_padding,
        })
    }

    /// Converts this header into a raw header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let raw_header = Header::default().to_raw().unwrap();
    /// assert_eq!(227, raw_header.header_size);
    /// ```
    pub fn to_raw(&self) -> Result<raw::Header> {
        let mut system_identifier = [0; IDENTIFIER_LEN];
        system_identifier.from_las_str(&self.system_identifier);
        let mut generating_software = [0; IDENTIFIER_LEN];
        generating_software.from_las_str(&self.generating_software);
        Ok(raw::Header {
            file_signature: raw::LASF,
            file_source_id: self.file_source_id,
            reserved: self.reserved,
            guid: self.project_id.to_bytes(),
            version: self.version,
            system_identifier,
            generating_software,
            file_creation_day_of_year: self.file_creation_day_of_year,
            file_creation_year: self.file_creation_year,
            header_size: self.header_size()?,
            offset_to_point_data: self.offset_to_point_data()?,
            number_of_variable_length_records: vlr_count(self.number_of_vlrs())?,
            point_data_format_id: self.point_format.to_u8(),
            point_data_record_length: self.point_format.len(),
            number_of_point_records: self.number_of_points,
            number_of_points_by_return: self.number_of_points_by_return,
            x_scale_factor: self.transforms.x.scale,
            y_scale_factor: self.transforms.y.scale,
            z_scale_factor: self.transforms.z.scale,
            x_offset: self.transforms.x.offset,
            y_offset: self.transforms.y.offset,
            z_offset: self.transforms.z.offset,
            max_x: self.bounds.max.x,
            min_x: self.bounds.min.x,
            max_y: self.bounds.max.y,
            min_y: self.bounds.min.y,
            max_z: self.bounds.max.z,
            min_z: self.bounds.min.z,
            padding: self.padding.clone(),
        })
    }

    /// Writes this header, its vlrs, and any bytes before the point data.
    ///
    /// Las 1.0 headers are followed by the point data start signature.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lasfile::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// assert_eq!(&[0xddu8, 0xcc][..], &cursor.get_ref()[227..]);
    /// ```
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        self.write_with_offset(write, self.offset_to_point_data()?)
    }

    /// Writes this header for point data that starts at `offset_to_point_data`.
    ///
    /// A las 1.0 file on disk may lack the point data start signature. Its offset is then two
    /// bytes short of the computed one, and the signature is left out.
    pub(crate) fn write_with_offset<W: Write>(
        &self,
        mut write: W,
        offset_to_point_data: u32,
    ) -> Result<()> {
        let mut raw_header = self.to_raw()?;
        let missing = raw_header
            .offset_to_point_data
            .saturating_sub(offset_to_point_data) as usize;
        raw_header.offset_to_point_data = offset_to_point_data;
        raw_header.write_to(&mut write)?;
        for vlr in self.all_vlrs() {
            vlr.into_raw()?.write_to(&mut write)?;
        }
        let mut gap = self.point_data_gap();
        gap.truncate(gap.len().saturating_sub(missing));
        write.write_all(&gap)?;
        Ok(())
    }

    /// Returns the file source id.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Sets the file source id.
    ///
    /// Values outside of the sixteen-bit range wrap.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_file_source_id(65535);
    /// assert_eq!(65535, header.file_source_id());
    /// header.set_file_source_id(65536u32);
    /// assert_eq!(0, header.file_source_id());
    /// ```
    pub fn set_file_source_id<T: AsPrimitive<u16>>(&mut self, file_source_id: T) {
        self.file_source_id = file_source_id.as_();
    }

    /// Returns the reserved field.
    ///
    /// This is zero for headers created by this crate, and whatever was on disk otherwise.
    pub fn reserved(&self) -> u16 {
        self.reserved
    }

    /// Returns the project id.
    pub fn project_id(&self) -> Guid {
        self.project_id
    }

    /// Sets the project id.
    pub fn set_project_id(&mut self, project_id: Guid) {
        self.project_id = project_id;
    }

    /// Returns the las version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the major version.
    pub fn version_major(&self) -> u8 {
        self.version.major
    }

    /// Returns the minor version.
    pub fn version_minor(&self) -> u8 {
        self.version.minor
    }

    /// Sets the major version, which must be one.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// assert!(header.set_version_major(1).is_ok());
    /// assert!(header.set_version_major(2).is_err());
    /// ```
    pub fn set_version_major(&mut self, major: u8) -> Result<()> {
        self.version.major = Version::verify_major(major)?;
        Ok(())
    }

    /// Sets the minor version, which must be zero or one.
    pub fn set_version_minor(&mut self, minor: u8) -> Result<()> {
        self.version.minor = Version::verify_minor(minor)?;
        Ok(())
    }

    /// Sets both parts of the version.
    ///
    /// Nothing is changed if either part is invalid.
    pub fn set_version(&mut self, version: Version) -> Result<()> {
        version.verify()?;
        self.version = version;
        Ok(())
    }

    /// Returns the system identifier.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Sets the system identifier, clipped to thirty-two bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_system_identifier("MODIFICATION");
    /// assert_eq!("MODIFICATION", header.system_identifier());
    /// header.set_system_identifier(&"x".repeat(40));
    /// assert_eq!(32, header.system_identifier().len());
    /// ```
    pub fn set_system_identifier(&mut self, system_identifier: &str) {
        self.system_identifier = to_field_string(system_identifier, IDENTIFIER_LEN);
    }

    /// Returns the generating software.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Sets the generating software, clipped to thirty-two bytes.
    pub fn set_generating_software(&mut self, generating_software: &str) {
        self.generating_software = to_field_string(generating_software, IDENTIFIER_LEN);
    }

    /// Returns the day of the year on which the file was created, one-based.
    pub fn file_creation_day_of_year(&self) -> u16 {
        self.file_creation_day_of_year
    }

    /// Sets the day of the year on which the file was created.
    pub fn set_file_creation_day_of_year(&mut self, day_of_year: u16) {
        self.file_creation_day_of_year = day_of_year;
    }

    /// Returns the year in which the file was created.
    pub fn file_creation_year(&self) -> u16 {
        self.file_creation_year
    }

    /// Sets the year in which the file was created.
    pub fn set_file_creation_year(&mut self, year: u16) {
        self.file_creation_year = year;
    }

    /// Returns the creation date, if the day and year make a valid date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_file_creation_year(2008);
    /// header.set_file_creation_day_of_year(60);
    /// assert_eq!(NaiveDate::from_ymd_opt(2008, 2, 29), header.date());
    /// header.set_file_creation_day_of_year(0);
    /// assert_eq!(None, header.date());
    /// ```
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(
            i32::from(self.file_creation_year),
            u32::from(self.file_creation_day_of_year),
        )
    }

    /// Sets the creation day and year from a date.
    ///
    /// Years outside of the sixteen-bit range wrap.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.file_creation_day_of_year = date.ordinal().as_();
        self.file_creation_year = date.year().as_();
    }

    /// Returns the size of the public header block, including any padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// assert_eq!(227, header.header_size().unwrap());
    /// header.set_padding(vec![0; 65535]);
    /// assert!(header.header_size().is_err());
    /// ```
    pub fn header_size(&self) -> Result<u16> {
        let header_size = HEADER_SIZE as usize + self.padding.len();
        u16::try_from(header_size).map_err(|_| Error::HeaderTooLarge(header_size))
    }

    /// Returns the number of bytes from the beginning of the file to the first point.
    pub fn offset_to_point_data(&self) -> Result<u32> {
        let offset = usize::from(self.header_size()?)
            + self.all_vlrs().iter().map(Vlr::len).sum::<usize>()
            + self.point_data_gap().len();
        u32::try_from(offset).map_err(|_| Error::OffsetToPointDataTooLarge(offset))
    }

    /// Returns the point format.
    pub fn point_format(&self) -> Format {
        self.point_format
    }

    /// Sets the point format, zero or one.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_point_format(1).unwrap();
    /// assert_eq!(28, header.point_data_record_length());
    /// assert!(header.set_point_format(2).is_err());
    /// ```
    pub fn set_point_format(&mut self, format: u8) -> Result<()> {
        self.point_format = Format::new(format)?;
        Ok(())
    }

    /// Returns the length of each point record, which is set by the point format.
    pub fn point_data_record_length(&self) -> u16 {
        self.point_format.len()
    }

    /// Returns the number of point records.
    pub fn number_of_points(&self) -> u32 {
        self.number_of_points
    }

    /// Sets the number of point records.
    ///
    /// A writer replaces this with the number of points it wrote when it closes.
    pub fn set_number_of_points(&mut self, number_of_points: u32) {
        self.number_of_points = number_of_points;
    }

    /// Returns the number of points for a return, indexed from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let header = Header::default();
    /// assert_eq!(0, header.number_of_points_by_return(4).unwrap());
    /// assert!(header.number_of_points_by_return(5).is_err());
    /// ```
    pub fn number_of_points_by_return(&self, index: usize) -> Result<u32> {
        self.number_of_points_by_return
            .get(index)
            .copied()
            .ok_or(Error::ReturnCountIndex(index))
    }

    /// Sets the number of points for a return, indexed from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_number_of_points_by_return(0, 42).unwrap();
    /// assert_eq!([42, 0, 0, 0, 0], header.points_by_return());
    /// assert!(header.set_number_of_points_by_return(5, 1).is_err());
    /// ```
    pub fn set_number_of_points_by_return(&mut self, index: usize, count: u32) -> Result<()> {
        let n = self
            .number_of_points_by_return
            .get_mut(index)
            .ok_or(Error::ReturnCountIndex(index))?;
        *n = count;
        Ok(())
    }

    /// Returns all five return counts.
    pub fn points_by_return(&self) -> [u32; RETURN_COUNT_LEN] {
        self.number_of_points_by_return
    }

    /// Returns the scale factors.
    pub fn scale(&self) -> Vector<f64> {
        Vector::new(
            self.transforms.x.scale,
            self.transforms.y.scale,
            self.transforms.z.scale,
        )
    }

    /// Sets the scale factors.
    pub fn set_scale(&mut self, x: f64, y: f64, z: f64) {
        self.transforms.x.scale = x;
        self.transforms.y.scale = y;
        self.transforms.z.scale = z;
    }

    /// Returns the offsets.
    pub fn offset(&self) -> Vector<f64> {
        Vector::new(
            self.transforms.x.offset,
            self.transforms.y.offset,
            self.transforms.z.offset,
        )
    }

    /// Sets the offsets.
    pub fn set_offset(&mut self, x: f64, y: f64, z: f64) {
        self.transforms.x.offset = x;
        self.transforms.y.offset = y;
        self.transforms.z.offset = z;
    }

    /// Returns the scales and offsets as transforms.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_scale(0.5, 1., 1.);
    /// header.set_offset(10., 0., 0.);
    /// assert_eq!(11., header.transforms().x.direct(2));
    /// ```
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the minimum coordinates.
    pub fn min(&self) -> Vector<f64> {
        self.bounds.min
    }

    /// Sets the minimum coordinates.
    pub fn set_min(&mut self, x: f64, y: f64, z: f64) {
        self.bounds.min = Vector::new(x, y, z);
    }

    /// Returns the maximum coordinates.
    pub fn max(&self) -> Vector<f64> {
        self.bounds.max
    }

    /// Sets the maximum coordinates.
    pub fn set_max(&mut self, x: f64, y: f64, z: f64) {
        self.bounds.max = Vector::new(x, y, z);
    }

    /// Returns the bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Sets the bounds.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Returns the vlrs, in file order.
    ///
    /// The proj4 string is not included, see [Header::proj4].
    pub fn vlrs(&self) -> &VlrTable {
        &self.vlrs
    }

    /// Returns a mutable reference to the vlrs.
    pub fn vlrs_mut(&mut self) -> &mut VlrTable {
        &mut self.vlrs
    }

    /// Returns the proj4 spatial reference string, if there is one.
    pub fn proj4(&self) -> Option<&str> {
        self.proj4.as_deref()
    }

    /// Sets or clears the proj4 spatial reference string.
    ///
    /// The string is opaque to this crate, and is stored in its own vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Header;
    /// let mut header = Header::default();
    /// header.set_proj4(Some("+proj=longlat +datum=WGS84".to_string()));
    /// assert_eq!(0, header.vlrs().len());
    /// assert_eq!(309, header.offset_to_point_data().unwrap());
    /// ```
    pub fn set_proj4(&mut self, proj4: Option<String>) {
        self.proj4 = proj4;
    }

    /// Returns the bytes after the public header block, before the vlrs.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Sets the bytes after the public header block, before the vlrs.
    pub fn set_padding(&mut self, padding: Vec<u8>) {
        self.padding = padding;
    }

    /// Returns the bytes after the vlrs, before the points.
    ///
    /// The las 1.0 point data start signature is not included, it is added on write.
    pub fn vlr_padding(&self) -> &[u8] {
        &self.vlr_padding
    }

    /// Sets the bytes after the vlrs, before the points.
    pub fn set_vlr_padding(&mut self, vlr_padding: Vec<u8>) {
        self.vlr_padding = vlr_padding;
    }

    /// Returns the number of vlrs written to disk, including the proj4 vlr.
    pub fn number_of_vlrs(&self) -> usize {
        self.vlrs.len() + usize::from(self.proj4.is_some())
    }

    fn all_vlrs(&self) -> Vec<Vlr> {
        let mut vlrs: Vec<Vlr> = self.vlrs.iter().cloned().collect();
        if let Some(proj4) = &self.proj4 {
            vlrs.push(Vlr::new(
                PROJ4_USER_ID,
                PROJ4_RECORD_ID,
                PROJ4_DESCRIPTION,
                proj4.as_bytes().to_vec(),
            ));
        }
        vlrs
    }

    fn point_data_gap(&self) -> Vec<u8> {
        let mut gap = self.vlr_padding.clone();
        if self.version.requires_point_data_start_signature() {
            gap.extend_from_slice(&POINT_DATA_START_SIGNATURE);
        }
        gap
    }
}

fn vlr_count(number_of_vlrs: usize) -> Result<u32> {
    u32::try_from(number_of_vlrs).map_err(|_| Error::TooManyVlrs(number_of_vlrs))
}

impl Default for Header {
    fn default() -> Header {
        let mut header = Header {
            file_source_id: 0,
            reserved: 0,
            project_id: Guid::nil(),
            version: Version::new(1, 0),
            system_identifier: SYSTEM_IDENTIFIER.to_string(),
            generating_software: GENERATING_SOFTWARE.to_string(),
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            point_format: Format::default(),
            number_of_points: 0,
            number_of_points_by_return: [0; RETURN_COUNT_LEN],
            transforms: Vector::default(),
            bounds: Bounds::default(),
            vlrs: VlrTable::default(),
            proj4: None,
            padding: Vec::new(),
            vlr_padding: Vec::new(),
        };
        header.set_date(Utc::now().date_naive());
        header
    }
}

/// A multi-line summary of the header fields.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(57);
        writeln!(f, "{}", rule)?;
        writeln!(f, "  Header Summary")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "  Version:                     {}", self.version)?;
        writeln!(f, "  Source ID:                   {}", self.file_source_id)?;
        writeln!(f, "  Reserved:                    {}", self.reserved)?;
        writeln!(f, "  Project ID/GUID:             '{}'", self.project_id)?;
        writeln!(f, "  System ID:                   '{}'", self.system_identifier)?;
        writeln!(f, "  Generating Software:         '{}'", self.generating_software)?;
        writeln!(
            f,
            "  File Creation Day/Year:      {}/{}",
            self.file_creation_day_of_year, self.file_creation_year
        )?;
        match self.header_size() {
            Ok(n) => writeln!(f, "  Header Byte Size             {}", n)?,
            Err(_) => writeln!(f, "  Header Byte Size             too large")?,
        }
        match self.offset_to_point_data() {
            Ok(n) => writeln!(f, "  Data Offset:                 {}", n)?,
            Err(_) => writeln!(f, "  Data Offset:                 too large")?,
        }
        writeln!(f, "  Number Var. Length Records:  {}", self.number_of_vlrs())?;
        writeln!(f, "  Point Data Format:           {}", self.point_format)?;
        writeln!(f, "  Number of Point Records:     {}", self.number_of_points)?;
        let by_return: Vec<String> = self
            .number_of_points_by_return
            .iter()
            .map(|n| n.to_string())
            .collect();
        writeln!(f, "  Number of Points by Return:  {}", by_return.join(" "))?;
        let scale = self.scale();
        let offset = self.offset();
        writeln!(
            f,
            "  Scale Factor X Y Z:          {} {} {}",
            scale.x, scale.y, scale.z
        )?;
        writeln!(
            f,
            "  Offset X Y Z:                {} {} {}",
            offset.x, offset.y, offset.z
        )?;
        writeln!(
            f,
            "  Min X Y Z:                   {} {} {}",
            self.bounds.min.x, self.bounds.min.y, self.bounds.min.z
        )?;
        writeln!(
            f,
            "  Max X Y Z:                   {} {} {}",
            self.bounds.max.x, self.bounds.max.y, self.bounds.max.z
        )?;
        write!(
            f,
            "  Spatial Reference:           {}",
            self.proj4.as_deref().unwrap_or("None")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(header: &Header) -> Header {
        let mut cursor = Cursor::new(Vec::new());
        header.write_to(&mut cursor).unwrap();
        assert_eq!(
            header.offset_to_point_data().unwrap() as usize,
            cursor.get_ref().len()
        );
        cursor.set_position(0);
        Header::read_from(cursor).unwrap()
    }

    #[test]
    fn defaults() {
        let header = Header::default();
        assert_eq!(Version::new(1, 0), header.version());
        assert_eq!(0, header.file_source_id());
        assert_eq!(0, header.reserved());
        assert!(header.project_id().is_nil());
        assert_eq!(0, header.point_format().to_u8());
        assert_eq!(20, header.point_data_record_length());
        assert_eq!(0, header.number_of_points());
        assert_eq!([0; 5], header.points_by_return());
        assert_eq!("lasfile", header.system_identifier());
        assert!(header.generating_software().starts_with("lasfile "));
        assert_eq!(Vector::new(0.01, 0.01, 0.01), header.scale());
        assert_eq!(Vector::new(0., 0., 0.), header.offset());
        assert!(header.date().is_some());
        assert!(header.vlrs().is_empty());
        assert_eq!(None, header.proj4());
    }

    #[test]
    fn roundtrip_fields() {
        let mut header = Header::default();
        header.set_file_source_id(42);
        header.set_project_id("8388f1b8-aa1b-4108-bca3-6bc68e7b062e".parse().unwrap());
        header.set_version_minor(1).unwrap();
        header.set_system_identifier("ALTM 1210");
        header.set_generating_software("TerraScan");
        header.set_file_creation_day_of_year(78);
        header.set_file_creation_year(2008);
        header.set_point_format(1).unwrap();
        header.set_number_of_points(6);
        for i in 0..5 {
            header
                .set_number_of_points_by_return(i, i as u32 + 1)
                .unwrap();
        }
        header.set_scale(0.01, 0.02, 0.03);
        header.set_offset(1., 2., 3.);
        header.set_min(-1., -2., -3.);
        header.set_max(1., 2., 3.);
        header
            .vlrs_mut()
            .push(Vlr::new("LASF_Projection", 34735, "", vec![1, 2, 3]));
        header.set_proj4(Some("+proj=utm +zone=10".to_string()));
        let other = roundtrip(&header);
        assert_eq!(header, other);
        assert_eq!(1, other.vlrs().len());
        assert_eq!(Some("+proj=utm +zone=10"), other.proj4());
    }

    #[test]
    fn version_setters() {
        let mut header = Header::default();
        assert!(header.set_version_major(2).is_err());
        assert!(header.set_version_minor(2).is_err());
        assert!(header.set_version_major(1).is_ok());
        assert!(header.set_version_minor(0).is_ok());
        assert!(header.set_version_minor(1).is_ok());
        assert_eq!(Version::new(1, 1), header.version());
        assert!(header.set_version(Version::new(1, 2)).is_err());
        assert_eq!(Version::new(1, 1), header.version());
    }

    #[test]
    fn file_source_id_wraps() {
        let mut header = Header::default();
        header.set_file_source_id(65536u32);
        assert_eq!(0, header.file_source_id());
        header.set_file_source_id(65537u32);
        assert_eq!(1, header.file_source_id());
    }

    #[test]
    fn return_counts_are_independent() {
        let mut header = Header::default();
        for i in 0..5 {
            header
                .set_number_of_points_by_return(i, 10 * i as u32)
                .unwrap();
        }
        for i in 0..5 {
            assert_eq!(10 * i as u32, header.number_of_points_by_return(i).unwrap());
        }
        assert!(matches!(
            header.set_number_of_points_by_return(5, 1),
            Err(Error::ReturnCountIndex(5))
        ));
    }

    #[test]
    fn point_data_start_signature() {
        let header = Header::default();
        assert_eq!(229, header.offset_to_point_data().unwrap());
        let other = roundtrip(&header);
        assert!(other.vlr_padding().is_empty());
        assert_eq!(229, other.offset_to_point_data().unwrap());
        assert_eq!(header, other);

        let mut header = Header::default();
        header.set_version_minor(1).unwrap();
        assert_eq!(227, header.offset_to_point_data().unwrap());
    }

    #[test]
    fn padding_is_preserved() {
        let mut header = Header::default();
        header.set_version_minor(1).unwrap();
        header.set_padding(vec![1, 2]);
        header.set_vlr_padding(vec![3, 4, 5]);
        assert_eq!(229, header.header_size().unwrap());
        assert_eq!(232, header.offset_to_point_data().unwrap());
        let other = roundtrip(&header);
        assert_eq!(&[1, 2], other.padding());
        assert_eq!(&[3, 4, 5], other.vlr_padding());
    }

    #[test]
    fn vlr_mutation_moves_offset() {
        let mut header = Header::default();
        header.set_version_minor(1).unwrap();
        header.vlrs_mut().push(Vlr {
            data: vec![0; 10],
            ..Default::default()
        });
        assert_eq!(291, header.offset_to_point_data().unwrap());
        header.vlrs_mut().remove(0).unwrap();
        assert_eq!(227, header.offset_to_point_data().unwrap());
    }

    #[test]
    fn vlr_too_long() {
        let mut header = Header::default();
        header.vlrs_mut().push(Vlr {
            data: vec![0; 65536],
            ..Default::default()
        });
        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(
            header.write_to(&mut cursor),
            Err(Error::VlrTooLong(65536))
        ));
    }

    #[test]
    fn bad_signature() {
        let mut cursor = Cursor::new(Vec::new());
        Header::default().write_to(&mut cursor).unwrap();
        cursor.get_mut()[3] = b'G';
        cursor.set_position(0);
        let err = Header::read_from(cursor).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, Error::InvalidFileSignature(s) if &s == b"LASG"));
    }

    #[test]
    fn unsupported_format_on_disk() {
        let raw_header = raw::Header {
            point_data_format_id: 2,
            point_data_record_length: 26,
            ..Default::default()
        };
        assert!(matches!(
            Header::from_raw(raw_header, Vec::new(), Vec::new()),
            Err(Error::UnsupportedPointFormat(2))
        ));
    }

    #[test]
    fn record_length_mismatch() {
        let raw_header = raw::Header {
            point_data_format_id: 1,
            point_data_record_length: 20,
            ..Default::default()
        };
        assert!(matches!(
            Header::from_raw(raw_header, Vec::new(), Vec::new()),
            Err(Error::InvalidPointDataRecordLength {
                format: 1,
                expected: 28,
                found: 20
            })
        ));
    }

    #[test]
    fn vlr_overrun() {
        let mut raw_header = raw::Header::default();
        raw_header.number_of_variable_length_records = 1;
        raw_header.offset_to_point_data = 227;
        let mut cursor = Cursor::new(Vec::new());
        raw_header.write_to(&mut cursor).unwrap();
        raw::Vlr::default().write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        assert!(matches!(
            Header::read_from(cursor),
            Err(Error::VlrOverrun {
                end: 281,
                offset_to_point_data: 227
            })
        ));
    }

    #[test]
    fn out_of_range_version_is_kept() {
        let raw_header = raw::Header {
            version: Version::new(1, 2),
            ..Default::default()
        };
        let header = Header::from_raw(raw_header, Vec::new(), Vec::new()).unwrap();
        assert_eq!(Version::new(1, 2), header.version());
    }

    #[test]
    fn reserved_is_preserved() {
        let raw_header = raw::Header {
            reserved: 7,
            ..Default::default()
        };
        let header = Header::from_raw(raw_header, Vec::new(), Vec::new()).unwrap();
        assert_eq!(7, header.reserved());
        assert_eq!(7, header.to_raw().unwrap().reserved);
    }

    #[test]
    fn set_date() {
        let mut header = Header::default();
        header.set_date(NaiveDate::from_ymd_opt(2010, 12, 31).unwrap());
        assert_eq!(365, header.file_creation_day_of_year());
        assert_eq!(2010, header.file_creation_year());
    }

    #[test]
    fn display() {
        let mut header = Header::default();
        header.set_number_of_points(3);
        let summary = header.to_string();
        assert!(summary.contains("Header Summary"));
        assert!(summary.contains("Number of Point Records:     3"));
        assert!(summary.contains("Spatial Reference:           None"));
    }

    #[test]
    fn display_counts_proj4_vlr() {
        let mut header = Header::default();
        header.vlrs_mut().push(Vlr::default());
        header.set_proj4(Some("+proj=longlat".to_string()));
        assert_eq!(2, header.number_of_vlrs());
        assert!(
            header
                .to_string()
                .contains("Number Var. Length Records:  2")
        );
        let raw_header = header.to_raw().unwrap();
        assert_eq!(2, raw_header.number_of_variable_length_records);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn vlr_count_overflow() {
        assert_eq!(3, vlr_count(3).unwrap());
        let err = vlr_count(u32::MAX as usize + 1).unwrap_err();
        assert!(err.is_range_error());
        assert!(matches!(err, Error::TooManyVlrs(n) if n == u32::MAX as usize + 1));
    }

    #[test]
    fn write_without_start_signature() {
        let header = Header::default();
        let mut cursor = Cursor::new(Vec::new());
        header.write_with_offset(&mut cursor, 227).unwrap();
        assert_eq!(227, cursor.get_ref().len());
        cursor.set_position(0);
        let raw_header = raw::Header::read_from(&mut cursor).unwrap();
        assert_eq!(227, raw_header.offset_to_point_data);
        cursor.set_position(0);
        assert_eq!(header, Header::read_from(cursor).unwrap());
    }

    #[test]
    fn nul_in_identifier() {
        let mut header = Header::default();
        header.set_system_identifier("before\0after");
        header.set_generating_software("\0");
        assert_eq!("before", header.system_identifier());
        assert_eq!("", header.generating_software());
        assert_eq!(header, roundtrip(&header));
    }
}
