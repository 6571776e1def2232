//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Vlrs are stored right after the header, before the point records, in the order of the
//! header's [VlrTable]:
//!
//! ```
//! use lasfile::{Vlr, VlrTable};
//! let mut vlrs = VlrTable::default();
//! vlrs.push(Vlr::new("lasfile", 42, "Some really important data", vec![1, 2, 3]));
//! assert_eq!(1, vlrs.len());
//! assert_eq!(42, vlrs.get(0).unwrap().record_id);
//! ```

use crate::{
    Error, Result, raw,
    utils::{AsLasStr, FromLasStr, to_field_string},
};
use std::slice;

const USER_ID_LEN: usize = 16;
const DESCRIPTION_LEN: usize = 32;

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection". At most sixteen bytes are stored.
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data, at most thirty-two bytes are stored.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a new vlr, clipping the user id and description to their field widths.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vlr;
    /// let vlr = Vlr::new("a user id that is too long", 1, "", Vec::new());
    /// assert_eq!("a user id that i", vlr.user_id);
    /// ```
    pub fn new(user_id: &str, record_id: u16, description: &str, data: Vec<u8>) -> Vlr {
        Vlr {
            user_id: to_field_string(user_id, USER_ID_LEN),
            record_id,
            description: to_field_string(description, DESCRIPTION_LEN),
            data,
        }
    }

    /// Creates a vlr from a raw vlr.
    ///
    /// The reserved field is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Vlr, raw};
    /// let raw_vlr = raw::Vlr::default();
    /// let vlr = Vlr::from_raw(raw_vlr);
    /// ```
    pub fn from_raw(raw_vlr: raw::Vlr) -> Vlr {
        Vlr {
            user_id: raw_vlr.user_id.as_las_string(),
            record_id: raw_vlr.record_id,
            description: raw_vlr.description.as_las_string(),
            data: raw_vlr.data,
        }
    }

    /// Converts this vlr to a raw vlr.
    ///
    /// Returns an error if the data are too long for the sixteen-bit record length.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vlr;
    /// let raw_vlr = Vlr::default().into_raw().unwrap();
    /// assert_eq!(0, raw_vlr.reserved);
    ///
    /// let vlr = Vlr { data: vec![0; 65536], ..Default::default() };
    /// assert!(vlr.into_raw().is_err());
    /// ```
    pub fn into_raw(self) -> Result<raw::Vlr> {
        let record_length_after_header =
            u16::try_from(self.data.len()).map_err(|_| Error::VlrTooLong(self.data.len()))?;
        let mut user_id = [0; USER_ID_LEN];
        user_id.from_las_str(&self.user_id);
        let mut description = [0; DESCRIPTION_LEN];
        description.from_las_str(&self.description);
        Ok(raw::Vlr {
            reserved: 0,
            user_id,
            record_id: self.record_id,
            record_length_after_header,
            description,
            data: self.data,
        })
    }

    /// Returns the total length of this vlr, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Vlr;
    /// let vlr = Vlr::default();
    /// assert_eq!(54, vlr.len());
    /// ```
    pub fn len(&self) -> usize {
        self.data.len() + raw::vlr::HEADER_SIZE
    }

    /// Returns true if the data of this vlr are empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this vlr has this user id and record id.
    pub fn is(&self, user_id: &str, record_id: u16) -> bool {
        self.user_id == user_id && self.record_id == record_id
    }
}

/// An ordered collection of vlrs, kept in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VlrTable(Vec<Vlr>);

impl VlrTable {
    /// Returns the number of vlrs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no vlrs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the vlr at this index.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Vlr, VlrTable};
    /// let mut vlrs = VlrTable::default();
    /// assert!(vlrs.get(0).is_err());
    /// vlrs.push(Vlr::default());
    /// assert!(vlrs.get(0).is_ok());
    /// ```
    pub fn get(&self, index: usize) -> Result<&Vlr> {
        self.0.get(index).ok_or(Error::VlrIndex {
            index,
            len: self.0.len(),
        })
    }

    /// Returns a mutable reference to the vlr at this index.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Vlr> {
        let len = self.0.len();
        self.0.get_mut(index).ok_or(Error::VlrIndex { index, len })
    }

    /// Appends a vlr to the end of the table.
    pub fn push(&mut self, vlr: Vlr) {
        self.0.push(vlr)
    }

    /// Removes and returns the vlr at this index, shifting later vlrs down.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{Vlr, VlrTable};
    /// let mut vlrs = VlrTable::default();
    /// vlrs.push(Vlr { record_id: 1, ..Default::default() });
    /// vlrs.push(Vlr { record_id: 2, ..Default::default() });
    /// assert_eq!(1, vlrs.remove(0).unwrap().record_id);
    /// assert_eq!(2, vlrs.get(0).unwrap().record_id);
    /// assert!(vlrs.remove(1).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<Vlr> {
        if index < self.0.len() {
            Ok(self.0.remove(index))
        } else {
            Err(Error::VlrIndex {
                index,
                len: self.0.len(),
            })
        }
    }

    /// Returns an iterator over the vlrs.
    pub fn iter(&self) -> slice::Iter<'_, Vlr> {
        self.0.iter()
    }

    /// Returns the number of bytes these vlrs occupy in a file.
    pub fn byte_len(&self) -> usize {
        self.0.iter().map(Vlr::len).sum()
    }

    pub(crate) fn position(&self, user_id: &str, record_id: u16) -> Option<usize> {
        self.0.iter().position(|vlr| vlr.is(user_id, record_id))
    }
}

impl From<Vec<Vlr>> for VlrTable {
    fn from(vlrs: Vec<Vlr>) -> VlrTable {
        VlrTable(vlrs)
    }
}

impl FromIterator<Vlr> for VlrTable {
    fn from_iter<I: IntoIterator<Item = Vlr>>(iter: I) -> VlrTable {
        VlrTable(iter.into_iter().collect())
    }
}

impl IntoIterator for VlrTable {
    type Item = Vlr;
    type IntoIter = std::vec::IntoIter<Vlr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VlrTable {
    type Item = &'a Vlr;
    type IntoIter = slice::Iter<'a, Vlr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len() {
        let vlr = Vlr {
            data: vec![0; 1],
            ..Default::default()
        };
        assert_eq!(55, vlr.len());
    }

    #[test]
    fn raw_roundtrip() {
        let vlr = Vlr::new("LASF_Projection", 34735, "GeoKeyDirectoryTag", vec![1, 2, 3, 4]);
        let raw_vlr = vlr.clone().into_raw().unwrap();
        assert_eq!(4, raw_vlr.record_length_after_header);
        assert_eq!(b"LASF_Projection\0", &raw_vlr.user_id);
        assert_eq!(vlr, Vlr::from_raw(raw_vlr));
    }

    #[test]
    fn clip_on_raw() {
        let vlr = Vlr {
            user_id: "0123456789abcdefXYZ".to_string(),
            description: "d".repeat(40),
            ..Default::default()
        };
        let vlr = Vlr::from_raw(vlr.into_raw().unwrap());
        assert_eq!("0123456789abcdef", vlr.user_id);
        assert_eq!("d".repeat(32), vlr.description);
    }

    #[test]
    fn max_length_data() {
        let vlr = Vlr {
            data: vec![0; usize::from(u16::MAX)],
            ..Default::default()
        };
        assert_eq!(u16::MAX, vlr.into_raw().unwrap().record_length_after_header);
    }

    #[test]
    fn too_long() {
        let vlr = Vlr {
            data: vec![0; usize::from(u16::MAX) + 1],
            ..Default::default()
        };
        assert!(matches!(vlr.into_raw(), Err(Error::VlrTooLong(65536))));
    }

    #[test]
    fn table_get_out_of_range() {
        let vlrs: VlrTable = vec![Vlr::default()].into();
        assert!(matches!(
            vlrs.get(1),
            Err(Error::VlrIndex { index: 1, len: 1 })
        ));
    }

    #[test]
    fn table_remove_shifts() {
        let mut vlrs: VlrTable = (0..3)
            .map(|record_id| Vlr {
                record_id,
                ..Default::default()
            })
            .collect();
        let removed = vlrs.remove(1).unwrap();
        assert_eq!(1, removed.record_id);
        let ids: Vec<u16> = vlrs.iter().map(|vlr| vlr.record_id).collect();
        assert_eq!(vec![0, 2], ids);
        assert_eq!(108, vlrs.byte_len());
    }

    #[test]
    fn table_position() {
        let vlrs: VlrTable = vec![
            Vlr::new("a", 1, "", Vec::new()),
            Vlr::new("b", 2, "", Vec::new()),
        ]
        .into();
        assert_eq!(Some(1), vlrs.position("b", 2));
        assert_eq!(None, vlrs.position("b", 1));
    }
}
