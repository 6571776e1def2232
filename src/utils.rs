//! Fixed-width field helpers shared by the raw codecs.

use log::warn;

/// Reads a fixed-width, nul-padded byte field as a string.
pub(crate) trait AsLasStr {
    /// Returns the text before the first nul, with trailing space padding removed.
    ///
    /// Invalid utf8 is replaced rather than rejected, since these fields are free-form.
    fn as_las_string(&self) -> String;
}

/// Writes a string into a fixed-width, nul-padded byte field.
pub(crate) trait FromLasStr {
    /// Copies the string into this buffer, clipping it to the buffer's width and nul-filling
    /// the remainder.
    fn from_las_str(&mut self, s: &str);
}

impl AsLasStr for [u8] {
    fn as_las_string(&self) -> String {
        let end = self.iter().position(|&b| b == 0).unwrap_or(self.len());
        String::from_utf8_lossy(&self[..end])
            .trim_end_matches(' ')
            .to_string()
    }
}

impl FromLasStr for [u8] {
    fn from_las_str(&mut self, s: &str) {
        let s = clip(s, self.len());
        let bytes = s.as_bytes();
        self[..bytes.len()].copy_from_slice(bytes);
        for b in &mut self[bytes.len()..] {
            *b = 0;
        }
    }
}

/// Clips a string to at most `width` bytes, never splitting a character.
pub(crate) fn clip(s: &str, width: usize) -> &str {
    if s.len() <= width {
        return s;
    }
    let mut end = width;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    warn!("clipping {:?} to {} bytes", s, width);
    &s[..end]
}

/// Clips a string for storage in a fixed-width field of `width` bytes.
///
/// Anything from the first nul on is dropped, and so are trailing spaces, so the stored value is
/// what a reader will see.
pub(crate) fn to_field_string(s: &str, width: usize) -> String {
    let s = s.split('\0').next().unwrap_or_default();
    clip(s, width).trim_end_matches(' ').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_las_string_empty() {
        let buf = [0u8; 0];
        assert_eq!("", buf.as_las_string());
    }

    #[test]
    fn as_las_string_nul_filled() {
        let buf = [76, 65, 83, 0, 0];
        assert_eq!("LAS", buf.as_las_string());
    }

    #[test]
    fn as_las_string_stops_at_first_nul() {
        let buf = [76, 0, 33];
        assert_eq!("L", buf.as_las_string());
    }

    #[test]
    fn as_las_string_space_padded() {
        let buf = *b"TerraScan    ";
        assert_eq!("TerraScan", buf.as_las_string());
    }

    #[test]
    fn from_las_str_fill() {
        let mut data = [1, 1, 1];
        data.from_las_str("B");
        assert_eq!([66, 0, 0], data);
    }

    #[test]
    fn from_las_str_clips() {
        let mut data = [0; 2];
        data.from_las_str("Bee");
        assert_eq!(*b"Be", data);
    }

    #[test]
    fn clip_on_char_boundary() {
        assert_eq!("a", clip("a\u{e9}", 2));
        assert_eq!("a\u{e9}", clip("a\u{e9}", 3));
    }

    #[test]
    fn to_field_string_trims_padding() {
        assert_eq!("abc", to_field_string("abc   ", 32));
        assert_eq!("ab", to_field_string("ab cd", 3));
    }

    #[test]
    fn to_field_string_stops_at_first_nul() {
        assert_eq!("ab", to_field_string("ab\0cd", 32));
        assert_eq!("ab", to_field_string("ab \0", 32));
        assert_eq!("", to_field_string("\0abc", 32));
    }
}
