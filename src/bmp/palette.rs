//! Color table reading and index resolution.

use alloc::vec::Vec;
use core::cell::Cell;

use super::reader::ByteReader;
use crate::error::BmpError;

/// One color table entry as stored on the wire (blue, green, red, reserved).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

/// Color table entries in file order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Palette {
    entries: Vec<PaletteEntry>,
}

/// Read `count` 4-byte palette entries.
///
/// Capacity is reserved for at most 256 entries up front, so an inflated
/// count fails on the first short read instead of allocating for it.
pub(crate) fn read_palette(reader: &mut ByteReader<'_>, count: u32) -> Result<Palette, BmpError> {
    let count = count as usize;
    let mut entries = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        let [blue, green, red, _reserved] = reader.read_array::<4>()?;
        entries.push(PaletteEntry { blue, green, red });
    }
    log::trace!("read {} palette entries", entries.len());
    Ok(Palette { entries })
}

impl Palette {
    /// Split the palette into parallel channel tables.
    pub(crate) fn color_table(&self, clamp_out_of_range: bool) -> ColorTable {
        ColorTable {
            red: self.entries.iter().map(|e| e.red).collect(),
            green: self.entries.iter().map(|e| e.green).collect(),
            blue: self.entries.iter().map(|e| e.blue).collect(),
            clamp_out_of_range,
            clamped: Cell::new(false),
        }
    }
}

/// Red, green and blue values indexed by palette index.
#[derive(Clone, Debug, Default)]
pub(crate) struct ColorTable {
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
    /// Resolve indices past the end to the last entry instead of failing.
    clamp_out_of_range: bool,
    clamped: Cell<bool>,
}

impl ColorTable {
    pub(crate) fn len(&self) -> usize {
        self.red.len()
    }

    /// Whether any index was clamped so far.
    pub(crate) fn clamped(&self) -> bool {
        self.clamped.get()
    }

    /// Opaque RGBA color for palette `index`.
    #[inline]
    pub(crate) fn rgba(&self, index: u8) -> Result<[u8; 4], BmpError> {
        let mut i = usize::from(index);
        if i >= self.len() {
            if !self.clamp_out_of_range {
                return Err(BmpError::PaletteIndexOutOfRange {
                    index: i,
                    len: self.len(),
                });
            }
            self.clamped.set(true);
            match self.len().checked_sub(1) {
                Some(last) => i = last,
                None => return Ok([0, 0, 0, 255]),
            }
        }
        Ok([self.red[i], self.green[i], self.blue[i], 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(bytes: &[u8], count: u32) -> Result<Palette, BmpError> {
        read_palette(&mut ByteReader::new(bytes), count)
    }

    #[test]
    fn entries_are_bgr_reserved() {
        let p = palette(&[10, 20, 30, 0, 1, 2, 3, 99], 2).unwrap();
        let table = p.color_table(false);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rgba(0).unwrap(), [30, 20, 10, 255]);
        assert_eq!(table.rgba(1).unwrap(), [3, 2, 1, 255]);
    }

    #[test]
    fn inflated_count_is_truncated_stream() {
        let err = palette(&[0; 8], u32::MAX).unwrap_err();
        assert!(matches!(err, BmpError::TruncatedStream { offset: 8, .. }));
    }

    #[test]
    fn out_of_range_index_fails_or_clamps() {
        let p = palette(&[10, 20, 30, 0, 1, 2, 3, 0], 2).unwrap();
        assert!(matches!(
            p.color_table(false).rgba(2),
            Err(BmpError::PaletteIndexOutOfRange { index: 2, len: 2 })
        ));
        let clamping = p.color_table(true);
        assert!(!clamping.clamped());
        assert_eq!(clamping.rgba(200).unwrap(), [3, 2, 1, 255]);
        assert!(clamping.clamped());
        assert_eq!(
            Palette::default().color_table(true).rgba(0).unwrap(),
            [0, 0, 0, 255]
        );
    }
}
