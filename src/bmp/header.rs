//! File header and `BITMAPINFOHEADER` parsing.

use super::BmpPermissiveness;
use super::raster::RasterFormat;
use super::reader::ByteReader;
use crate::error::{BmpError, Unsupported};

/// Uncompressed raster data.
pub const BI_RGB: u32 = 0;

const SIGNATURE: [u8; 2] = *b"BM";
const INFO_HEADER_SIZE: u32 = 40;

/// The 14-byte file header. Consumed during decode and not returned.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FileHeader {
    pub file_size: u32,
    pub data_offset: u32,
}

/// Parsed `BITMAPINFOHEADER`.
///
/// Only produced for images this crate can decode: `width` and `height` are
/// positive, rows are stored bottom-up, and (`bit_depth`, `compression`) is
/// one of the supported uncompressed combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    /// Declared size of the info header. Always 40.
    pub header_size: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels. The stored row order is bottom-up.
    pub height: u32,
    /// Color planes. 1 in conforming files.
    pub planes: u16,
    /// Bits per pixel: 1, 4, 8, 24 or 32.
    pub bit_depth: u16,
    /// Compression tag. Always [`BI_RGB`].
    pub compression: u32,
    /// Declared raster size in bytes. Often zero for uncompressed images.
    pub raster_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub x_pixels_per_meter: i32,
    /// Vertical resolution in pixels per meter.
    pub y_pixels_per_meter: i32,
    /// Number of palette entries stored in the file. A stored count of zero
    /// resolves to `2^bit_depth` for indexed images; always zero for
    /// direct-color images.
    pub palette_len: u32,
    /// Number of palette entries the image declares as important; 0 means all.
    pub important_colors: u32,
}

impl BmpInfo {
    /// Parse the headers of a BMP without decoding pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let mut reader = ByteReader::new(data);
        let (_, info) = parse_header(&mut reader, BmpPermissiveness::Standard)?;
        Ok(info)
    }

    /// Whether the image is palette-indexed (bit depth 8 or less).
    pub fn is_indexed(&self) -> bool {
        self.bit_depth <= 8
    }

    pub(crate) fn raster_format(&self) -> RasterFormat {
        // Validated in parse_header.
        match self.bit_depth {
            1 => RasterFormat::Indexed1,
            4 => RasterFormat::Indexed4,
            8 => RasterFormat::Indexed8,
            24 => RasterFormat::Bgr24,
            _ => RasterFormat::Bgra32,
        }
    }
}

fn read_file_header(reader: &mut ByteReader<'_>) -> Result<FileHeader, BmpError> {
    let found = [reader.read_u8()?, reader.read_u8()?];
    if found != SIGNATURE {
        return Err(BmpError::InvalidSignature { found });
    }
    let file_size = reader.read_u32_le()?;
    // Reserved (4 bytes)
    reader.skip(4)?;
    let data_offset = reader.read_u32_le()?;
    Ok(FileHeader {
        file_size,
        data_offset,
    })
}

/// Read the file header and info header, leaving `reader` at the palette
/// (indexed images) or the raster data.
pub(crate) fn parse_header(
    reader: &mut ByteReader<'_>,
    permissiveness: BmpPermissiveness,
) -> Result<(FileHeader, BmpInfo), BmpError> {
    let file = read_file_header(reader)?;

    let header_size = reader.read_u32_le()?;
    if header_size != INFO_HEADER_SIZE {
        return Err(Unsupported::HeaderSize(header_size).into());
    }

    let width = reader.read_i32_le()?;
    let height = reader.read_i32_le()?;
    let planes = reader.read_u16_le()?;
    let bit_depth = reader.read_u16_le()?;
    let compression = reader.read_u32_le()?;
    let raster_size = reader.read_u32_le()?;
    let x_pixels_per_meter = reader.read_i32_le()?;
    let y_pixels_per_meter = reader.read_i32_le()?;
    let colors_used = reader.read_u32_le()?;
    let important_colors = reader.read_u32_le()?;

    if width <= 0 || height == 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    if height < 0 {
        return Err(Unsupported::TopDown.into());
    }

    RasterFormat::select(bit_depth, compression)?;

    let palette_len = match bit_depth {
        d if d <= 8 && colors_used == 0 => 1u32 << d,
        d if d <= 8 => colors_used,
        _ => 0,
    };

    if permissiveness == BmpPermissiveness::Strict {
        if planes != 1 {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "BMP planes field is {planes}, expected 1"
            )));
        }
        if bit_depth <= 8 && palette_len > 1u32 << bit_depth {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "BMP palette count ({palette_len}) exceeds max for {bit_depth}-bit depth ({})",
                1u32 << bit_depth
            )));
        }
    }

    let info = BmpInfo {
        header_size,
        width: width.unsigned_abs(),
        height: height.unsigned_abs(),
        planes,
        bit_depth,
        compression,
        raster_size,
        x_pixels_per_meter,
        y_pixels_per_meter,
        palette_len,
        important_colors,
    };
    log::debug!(
        "BMP {}x{} {}bpp, {} palette entries, file size {}, data offset {}",
        info.width,
        info.height,
        info.bit_depth,
        info.palette_len,
        file.file_size,
        file.data_offset
    );
    Ok((file, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn header(width: i32, height: i32, depth: u16, compression: u32, colors: u32) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(b"BM");
        v.extend_from_slice(&0u32.to_le_bytes());
        v.extend_from_slice(&0u32.to_le_bytes());
        v.extend_from_slice(&54u32.to_le_bytes());
        v.extend_from_slice(&40u32.to_le_bytes());
        v.extend_from_slice(&width.to_le_bytes());
        v.extend_from_slice(&height.to_le_bytes());
        v.extend_from_slice(&1u16.to_le_bytes());
        v.extend_from_slice(&depth.to_le_bytes());
        v.extend_from_slice(&compression.to_le_bytes());
        v.extend_from_slice(&[0u8; 12]);
        v.extend_from_slice(&colors.to_le_bytes());
        v.extend_from_slice(&0u32.to_le_bytes());
        v
    }

    #[test]
    fn parses_fields_and_stops_after_info_header() {
        let data = header(7, 3, 24, BI_RGB, 0);
        let mut r = ByteReader::new(&data);
        let (file, info) = parse_header(&mut r, BmpPermissiveness::Standard).unwrap();
        assert_eq!(file.data_offset, 54);
        assert_eq!(info.width, 7);
        assert_eq!(info.height, 3);
        assert_eq!(info.bit_depth, 24);
        assert_eq!(info.palette_len, 0);
        assert_eq!(r.consumed(), 54);
        assert_eq!(info.raster_format(), RasterFormat::Bgr24);
    }

    #[test]
    fn zero_palette_count_defaults_to_full_table() {
        let info = BmpInfo::from_bytes(&header(1, 1, 4, BI_RGB, 0)).unwrap();
        assert_eq!(info.palette_len, 16);
        let info = BmpInfo::from_bytes(&header(1, 1, 8, BI_RGB, 3)).unwrap();
        assert_eq!(info.palette_len, 3);
    }

    #[test]
    fn rejects_other_header_sizes() {
        let mut data = header(1, 1, 24, BI_RGB, 0);
        data[14..18].copy_from_slice(&124u32.to_le_bytes());
        assert!(matches!(
            BmpInfo::from_bytes(&data),
            Err(BmpError::UnsupportedFormat(Unsupported::HeaderSize(124)))
        ));
    }

    #[test]
    fn rejects_bad_dimensions_and_top_down() {
        assert!(matches!(
            BmpInfo::from_bytes(&header(0, 1, 24, BI_RGB, 0)),
            Err(BmpError::InvalidDimensions { width: 0, height: 1 })
        ));
        assert!(matches!(
            BmpInfo::from_bytes(&header(1, 0, 24, BI_RGB, 0)),
            Err(BmpError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            BmpInfo::from_bytes(&header(2, -2, 24, BI_RGB, 0)),
            Err(BmpError::UnsupportedFormat(Unsupported::TopDown))
        ));
    }

    #[test]
    fn strict_checks_planes_and_palette_count() {
        let mut data = header(1, 1, 1, BI_RGB, 3);
        let mut r = ByteReader::new(&data);
        assert!(parse_header(&mut r, BmpPermissiveness::Standard).is_ok());
        let mut r = ByteReader::new(&data);
        assert!(matches!(
            parse_header(&mut r, BmpPermissiveness::Strict),
            Err(BmpError::InvalidHeader(_))
        ));

        data[26..28].copy_from_slice(&2u16.to_le_bytes());
        data[46..50].copy_from_slice(&2u32.to_le_bytes());
        let mut r = ByteReader::new(&data);
        assert!(matches!(
            parse_header(&mut r, BmpPermissiveness::Strict),
            Err(BmpError::InvalidHeader(_))
        ));
    }
}
