//! The five uncompressed raster layouts and the shared bottom-up row loop.

use enough::Stop;

use super::header::BI_RGB;
use super::palette::ColorTable;
use super::reader::ByteReader;
use super::utils::{bit_at, byte_row_layout, nibble_at, packed_row_layout};
use crate::error::{BmpError, Unsupported};
use crate::pixel::PixelLayout;

/// Raster layout selected from (bit depth, compression).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RasterFormat {
    /// 8 pixels per byte, MSB first, palette indexed.
    Indexed1,
    /// 2 pixels per byte, high nibble first, palette indexed.
    Indexed4,
    /// 1 palette index per byte.
    Indexed8,
    /// Blue, green, red; opaque.
    Bgr24,
    /// Blue, green, red, alpha.
    Bgra32,
}

impl RasterFormat {
    pub(crate) fn select(bit_depth: u16, compression: u32) -> Result<Self, BmpError> {
        match (bit_depth, compression) {
            (1, BI_RGB) => Ok(Self::Indexed1),
            (4, BI_RGB) => Ok(Self::Indexed4),
            (8, BI_RGB) => Ok(Self::Indexed8),
            (24, BI_RGB) => Ok(Self::Bgr24),
            (32, BI_RGB) => Ok(Self::Bgra32),
            _ => Err(Unsupported::Encoding {
                bit_depth,
                compression,
            }
            .into()),
        }
    }

    pub(crate) fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed1 | Self::Indexed4 | Self::Indexed8)
    }

    /// `(data_bytes, padding_bytes)` of one stored scanline.
    pub(crate) fn row_layout(self, width: usize) -> Option<(usize, usize)> {
        match self {
            Self::Indexed1 => packed_row_layout(width, 1),
            Self::Indexed4 => packed_row_layout(width, 4),
            Self::Indexed8 => byte_row_layout(width, 1),
            Self::Bgr24 => byte_row_layout(width, 3),
            Self::Bgra32 => byte_row_layout(width, 4),
        }
    }

    /// Unpack one scanline's pixel bytes into `out` (`width * 4` bytes).
    fn unpack_row(
        self,
        row: &[u8],
        out: &mut [u8],
        colors: &ColorTable,
        layout: PixelLayout,
    ) -> Result<(), BmpError> {
        match self {
            Self::Indexed1 => {
                for (x, px) in out.chunks_exact_mut(4).enumerate() {
                    let index = bit_at(row[x / 8], x % 8);
                    layout.store(px, colors.rgba(index)?);
                }
            }
            Self::Indexed4 => {
                for (x, px) in out.chunks_exact_mut(4).enumerate() {
                    let index = nibble_at(row[x / 2], x % 2);
                    layout.store(px, colors.rgba(index)?);
                }
            }
            Self::Indexed8 => {
                for (&index, px) in row.iter().zip(out.chunks_exact_mut(4)) {
                    layout.store(px, colors.rgba(index)?);
                }
            }
            Self::Bgr24 => {
                for (bgr, px) in row.chunks_exact(3).zip(out.chunks_exact_mut(4)) {
                    layout.store(px, [bgr[2], bgr[1], bgr[0], 255]);
                }
            }
            Self::Bgra32 => {
                for (bgra, px) in row.chunks_exact(4).zip(out.chunks_exact_mut(4)) {
                    layout.store(px, [bgra[2], bgra[1], bgra[0], bgra[3]]);
                }
            }
        }
        Ok(())
    }

    /// Decode all scanlines into `buf`, which holds `height` rows of
    /// `width * 4` bytes. The first stored row is the bottom of the image.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn decode_into(
        self,
        reader: &mut ByteReader<'_>,
        width: u32,
        height: u32,
        colors: &ColorTable,
        layout: PixelLayout,
        buf: &mut [u8],
        stop: &dyn Stop,
    ) -> Result<(), BmpError> {
        let (data_len, padding) = self
            .row_layout(width as usize)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        let out_row = width as usize * layout.bytes_per_pixel();

        for (row_idx, out) in buf.rchunks_exact_mut(out_row).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            let row = reader.read_bytes(data_len)?;
            reader.skip(padding)?;
            self.unpack_row(row, out, colors, layout)?;
        }
        Ok(())
    }
}
