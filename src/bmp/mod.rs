//! Uncompressed BMP decoding (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::DecodeRequest`], etc.

mod header;
mod palette;
mod raster;
mod reader;
mod utils;

pub use header::{BI_RGB, BmpInfo};

use alloc::vec;
use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use palette::{ColorTable, read_palette};
use reader::ByteReader;

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Reject files that violate the BMP format even in ways that don't
    /// affect decoding: planes != 1, more palette entries than the bit
    /// depth can address, or a data offset that doesn't point right after
    /// the palette.
    Strict,

    /// Default behavior. Ignore the file size and data offset fields
    /// (a mismatched offset is logged), reject out-of-range palette
    /// indices.
    #[default]
    Standard,

    /// Like `Standard`, but out-of-range palette indices resolve to the
    /// last palette entry (opaque black for an empty palette).
    Permissive,
}

/// Decode BMP data into a top-down pixel buffer in `layout` channel order.
pub(crate) fn decode(
    data: &[u8],
    layout: PixelLayout,
    permissiveness: BmpPermissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let mut reader = ByteReader::new(data);
    let (file, info) = header::parse_header(&mut reader, permissiveness)?;
    let format = info.raster_format();
    log::debug!("BMP raster format {format:?}, output {layout:?}");

    let out_bytes = (info.width as usize)
        .checked_mul(info.height as usize)
        .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(BmpError::DimensionsTooLarge {
            width: info.width,
            height: info.height,
        })?;
    if let Some(limits) = limits {
        limits.check_dimensions(info.width, info.height)?;
        limits.check_output_bytes(out_bytes)?;
    }
    stop.check()?;

    let colors = if format.is_indexed() {
        read_palette(&mut reader, info.palette_len)?
            .color_table(permissiveness == BmpPermissiveness::Permissive)
    } else {
        ColorTable::default()
    };

    check_data_offset(file.data_offset, reader.consumed(), permissiveness)?;

    // The output buffer is never larger than the stored raster it is
    // unpacked from, so a stream too short for the raster fails here.
    let raster_bytes = format
        .row_layout(info.width as usize)
        .and_then(|(data, padding)| data.checked_add(padding))
        .and_then(|row| row.checked_mul(info.height as usize))
        .ok_or(BmpError::DimensionsTooLarge {
            width: info.width,
            height: info.height,
        })?;
    if reader.remaining() < raster_bytes {
        return Err(BmpError::TruncatedStream {
            offset: reader.consumed(),
            needed: raster_bytes,
            available: reader.remaining(),
        });
    }

    let mut pixels = vec![0u8; out_bytes];
    format.decode_into(
        &mut reader,
        info.width,
        info.height,
        &colors,
        layout,
        &mut pixels,
        stop,
    )?;

    if colors.clamped() {
        log::warn!(
            "BMP palette indices beyond {} entries were clamped",
            colors.len()
        );
    }
    if reader.remaining() > 0 {
        log::debug!("{} trailing bytes after BMP raster", reader.remaining());
    }

    Ok(DecodeOutput::new(pixels, layout, info))
}

/// Raster data is always read from the current position; the declared
/// offset only matters for reporting.
fn check_data_offset(
    declared: u32,
    consumed: usize,
    permissiveness: BmpPermissiveness,
) -> Result<(), BmpError> {
    if declared as usize == consumed {
        return Ok(());
    }
    match permissiveness {
        BmpPermissiveness::Strict => Err(BmpError::InvalidHeader(alloc::format!(
            "BMP data offset {declared} doesn't match end of headers and palette ({consumed})"
        ))),
        BmpPermissiveness::Standard => {
            log::warn!(
                "BMP data offset {declared} doesn't match end of headers and palette ({consumed}); \
                 reading raster from {consumed}"
            );
            Ok(())
        }
        BmpPermissiveness::Permissive => Ok(()),
    }
}
