//! # zenbmp
//!
//! Decoder for uncompressed Windows Bitmap (BMP) images.
//!
//! ## Supported Formats
//!
//! - 14-byte file header + 40-byte `BITMAPINFOHEADER`
//! - 1, 4 and 8 bits per pixel, palette indexed
//! - 24 bits per pixel (BGR, opaque)
//! - 32 bits per pixel (BGRA, alpha taken as stored)
//! - bottom-up row order (positive height)
//!
//! Every decode produces a 4-channel, 8-bit buffer with row 0 at the top of
//! the image, in RGBA order ([`decode_bmp`]) or BGRA order
//! ([`decode_bmp_native`]).
//!
//! ## Non-Goals
//!
//! - Encoding
//! - RLE4/RLE8/bitfield compression, OS/2 and V4/V5 headers, top-down images
//! - Color management
//! - ICO/CUR containers (call this decoder per embedded image)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{BmpInfo, DecodeRequest, Limits, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let info = BmpInfo::from_bytes(data)?;
//! println!("{}x{} {}bpp", info.width, info.height, info.bit_depth);
//!
//! // Decode with a pixel budget
//! let limits = Limits::pixels(16_000_000);
//! let decoded = DecodeRequest::new(data)
//!     .with_limits(&limits)
//!     .decode(Unstoppable)?;
//! assert_eq!(decoded.pixels().len(), (decoded.width * decoded.height * 4) as usize);
//! # Ok::<(), zenbmp::BmpError>(())
//! ```
//!
//! ## Logging
//!
//! Parsed headers are reported at `debug` level and tolerated deviations at
//! `warn` level through the [`log`] facade. No logger is installed.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;

pub mod bmp;

mod decode;

// Re-exports
pub use bmp::{BI_RGB, BmpInfo, BmpPermissiveness};
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, Unsupported};
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Decode a BMP to RGBA.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a BMP to BGRA, the channel order 24/32-bit BMPs are stored in.
pub fn decode_bmp_native(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data)
        .with_layout(PixelLayout::Bgra8)
        .decode(stop)
}

/// Decode a BMP to RGBA with the given validation level.
pub fn decode_bmp_permissive(
    data: &[u8],
    permissiveness: BmpPermissiveness,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data)
        .with_permissiveness(permissiveness)
        .decode(stop)
}
