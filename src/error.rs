use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("invalid BMP signature {found:02x?}, expected \"BM\"")]
    InvalidSignature { found: [u8; 2] },

    #[error("unsupported BMP format: {0}")]
    UnsupportedFormat(Unsupported),

    #[error("truncated stream: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid BMP dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("palette index {index} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange { index: usize, len: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// The part of a BMP that falls outside what this decoder handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Unsupported {
    /// Bit depth / compression pair outside the uncompressed 1/4/8/24/32 table.
    #[error("bit depth {bit_depth} with compression {compression}")]
    Encoding { bit_depth: u16, compression: u32 },

    /// Info header other than the 40-byte `BITMAPINFOHEADER`.
    #[error("info header size {0}")]
    HeaderSize(u32),

    /// Negative height (rows stored top-down).
    #[error("top-down row order")]
    TopDown,
}

impl From<Unsupported> for BmpError {
    fn from(u: Unsupported) -> Self {
        BmpError::UnsupportedFormat(u)
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
