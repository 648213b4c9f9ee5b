/// Channel order of the decoded pixel buffer.
///
/// Every decode produces four 8-bit channels per pixel. Palette and 24-bit
/// images are opaque (alpha 255).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// R, G, B, A.
    Rgba8,
    /// B, G, R, A, the order BMP stores 32-bit pixels in.
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        4
    }

    /// Write one pixel given in RGBA order into `out` using this layout.
    #[inline]
    pub(crate) fn store(self, out: &mut [u8], [r, g, b, a]: [u8; 4]) {
        let px = match self {
            Self::Rgba8 => [r, g, b, a],
            Self::Bgra8 => [b, g, r, a],
        };
        out[..4].copy_from_slice(&px);
    }
}

/// Typed pixels the decoded buffer can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGRA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}
