use alloc::vec::Vec;

use enough::Stop;
#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::bmp::{self, BmpInfo, BmpPermissiveness};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Decoded image: a top-down, 4-channel pixel buffer plus the parsed header.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub info: BmpInfo,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, layout: PixelLayout, info: BmpInfo) -> Self {
        Self {
            pixels,
            width: info.width,
            height: info.height,
            layout,
            info,
        }
    }

    /// Access the pixel data. Row 0 is the top of the image.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The four channel values of the pixel at (`x`, `y`), in [`Self::layout`] order.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[off..off + 4].try_into().ok()
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for a single BMP decode.
///
/// ```no_run
/// use zenbmp::{BmpPermissiveness, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits::pixels(4096 * 4096);
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Permissive)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
    layout: PixelLayout,
}

impl<'a> DecodeRequest<'a> {
    /// Decode `data` to RGBA with [`BmpPermissiveness::Standard`] and no limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
            layout: PixelLayout::Rgba8,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Output channel order. Defaults to [`PixelLayout::Rgba8`].
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BmpError> {
        bmp::decode(
            self.data,
            self.layout,
            self.permissiveness,
            self.limits,
            &stop,
        )
    }
}
