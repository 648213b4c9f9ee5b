use crate::error::BmpError;

/// Resource limits checked after the header is parsed and before the
/// output buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded RGBA buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits capping only the pixel count.
    pub fn pixels(max_pixels: u64) -> Self {
        Self {
            max_pixels: Some(max_pixels),
            ..Self::default()
        }
    }

    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let exceeds = |what: &str, value: u64, max: Option<u64>| match max {
            Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        };
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    pub(crate) fn check_output_bytes(&self, bytes: usize) -> Result<(), BmpError> {
        match self.max_memory_bytes {
            Some(max_mem) if bytes as u64 > max_mem => Err(BmpError::LimitExceeded(
                alloc::format!("output buffer of {bytes} bytes exceeds memory limit {max_mem}"),
            )),
            _ => Ok(()),
        }
    }
}
