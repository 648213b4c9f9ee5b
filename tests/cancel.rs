use enough::{Stop, StopReason, Unstoppable};
use zenbmp::*;

/// Stops once `check` has been called `after` times.
struct StopAfter {
    after: usize,
    calls: std::sync::atomic::AtomicUsize,
}

impl StopAfter {
    fn new(after: usize) -> Self {
        Self {
            after,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        let n = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if n >= self.after {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// 1x`height` 32-bit image.
fn tall(height: i32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(54 + 4 * height as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&1i32.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    out.extend(std::iter::repeat_n(0x7f, 4 * height as usize));
    out
}

#[test]
fn stopped_before_raster() {
    let data = tall(4);
    assert!(matches!(
        decode_bmp(&data, StopAfter::new(0)),
        Err(BmpError::Cancelled(_))
    ));
}

#[test]
fn stopped_between_rows() {
    let data = tall(64);
    // one check before the raster, then one every 16 rows
    assert!(matches!(
        decode_bmp(&data, StopAfter::new(3)),
        Err(BmpError::Cancelled(_))
    ));
    assert!(decode_bmp(&data, StopAfter::new(5)).is_ok());
    assert!(decode_bmp(&data, Unstoppable).is_ok());
}
