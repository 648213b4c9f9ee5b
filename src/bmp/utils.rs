//! Sub-byte index extraction and scanline stride arithmetic.

/// Palette index of pixel `index` (0..8) in a 1-bit packed byte, MSB first.
#[inline]
pub(crate) fn bit_at(byte: u8, index: usize) -> u8 {
    (byte >> (7 - index)) & 0x01
}

/// Palette index of pixel `index` (0..2) in a 4-bit packed byte, high nibble first.
#[inline]
pub(crate) fn nibble_at(byte: u8, index: usize) -> u8 {
    (byte >> (4 * (1 - index))) & 0x0f
}

/// Stored length of a sub-byte scanline: `bits_per_row` rounded up to 32 bits.
///
/// Returns `(data_bytes, padding_bytes)`.
pub(crate) fn packed_row_layout(width: usize, bits_per_pixel: usize) -> Option<(usize, usize)> {
    let bits = width.checked_mul(bits_per_pixel)?;
    let stored_bits = bits.checked_add(31)? / 32 * 32;
    let data = bits.div_ceil(8);
    Some((data, stored_bits / 8 - data))
}

/// Stored length of a whole-byte scanline: `width * bytes_per_pixel` rounded
/// up to 4 bytes.
///
/// Returns `(data_bytes, padding_bytes)`.
pub(crate) fn byte_row_layout(width: usize, bytes_per_pixel: usize) -> Option<(usize, usize)> {
    let data = width.checked_mul(bytes_per_pixel)?;
    let stored = data.checked_add(3)? & !3;
    Some((data, stored - data))
}
