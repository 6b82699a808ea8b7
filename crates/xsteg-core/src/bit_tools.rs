//! Bit level helpers for moving data in and out of color channels.
//!
//! All functions work most-significant-bit first: the first bit of a
//! sequence always ends up in (or comes from) the highest of the
//! addressed bits.

/// Returns the lowest `n` bits of `byte`, ordered from bit `n - 1` down to bit `0`.
///
/// ```rust
/// use xsteg_core::bit_tools::top_bits;
///
/// assert_eq!(top_bits(0b1010_0110, 3), vec![true, true, false]);
/// assert!(top_bits(0xff, 0).is_empty());
/// ```
pub fn top_bits(byte: u8, n: usize) -> Vec<bool> {
    debug_assert!(n <= 8, "a byte has no more than 8 bits, {n} requested");
    (0..n.min(8)).rev().map(|i| (byte >> i) & 1 == 1).collect()
}

/// Overwrites the lowest `bits.len()` bits of `byte` with `bits`, the first bit landing highest.
/// Bits above the written range stay untouched.
///
/// ```rust
/// use xsteg_core::bit_tools::set_low_bits;
///
/// let mut color = 0b1111_0000;
/// set_low_bits(&mut color, &[true, false, true]);
/// assert_eq!(color, 0b1111_0101);
/// ```
pub fn set_low_bits(byte: &mut u8, bits: &[bool]) {
    debug_assert!(bits.len() <= 8, "a byte has no more than 8 bits");
    let len = bits.len().min(8);
    for (i, bit) in bits.iter().take(len).enumerate() {
        let shift = len - 1 - i;
        *byte = (*byte & !(1 << shift)) | ((*bit as u8) << shift);
    }
}

/// Reassembles bytes from a flat bit sequence, discarding the first `skip_bytes` whole bytes.
/// A trailing partial byte is padded with zero bits.
pub fn pack_bits_to_bytes(bits: &[bool], skip_bytes: usize) -> Vec<u8> {
    bits.get(skip_bytes * 8..)
        .unwrap_or_default()
        .chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, bit)| byte | ((*bit as u8) << (7 - i)))
        })
        .collect()
}
