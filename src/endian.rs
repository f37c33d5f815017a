//! Big-endian (Motorola byte order) integer helpers.
//!
//! IFF stores every multi-byte field big-endian. The `*_at` readers are
//! bounds-checked and return `None` instead of reading past the slice.

/// Decode a big-endian `u16`.
#[inline]
pub fn u16_from_be(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Decode a big-endian `i16`.
#[inline]
pub fn i16_from_be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode a big-endian `u32`.
#[inline]
pub fn u32_from_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Decode a big-endian `i32`.
#[inline]
pub fn i32_from_be(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Encode a `u16` in big-endian order.
#[inline]
pub fn u16_to_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode an `i16` in big-endian order.
#[inline]
pub fn i16_to_be(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode a `u32` in big-endian order.
#[inline]
pub fn u32_to_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Encode an `i32` in big-endian order.
#[inline]
pub fn i32_to_be(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Swap the byte order of a 16-bit value. Self-inverse.
#[inline]
pub fn swap16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Swap the byte order of a 32-bit value. Self-inverse.
#[inline]
pub fn swap32(value: u32) -> u32 {
    value.swap_bytes()
}

#[inline]
fn array_at<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    data.get(offset..end)?.try_into().ok()
}

/// Read a byte at `offset`.
#[inline]
pub(crate) fn u8_at(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

/// Read a big-endian `u16` at `offset`.
#[inline]
pub(crate) fn u16_at(data: &[u8], offset: usize) -> Option<u16> {
    array_at(data, offset).map(u16_from_be)
}

/// Read a big-endian `i16` at `offset`.
#[inline]
pub(crate) fn i16_at(data: &[u8], offset: usize) -> Option<i16> {
    array_at(data, offset).map(i16_from_be)
}

/// Read a big-endian `u32` at `offset`.
#[inline]
pub(crate) fn u32_at(data: &[u8], offset: usize) -> Option<u32> {
    array_at(data, offset).map(u32_from_be)
}

/// Read a four-byte tag at `offset`.
#[inline]
pub(crate) fn tag_at(data: &[u8], offset: usize) -> Option<[u8; 4]> {
    array_at(data, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_matches_motorola_to_intel() {
        assert_eq!(swap32(0x0054_6500), 0x0065_5400);
        assert_eq!(swap32(0x0065_5400), 0x0054_6500);
        assert_eq!(swap16(0xf123), 0x23f1);
        assert_eq!(swap16(0x23f1), 0xf123);
    }

    #[test]
    fn swap_is_self_inverse() {
        for v in [0u32, 1, 0xdead_beef, u32::MAX, 0x8000_0000] {
            assert_eq!(swap32(swap32(v)), v);
        }
        for v in [0u16, 1, 0xbeef, u16::MAX, 0x8000] {
            assert_eq!(swap16(swap16(v)), v);
        }
    }

    #[test]
    fn be_inverse_over_extremes() {
        for v in [i16::MIN, -1, 0, 1, i16::MAX] {
            assert_eq!(i16_from_be(i16_to_be(v)), v);
        }
        for v in [i32::MIN, -1, 0, 1, i32::MAX] {
            assert_eq!(i32_from_be(i32_to_be(v)), v);
        }
        for v in [0u16, 0x1234, u16::MAX] {
            assert_eq!(u16_from_be(u16_to_be(v)), v);
        }
        for v in [0u32, 0x1234_5678, u32::MAX] {
            assert_eq!(u32_from_be(u32_to_be(v)), v);
        }
    }

    #[test]
    fn wire_order_is_most_significant_first() {
        assert_eq!(u16_from_be([0x01, 0x40]), 320);
        assert_eq!(u32_from_be([0x00, 0x00, 0x00, 0x14]), 20);
        assert_eq!(i16_from_be([0xff, 0xfe]), -2);
    }

    #[test]
    fn readers_are_bounds_checked() {
        let data = [0x12, 0x34, 0x56];
        assert_eq!(u16_at(&data, 0), Some(0x1234));
        assert_eq!(u16_at(&data, 1), Some(0x3456));
        assert_eq!(u16_at(&data, 2), None);
        assert_eq!(u32_at(&data, 0), None);
        assert_eq!(u8_at(&data, 3), None);
        assert_eq!(i16_at(&data, usize::MAX), None);
        assert_eq!(tag_at(b"FORM", 0), Some(*b"FORM"));
    }
}
