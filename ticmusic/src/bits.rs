use std::ops::RangeInclusive;

/// The values a trailing-bits header may take
pub const HEADER_RANGE: RangeInclusive<u8> = 1..=8;

/// Compute the header that records how many bits of the final unit are significant
///
/// `trailing_bits` is the number of bits written into the last, partially filled unit. A
/// stream that ends exactly on a unit boundary has zero trailing bits, and
/// its header wraps around to 8 as the Lua decoder expects.
pub fn header(trailing_bits: u8) -> u8 {
    (trailing_bits + 7) % 8 + 1
}

/// Read bit `index` (LSB first) of a value
pub fn bit(value: u8, index: u8) -> u8 {
    (value >> index) & 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps() {
        assert_eq!(header(0), 8);
        assert_eq!(header(1), 1);
        assert_eq!(header(5), 5);
        assert_eq!(header(7), 7);
    }

    #[test]
    fn lsb_first() {
        assert_eq!(bit(0b0000_0010, 0), 0);
        assert_eq!(bit(0b0000_0010, 1), 1);
        assert_eq!(bit(0b1000_0000, 7), 1);
    }
}
