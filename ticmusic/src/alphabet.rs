//! The fixed 64-character alphabet that packed data is written in

use ux::u6;

/// Every printable symbol, ordered by the 6-bit value it stands for
///
/// The downstream Lua decoder carries an identical copy of this string, so the
/// ordering can never change.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Number of bits carried by a single symbol
pub const SYMBOL_BITS: u8 = 6;

const NOT_A_SYMBOL: u8 = 0xFF;

const VALUES: [u8; 128] = {
    let mut values = [NOT_A_SYMBOL; 128];
    let mut index = 0;
    while index < ALPHABET.len() {
        values[ALPHABET[index] as usize] = index as u8;
        index += 1;
    }
    values
};

/// The symbol that represents a 6-bit value
pub fn symbol(value: u6) -> char {
    let index: u8 = value.into();
    ALPHABET[index as usize] as char
}

/// The 6-bit value of a symbol, or [`None`] if the character isn't part of the alphabet
pub fn value(symbol: char) -> Option<u6> {
    if !symbol.is_ascii() {
        return None;
    }

    match VALUES[symbol as usize] {
        NOT_A_SYMBOL => None,
        value => Some(u6::new(value)),
    }
}

/// Is a character part of the alphabet?
pub fn contains(symbol: char) -> bool {
    value(symbol).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective() {
        for (index, byte) in ALPHABET.iter().enumerate() {
            let value = u6::new(index as u8);
            assert_eq!(symbol(value), *byte as char);
            assert_eq!(super::value(*byte as char), Some(value));
        }
    }

    #[test]
    fn outsiders() {
        for character in ['#', '[', ']', '@', '$', ' ', '=', '+', '/', 'é'] {
            assert!(!contains(character), "{character} should not be a symbol");
        }
    }

    #[test]
    fn edges() {
        assert_eq!(value('A'), Some(u6::new(0)));
        assert_eq!(value('I'), Some(u6::new(8)));
        assert_eq!(value('_'), Some(u6::new(63)));
    }
}
