//! Packing of arbitrary bytes into printable [`alphabet`](crate::alphabet) symbols
//!
//! Bits are consumed least significant first, six at a time. Because the last symbol is
//! usually only partially filled, every packed string starts with a header symbol telling
//! the decoder how many bits of the final symbol are meaningful.

use crate::{
    alphabet::{self, SYMBOL_BITS},
    bits::{self, HEADER_RANGE},
};
use thiserror::Error;
use ux::u6;

/// Pack bytes into a string of symbols, header symbol first
///
/// ```
/// # use ticmusic::sixbit;
/// assert_eq!(sixbit::encode(&[]), "I");
/// assert_eq!(sixbit::encode(&[0xFF]), "C_D");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let mut symbols = String::with_capacity(1 + (bytes.len() * 8).div_ceil(SYMBOL_BITS as usize));

    let mut current = 0;
    let mut filled = 0;
    for byte in bytes {
        for index in 0..8 {
            current |= bits::bit(*byte, index) << filled;
            filled += 1;

            if filled == SYMBOL_BITS {
                symbols.push(alphabet::symbol(u6::new(current)));
                current = 0;
                filled = 0;
            }
        }
    }

    if filled > 0 {
        symbols.push(alphabet::symbol(u6::new(current)));
    }

    symbols.insert(0, alphabet::symbol(u6::new(bits::header(filled))));
    symbols
}

/// Unpack a string of symbols produced by [`encode()`] back into bytes
pub fn decode(symbols: &str) -> Result<Vec<u8>, DecodeError> {
    let mut values = symbols
        .chars()
        .enumerate()
        .map(|(index, symbol)| match alphabet::value(symbol) {
            Some(value) => Ok(u8::from(value)),
            None => Err(DecodeError::InvalidSymbol { symbol, index }),
        });

    let header = values.next().ok_or(DecodeError::MissingHeader)??;
    if !HEADER_RANGE.contains(&header) {
        return Err(DecodeError::InvalidHeader(header));
    }

    let values = values.collect::<Result<Vec<_>, _>>()?;
    let mut bytes = Vec::with_capacity(values.len() * SYMBOL_BITS as usize / 8);

    let mut current = 0;
    let mut filled = 0;
    for (position, value) in values.iter().enumerate() {
        let significant = if position + 1 == values.len() {
            header.min(SYMBOL_BITS)
        } else {
            SYMBOL_BITS
        };

        for index in 0..significant {
            current |= bits::bit(*value, index) << filled;
            filled += 1;

            if filled == 8 {
                bytes.push(current);
                current = 0;
                filled = 0;
            }
        }
    }

    if filled > 0 {
        return Err(DecodeError::PartialByte { bits: filled });
    }

    Ok(bytes)
}

/// Errors that might be returned from [`decode()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A character that is not part of the alphabet was found
    #[error("Character {symbol:?} at position {index} is not part of the alphabet")]
    InvalidSymbol { symbol: char, index: usize },

    /// The input was empty, so not even the header symbol was present
    #[error("The header symbol is missing")]
    MissingHeader,

    /// The header symbol holds a value outside of 1 through 8
    #[error("Header value {0} is out of range")]
    InvalidHeader(u8),

    /// The significant bits don't add up to a whole number of bytes
    #[error("{bits} bit(s) were left over after unpacking")]
    PartialByte { bits: u8 },
}
